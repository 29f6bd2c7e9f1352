use crate::store::StoreError;
use crate::tier::Tier;
use gloo_net::http::Request;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

pub const SEED_PATH: &str = "data/games.json";
pub const PICTURE_BASE: &str = "pictures/";
pub const PLACEHOLDER_PICTURE: &str = "pictures/placeholder.jpg";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    pub name: String,
    pub year: i32,
    pub rank: Tier,
    #[serde(default)]
    pub picture: String,
    #[serde(default)]
    pub review: String,
}

impl Game {
    pub fn picture_url(&self) -> String {
        let picture = self.picture.trim();
        if picture.is_empty() {
            PLACEHOLDER_PICTURE.to_owned()
        } else {
            format!("{}{}", PICTURE_BASE, picture)
        }
    }

    pub fn same_name(&self, other: &str) -> bool {
        self.name.to_lowercase() == other.to_lowercase()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub games: Vec<Game>,
}

#[derive(Debug, Error)]
pub enum DataError {
    #[error("Seed data not found at {0}")]
    NotFound(String),
    #[error("Network error: {0}")]
    Network(String),
    #[error("Invalid game data: {0}")]
    Parse(String),
}

impl DataError {
    fn network<E: std::fmt::Display>(err: E) -> Self {
        Self::Network(err.to_string())
    }

    fn parse<E: std::fmt::Display>(err: E) -> Self {
        Self::Parse(err.to_string())
    }
}

pub async fn fetch_seed() -> Result<Vec<Game>, DataError> {
    let response = Request::get(SEED_PATH)
        .send()
        .await
        .map_err(DataError::network)?;

    if response.status() == 404 {
        return Err(DataError::NotFound(SEED_PATH.to_owned()));
    }

    if !response.ok() {
        return Err(DataError::Network(format!(
            "HTTP {} while fetching {}",
            response.status(),
            SEED_PATH
        )));
    }

    let text = response.text().await.map_err(DataError::network)?;
    parse_snapshot(&text)
}

pub fn parse_snapshot(text: &str) -> Result<Vec<Game>, DataError> {
    let snapshot: Snapshot = serde_json::from_str(text).map_err(DataError::parse)?;
    validate_games(&snapshot.games)?;
    Ok(snapshot.games)
}

pub fn validate_games(games: &[Game]) -> Result<(), DataError> {
    let mut seen = HashSet::new();

    for (index, game) in games.iter().enumerate() {
        if game.name.trim().is_empty() {
            return Err(DataError::Parse(format!("Game {} has an empty name", index)));
        }
        if !seen.insert(game.name.to_lowercase()) {
            return Err(DataError::Parse(format!(
                "Duplicate game name '{}'",
                game.name
            )));
        }
    }

    Ok(())
}

pub fn export_json(games: &[Game]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&Snapshot {
        games: games.to_vec(),
    })
}

pub fn export_filename(date: chrono::NaiveDate) -> String {
    format!("goty-games-{}.json", date.format("%Y-%m-%d"))
}

pub fn game_ids(games: &[Game]) -> Vec<String> {
    let mut seen = HashSet::new();

    games
        .iter()
        .enumerate()
        .map(|(index, game)| {
            let mut candidate = slugify(&game.name);
            if candidate.is_empty() {
                candidate = format!("game-{}", index);
            }
            ensure_unique_id(&mut seen, candidate)
        })
        .collect()
}

fn ensure_unique_id(seen: &mut HashSet<String>, base: String) -> String {
    if seen.insert(base.clone()) {
        return base;
    }

    let mut counter = 2;
    loop {
        let candidate = format!("{}-{}", base, counter);
        if seen.insert(candidate.clone()) {
            return candidate;
        }
        counter += 1;
    }
}

fn slugify(input: &str) -> String {
    let mut slug = String::new();

    for ch in input.chars() {
        if ch.is_ascii_alphanumeric() {
            slug.push(ch.to_ascii_lowercase());
        } else if ch.is_whitespace() || matches!(ch, '-' | '_' | ':' | '\'') {
            if !slug.ends_with('-') {
                slug.push('-');
            }
        }
    }

    slug.trim_matches('-').to_string()
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GameDraft {
    pub name: String,
    pub year: String,
    pub rank: String,
    pub picture: String,
    pub review: String,
}

impl GameDraft {
    pub fn from_game(game: &Game) -> Self {
        Self {
            name: game.name.clone(),
            year: game.year.to_string(),
            rank: game.rank.code().to_owned(),
            picture: game.picture.clone(),
            review: game.review.clone(),
        }
    }

    pub fn into_game(self) -> Result<Game, StoreError> {
        let name = self.name.trim().to_string();
        if name.is_empty() {
            return Err(StoreError::InvalidField("name".to_owned()));
        }

        let year = self
            .year
            .trim()
            .parse::<i32>()
            .map_err(|_| StoreError::InvalidField("year".to_owned()))?;

        let rank = self
            .rank
            .trim()
            .parse::<Tier>()
            .map_err(|err| StoreError::InvalidRank(err.0))?;

        Ok(Game {
            name,
            year,
            rank,
            picture: self.picture.trim().to_string(),
            review: self.review.trim().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game(name: &str) -> Game {
        Game {
            name: name.to_string(),
            year: 2020,
            rank: Tier::A,
            picture: String::new(),
            review: String::new(),
        }
    }

    #[test]
    fn slugify_basic() {
        assert_eq!(slugify("The Legend of Zelda"), "the-legend-of-zelda");
        assert_eq!(slugify("Baldur's Gate 3"), "baldur-s-gate-3");
        assert_eq!(slugify("  Hades!!!  "), "hades");
    }

    #[test]
    fn game_ids_are_unique() {
        let games = vec![game("Hades"), game("Hades!"), game("???")];
        assert_eq!(game_ids(&games), vec!["hades", "hades-2", "game-2"]);
    }

    #[test]
    fn picture_falls_back_to_placeholder() {
        let mut entry = game("Hades");
        assert_eq!(entry.picture_url(), PLACEHOLDER_PICTURE);
        entry.picture = "hades.jpg".to_string();
        assert_eq!(entry.picture_url(), "pictures/hades.jpg");
    }

    #[test]
    fn parses_games_document_with_defaults() {
        let games =
            parse_snapshot(r#"{ "games": [ { "name": "Hades", "year": 2020, "rank": "NP" } ] }"#)
                .unwrap();
        assert_eq!(games.len(), 1);
        assert_eq!(games[0].rank, Tier::NotPlayed);
        assert_eq!(games[0].review, "");
    }

    #[test]
    fn rejects_unknown_rank_and_duplicates() {
        let bad_rank = r#"{ "games": [ { "name": "Hades", "year": 2020, "rank": "Z" } ] }"#;
        assert!(matches!(parse_snapshot(bad_rank), Err(DataError::Parse(_))));

        let duplicate = r#"{ "games": [
            { "name": "Hades", "year": 2020, "rank": "A" },
            { "name": "HADES", "year": 2021, "rank": "B" }
        ] }"#;
        assert!(matches!(parse_snapshot(duplicate), Err(DataError::Parse(_))));
    }

    #[test]
    fn export_uses_date_stamped_name() {
        let date = chrono::NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();
        assert_eq!(export_filename(date), "goty-games-2024-03-07.json");

        let text = export_json(&[game("Hades")]).unwrap();
        assert!(text.contains("\n  \"games\""));
        assert_eq!(parse_snapshot(&text).unwrap(), vec![game("Hades")]);
    }

    #[test]
    fn draft_validates_fields() {
        let draft = GameDraft {
            name: "  Celeste ".to_string(),
            year: "2018".to_string(),
            rank: "S".to_string(),
            picture: "celeste.png".to_string(),
            review: String::new(),
        };
        let parsed = draft.clone().into_game().unwrap();
        assert_eq!(parsed.name, "Celeste");
        assert_eq!(parsed.year, 2018);

        let bad_year = GameDraft {
            year: "soon".to_string(),
            ..draft.clone()
        };
        assert_eq!(
            bad_year.into_game(),
            Err(StoreError::InvalidField("year".to_string()))
        );

        let bad_rank = GameDraft {
            rank: "X".to_string(),
            ..draft
        };
        assert_eq!(
            bad_rank.into_game(),
            Err(StoreError::InvalidRank("X".to_string()))
        );
    }
}
