use crate::data::Game;
use crate::tier::Tier;
use std::collections::HashSet;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    pub text: String,
    pub year: Option<i32>,
    pub tier: Option<Tier>,
    pub favorites_only: bool,
}

impl FilterCriteria {
    pub fn from_inputs(text: &str, year: &str, tier: &str) -> Self {
        Self {
            text: text.to_owned(),
            year: year.trim().parse().ok(),
            tier: tier.trim().parse().ok(),
            favorites_only: false,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
            && self.year.is_none()
            && self.tier.is_none()
            && !self.favorites_only
    }

    fn matches(&self, needle: &str, game: &Game, favorites: &HashSet<String>) -> bool {
        (needle.is_empty() || game.name.to_lowercase().contains(needle))
            && self.year.map_or(true, |year| game.year == year)
            && self.tier.map_or(true, |tier| game.rank == tier)
            && (!self.favorites_only || favorites.contains(&game.name))
    }
}

pub fn filter_games<'a>(
    games: &'a [Game],
    criteria: &FilterCriteria,
    favorites: &HashSet<String>,
) -> Vec<&'a Game> {
    let needle = criteria.text.to_lowercase();
    games
        .iter()
        .filter(|game| criteria.matches(&needle, game, favorites))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game(name: &str, year: i32, rank: Tier) -> Game {
        Game {
            name: name.to_string(),
            year,
            rank,
            picture: String::new(),
            review: String::new(),
        }
    }

    fn library() -> Vec<Game> {
        vec![
            game("The Legend of Zelda", 2017, Tier::S),
            game("Hades", 2020, Tier::A),
            game("Elden Ring", 2022, Tier::S),
            game("Zelda: Tears of the Kingdom", 2023, Tier::A),
            game("Celeste", 2018, Tier::NotPlayed),
        ]
    }

    fn names<'a>(games: &[&'a Game]) -> Vec<&'a str> {
        games.iter().map(|g| g.name.as_str()).collect()
    }

    #[test]
    fn text_match_is_case_insensitive_substring() {
        let games = vec![
            game("The Legend of Zelda", 2017, Tier::S),
            game("Hades", 2020, Tier::A),
        ];
        let criteria = FilterCriteria {
            text: "zelda".to_string(),
            ..Default::default()
        };
        let result = filter_games(&games, &criteria, &HashSet::new());
        assert_eq!(names(&result), vec!["The Legend of Zelda"]);
    }

    #[test]
    fn surrounding_whitespace_is_part_of_the_needle() {
        let games = library();
        let leading = FilterCriteria::from_inputs(" zelda", "", "");
        assert_eq!(
            names(&filter_games(&games, &leading, &HashSet::new())),
            vec!["The Legend of Zelda"]
        );

        let blank = FilterCriteria::from_inputs(" ", "", "");
        assert!(!blank.is_empty());
        assert_eq!(
            names(&filter_games(&games, &blank, &HashSet::new())),
            vec!["The Legend of Zelda", "Elden Ring", "Zelda: Tears of the Kingdom"]
        );
    }

    #[test]
    fn empty_criteria_keep_everything() {
        let games = library();
        let result = filter_games(&games, &FilterCriteria::default(), &HashSet::new());
        assert_eq!(result.len(), games.len());
    }

    #[test]
    fn criteria_combine() {
        let games = library();
        let criteria = FilterCriteria {
            text: "ZELDA".to_string(),
            tier: Some(Tier::A),
            ..Default::default()
        };
        let result = filter_games(&games, &criteria, &HashSet::new());
        assert_eq!(names(&result), vec!["Zelda: Tears of the Kingdom"]);

        let by_year = FilterCriteria {
            year: Some(2022),
            ..Default::default()
        };
        assert_eq!(
            names(&filter_games(&games, &by_year, &HashSet::new())),
            vec!["Elden Ring"]
        );
    }

    #[test]
    fn favorites_only_uses_supplied_set() {
        let games = library();
        let favorites: HashSet<String> = ["Celeste".to_string(), "Hades".to_string()].into();
        let criteria = FilterCriteria {
            favorites_only: true,
            ..Default::default()
        };
        assert_eq!(
            names(&filter_games(&games, &criteria, &favorites)),
            vec!["Hades", "Celeste"]
        );
    }

    #[test]
    fn output_is_an_ordered_subsequence() {
        let games = library();
        let favorites: HashSet<String> = ["Elden Ring".to_string()].into();
        let combos = [
            FilterCriteria::from_inputs("e", "", ""),
            FilterCriteria::from_inputs("", "", "S"),
            FilterCriteria::from_inputs("a", "2020", ""),
            FilterCriteria {
                favorites_only: true,
                ..FilterCriteria::from_inputs("ring", "", "S")
            },
        ];

        for criteria in combos {
            let result = filter_games(&games, &criteria, &favorites);
            let mut cursor = 0;
            for entry in &result {
                let position = games[cursor..]
                    .iter()
                    .position(|g| g == *entry)
                    .expect("filtered entry must come from the input, in order");
                cursor += position + 1;
            }
            assert_eq!(result, filter_games(&games, &criteria, &favorites));
        }
    }

    #[test]
    fn malformed_inputs_are_unset() {
        let criteria = FilterCriteria::from_inputs("", "nineteen", "Q");
        assert_eq!(criteria.year, None);
        assert_eq!(criteria.tier, None);
        assert!(criteria.is_empty());
        assert_eq!(FilterCriteria::from_inputs("", " 2020 ", "NP").tier, Some(Tier::NotPlayed));
    }
}
