use crate::data::Game;
use crate::tier::Tier;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TierShare {
    pub tier: Tier,
    pub count: usize,
    pub percent: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub total: usize,
    pub latest_year: Option<i32>,
    pub latest_game: Option<String>,
    pub distribution: Vec<TierShare>,
}

pub fn summarize(games: &[Game]) -> Summary {
    let total = games.len();
    let latest_year = games.iter().map(|game| game.year).max();
    let latest_game = latest_year.and_then(|year| {
        games
            .iter()
            .find(|game| game.year == year)
            .map(|game| game.name.clone())
    });

    let distribution = Tier::ALL
        .into_iter()
        .map(|tier| {
            let count = games.iter().filter(|game| game.rank == tier).count();
            TierShare {
                tier,
                count,
                percent: percent_of(count, total),
            }
        })
        .collect();

    Summary {
        total,
        latest_year,
        latest_game,
        distribution,
    }
}

pub fn year_options(games: &[Game]) -> Vec<i32> {
    let mut years: Vec<i32> = games.iter().map(|game| game.year).collect();
    years.sort_unstable_by(|a, b| b.cmp(a));
    years.dedup();
    years
}

fn percent_of(count: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    (count as f64 / total as f64 * 100.0).round() as u32
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

    #[test]
    fn summary_counts_tiers_in_order() {
        let games = vec![
            game("Hades", 2020, Tier::A),
            game("Elden Ring", 2022, Tier::S),
            game("Stray", 2022, Tier::A),
        ];
        let summary = summarize(&games);

        assert_eq!(summary.total, 3);
        assert_eq!(summary.latest_year, Some(2022));
        assert_eq!(summary.latest_game.as_deref(), Some("Elden Ring"));
        assert_eq!(summary.distribution.len(), Tier::ALL.len());
        assert_eq!(summary.distribution[0].tier, Tier::S);
        assert_eq!(summary.distribution[0].percent, 33);
        assert_eq!(summary.distribution[1].count, 2);
        assert_eq!(summary.distribution[1].percent, 67);
        assert_eq!(summary.distribution[7].count, 0);
    }

    #[test]
    fn empty_collection_has_no_latest() {
        let summary = summarize(&[]);
        assert_eq!(summary.total, 0);
        assert_eq!(summary.latest_year, None);
        assert!(summary.distribution.iter().all(|share| share.percent == 0));
    }

    #[test]
    fn years_are_distinct_and_descending() {
        let games = vec![
            game("Hades", 2020, Tier::A),
            game("Elden Ring", 2022, Tier::S),
            game("Stray", 2022, Tier::A),
            game("Celeste", 2018, Tier::B),
        ];
        assert_eq!(year_options(&games), vec![2022, 2020, 2018]);
    }
}
