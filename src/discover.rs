use crate::data::Game;
use rand::seq::SliceRandom;
use rand::Rng;

pub fn random_game<'a>(games: &'a [Game], rng: &mut impl Rng) -> Option<&'a Game> {
    games.choose(rng)
}

pub fn surprise_me(games: &[Game]) -> Option<&Game> {
    random_game(games, &mut rand::thread_rng())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tier::Tier;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn game(name: &str) -> Game {
        Game {
            name: name.to_string(),
            year: 2020,
            rank: Tier::B,
            picture: String::new(),
            review: String::new(),
        }
    }

    #[test]
    fn empty_collection_has_nothing_to_pick() {
        assert!(surprise_me(&[]).is_none());
    }

    #[test]
    fn every_game_can_come_up() {
        let games = vec![game("Hades"), game("Celeste"), game("Inside")];
        let mut rng = StdRng::seed_from_u64(7);
        let picked: HashSet<&str> = (0..200)
            .filter_map(|_| random_game(&games, &mut rng))
            .map(|g| g.name.as_str())
            .collect();
        assert_eq!(picked.len(), games.len());
    }
}
