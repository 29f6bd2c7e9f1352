use crate::data::Game;

pub const COMPARE_LIMIT: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pick {
    Added,
    Removed,
    Full,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    names: Vec<String>,
}

impl Selection {
    pub fn toggle(&mut self, name: &str) -> Pick {
        if let Some(index) = self.names.iter().position(|selected| selected == name) {
            self.names.remove(index);
            return Pick::Removed;
        }
        if self.names.len() >= COMPARE_LIMIT {
            return Pick::Full;
        }
        self.names.push(name.to_owned());
        Pick::Added
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|selected| selected == name)
    }

    pub fn is_complete(&self) -> bool {
        self.names.len() == COMPARE_LIMIT
    }

    // Selection order is kept; names no longer in `games` are skipped.
    pub fn resolve<'a>(&self, games: &'a [Game]) -> Vec<&'a Game> {
        self.names
            .iter()
            .filter_map(|name| games.iter().find(|game| &game.name == name))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tier::Tier;

    fn game(name: &str, rank: Tier) -> Game {
        Game {
            name: name.to_string(),
            year: 2020,
            rank,
            picture: String::new(),
            review: String::new(),
        }
    }

    #[test]
    fn third_pick_is_refused() {
        let mut selection = Selection::default();

        assert_eq!(selection.toggle("Hades"), Pick::Added);
        assert!(!selection.is_complete());
        assert_eq!(selection.toggle("Celeste"), Pick::Added);
        assert!(selection.is_complete());
        assert_eq!(selection.toggle("Inside"), Pick::Full);

        assert!(selection.contains("Hades") && selection.contains("Celeste"));
        assert!(!selection.contains("Inside"));
    }

    #[test]
    fn picking_again_deselects() {
        let mut selection = Selection::default();
        selection.toggle("Hades");
        selection.toggle("Celeste");

        assert_eq!(selection.toggle("Hades"), Pick::Removed);
        assert_eq!(selection.toggle("Inside"), Pick::Added);
        assert!(selection.contains("Celeste") && selection.contains("Inside"));
    }

    #[test]
    fn names_match_exactly() {
        let mut selection = Selection::default();
        selection.toggle("Hades");

        assert!(!selection.contains("hades"));
        assert_eq!(selection.toggle("hades"), Pick::Added);
    }

    #[test]
    fn resolve_keeps_pick_order_and_skips_removed_games() {
        let games = vec![
            game("Hades", Tier::A),
            game("Celeste", Tier::B),
            game("Inside", Tier::C),
        ];
        let mut selection = Selection::default();
        selection.toggle("Inside");
        selection.toggle("Hades");

        let picked: Vec<_> = selection.resolve(&games).iter().map(|g| g.name.as_str()).collect();
        assert_eq!(picked, vec!["Inside", "Hades"]);

        let remaining = vec![game("Hades", Tier::A)];
        assert_eq!(selection.resolve(&remaining).len(), 1);
        assert!(Selection::default().resolve(&games).is_empty());
    }
}
