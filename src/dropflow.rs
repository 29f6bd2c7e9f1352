use crate::storage::KeyValueStore;
use crate::store::{GameStore, Persistence, StoreError};
use crate::tier::Tier;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DragFlow {
    #[default]
    Idle,
    Dragging { name: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankChange {
    pub name: String,
    pub from: Tier,
    pub to: Tier,
    pub persistence: Persistence,
}

impl DragFlow {
    pub fn start(&mut self, name: &str) {
        *self = DragFlow::Dragging {
            name: name.to_owned(),
        };
    }

    pub fn cancel(&mut self) {
        *self = DragFlow::Idle;
    }

    pub fn dragged(&self) -> Option<&str> {
        match self {
            DragFlow::Idle => None,
            DragFlow::Dragging { name } => Some(name),
        }
    }

    // The flow is idle afterwards whatever the outcome.
    pub fn drop_on<S: KeyValueStore>(
        &mut self,
        zone: &str,
        store: &mut GameStore<S>,
    ) -> Result<Option<RankChange>, StoreError> {
        let DragFlow::Dragging { name } = std::mem::take(self) else {
            return Ok(None);
        };

        let to = Tier::from_zone_id(zone).map_err(|err| StoreError::InvalidRank(err.0))?;
        let from = store
            .get(&name)
            .map(|game| game.rank)
            .ok_or_else(|| StoreError::NotFound(name.clone()))?;
        let persistence = store.set_rank(&name, to)?;

        Ok(Some(RankChange {
            name,
            from,
            to,
            persistence,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Game;
    use crate::storage::{MemoryStorage, STORAGE_KEY};

    fn store_with_hades(backend: &MemoryStorage) -> GameStore<&MemoryStorage> {
        let hades = Game {
            name: "Hades".to_string(),
            year: 2020,
            rank: Tier::A,
            picture: String::new(),
            review: String::new(),
        };
        GameStore::from_seed(backend, Ok(vec![hades])).0
    }

    #[test]
    fn drop_moves_game_into_zone_tier() {
        let backend = MemoryStorage::new();
        let mut store = store_with_hades(&backend);
        let mut flow = DragFlow::default();

        flow.start("Hades");
        let change = flow.drop_on("tier-s", &mut store).unwrap().unwrap();

        assert_eq!(change.from, Tier::A);
        assert_eq!(change.to, Tier::S);
        assert!(change.persistence.is_saved());
        assert_eq!(store.get("Hades").unwrap().rank, Tier::S);
        assert_eq!(flow, DragFlow::Idle);
    }

    #[test]
    fn cancel_performs_no_mutation() {
        let backend = MemoryStorage::new();
        let mut store = store_with_hades(&backend);
        let mut flow = DragFlow::default();

        flow.start("Hades");
        assert_eq!(flow.dragged(), Some("Hades"));
        flow.cancel();

        assert_eq!(flow.drop_on("tier-s", &mut store), Ok(None));
        assert_eq!(store.get("Hades").unwrap().rank, Tier::A);
        assert_eq!(backend.raw(STORAGE_KEY), None);
    }

    #[test]
    fn unknown_zone_is_invalid_rank() {
        let backend = MemoryStorage::new();
        let mut store = store_with_hades(&backend);
        let mut flow = DragFlow::default();

        flow.start("Hades");
        assert_eq!(
            flow.drop_on("tier-z", &mut store),
            Err(StoreError::InvalidRank("tier-z".to_string()))
        );
        assert_eq!(flow, DragFlow::Idle);
        assert_eq!(store.get("Hades").unwrap().rank, Tier::A);
        assert_eq!(backend.raw(STORAGE_KEY), None);
    }

    #[test]
    fn dragged_game_removed_meanwhile_is_not_found() {
        let backend = MemoryStorage::new();
        let mut store = store_with_hades(&backend);
        let mut flow = DragFlow::default();

        flow.start("Hades");
        store.remove("Hades").unwrap();

        assert_eq!(
            flow.drop_on("tier-b", &mut store),
            Err(StoreError::NotFound("Hades".to_string()))
        );
    }
}
