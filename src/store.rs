use crate::data::{fetch_seed, DataError, Game};
use crate::storage::{load_snapshot, save_snapshot, KeyValueStore};
use crate::tier::Tier;
use log::{info, warn};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("A game named '{0}' already exists")]
    DuplicateName(String),
    #[error("No game named '{0}'")]
    NotFound(String),
    #[error("Unknown tier '{0}'")]
    InvalidRank(String),
    #[error("Invalid value for {0}")]
    InvalidField(String),
}

// A failed write is reported but never undoes the in-memory change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Persistence {
    Saved,
    Failed(String),
}

#[cfg(test)]
impl Persistence {
    pub fn is_saved(&self) -> bool {
        matches!(self, Persistence::Saved)
    }
}

#[derive(Debug)]
pub enum LoadOutcome {
    Persisted(usize),
    Seeded(usize),
    Failed(DataError),
}

pub struct GameStore<S: KeyValueStore> {
    backend: S,
    games: Vec<Game>,
}

impl<S: KeyValueStore> GameStore<S> {
    pub fn empty(backend: S) -> Self {
        Self {
            backend,
            games: Vec::new(),
        }
    }

    pub fn from_persisted(backend: S) -> Result<Self, S> {
        match load_snapshot(&backend) {
            Some(snapshot) if !snapshot.games.is_empty() => Ok(Self {
                backend,
                games: snapshot.games,
            }),
            _ => Err(backend),
        }
    }

    pub fn from_seed(backend: S, seed: Result<Vec<Game>, DataError>) -> (Self, LoadOutcome) {
        match seed {
            Ok(games) => {
                let count = games.len();
                (Self { backend, games }, LoadOutcome::Seeded(count))
            }
            Err(err) => {
                warn!("Starting with an empty tier list: {}", err);
                (Self::empty(backend), LoadOutcome::Failed(err))
            }
        }
    }

    pub async fn load(backend: S) -> (Self, LoadOutcome) {
        match Self::from_persisted(backend) {
            Ok(store) => {
                let count = store.games.len();
                info!("Loaded {} games from local storage", count);
                (store, LoadOutcome::Persisted(count))
            }
            Err(backend) => {
                let seed = fetch_seed().await;
                let (store, outcome) = Self::from_seed(backend, seed);
                if let LoadOutcome::Seeded(count) = outcome {
                    info!("Loaded {} games from seed data", count);
                }
                (store, outcome)
            }
        }
    }

    pub fn games(&self) -> &[Game] {
        &self.games
    }

    pub fn get(&self, name: &str) -> Option<&Game> {
        self.games.iter().find(|game| game.name == name)
    }

    pub fn add(&mut self, game: Game) -> Result<Persistence, StoreError> {
        check_name(&game.name)?;
        if self.games.iter().any(|existing| existing.same_name(&game.name)) {
            return Err(StoreError::DuplicateName(game.name));
        }
        self.games.push(game);
        Ok(self.persist())
    }

    pub fn update(&mut self, name: &str, game: Game) -> Result<Persistence, StoreError> {
        let index = self.position(name)?;
        check_name(&game.name)?;
        let collides = self
            .games
            .iter()
            .enumerate()
            .any(|(i, existing)| i != index && existing.same_name(&game.name));
        if collides {
            return Err(StoreError::DuplicateName(game.name));
        }
        self.games[index] = game;
        Ok(self.persist())
    }

    pub fn remove(&mut self, name: &str) -> Result<Persistence, StoreError> {
        let index = self.position(name)?;
        self.games.remove(index);
        Ok(self.persist())
    }

    pub fn set_rank(&mut self, name: &str, rank: Tier) -> Result<Persistence, StoreError> {
        let index = self.position(name)?;
        self.games[index].rank = rank;
        Ok(self.persist())
    }

    pub fn set_rank_str(&mut self, name: &str, rank: &str) -> Result<Persistence, StoreError> {
        let rank = rank
            .parse::<Tier>()
            .map_err(|err| StoreError::InvalidRank(err.0))?;
        self.set_rank(name, rank)
    }

    fn position(&self, name: &str) -> Result<usize, StoreError> {
        self.games
            .iter()
            .position(|game| game.name == name)
            .ok_or_else(|| StoreError::NotFound(name.to_owned()))
    }

    fn persist(&self) -> Persistence {
        match save_snapshot(&self.backend, &self.games) {
            Ok(()) => Persistence::Saved,
            Err(err) => {
                warn!("Failed to persist games: {}", err);
                Persistence::Failed(err.to_string())
            }
        }
    }
}

// Snapshots holding a blank name are rejected on load.
fn check_name(name: &str) -> Result<(), StoreError> {
    if name.trim().is_empty() {
        return Err(StoreError::InvalidField("name".to_owned()));
    }
    Ok(())
}
