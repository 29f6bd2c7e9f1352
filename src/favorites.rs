use crate::data::Game;
use crate::storage::KeyValueStore;
use crate::tier::Tier;
use log::warn;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

const FAVORITES_KEY: &str = "gotyFavorites";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FavoriteEntry {
    pub name: String,
    pub year: i32,
    pub rank: Tier,
    #[serde(default)]
    pub picture: String,
}

impl From<&Game> for FavoriteEntry {
    fn from(game: &Game) -> Self {
        Self {
            name: game.name.clone(),
            year: game.year,
            rank: game.rank,
            picture: game.picture.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Favorites {
    entries: Vec<FavoriteEntry>,
}

impl Favorites {
    pub fn load<S: KeyValueStore>(backend: &S) -> Self {
        match backend.get::<Vec<FavoriteEntry>>(FAVORITES_KEY) {
            Ok(entries) => Self {
                entries: entries.unwrap_or_default(),
            },
            Err(err) => {
                warn!("Ignoring stored favorites: {}", err);
                Self::default()
            }
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|entry| entry.name == name)
    }

    pub fn names(&self) -> HashSet<String> {
        self.entries.iter().map(|entry| entry.name.clone()).collect()
    }

    pub fn toggle<S: KeyValueStore>(&mut self, backend: &S, game: &Game) -> bool {
        let now_favorite = match self.entries.iter().position(|entry| entry.name == game.name) {
            Some(index) => {
                self.entries.remove(index);
                false
            }
            None => {
                self.entries.push(FavoriteEntry::from(game));
                true
            }
        };

        if let Err(err) = backend.set(FAVORITES_KEY, &self.entries) {
            warn!("Failed to persist favorites: {}", err);
        }
        now_favorite
    }
}
