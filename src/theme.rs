use crate::storage::KeyValueStore;
use log::warn;
use serde::{Deserialize, Serialize};

const THEME_KEY: &str = "theme";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Theme::Light => "🌙",
            Theme::Dark => "☀️",
        }
    }

    pub fn load<S: KeyValueStore>(backend: &S) -> Self {
        backend
            .get::<Theme>(THEME_KEY)
            .ok()
            .flatten()
            .unwrap_or_default()
    }

    pub fn save<S: KeyValueStore>(self, backend: &S) {
        if let Err(err) = backend.set(THEME_KEY, &self) {
            warn!("Failed to persist theme: {}", err);
        }
    }
}
