//! Colour theme and its persisted preference

use std::fmt;
use std::str::FromStr;

use folio_core::{SharedStore, StoreError};
use serde::{Deserialize, Serialize};

/// Page colour theme, exposed to styles through `data-theme`
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }
}

impl FromStr for Theme {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dark" => Ok(Theme::Dark),
            "light" => Ok(Theme::Light),
            _ => Err(()),
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The theme choice as stored between visits
#[derive(Clone)]
pub struct ThemePreference {
    store: SharedStore,
    key: String,
    fallback: Theme,
}

impl ThemePreference {
    pub fn new(store: SharedStore, key: impl Into<String>, fallback: Theme) -> Self {
        Self {
            store,
            key: key.into(),
            fallback,
        }
    }

    /// Stored theme, or the fallback when absent or unrecognised
    pub fn load(&self) -> Theme {
        match self.store.get(&self.key) {
            Some(value) => value.parse().unwrap_or_else(|_| {
                tracing::debug!("ignoring unrecognised stored theme {value:?}");
                self.fallback
            }),
            None => self.fallback,
        }
    }

    pub fn save(&self, theme: Theme) -> Result<(), StoreError> {
        self.store.set(&self.key, theme.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::{KeyValueStore, MemoryStore};
    use std::sync::Arc;

    #[test]
    fn test_toggle_is_an_involution() {
        assert_eq!(Theme::Dark.toggled(), Theme::Light);
        assert_eq!(Theme::Dark.toggled().toggled(), Theme::Dark);
    }

    #[test]
    fn test_absent_or_garbage_falls_back() {
        let empty = ThemePreference::new(Arc::new(MemoryStore::new()), "theme", Theme::Dark);
        assert_eq!(empty.load(), Theme::Dark);

        let garbage = ThemePreference::new(
            Arc::new(MemoryStore::with_entries([("theme", "sepia")])),
            "theme",
            Theme::Dark,
        );
        assert_eq!(garbage.load(), Theme::Dark);
    }

    #[test]
    fn test_save_then_load() {
        let store = Arc::new(MemoryStore::new());
        let preference = ThemePreference::new(store.clone(), "theme", Theme::Dark);
        preference.save(Theme::Light).unwrap();
        assert_eq!(store.get("theme").as_deref(), Some("light"));
        assert_eq!(preference.load(), Theme::Light);
    }
}
