//! Persisted Preferences
//!
//! Per-list view preferences and the legal pages' reading preferences.

use serde::{Deserialize, Serialize};

use crate::filters::Filters;
use crate::storage::{load_json, save_json, KeyValueStore};

/// Storage key for legal-page reading preferences
pub const READING_PREFS_KEY: &str = "media_legal:reading";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    List,
    Grid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LoadMode {
    /// Discrete pages, each replaces the last
    #[default]
    Pagination,
    /// Pages accumulate as the sentinel scrolls into view
    Infinite,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListPreferences {
    pub view: ViewMode,
    pub per_page: u32,
    pub filters: Filters,
    pub load_mode: LoadMode,
}

/// `media_admin:users:prefs`
pub fn prefs_key(app: &str, list: &str) -> String {
    format!("{}:{}:prefs", app, list)
}

pub fn load_preferences<S: KeyValueStore + ?Sized>(store: &S, key: &str) -> Option<ListPreferences> {
    load_json(store, key)
}

pub fn save_preferences<S: KeyValueStore + ?Sized>(store: &S, key: &str, prefs: &ListPreferences) {
    save_json(store, key, prefs);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ReadingTheme {
    #[default]
    Light,
    Sepia,
    Dark,
}

/// Terms / privacy pages remember how the reader likes them
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReadingPreferences {
    /// Percentage of the base font size
    pub font_scale: u16,
    pub theme: ReadingTheme,
}

impl ReadingPreferences {
    pub const MIN_SCALE: u16 = 80;
    pub const MAX_SCALE: u16 = 160;

    pub fn load<S: KeyValueStore + ?Sized>(store: &S) -> Self {
        let mut prefs: Self = load_json(store, READING_PREFS_KEY).unwrap_or_default();
        prefs.font_scale = prefs.font_scale.clamp(Self::MIN_SCALE, Self::MAX_SCALE);
        prefs
    }

    pub fn save<S: KeyValueStore + ?Sized>(&self, store: &S) {
        save_json(store, READING_PREFS_KEY, self);
    }

    pub fn step_font(&mut self, delta: i16) {
        let next = (self.font_scale as i32 + delta as i32).clamp(Self::MIN_SCALE as i32, Self::MAX_SCALE as i32);
        self.font_scale = next as u16;
    }
}

impl Default for ReadingPreferences {
    fn default() -> Self {
        Self {
            font_scale: 100,
            theme: ReadingTheme::Light,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::FilterValue;
    use crate::storage::MemoryStore;

    #[test]
    fn test_preferences_persist() {
        let store = MemoryStore::new();
        let key = prefs_key("media_admin", "users");
        assert_eq!(key, "media_admin:users:prefs");
        assert!(load_preferences(&store, &key).is_none());

        let prefs = ListPreferences {
            view: ViewMode::Grid,
            per_page: 50,
            filters: Filters::new().with("roles", FilterValue::multi(["2"])),
            load_mode: LoadMode::Infinite,
        };
        save_preferences(&store, &key, &prefs);
        assert_eq!(load_preferences(&store, &key), Some(prefs));
    }

    #[test]
    fn test_corrupt_preferences_ignored() {
        let store = MemoryStore::new();
        store.set("media_admin:users:prefs", "{not json");
        assert!(load_preferences(&store, "media_admin:users:prefs").is_none());
    }

    #[test]
    fn test_reading_preferences_clamped() {
        let store = MemoryStore::new();
        let mut prefs = ReadingPreferences::load(&store);
        assert_eq!(prefs, ReadingPreferences::default());

        prefs.step_font(200);
        prefs.theme = ReadingTheme::Sepia;
        prefs.save(&store);

        let loaded = ReadingPreferences::load(&store);
        assert_eq!(loaded.font_scale, ReadingPreferences::MAX_SCALE);
        assert_eq!(loaded.theme, ReadingTheme::Sepia);
    }
}
