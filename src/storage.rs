//! Browser Storage
//!
//! `localStorage` / `sessionStorage` behind the `KeyValueStore` trait.

use gloo_storage::{LocalStorage, SessionStorage, Storage};
use list_state::KeyValueStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrowserStorage {
    /// Survives restarts
    Local,
    /// Cleared when the tab closes
    Session,
}

impl BrowserStorage {
    fn raw(&self) -> web_sys::Storage {
        match self {
            BrowserStorage::Local => LocalStorage::raw(),
            BrowserStorage::Session => SessionStorage::raw(),
        }
    }
}

impl KeyValueStore for BrowserStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.raw().get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) {
        if let Err(e) = self.raw().set_item(key, value) {
            // quota exceeded or storage disabled; nothing to recover
            log::warn!("storage write failed for {}: {:?}", key, e);
        }
    }

    fn remove(&self, key: &str) {
        let _ = self.raw().remove_item(key);
    }
}
