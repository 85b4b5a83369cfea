//! Session Password Cache
//!
//! Passwords for gated content, kept in session storage so a reader is not
//! re-prompted within the same tab.

use std::rc::Rc;

use crate::error::ListError;
use crate::storage::KeyValueStore;

const KEY_PREFIX: &str = "content_password:";

#[derive(Clone)]
pub struct PasswordCache {
    store: Rc<dyn KeyValueStore>,
}

impl PasswordCache {
    pub fn new(store: Rc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    fn key(slug_or_id: &str) -> String {
        format!("{}{}", KEY_PREFIX, slug_or_id)
    }

    /// Empty string when nothing is stored
    pub fn get_stored_password(&self, slug_or_id: &str) -> String {
        self.store.get(&Self::key(slug_or_id)).unwrap_or_default()
    }

    pub fn set_stored_password(&self, slug_or_id: &str, password: &str) {
        self.store.set(&Self::key(slug_or_id), password);
    }

    pub fn clear_stored_password(&self, slug_or_id: &str) {
        self.store.remove(&Self::key(slug_or_id));
    }
}

/// Reject an empty password before anything is sent
pub fn validate_password(input: &str) -> Result<&str, ListError> {
    if input.is_empty() {
        return Err(ListError::validation("password", "Password is required"));
    }
    Ok(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[test]
    fn test_set_then_get() {
        let cache = PasswordCache::new(Rc::new(MemoryStore::new()));
        cache.set_stored_password("slug-a", "secret");
        assert_eq!(cache.get_stored_password("slug-a"), "secret");
        assert_eq!(cache.get_stored_password("slug-b"), "");
    }

    #[test]
    fn test_clear() {
        let cache = PasswordCache::new(Rc::new(MemoryStore::new()));
        cache.set_stored_password("17", "pw");
        cache.clear_stored_password("17");
        assert_eq!(cache.get_stored_password("17"), "");
    }

    #[test]
    fn test_empty_password_rejected() {
        assert!(validate_password("").is_err());
        // spaces are a legitimate password
        assert_eq!(validate_password("  ").unwrap(), "  ");
    }
}
