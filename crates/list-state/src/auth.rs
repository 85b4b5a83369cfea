//! Session Identity
//!
//! The bearer token has lived under more than one storage key over time;
//! every known key is checked, local storage first.

use serde::{Deserialize, Serialize};

use crate::storage::KeyValueStore;

/// Known token keys, most recent first
pub const TOKEN_KEYS: [&str; 2] = ["auth_token", "tokenGuard"];
pub const USER_ID_KEY: &str = "user_id";

/// Who is signed in
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub user_id: Option<u64>,
    pub token: Option<String>,
}

impl Session {
    /// Look up the session in `local`, then `session` storage
    pub fn resolve(local: &dyn KeyValueStore, session: &dyn KeyValueStore) -> Self {
        let token = [local, session]
            .iter()
            .flat_map(|store| TOKEN_KEYS.iter().map(move |key| store.get(key)))
            .flatten()
            .map(|t| t.trim().trim_matches('"').to_string())
            .find(|t| !t.is_empty());
        let user_id = [local, session]
            .iter()
            .find_map(|store| store.get(USER_ID_KEY))
            .and_then(|raw| raw.trim().parse().ok());
        Self { user_id, token }
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Value for the `Authorization` header
    pub fn bearer(&self) -> Option<String> {
        self.token.as_ref().map(|t| format!("Bearer {}", t))
    }

    /// Forget the token under every known key
    pub fn sign_out(local: &dyn KeyValueStore, session: &dyn KeyValueStore) {
        for store in [local, session] {
            for key in TOKEN_KEYS {
                store.remove(key);
            }
            store.remove(USER_ID_KEY);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[test]
    fn test_local_auth_token_wins() {
        let local = MemoryStore::new();
        let session = MemoryStore::new();
        local.set("tokenGuard", "old");
        local.set("auth_token", "new");
        session.set("auth_token", "tab");

        let s = Session::resolve(&local, &session);
        assert_eq!(s.bearer().as_deref(), Some("Bearer new"));
    }

    #[test]
    fn test_falls_back_to_legacy_key_and_session() {
        let local = MemoryStore::new();
        let session = MemoryStore::new();
        session.set("tokenGuard", "\"quoted\"");
        session.set("user_id", "12");

        let s = Session::resolve(&local, &session);
        assert_eq!(s.token.as_deref(), Some("quoted"));
        assert_eq!(s.user_id, Some(12));
    }

    #[test]
    fn test_sign_out_clears_everything() {
        let local = MemoryStore::new();
        let session = MemoryStore::new();
        local.set("auth_token", "t");
        session.set("tokenGuard", "t");

        Session::sign_out(&local, &session);
        assert!(!Session::resolve(&local, &session).is_authenticated());
    }
}
