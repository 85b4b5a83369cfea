//! Application Context
//!
//! Session identity and configuration, provided via Leptos Context API
//! instead of reading storage from every component.

use std::rc::Rc;

use leptos::prelude::*;
use list_state::{KeyValueStore, MarkerStore, PasswordCache, Session, ShareLog};

use crate::api::ApiClient;
use crate::config::AppConfig;
use crate::storage::BrowserStorage;

/// App-wide values provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    /// Signed-in user - read
    pub session: ReadSignal<Session>,
    /// Signed-in user - write
    set_session: WriteSignal<Session>,
    config: StoredValue<AppConfig>,
}

impl AppContext {
    pub fn new(session: (ReadSignal<Session>, WriteSignal<Session>), config: AppConfig) -> Self {
        Self {
            session: session.0,
            set_session: session.1,
            config: StoredValue::new(config),
        }
    }

    pub fn config(&self) -> AppConfig {
        self.config.get_value()
    }

    /// API client carrying the current bearer token
    pub fn api(&self) -> ApiClient {
        ApiClient::new(&self.config.with_value(|c| c.api_base.clone()), self.session.get_untracked())
    }

    pub fn local_store(&self) -> Rc<dyn KeyValueStore> {
        Rc::new(BrowserStorage::Local)
    }

    pub fn session_store(&self) -> Rc<dyn KeyValueStore> {
        Rc::new(BrowserStorage::Session)
    }

    /// Favorite / read markers, shared across tabs
    pub fn markers(&self) -> MarkerStore {
        MarkerStore::new(self.local_store())
    }

    pub fn share_log(&self) -> ShareLog {
        ShareLog::new(self.local_store())
    }

    /// Content passwords, forgotten when the tab closes
    pub fn password_cache(&self) -> PasswordCache {
        PasswordCache::new(self.session_store())
    }

    /// Re-read the token after login elsewhere in the app
    pub fn refresh_session(&self) {
        self.set_session.set(Session::resolve(&BrowserStorage::Local, &BrowserStorage::Session));
    }

    /// Store a token pasted by the user and pick it up
    pub fn sign_in(&self, token: &str) {
        BrowserStorage::Local.set(list_state::TOKEN_KEYS[0], token.trim());
        self.refresh_session();
    }

    pub fn sign_out(&self) {
        Session::sign_out(&BrowserStorage::Local, &BrowserStorage::Session);
        self.set_session.set(Session::default());
    }
}

pub fn use_app_context() -> AppContext {
    expect_context::<AppContext>()
}
