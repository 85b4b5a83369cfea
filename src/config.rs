//! Application Configuration
//!
//! Build-time settings, provided to components through `AppContext`.

use list_state::DEFAULT_DEBOUNCE_MS;

/// Storage namespace for list preferences
pub const APP_NAMESPACE: &str = "media_admin";

const DEFAULT_API_BASE: &str = "/api";

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Backend base URL, without trailing slash
    pub api_base: String,
    pub debounce_ms: u32,
    pub per_page_options: Vec<u32>,
    /// How long a toast stays up
    pub toast_ms: u32,
}

impl AppConfig {
    /// Read `MEDIA_ADMIN_API_BASE` at compile time, falling back to `/api`
    pub fn from_env() -> Self {
        let api_base = option_env!("MEDIA_ADMIN_API_BASE").unwrap_or(DEFAULT_API_BASE);
        Self {
            api_base: api_base.trim_end_matches('/').to_string(),
            ..Self::default()
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            per_page_options: vec![10, 25, 50, 100],
            toast_ms: 4000,
        }
    }
}
