//! List State
//!
//! Headless state for filtered, paginated, debounced list views:
//! - debounce: trailing-edge debounce with tickets
//! - filters: draft/applied filter panel
//! - query / response / fetch: what to ask the backend and how to read the answer
//! - controller: the list-view state machine
//! - prefs / markers / password / share: small persisted helpers
//!
//! Nothing here touches the DOM; the UI crate owns timers, HTTP and storage.

mod auth;
mod controller;
mod csv_export;
mod debounce;
mod error;
mod fetch;
mod filters;
mod markers;
mod password;
mod prefs;
mod query;
mod reaction;
mod response;
mod share;
mod storage;

mod tests;

pub use auth::{Session, TOKEN_KEYS};
pub use controller::{Completion, ListConfig, ListController, Phase};
pub use csv_export::{export_csv, export_filename, CsvRow};
pub use debounce::{DebounceTicket, Debouncer, DEFAULT_DEBOUNCE_MS};
pub use error::{ErrorBanner, ListError, GENERIC_ERROR_MESSAGE};
pub use fetch::{FetchOutcome, FetchRequest, ListSource, RequestTicket};
pub use filters::{FieldKind, FieldSpec, FilterChip, FilterPanel, FilterSchema, FilterValue, Filters};
pub use markers::{MarkerStore, MARKERS_KEY};
pub use password::{validate_password, PasswordCache};
pub use prefs::{
    load_preferences, prefs_key, save_preferences, ListPreferences, LoadMode, ReadingPreferences, ReadingTheme,
    ViewMode, READING_PREFS_KEY,
};
pub use query::{EndpointDescriptor, ListQuery, SortDirection, SortKey};
pub use reaction::{PendingReaction, ReactionKind, ReactionState};
pub use response::{normalize_response, ListRecord, ListResult, PageMeta, RecordId};
pub use share::{ShareLog, ShareTarget, SHARES_KEY};
pub use storage::{load_json, save_json, KeyValueStore, MemoryStore};
