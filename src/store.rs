//! Global Application State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity. List data stays
//! in each list's own controller; only cross-page state lives here.

use leptos::prelude::*;
use reactive_stores::Store;

use crate::models::{Profile, Role};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
    Info,
}

impl ToastKind {
    pub fn class(&self) -> &'static str {
        match self {
            ToastKind::Success => "toast toast-success",
            ToastKind::Error => "toast toast-error",
            ToastKind::Info => "toast toast-info",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Toast {
    pub id: u32,
    pub kind: ToastKind,
    pub message: String,
}

/// Global application state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct AppState {
    /// Signed-in user's profile, once loaded
    pub profile: Option<Profile>,
    /// Role catalogue for filter and assignment pickers
    pub roles: Vec<Role>,
    /// Visible notifications, oldest first
    pub toasts: Vec<Toast>,
    pub next_toast_id: u32,
}

/// Type alias for the store
pub type AppStore = Store<AppState>;

/// Get the app store from context
pub fn use_app_store() -> AppStore {
    expect_context::<AppStore>()
}

// ========================
// Store Helper Functions
// ========================

/// Show a toast and return its id
pub fn store_push_toast(store: &AppStore, kind: ToastKind, message: impl Into<String>) -> u32 {
    let id = {
        let field = store.next_toast_id();
        let mut next = field.write();
        *next += 1;
        *next
    };
    store.toasts().write().push(Toast {
        id,
        kind,
        message: message.into(),
    });
    id
}

pub fn store_dismiss_toast(store: &AppStore, id: u32) {
    store.toasts().write().retain(|t| t.id != id);
}

pub fn store_set_profile(store: &AppStore, profile: Profile) {
    *store.profile().write() = Some(profile);
}

pub fn store_set_roles(store: &AppStore, roles: Vec<Role>) {
    *store.roles().write() = roles;
}
