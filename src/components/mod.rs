//! UI Components
//!
//! Reusable Leptos components. Every list page is built from the same parts:
//! `use_list` plus search, filters, chips, error banner and pagination.

mod activity_log;
mod article_library;
mod checkbox_editor;
mod confirm_button;
mod error_banner;
mod filter_chips;
mod filter_panel;
mod grid_card;
mod infinite_sentinel;
mod legal_page;
mod list_view;
mod pagination;
mod password_gate;
mod profile_form;
mod search_box;
mod share_menu;
mod sort_header;
mod toast_host;
mod toolbar;
mod user_roles_display;
mod users_table;

pub use activity_log::ActivityLog;
pub use article_library::ArticleLibrary;
pub use legal_page::LegalPage;
pub use profile_form::ProfileForm;
pub use toast_host::ToastHost;
pub use user_roles_display::UserRolesDisplay;
pub use users_table::UsersTable;
