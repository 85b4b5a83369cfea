//! Activity Log Endpoints
//!
//! One list family, two scopes: the signed-in user's own activity and the
//! admin-wide log.

use list_state::{EndpointDescriptor, FieldKind, FieldSpec, FilterSchema, ListConfig, SortKey};

use crate::config::{AppConfig, APP_NAMESPACE};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// Activity targeting the current user
    Mine,
    /// Everything, admin only
    All,
}

impl Scope {
    pub fn list_id(&self) -> &'static str {
        match self {
            Scope::Mine => "activity_mine",
            Scope::All => "activity_all",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Scope::Mine => "My Activity",
            Scope::All => "Activity Log",
        }
    }

    pub fn export_prefix(&self) -> &'static str {
        match self {
            Scope::Mine => "my-activity",
            Scope::All => "activity-log",
        }
    }
}

pub fn endpoint(scope: Scope) -> EndpointDescriptor {
    match scope {
        Scope::Mine => EndpointDescriptor::new("/activity-logs").fixed("as_target", "1"),
        Scope::All => EndpointDescriptor::new("/admin/activity-logs").map_field("actor", "actor_id"),
    }
}

pub fn list_config(scope: Scope, app: &AppConfig) -> ListConfig {
    let mut fields = vec![
        FieldSpec::new("type", "Type", FieldKind::Multi),
        FieldSpec::new("date", "Date", FieldKind::DateRange),
    ];
    if scope == Scope::All {
        fields.insert(0, FieldSpec::new("actor", "Actor", FieldKind::Text));
    }
    let mut config = ListConfig::new(APP_NAMESPACE, scope.list_id(), endpoint(scope));
    config.per_page_options = app.per_page_options.clone();
    config.schema = FilterSchema::new(fields);
    config.default_sort = vec![SortKey::desc("created_at")];
    config
}

#[cfg(test)]
mod tests {
    use super::*;
    use list_state::{FilterValue, ListQuery};

    fn has(params: &[(String, String)], name: &str, value: &str) -> bool {
        params.iter().any(|(n, v)| n == name && v == value)
    }

    #[test]
    fn test_mine_scope_sends_as_target() {
        let params = ListQuery::new(10).to_params(&endpoint(Scope::Mine));
        assert!(has(&params, "as_target", "1"));
    }

    #[test]
    fn test_all_scope_filter_names() {
        let mut query = ListQuery::new(10);
        query.filters.set("actor", FilterValue::Text("7".into()));
        query.filters.set(
            "date",
            FilterValue::DateRange {
                from: Some("2024-01-01".into()),
                to: Some("2024-01-31".into()),
            },
        );
        let params = query.to_params(&endpoint(Scope::All));
        assert!(has(&params, "actor_id", "7"));
        assert!(has(&params, "date_from", "2024-01-01"));
        assert!(has(&params, "date_to", "2024-01-31"));
        assert!(!params.iter().any(|(n, _)| n == "as_target"));
    }

    #[test]
    fn test_scopes_persist_separately() {
        let app = AppConfig::default();
        assert_ne!(
            list_config(Scope::Mine, &app).storage_key(),
            list_config(Scope::All, &app).storage_key()
        );
    }
}
