//! User Endpoints
//!
//! Admin users table: listing, deletion, deactivation and role assignment.

use list_state::{EndpointDescriptor, FieldKind, FieldSpec, FilterSchema, ListConfig, ListError, SortKey};
use serde::Serialize;

use super::ApiClient;
use crate::config::{AppConfig, APP_NAMESPACE};
use crate::models::User;

pub const LIST_ID: &str = "users";

pub fn endpoint() -> EndpointDescriptor {
    EndpointDescriptor::new("/admin/users").map_field("role", "role_id")
}

pub fn list_config(app: &AppConfig) -> ListConfig {
    let mut config = ListConfig::new(APP_NAMESPACE, LIST_ID, endpoint());
    config.per_page_options = app.per_page_options.clone();
    config.schema = FilterSchema::new(vec![
        FieldSpec::new("role", "Role", FieldKind::Multi),
        FieldSpec::new("status", "Status", FieldKind::Text),
    ]);
    config.default_sort = vec![SortKey::desc("created_at")];
    config
}

#[derive(Serialize)]
struct RoleIdsArgs<'a> {
    role_ids: &'a [u64],
}

pub async fn delete_user(api: &ApiClient, id: u64) -> Result<(), ListError> {
    api.delete(&format!("/admin/users/{}", id)).await
}

pub async fn deactivate_user(api: &ApiClient, id: u64) -> Result<User, ListError> {
    api.post(&format!("/admin/users/{}/deactivate", id), &serde_json::json!({})).await
}

pub async fn assign_roles(api: &ApiClient, id: u64, role_ids: &[u64]) -> Result<User, ListError> {
    api.put(&format!("/admin/users/{}/roles", id), &RoleIdsArgs { role_ids }).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use list_state::{FilterValue, ListQuery};

    #[test]
    fn test_role_filter_maps_to_role_id() {
        let mut query = ListQuery::new(25);
        query.filters.set("role", FilterValue::multi(["2", "5"]));
        let params = query.to_params(&endpoint());
        assert!(params.contains(&("role_id".to_string(), "2,5".to_string())));
    }
}
