//! Role Endpoints

use list_state::{
    normalize_response, EndpointDescriptor, FieldKind, FieldSpec, FilterSchema, ListConfig, ListError, ListQuery,
};
use serde::Serialize;

use super::ApiClient;
use crate::config::{AppConfig, APP_NAMESPACE};
use crate::models::Role;

pub const LIST_ID: &str = "user_roles";

pub fn endpoint() -> EndpointDescriptor {
    EndpointDescriptor::new("/admin/roles").map_field("permission", "permission_ids")
}

pub fn list_config(app: &AppConfig) -> ListConfig {
    let mut config = ListConfig::new(APP_NAMESPACE, LIST_ID, endpoint());
    config.per_page_options = app.per_page_options.clone();
    config.schema = FilterSchema::new(vec![FieldSpec::new("permission", "Permission", FieldKind::Multi)]);
    config
}

/// Every role, for filter and assignment pickers
pub async fn all_roles(api: &ApiClient) -> Result<Vec<Role>, ListError> {
    let query = ListQuery::new(100);
    let body = api.get_json("/admin/roles", &query.to_params(&endpoint())).await?;
    normalize_response::<Role>(body, 1, 100).map(|r| r.items)
}

#[derive(Serialize)]
struct PermissionIdsArgs<'a> {
    permission_ids: &'a [u64],
}

pub async fn update_role_permissions(api: &ApiClient, id: u64, permission_ids: &[u64]) -> Result<Role, ListError> {
    api.put(&format!("/admin/roles/{}", id), &PermissionIdsArgs { permission_ids }).await
}
