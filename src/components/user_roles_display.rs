//! User Roles Display Component
//!
//! Roles with their permissions, filterable by permission.

use std::collections::BTreeMap;

use leptos::prelude::*;
use leptos::task::spawn_local;

use super::checkbox_editor::CheckboxEditor;
use super::error_banner::ErrorBanner;
use super::filter_chips::FilterChips;
use super::filter_panel::{FilterOptions, FilterPanel};
use super::list_view::use_list;
use super::pagination::Pagination;
use super::search_box::SearchBox;
use crate::api::roles;
use crate::context::use_app_context;
use crate::models::Role;
use crate::store::{store_push_toast, use_app_store, AppStateStoreFields, ToastKind};

#[component]
pub fn UserRolesDisplay() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let list = use_list::<Role>(roles::list_config(&ctx.config()));

    // every permission granted by some role
    let permissions = move || {
        store
            .roles()
            .get()
            .into_iter()
            .flat_map(|r| r.permissions)
            .map(|p| (p.id, p.name))
            .collect::<BTreeMap<u64, String>>()
    };

    let options: FilterOptions = Callback::new(move |key: &'static str| {
        if key != "permission" {
            return Vec::new();
        }
        permissions().into_iter().map(|(id, name)| (id.to_string(), name)).collect()
    });

    let save_permissions = move |id: u64, permission_ids: Vec<u64>| {
        spawn_local(async move {
            match roles::update_role_permissions(&ctx.api(), id, &permission_ids).await {
                Ok(role) => {
                    store_push_toast(&store, ToastKind::Success, format!("Updated {}", role.name));
                    list.mutate(|c| c.replace_item(role));
                }
                Err(e) => {
                    store_push_toast(&store, ToastKind::Error, e.banner().message);
                }
            }
        });
    };

    view! {
        <section class="roles-page">
            <header class="list-header">
                <h2>"Roles & Permissions"</h2>
                <SearchBox list=list placeholder="Search roles..." />
                <FilterPanel list=list options=options />
            </header>
            <FilterChips list=list />
            <ErrorBanner list=list />
            <Show when=move || list.with(|c| c.show_skeleton())>
                <div class="skeleton-card"></div>
            </Show>
            <div class="role-list">
                <For
                    each=move || list.items()
                    key=|role| (role.id, role.permissions.iter().map(|p| p.id).collect::<Vec<_>>())
                    children=move |role| {
                        let id = role.id;
                        view! {
                        <article class="role-card">
                            <header>
                                <h3>{role.name.clone()}</h3>
                                <span class="role-users">{format!("{} users", role.users_count)}</span>
                            </header>
                            {role.description.clone().map(|d| view! { <p class="role-description">{d}</p> })}
                            <ul class="permission-list">
                                {role.permissions.iter().map(|p| view! {
                                    <li class="permission-badge">{p.name.clone()}</li>
                                }).collect_view()}
                            </ul>
                            <CheckboxEditor
                                label="Edit permissions"
                                options=permissions().into_iter().collect()
                                selected=role.permissions.iter().map(|p| p.id).collect()
                                on_save=Callback::new(move |ids| save_permissions(id, ids))
                            />
                        </article>
                        }
                    }
                />
            </div>
            <Show when=move || list.with(|c| !c.is_loading() && c.items().is_empty() && c.error().is_none())>
                <p class="empty-state">"No roles match"</p>
            </Show>
            <Pagination list=list />
        </section>
    }
}
