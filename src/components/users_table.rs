//! Users Table Component
//!
//! Admin users list with search, role/status filters, sortable columns and
//! row actions (deactivate, delete).

use leptos::prelude::*;
use leptos::task::spawn_local;
use list_state::{FilterValue, ListError};

use super::checkbox_editor::CheckboxEditor;
use super::confirm_button::ConfirmButton;
use super::error_banner::ErrorBanner;
use super::filter_chips::FilterChips;
use super::filter_panel::{FilterOptions, FilterPanel};
use super::list_view::{use_list, ListHandle};
use super::pagination::Pagination;
use super::search_box::SearchBox;
use super::sort_header::SortHeader;
use crate::api::users;
use crate::context::use_app_context;
use crate::models::User;
use crate::store::{store_push_toast, use_app_store, AppStateStoreFields, ToastKind};

const STATUSES: [&str; 3] = ["active", "inactive", "pending"];

#[component]
pub fn UsersTable() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let list = use_list::<User>(users::list_config(&ctx.config()));

    let options: FilterOptions = Callback::new(move |key: &'static str| match key {
        "role" => store
            .roles()
            .get()
            .into_iter()
            .map(|r| (r.id.to_string(), r.name))
            .collect(),
        _ => Vec::new(),
    });

    let report = move |result: Result<String, ListError>| match result {
        Ok(message) => {
            store_push_toast(&store, ToastKind::Success, message);
        }
        Err(e) => {
            store_push_toast(&store, ToastKind::Error, e.banner().message);
        }
    };

    let delete = move |user: User| {
        spawn_local(async move {
            let result = users::delete_user(&ctx.api(), user.id).await;
            if result.is_ok() {
                list.mutate(|c| c.remove_item(&user.id.to_string()));
            }
            report(result.map(|_| format!("Deleted {}", user.name)));
        });
    };

    let deactivate = move |id: u64| {
        spawn_local(async move {
            let result = users::deactivate_user(&ctx.api(), id).await;
            let message = result.map(|user| {
                let message = format!("Deactivated {}", user.name);
                list.mutate(|c| c.replace_item(user));
                message
            });
            report(message);
        });
    };

    let save_roles = move |id: u64, role_ids: Vec<u64>| {
        spawn_local(async move {
            let result = users::assign_roles(&ctx.api(), id, &role_ids).await;
            let message = result.map(|user| {
                let message = format!("Updated roles of {}", user.name);
                list.mutate(|c| c.replace_item(user));
                message
            });
            report(message);
        });
    };

    let role_choices = move || {
        store
            .roles()
            .get()
            .into_iter()
            .map(|r| (r.id, r.name))
            .collect::<Vec<_>>()
    };

    view! {
        <section class="users-page">
            <header class="list-header">
                <h2>"Users"</h2>
                <SearchBox list=list placeholder="Search name or email..." />
                <FilterPanel list=list options=options />
            </header>
            <StatusTabs list=list />
            <FilterChips list=list />
            <ErrorBanner list=list />
            <table class="data-table">
                <thead>
                    <tr>
                        <SortHeader list=list field="name" label="Name" />
                        <SortHeader list=list field="email" label="Email" />
                        <th>"Roles"</th>
                        <th>"Status"</th>
                        <SortHeader list=list field="created_at" label="Joined" />
                        <th></th>
                    </tr>
                </thead>
                <tbody>
                    <Show when=move || list.with(|c| c.show_skeleton())>
                        {(0..5).map(|_| view! {
                            <tr class="skeleton-row"><td colspan="6"></td></tr>
                        }).collect_view()}
                    </Show>
                    <For
                        each=move || list.items()
                        key=|user| (user.id, user.status.clone(), user.roles.iter().map(|r| r.id).collect::<Vec<_>>())
                        children=move |user| {
                            let for_delete = user.clone();
                            let id = user.id;
                            view! {
                                <tr>
                                    <td>{user.name.clone()}</td>
                                    <td>{user.email.clone()}</td>
                                    <td class="user-roles">
                                        {user.role_names()}
                                        <CheckboxEditor
                                            options=role_choices()
                                            selected=user.roles.iter().map(|r| r.id).collect()
                                            on_save=Callback::new(move |ids| save_roles(id, ids))
                                        />
                                    </td>
                                    <td class=format!("status status-{}", user.status)>{user.status.clone()}</td>
                                    <td>{user.created_at.clone().unwrap_or_default()}</td>
                                    <td class="row-actions">
                                        <Show when={
                                            let active = user.is_active();
                                            move || active
                                        }>
                                            <ConfirmButton
                                                button_class="deactivate-btn"
                                                label="Deactivate"
                                                on_confirm=Callback::new(move |_| deactivate(id))
                                            />
                                        </Show>
                                        <ConfirmButton
                                            button_class="delete-btn"
                                            on_confirm=Callback::new(move |_| delete(for_delete.clone()))
                                        />
                                    </td>
                                </tr>
                            }
                        }
                    />
                    <Show when=move || list.with(|c| !c.is_loading() && c.items().is_empty() && c.error().is_none())>
                        <tr class="empty-row"><td colspan="6">"No users found"</td></tr>
                    </Show>
                </tbody>
            </table>
            <Pagination list=list />
        </section>
    }
}

/// Status shortcut tabs; writes the `status` filter straight to applied
#[component]
fn StatusTabs(list: ListHandle<User>) -> impl IntoView {
    let current = move || {
        list.with(|c| match c.panel().applied().get("status") {
            Some(FilterValue::Text(s)) => s.clone(),
            _ => String::new(),
        })
    };
    let select = move |status: &'static str| {
        list.act(|c| {
            if status.is_empty() {
                c.remove_filter("status", None)
            } else {
                c.set_draft("status", FilterValue::Text(status.to_string()));
                Some(c.apply_filters())
            }
        })
    };

    view! {
        <div class="status-tabs">
            <button class:active=move || current().is_empty() on:click=move |_| select("")>"All"</button>
            {STATUSES.into_iter().map(|status| view! {
                <button class:active=move || current() == status on:click=move |_| select(status)>
                    {status}
                </button>
            }).collect_view()}
        </div>
    }
}
