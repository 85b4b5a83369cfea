//! Activity Log Component
//!
//! One component for both activity pages; `Scope` picks the endpoint, the
//! filters and where preferences are stored. The loaded page can be exported
//! as CSV.

use leptos::prelude::*;
use list_state::{export_csv, export_filename};

use super::error_banner::ErrorBanner;
use super::filter_chips::FilterChips;
use super::filter_panel::FilterPanel;
use super::infinite_sentinel::InfiniteSentinel;
use super::list_view::use_list;
use super::pagination::Pagination;
use super::search_box::SearchBox;
use super::sort_header::SortHeader;
use super::toolbar::LoadModeToggle;
use crate::api::activity::{self, Scope};
use crate::browser;
use crate::context::use_app_context;
use crate::models::ActivityEntry;
use crate::store::{store_push_toast, use_app_store, ToastKind};

#[component]
pub fn ActivityLog(scope: Scope) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let list = use_list::<ActivityEntry>(activity::list_config(scope, &ctx.config()));

    let export = move |_| {
        let rows = list.items_untracked();
        let filename = export_filename(scope.export_prefix(), chrono::Local::now().date_naive());
        let result = export_csv(&rows)
            .map_err(|e| e.banner().message)
            .and_then(|csv| browser::download_text(&filename, "text/csv;charset=utf-8", &csv));
        match result {
            Ok(()) => log::info!("exported {} rows to {}", rows.len(), filename),
            Err(e) => {
                store_push_toast(&store, ToastKind::Error, format!("Export failed: {}", e));
            }
        }
    };

    view! {
        <section class="activity-page">
            <header class="list-header">
                <h2>{scope.title()}</h2>
                <SearchBox list=list placeholder="Search activity..." />
                <FilterPanel list=list />
                <LoadModeToggle list=list />
                <button
                    class="export-btn"
                    disabled=move || list.with(|c| c.items().is_empty())
                    on:click=export
                >
                    "Export CSV"
                </button>
            </header>
            <FilterChips list=list />
            <ErrorBanner list=list />
            <table class="data-table">
                <thead>
                    <tr>
                        <SortHeader list=list field="type" label="Type" />
                        <th>"Title"</th>
                        {(scope == Scope::All).then(|| view! { <th>"Actor"</th> })}
                        <SortHeader list=list field="created_at" label="When" />
                    </tr>
                </thead>
                <tbody>
                    <Show when=move || list.with(|c| c.show_skeleton())>
                        {(0..5).map(|_| view! {
                            <tr class="skeleton-row"><td colspan="4"></td></tr>
                        }).collect_view()}
                    </Show>
                    <For
                        each=move || list.items()
                        key=|entry| entry.id
                        children=move |entry| view! {
                            <tr>
                                <td><span class=format!("activity-type type-{}", entry.kind)>{entry.kind.clone()}</span></td>
                                <td>{entry.title.clone()}</td>
                                {(scope == Scope::All).then(|| view! {
                                    <td>{entry.actor.as_ref().map(|a| a.name.clone()).unwrap_or_default()}</td>
                                })}
                                <td>{entry.created_at.clone()}</td>
                            </tr>
                        }
                    />
                    <Show when=move || list.with(|c| !c.is_loading() && c.items().is_empty() && c.error().is_none())>
                        <tr class="empty-row"><td colspan="4">"No activity yet"</td></tr>
                    </Show>
                </tbody>
            </table>
            <Pagination list=list />
            <InfiniteSentinel list=list />
        </section>
    }
}
