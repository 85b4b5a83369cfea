//! List Toolbar Toggles
//!
//! View (list / grid) and load mode (pages / infinite) switches. Both are
//! remembered per list.

use leptos::prelude::*;
use list_state::{ListRecord, LoadMode, ViewMode};

use super::list_view::ListHandle;

#[component]
pub fn ViewToggle<R: ListRecord>(list: ListHandle<R>) -> impl IntoView {
    let view_mode = move || list.with(|c| c.view());

    view! {
        <div class="view-toggle" role="group">
            <button
                class:active=move || view_mode() == ViewMode::List
                on:click=move |_| list.mutate(|c| c.set_view(ViewMode::List))
            >
                "List"
            </button>
            <button
                class:active=move || view_mode() == ViewMode::Grid
                on:click=move |_| list.mutate(|c| c.set_view(ViewMode::Grid))
            >
                "Grid"
            </button>
        </div>
    }
}

#[component]
pub fn LoadModeToggle<R: ListRecord>(list: ListHandle<R>) -> impl IntoView {
    let infinite = move || list.with(|c| c.load_mode() == LoadMode::Infinite);

    view! {
        <label class="load-mode-toggle">
            <input
                type="checkbox"
                prop:checked=infinite
                on:change=move |ev| {
                    let mode = if event_target_checked(&ev) { LoadMode::Infinite } else { LoadMode::Pagination };
                    list.act(|c| c.set_load_mode(mode));
                }
            />
            "Infinite scroll"
        </label>
    }
}
