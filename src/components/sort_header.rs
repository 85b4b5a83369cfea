//! Sortable Column Header

use leptos::prelude::*;
use list_state::{ListRecord, SortDirection};

use super::list_view::ListHandle;

/// Column header that toggles sort direction on click
#[component]
pub fn SortHeader<R: ListRecord>(list: ListHandle<R>, field: &'static str, label: &'static str) -> impl IntoView {
    let arrow = move || {
        list.with(|c| {
            c.query().sort.iter().find(|s| s.key == field).map(|s| match s.direction {
                SortDirection::Asc => " ▲",
                SortDirection::Desc => " ▼",
            })
        })
    };

    view! {
        <th class="sortable" on:click=move |_| list.act(|c| Some(c.toggle_sort(field)))>
            {label}
            {move || arrow().unwrap_or("")}
        </th>
    }
}
