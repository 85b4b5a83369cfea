//! Search Box Component
//!
//! Debounced search input for a list view. Enter searches immediately.

use leptos::prelude::*;
use list_state::ListRecord;

use super::list_view::ListHandle;

#[component]
pub fn SearchBox<R: ListRecord>(
    list: ListHandle<R>,
    #[prop(into, default = "Search...".to_string())] placeholder: String,
) -> impl IntoView {
    let text = list.search_text();

    view! {
        <div class="search-box">
            <input
                type="search"
                placeholder=placeholder
                prop:value=move || text.get()
                on:input=move |ev| list.search_input(event_target_value(&ev))
                on:keydown=move |ev: web_sys::KeyboardEvent| {
                    if ev.key() == "Enter" {
                        ev.prevent_default();
                        list.search_now();
                    }
                }
            />
            <Show when=move || list.with(|c| c.show_spinner())>
                <span class="search-spinner" aria-label="Loading"></span>
            </Show>
        </div>
    }
}
