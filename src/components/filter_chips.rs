//! Active Filter Chips
//!
//! One chip per applied filter value; removing a chip refetches.

use leptos::prelude::*;
use list_state::ListRecord;

use super::list_view::ListHandle;

#[component]
pub fn FilterChips<R: ListRecord>(list: ListHandle<R>) -> impl IntoView {
    let chips = move || list.with(|c| c.chips());

    view! {
        <Show when=move || !chips().is_empty()>
            <div class="filter-chips">
                {move || chips().into_iter().map(|chip| {
                    let key = chip.key.clone();
                    let value = chip.value.clone();
                    view! {
                        <span class="filter-chip">
                            <span class="chip-label">{format!("{}: {}", chip.label, chip.display)}</span>
                            <button
                                class="chip-remove"
                                on:click=move |_| list.act(|c| c.remove_filter(&key, value.as_deref()))
                            >
                                "×"
                            </button>
                        </span>
                    }
                }).collect_view()}
                <button class="chips-clear" on:click=move |_| list.act(|c| Some(c.reset_filters()))>
                    "Clear all"
                </button>
            </div>
        </Show>
    }
}
