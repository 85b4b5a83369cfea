//! Pagination Component
//!
//! Page navigation plus the per-page selector. Hidden in infinite mode,
//! where `InfiniteSentinel` drives loading instead.

use leptos::prelude::*;
use list_state::{ListRecord, LoadMode};

use super::list_view::ListHandle;

#[component]
pub fn Pagination<R: ListRecord>(list: ListHandle<R>) -> impl IntoView {
    let meta = move || list.with(|c| c.meta().clone());
    let per_page = move || list.with(|c| c.query().per_page);
    let options = list.with(|c| c.config().per_page_options.clone());
    let busy = move || list.with(|c| c.is_loading());

    view! {
        <Show when=move || list.with(|c| c.load_mode() == LoadMode::Pagination)>
            <nav class="pagination">
                <button
                    class="page-btn"
                    disabled=move || busy() || meta().current_page <= 1
                    on:click=move |_| list.act(|c| {
                        let page = c.meta().current_page.saturating_sub(1);
                        c.set_page(page)
                    })
                >
                    "‹ Prev"
                </button>
                <span class="page-info">
                    {move || {
                        let m = meta();
                        format!("Page {} of {} ({} total)", m.current_page, m.last_page, m.total)
                    }}
                </span>
                <button
                    class="page-btn"
                    disabled={move || busy() || meta().current_page >= meta().last_page}
                    on:click=move |_| list.act(|c| {
                        let page = c.meta().current_page + 1;
                        c.set_page(page)
                    })
                >
                    "Next ›"
                </button>
                <select
                    class="per-page"
                    on:change=move |ev| {
                        if let Ok(n) = event_target_value(&ev).parse::<u32>() {
                            list.act(|c| c.set_per_page(n));
                        }
                    }
                >
                    {options.clone().into_iter().map(|n| view! {
                        <option value=n.to_string() selected=move || per_page() == n>
                            {format!("{} / page", n)}
                        </option>
                    }).collect_view()}
                </select>
            </nav>
        </Show>
    }
}
