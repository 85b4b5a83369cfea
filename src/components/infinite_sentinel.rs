//! Infinite Scroll Sentinel
//!
//! An empty element at the end of a list; while it is in view the next page
//! is requested whenever the list is ready for one. The observer only reports
//! changes, so a page too short to push the sentinel away is followed up by
//! the readiness effect rather than a new callback.

use leptos::html::Div;
use leptos::prelude::*;
use list_state::{ListRecord, LoadMode};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{IntersectionObserver, IntersectionObserverEntry};

use super::list_view::ListHandle;

type ObserverSlot = Option<(IntersectionObserver, Closure<dyn FnMut(js_sys::Array)>)>;

#[component]
pub fn InfiniteSentinel<R: ListRecord>(list: ListHandle<R>) -> impl IntoView {
    let node = NodeRef::<Div>::new();
    let slot = StoredValue::new_local(ObserverSlot::None);
    let visible = RwSignal::new(false);

    Effect::new(move |_| {
        let Some(el) = node.get() else {
            return;
        };
        let callback = Closure::<dyn FnMut(js_sys::Array)>::new(move |entries: js_sys::Array| {
            let intersecting = entries
                .iter()
                .any(|e| e.unchecked_into::<IntersectionObserverEntry>().is_intersecting());
            visible.try_set(intersecting);
        });
        match IntersectionObserver::new(callback.as_ref().unchecked_ref()) {
            Ok(observer) => {
                observer.observe(&el);
                if let Some(Some((old, _))) = slot.try_update_value(|s| s.replace((observer, callback))) {
                    old.disconnect();
                }
            }
            Err(e) => log::warn!("IntersectionObserver unavailable: {:?}", e),
        }
    });

    Effect::new(move |_| {
        if visible.get() && list.with(|c| c.can_load_next()) {
            list.act(|c| c.load_next());
        }
    });

    on_cleanup(move || {
        if let Some(Some((observer, _))) = slot.try_update_value(|s| s.take()) {
            observer.disconnect();
        }
    });

    view! {
        <Show when=move || list.with(|c| c.load_mode() == LoadMode::Infinite)>
            <div class="infinite-footer">
                <Show when=move || list.with(|c| c.show_spinner())>
                    <span class="spinner">"Loading…"</span>
                </Show>
                <Show when=move || list.with(|c| !c.has_more() && !c.items().is_empty())>
                    <span class="end-of-list">"No more results"</span>
                </Show>
            </div>
        </Show>
        <div class="infinite-sentinel" node_ref=node></div>
    }
}
