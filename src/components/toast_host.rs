//! Toast Host Component
//!
//! Renders store toasts and dismisses each after a delay. Pending timers are
//! dropped when the host unmounts.

use std::collections::HashMap;

use gloo_timers::callback::Timeout;
use leptos::prelude::*;

use crate::context::use_app_context;
use crate::store::{store_dismiss_toast, use_app_store, AppStateStoreFields};

#[component]
pub fn ToastHost() -> impl IntoView {
    let store = use_app_store();
    let delay = use_app_context().config().toast_ms;
    let timers = StoredValue::new_local(HashMap::<u32, Timeout>::new());

    Effect::new(move |_| {
        let ids: Vec<u32> = store.toasts().get().iter().map(|t| t.id).collect();
        timers.update_value(|timers| {
            timers.retain(|id, _| ids.contains(id));
            for id in ids {
                timers.entry(id).or_insert_with(|| {
                    Timeout::new(delay, move || {
                        store_dismiss_toast(&store, id);
                    })
                });
            }
        });
    });

    on_cleanup(move || {
        timers.try_update_value(|timers| timers.clear());
    });

    view! {
        <div class="toast-host" aria-live="polite">
            <For
                each=move || store.toasts().get()
                key=|toast| toast.id
                children=move |toast| {
                    let id = toast.id;
                    view! {
                        <div class=toast.kind.class()>
                            <span>{toast.message}</span>
                            <button class="toast-close" on:click=move |_| store_dismiss_toast(&store, id)>
                                "×"
                            </button>
                        </div>
                    }
                }
            />
        </div>
    }
}
