//! List View Hook
//!
//! Binds a `ListController` to Leptos: holds the controller in a local
//! signal, performs the requests it hands back, and owns the debounce timer
//! and the abort handle of the in-flight request.

use std::rc::Rc;

use futures::future::{abortable, AbortHandle};
use gloo_timers::callback::Timeout;
use leptos::prelude::*;
use leptos::task::spawn_local;
use list_state::{
    Completion, Debouncer, FetchOutcome, FetchRequest, ListConfig, ListController, ListRecord, ListSource,
};
use serde::de::DeserializeOwned;

use crate::api::HttpListSource;
use crate::context::use_app_context;

/// Copyable handle to one list instance
pub struct ListHandle<R: 'static> {
    state: RwSignal<ListController<R>, LocalStorage>,
    /// Raw search box text, ahead of the debounced query
    search: RwSignal<String>,
    debouncer: StoredValue<Debouncer<String>, LocalStorage>,
    timer: StoredValue<Option<Timeout>, LocalStorage>,
    abort: StoredValue<Option<AbortHandle>, LocalStorage>,
    source: StoredValue<Rc<dyn ListSource<R>>, LocalStorage>,
}

impl<R: 'static> Clone for ListHandle<R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R: 'static> Copy for ListHandle<R> {}

/// Create a list bound to the REST API and load its first page
pub fn use_list<R>(config: ListConfig) -> ListHandle<R>
where
    R: ListRecord + DeserializeOwned,
{
    let ctx = use_app_context();
    let source: Rc<dyn ListSource<R>> = Rc::new(HttpListSource::new(ctx.api()));
    let controller = ListController::with_store(config, ctx.local_store());
    let handle = ListHandle::new(controller, source, ctx.config().debounce_ms);

    on_cleanup(move || handle.dispose());
    handle.dispatch(handle.state.try_update(|c| c.refresh()));
    handle
}

impl<R: ListRecord> ListHandle<R> {
    pub fn new(controller: ListController<R>, source: Rc<dyn ListSource<R>>, debounce_ms: u32) -> Self {
        let search = controller.query().search.clone();
        Self {
            state: RwSignal::new_local(controller),
            search: RwSignal::new(search),
            debouncer: StoredValue::new_local(Debouncer::new(debounce_ms)),
            timer: StoredValue::new_local(None),
            abort: StoredValue::new_local(None),
            source: StoredValue::new_local(source),
        }
    }

    /// Read the controller, tracking changes
    pub fn with<U>(self, f: impl FnOnce(&ListController<R>) -> U) -> U {
        self.state.with(f)
    }

    pub fn items(self) -> Vec<R> {
        self.state.with(|c| c.items().to_vec())
    }

    pub fn items_untracked(self) -> Vec<R> {
        self.state.with_untracked(|c| c.items().to_vec())
    }

    pub fn search_text(self) -> ReadSignal<String> {
        self.search.read_only()
    }

    /// Run a mutation and issue whatever request it produced
    pub fn act(self, f: impl FnOnce(&mut ListController<R>) -> Option<FetchRequest>) {
        self.dispatch(self.state.try_update(f).flatten());
    }

    /// Run a mutation that never fetches (draft edits, view switches)
    pub fn mutate(self, f: impl FnOnce(&mut ListController<R>)) {
        self.state.update(f);
    }

    /// Keystroke in the search box; the query follows once typing pauses
    pub fn search_input(self, text: String) {
        self.search.set(text.clone());
        let Some(ticket) = self.debouncer.try_update_value(|d| d.push(text)) else {
            return;
        };
        let delay = self.debouncer.with_value(|d| d.delay_ms());
        let timeout = Timeout::new(delay, move || {
            if let Some(Some(value)) = self.debouncer.try_update_value(|d| d.settle(ticket)) {
                self.act(|c| c.set_search(&value));
            }
        });
        // replacing the slot drops, and so clears, the previous timer
        self.timer.set_value(Some(timeout));
    }

    /// Skip the debounce (Enter in the search box)
    pub fn search_now(self) {
        self.timer.set_value(None);
        self.debouncer.update_value(|d| d.cancel());
        let value = self.search.get_untracked();
        self.act(|c| c.set_search(&value));
    }

    fn dispatch(self, request: Option<FetchRequest>) {
        let Some(request) = request else {
            return;
        };
        if let Some(Some(previous)) = self.abort.try_update_value(|slot| slot.take()) {
            previous.abort();
        }
        let Some(source) = self.source.try_get_value() else {
            return;
        };

        let ticket = request.ticket;
        let (fetch, handle) = abortable(async move { source.fetch(&request).await });
        self.abort.set_value(Some(handle));

        spawn_local(async move {
            let outcome = fetch.await.unwrap_or(FetchOutcome::Cancelled);
            if matches!(outcome, FetchOutcome::Cancelled) {
                log::debug!("request {} cancelled", ticket.0);
                return;
            }
            // the owner may be gone by now
            let completion = self.state.try_update(|c| c.complete(ticket, outcome));
            if completion == Some(Completion::Stale) {
                log::debug!("dropped stale response {}", ticket.0);
            }
        });
    }

    fn dispose(self) {
        self.timer.try_set_value(None);
        if let Some(Some(handle)) = self.abort.try_update_value(|slot| slot.take()) {
            handle.abort();
        }
        self.state.try_update(|c| c.cancel());
    }
}
