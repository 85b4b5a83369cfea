//! List-View Controller
//!
//! State machine behind every filtered, paginated list:
//!
//! `Idle -> Loading -> Success | Error`, re-entering `Loading` on any query change.
//!
//! Mutations return the `FetchRequest` the caller must issue. Each request
//! takes over the single in-flight slot; outcomes carrying an older ticket
//! are dropped by `complete`.

use std::collections::HashSet;
use std::rc::Rc;

use crate::error::ListError;
use crate::fetch::{FetchOutcome, FetchRequest, RequestTicket};
use crate::filters::{FilterChip, FilterPanel, FilterSchema, FilterValue, Filters};
use crate::prefs::{load_preferences, prefs_key, save_preferences, ListPreferences, LoadMode, ViewMode};
use crate::query::{EndpointDescriptor, ListQuery, SortDirection, SortKey};
use crate::response::{ListRecord, PageMeta};
use crate::storage::KeyValueStore;

/// Static description of one list instance
#[derive(Debug, Clone)]
pub struct ListConfig {
    /// Storage namespace of the app
    pub app: &'static str,
    /// Storage scope of this list
    pub list: &'static str,
    pub endpoint: EndpointDescriptor,
    pub per_page_options: Vec<u32>,
    pub default_per_page: u32,
    pub schema: FilterSchema,
    pub default_filters: Filters,
    pub default_sort: Vec<SortKey>,
    pub default_view: ViewMode,
    pub default_load_mode: LoadMode,
}

impl ListConfig {
    pub fn new(app: &'static str, list: &'static str, endpoint: EndpointDescriptor) -> Self {
        Self {
            app,
            list,
            endpoint,
            per_page_options: vec![10, 25, 50, 100],
            default_per_page: 10,
            schema: FilterSchema::default(),
            default_filters: Filters::new(),
            default_sort: Vec::new(),
            default_view: ViewMode::List,
            default_load_mode: LoadMode::Pagination,
        }
    }

    pub fn storage_key(&self) -> String {
        prefs_key(self.app, self.list)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Loading,
    Success,
    Error,
}

/// What `complete` did with an outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Applied,
    /// Superseded ticket, ignored
    Stale,
    /// The current request was cancelled; state untouched
    Cancelled,
}

pub struct ListController<R> {
    config: ListConfig,
    store: Option<Rc<dyn KeyValueStore>>,
    query: ListQuery,
    panel: FilterPanel,
    view: ViewMode,
    load_mode: LoadMode,
    phase: Phase,
    items: Vec<R>,
    meta: PageMeta,
    error: Option<ListError>,
    loaded_once: bool,
    next_ticket: u64,
    in_flight: Option<(RequestTicket, ListQuery)>,
    last_query: Option<ListQuery>,
}

impl<R: ListRecord> ListController<R> {
    pub fn new(config: ListConfig) -> Self {
        let panel = FilterPanel::new(config.schema.clone(), config.default_filters.clone());
        let mut query = ListQuery::new(config.default_per_page);
        query.filters = config.default_filters.clone();
        query.sort = config.default_sort.clone();
        Self {
            view: config.default_view,
            load_mode: config.default_load_mode,
            config,
            store: None,
            query,
            panel,
            phase: Phase::Idle,
            items: Vec::new(),
            meta: PageMeta::default(),
            error: None,
            loaded_once: false,
            next_ticket: 0,
            in_flight: None,
            last_query: None,
        }
    }

    /// Build a controller that rehydrates from, and persists to, `store`
    pub fn with_store(config: ListConfig, store: Rc<dyn KeyValueStore>) -> Self {
        let mut ctl = Self::new(config);
        if let Some(prefs) = load_preferences(store.as_ref(), &ctl.config.storage_key()) {
            ctl.restore(prefs);
        }
        ctl.store = Some(store);
        ctl
    }

    fn restore(&mut self, prefs: ListPreferences) {
        self.view = prefs.view;
        self.load_mode = prefs.load_mode;
        if self.config.per_page_options.contains(&prefs.per_page) {
            self.query.per_page = prefs.per_page;
        } else {
            log::warn!("[{}] dropping stored per_page {}", self.config.list, prefs.per_page);
        }

        // unknown keys come from older builds
        let mut filters = self.config.default_filters.clone();
        for (key, value) in prefs.filters.iter() {
            let known = self.config.schema.field(key).is_some() || self.config.default_filters.get(key).is_some();
            if known {
                filters.set(key.clone(), self.config.schema.normalize(key, value.clone()));
            }
        }
        self.panel.restore_applied(filters.clone());
        self.query.filters = filters;
    }

    pub fn preferences(&self) -> ListPreferences {
        ListPreferences {
            view: self.view,
            per_page: self.query.per_page,
            filters: self.panel.applied().clone(),
            load_mode: self.load_mode,
        }
    }

    fn persist(&self) {
        if let Some(store) = &self.store {
            save_preferences(store.as_ref(), &self.config.storage_key(), &self.preferences());
        }
    }

    // ========================
    // Accessors
    // ========================

    pub fn config(&self) -> &ListConfig {
        &self.config
    }

    pub fn query(&self) -> &ListQuery {
        &self.query
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn items(&self) -> &[R] {
        &self.items
    }

    pub fn meta(&self) -> &PageMeta {
        &self.meta
    }

    pub fn error(&self) -> Option<&ListError> {
        self.error.as_ref()
    }

    pub fn panel(&self) -> &FilterPanel {
        &self.panel
    }

    pub fn view(&self) -> ViewMode {
        self.view
    }

    pub fn load_mode(&self) -> LoadMode {
        self.load_mode
    }

    pub fn in_flight(&self) -> Option<RequestTicket> {
        self.in_flight.as_ref().map(|(t, _)| *t)
    }

    pub fn is_loading(&self) -> bool {
        self.phase == Phase::Loading
    }

    /// Loading with stale rows still on screen
    pub fn show_skeleton(&self) -> bool {
        self.is_loading() && !self.items.is_empty()
    }

    /// Loading with nothing to show yet
    pub fn show_spinner(&self) -> bool {
        self.is_loading() && self.items.is_empty()
    }

    pub fn has_more(&self) -> bool {
        self.meta.current_page < self.meta.last_page
    }

    pub fn chips(&self) -> Vec<FilterChip> {
        self.panel.active_chips()
    }

    // ========================
    // Query mutations
    // ========================

    fn issue(&mut self) -> FetchRequest {
        self.next_ticket += 1;
        let ticket = RequestTicket(self.next_ticket);
        if let Some((old, _)) = self.in_flight.replace((ticket, self.query.clone())) {
            log::debug!("[{}] request {} superseded by {}", self.config.list, old.0, ticket.0);
        }
        self.phase = Phase::Loading;
        self.last_query = Some(self.query.clone());
        FetchRequest {
            ticket,
            endpoint: self.config.endpoint.clone(),
            query: self.query.clone(),
        }
    }

    /// Issue the current query as-is (mount, manual refresh)
    pub fn refresh(&mut self) -> FetchRequest {
        self.issue()
    }

    fn restart(&mut self) -> FetchRequest {
        self.query.page = 1;
        self.issue()
    }

    /// Called with the debounced search value
    pub fn set_search(&mut self, search: &str) -> Option<FetchRequest> {
        if search.trim() == self.query.search.trim() {
            return None;
        }
        self.query.search = search.to_string();
        Some(self.restart())
    }

    pub fn open_filters(&mut self) {
        self.panel.open();
    }

    pub fn close_filters(&mut self) {
        self.panel.close();
    }

    pub fn mutate_draft(&mut self, patch: Filters) {
        self.panel.mutate_draft(patch);
    }

    pub fn set_draft(&mut self, key: &str, value: FilterValue) {
        self.panel.set_draft(key, value);
    }

    pub fn apply_filters(&mut self) -> FetchRequest {
        self.query.filters = self.panel.apply().clone();
        self.persist();
        self.restart()
    }

    pub fn reset_filters(&mut self) -> FetchRequest {
        self.query.filters = self.panel.reset().clone();
        self.persist();
        self.restart()
    }

    /// Filter chip "×"
    pub fn remove_filter(&mut self, key: &str, value: Option<&str>) -> Option<FetchRequest> {
        if !self.panel.remove_single(key, value) {
            return None;
        }
        self.query.filters = self.panel.applied().clone();
        self.persist();
        Some(self.restart())
    }

    pub fn set_sort(&mut self, sort: Vec<SortKey>) -> Option<FetchRequest> {
        if sort == self.query.sort {
            return None;
        }
        self.query.sort = sort;
        Some(self.restart())
    }

    /// Column header click: flip when already primary, else sort ascending by `key`
    pub fn toggle_sort(&mut self, key: &str) -> FetchRequest {
        let direction = match self.query.sort.first() {
            Some(primary) if primary.key == key => primary.direction.flipped(),
            _ => SortDirection::Asc,
        };
        self.query.sort = vec![SortKey {
            key: key.to_string(),
            direction,
        }];
        self.restart()
    }

    /// Ignored unless `per_page` is one of the configured options
    pub fn set_per_page(&mut self, per_page: u32) -> Option<FetchRequest> {
        if per_page == self.query.per_page || !self.config.per_page_options.contains(&per_page) {
            return None;
        }
        self.query.per_page = per_page;
        self.persist();
        Some(self.restart())
    }

    pub fn set_page(&mut self, page: u32) -> Option<FetchRequest> {
        let page = page.clamp(1, self.meta.last_page.max(1));
        if page == self.query.page && self.phase == Phase::Success {
            return None;
        }
        self.query.page = page;
        Some(self.issue())
    }

    /// Whether `load_next` would issue a request right now
    pub fn can_load_next(&self) -> bool {
        self.load_mode == LoadMode::Infinite
            && self.in_flight.is_none()
            && self.phase == Phase::Success
            && self.has_more()
    }

    /// Infinite mode: next page when the sentinel becomes visible.
    ///
    /// Never fires while a request is in flight or past the last page.
    pub fn load_next(&mut self) -> Option<FetchRequest> {
        if !self.can_load_next() {
            return None;
        }
        self.query.page = self.meta.current_page + 1;
        Some(self.issue())
    }

    /// Re-issue the last query unchanged
    pub fn retry(&mut self) -> Option<FetchRequest> {
        let last = self.last_query.clone()?;
        self.query = last;
        Some(self.issue())
    }

    pub fn set_view(&mut self, view: ViewMode) {
        if view != self.view {
            self.view = view;
            self.persist();
        }
    }

    pub fn set_load_mode(&mut self, mode: LoadMode) -> Option<FetchRequest> {
        if mode == self.load_mode {
            return None;
        }
        self.load_mode = mode;
        self.items.clear();
        self.persist();
        Some(self.restart())
    }

    /// Give up the in-flight request (teardown). Returns its ticket.
    pub fn cancel(&mut self) -> Option<RequestTicket> {
        let (ticket, _) = self.in_flight.take()?;
        self.phase = self.settled_phase();
        Some(ticket)
    }

    fn settled_phase(&self) -> Phase {
        if self.error.is_some() {
            Phase::Error
        } else if self.loaded_once {
            Phase::Success
        } else {
            Phase::Idle
        }
    }

    // ========================
    // Outcomes
    // ========================

    pub fn complete(&mut self, ticket: RequestTicket, outcome: FetchOutcome<R>) -> Completion {
        let query = match self.in_flight.take() {
            Some((current, query)) if current == ticket => query,
            other => {
                self.in_flight = other;
                log::debug!("[{}] dropping stale response for request {}", self.config.list, ticket.0);
                return Completion::Stale;
            }
        };

        match outcome {
            FetchOutcome::Loaded(mut result) => {
                let limit = query.per_page as usize;
                if result.items.len() > limit {
                    log::warn!(
                        "[{}] server returned {} rows for per_page {}",
                        self.config.list,
                        result.items.len(),
                        limit
                    );
                    result.items.truncate(limit);
                }

                if self.load_mode == LoadMode::Infinite && query.page > 1 {
                    let mut seen: HashSet<_> = self.items.iter().map(ListRecord::record_id).collect();
                    for item in result.items {
                        if seen.insert(item.record_id()) {
                            self.items.push(item);
                        }
                    }
                } else {
                    self.items = result.items;
                }

                // server's page number wins over what we asked for
                self.query.page = result.meta.current_page;
                self.meta = result.meta;
                self.error = None;
                self.loaded_once = true;
                self.phase = Phase::Success;
                Completion::Applied
            }
            FetchOutcome::Failed(err) => {
                log::warn!("[{}] fetch failed: {}", self.config.list, err);
                self.items.clear();
                self.meta = PageMeta::default();
                self.error = Some(err);
                self.phase = Phase::Error;
                Completion::Applied
            }
            FetchOutcome::Cancelled => {
                self.phase = self.settled_phase();
                Completion::Cancelled
            }
        }
    }

    /// Dismiss the error banner without retrying
    pub fn dismiss_error(&mut self) {
        self.error = None;
        if self.phase == Phase::Error {
            self.phase = Phase::Idle;
        }
    }

    /// Patch one loaded row in place (after an edit or a reaction)
    pub fn replace_item(&mut self, item: R) {
        let id = item.record_id();
        if let Some(slot) = self.items.iter_mut().find(|r| r.record_id() == id) {
            *slot = item;
        }
    }

    /// Drop one loaded row (after a delete) without refetching
    pub fn remove_item(&mut self, id: &str) {
        let before = self.items.len();
        self.items.retain(|r| r.record_id() != id);
        if self.items.len() < before {
            self.meta.total = self.meta.total.saturating_sub(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::response::ListResult;
    use crate::storage::MemoryStore;
    use serde_json::{json, Value};

    fn users_config() -> ListConfig {
        let mut config = ListConfig::new(
            "media_admin",
            "users",
            EndpointDescriptor::new("/admin/users").map_field("roles", "role_id"),
        );
        config.schema = FilterSchema::new(vec![crate::filters::FieldSpec::new(
            "roles",
            "Role",
            crate::filters::FieldKind::Multi,
        )]);
        config.default_filters = Filters::new().with("roles", FilterValue::Multi(vec![]));
        config
    }

    fn rows(ids: std::ops::Range<u32>) -> Vec<Value> {
        ids.map(|id| json!({ "id": id })).collect()
    }

    fn page(ids: std::ops::Range<u32>, current: u32, last: u32, total: u64) -> FetchOutcome<Value> {
        FetchOutcome::Loaded(ListResult {
            items: rows(ids),
            meta: PageMeta {
                current_page: current,
                last_page: last,
                total,
            },
        })
    }

    fn loaded_on_page(ctl: &mut ListController<Value>, p: u32) {
        let req = ctl.refresh();
        ctl.complete(req.ticket, page(0..10, 1, 5, 50));
        if p > 1 {
            let req = ctl.set_page(p).unwrap();
            ctl.complete(req.ticket, page(0..10, p, 5, 50));
        }
    }

    #[test]
    fn test_query_changes_reset_page() {
        let mut ctl = ListController::<Value>::new(users_config());

        loaded_on_page(&mut ctl, 3);
        let req = ctl.set_search("ann").unwrap();
        assert_eq!(req.query.page, 1);

        loaded_on_page(&mut ctl, 3);
        ctl.open_filters();
        ctl.set_draft("roles", FilterValue::multi(["2"]));
        assert_eq!(ctl.apply_filters().query.page, 1);

        loaded_on_page(&mut ctl, 3);
        assert_eq!(ctl.toggle_sort("email").query.page, 1);

        loaded_on_page(&mut ctl, 3);
        assert_eq!(ctl.set_per_page(25).unwrap().query.page, 1);

        loaded_on_page(&mut ctl, 3);
        assert_eq!(ctl.remove_filter("roles", Some("2")).unwrap().query.page, 1);
    }

    #[test]
    fn test_page_change_keeps_query() {
        let mut ctl = ListController::<Value>::new(users_config());
        let _ = ctl.set_search("ann");
        loaded_on_page(&mut ctl, 1);

        let req = ctl.set_page(2).unwrap();
        assert_eq!(req.query.page, 2);
        assert_eq!(req.query.search, "ann");
        assert!(ctl.show_skeleton());
    }

    #[test]
    fn test_unchanged_search_does_not_refetch() {
        let mut ctl = ListController::<Value>::new(users_config());
        assert!(ctl.set_search("  ").is_none());
        assert!(ctl.set_search("bob").is_some());
        assert!(ctl.set_search("bob ").is_none());
    }

    #[test]
    fn test_items_never_exceed_per_page() {
        for per_page in [10u32, 25, 50, 100] {
            let mut ctl = ListController::<Value>::new(users_config());
            let req = ctl.set_per_page(per_page).unwrap_or_else(|| ctl.refresh());
            // misbehaving server sends more than asked
            ctl.complete(req.ticket, page(0..per_page + 7, 1, 3, 300));
            assert!(ctl.items().len() <= per_page as usize);
        }
    }

    #[test]
    fn test_superseded_response_is_dropped() {
        let mut ctl = ListController::<Value>::new(users_config());
        let a = ctl.set_search("a").unwrap();
        let b = ctl.set_search("ab").unwrap();

        assert_eq!(ctl.complete(b.ticket, page(100..103, 1, 1, 3)), Completion::Applied);
        assert_eq!(ctl.complete(a.ticket, page(0..10, 1, 9, 90)), Completion::Stale);

        assert_eq!(ctl.items().len(), 3);
        assert_eq!(ctl.meta().total, 3);
        assert_eq!(ctl.query().search, "ab");
        assert_eq!(ctl.phase(), Phase::Success);
    }

    #[test]
    fn test_failure_clears_items_and_retry_reissues() {
        let mut ctl = ListController::<Value>::new(users_config());
        loaded_on_page(&mut ctl, 2);

        let req = ctl.set_page(3).unwrap();
        ctl.complete(req.ticket, FetchOutcome::Failed(ListError::from_response(500, None)));

        assert_eq!(ctl.phase(), Phase::Error);
        assert!(ctl.items().is_empty());
        assert_eq!(ctl.meta(), &PageMeta::default());
        assert_eq!(ctl.error().map(|e| e.status()), Some(500));

        let retry = ctl.retry().unwrap();
        assert_eq!(retry.query, req.query);
        assert_ne!(retry.ticket, req.ticket);
        assert_eq!(ctl.phase(), Phase::Loading);
    }

    #[test]
    fn test_cancelled_outcome_leaves_state() {
        let mut ctl = ListController::<Value>::new(users_config());
        loaded_on_page(&mut ctl, 1);
        let req = ctl.set_page(2).unwrap();

        assert_eq!(ctl.complete(req.ticket, FetchOutcome::Cancelled), Completion::Cancelled);
        assert!(ctl.error().is_none());
        assert_eq!(ctl.items().len(), 10);
        assert_eq!(ctl.phase(), Phase::Success);
    }

    #[test]
    fn test_server_page_is_adopted() {
        let mut ctl = ListController::<Value>::new(users_config());
        loaded_on_page(&mut ctl, 1);
        let req = ctl.set_page(5).unwrap();
        // rows were deleted meanwhile; server answers with its last page
        ctl.complete(req.ticket, page(0..4, 2, 2, 14));
        assert_eq!(ctl.query().page, 2);
        assert_eq!(ctl.meta().current_page, 2);
    }

    #[test]
    fn test_infinite_waits_for_in_flight_page() {
        let mut config = users_config();
        config.default_load_mode = LoadMode::Infinite;
        let mut ctl = ListController::<Value>::new(config);

        let mut issued = vec![ctl.refresh()];
        // sentinel keeps intersecting while the first page is slow
        for _ in 0..3 {
            if let Some(req) = ctl.load_next() {
                issued.push(req);
            }
        }
        assert_eq!(issued.len(), 1);

        ctl.complete(issued[0].ticket, page(0..10, 1, 2, 15));
        let next = ctl.load_next().unwrap();
        assert_eq!(next.query.page, 2);
        assert!(ctl.load_next().is_none());

        // overlapping id 9 is not duplicated
        ctl.complete(next.ticket, page(9..15, 2, 2, 15));
        assert_eq!(ctl.items().len(), 15);
        assert!(!ctl.has_more());
        assert!(ctl.load_next().is_none());
    }

    #[test]
    fn test_refused_load_next_becomes_ready_after_short_page() {
        let mut config = users_config();
        config.default_load_mode = LoadMode::Infinite;
        let mut ctl = ListController::<Value>::new(config);

        let first = ctl.refresh();
        assert!(!ctl.can_load_next());
        assert!(ctl.load_next().is_none());

        // a short page leaves the sentinel on screen; the list is ready again
        ctl.complete(first.ticket, page(0..3, 1, 4, 12));
        assert!(ctl.can_load_next());
        assert_eq!(ctl.load_next().unwrap().query.page, 2);
        assert!(!ctl.can_load_next());

        let _ = ctl.set_load_mode(LoadMode::Pagination);
        assert!(!ctl.can_load_next());
    }

    #[test]
    fn test_infinite_restarts_on_filter_change() {
        let mut config = users_config();
        config.default_load_mode = LoadMode::Infinite;
        let mut ctl = ListController::<Value>::new(config);
        let req = ctl.refresh();
        ctl.complete(req.ticket, page(0..10, 1, 3, 30));
        let req = ctl.load_next().unwrap();
        ctl.complete(req.ticket, page(10..20, 2, 3, 30));
        assert_eq!(ctl.items().len(), 20);

        let req = ctl.set_search("x").unwrap();
        ctl.complete(req.ticket, page(50..52, 1, 1, 2));
        assert_eq!(ctl.items().len(), 2);
    }

    #[test]
    fn test_preferences_round_trip_through_store() {
        let store: Rc<dyn KeyValueStore> = Rc::new(MemoryStore::new());
        {
            let mut ctl = ListController::<Value>::with_store(users_config(), store.clone());
            ctl.set_view(ViewMode::Grid);
            let _ = ctl.set_per_page(50);
            ctl.open_filters();
            ctl.set_draft("roles", FilterValue::multi(["3"]));
            let _ = ctl.apply_filters();
            let _ = ctl.set_load_mode(LoadMode::Infinite);
        }

        let ctl = ListController::<Value>::with_store(users_config(), store);
        assert_eq!(ctl.view(), ViewMode::Grid);
        assert_eq!(ctl.query().per_page, 50);
        assert_eq!(ctl.load_mode(), LoadMode::Infinite);
        assert_eq!(ctl.panel().applied().get("roles"), Some(&FilterValue::multi(["3"])));
        assert_eq!(ctl.query().filters, ctl.panel().applied().clone());
    }

    #[test]
    fn test_invalid_stored_per_page_falls_back() {
        let store = Rc::new(MemoryStore::new());
        save_preferences(
            store.as_ref(),
            "media_admin:users:prefs",
            &ListPreferences {
                view: ViewMode::List,
                per_page: 7,
                filters: Filters::new().with("ghost", FilterValue::Flag(true)),
                load_mode: LoadMode::Pagination,
            },
        );
        let ctl = ListController::<Value>::with_store(users_config(), store);
        assert_eq!(ctl.query().per_page, 10);
        assert!(ctl.panel().applied().get("ghost").is_none());
    }

    #[test]
    fn test_reset_after_mutations_matches_defaults() {
        let mut ctl = ListController::<Value>::new(users_config());
        ctl.open_filters();
        ctl.set_draft("roles", FilterValue::multi(["1", "2"]));
        let _ = ctl.apply_filters();
        let _ = ctl.remove_filter("roles", Some("1"));
        ctl.open_filters();
        ctl.set_draft("roles", FilterValue::multi(["9"]));

        let req = ctl.reset_filters();
        assert_eq!(ctl.panel().applied(), &users_config().default_filters);
        assert_eq!(req.query.filters, users_config().default_filters);
        assert!(ctl.chips().is_empty());
    }

    #[test]
    fn test_chip_removed_with_panel_open_stays_removed() {
        let mut ctl = ListController::<Value>::new(users_config());
        ctl.open_filters();
        ctl.set_draft("roles", FilterValue::multi(["1", "2"]));
        let _ = ctl.apply_filters();

        ctl.open_filters();
        assert!(ctl.remove_filter("roles", Some("1")).is_some());
        let req = ctl.apply_filters();

        assert_eq!(req.query.filters.get("roles"), Some(&FilterValue::multi(["2"])));
        assert_eq!(ctl.chips().len(), 1);
    }

    #[test]
    fn test_remove_item_updates_total() {
        let mut ctl = ListController::<Value>::new(users_config());
        loaded_on_page(&mut ctl, 1);
        ctl.remove_item("3");
        assert_eq!(ctl.items().len(), 9);
        assert_eq!(ctl.meta().total, 49);
    }
}
