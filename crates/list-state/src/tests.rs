//! Controller + Source Integration Tests
//!
//! Drives a `ListController` through an async `ListSource` whose responses
//! are released by hand, to exercise ordering between overlapping fetches.

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};
    use std::collections::HashMap;
    use std::rc::Rc;

    use async_trait::async_trait;
    use serde_json::{json, Value};
    use tokio::sync::oneshot;
    use tokio::task::LocalSet;

    use crate::{
        normalize_response, Completion, EndpointDescriptor, FetchOutcome, FetchRequest, ListConfig, ListController,
        ListError, ListSource, LoadMode, Phase,
    };

    /// Holds every request open until the test releases its body
    #[derive(Default)]
    struct ManualSource {
        calls: Cell<usize>,
        waiting: RefCell<HashMap<u64, oneshot::Receiver<Result<Value, ListError>>>>,
        senders: RefCell<HashMap<u64, oneshot::Sender<Result<Value, ListError>>>>,
    }

    impl ManualSource {
        fn expect(&self, request: &FetchRequest) {
            let (tx, rx) = oneshot::channel();
            self.waiting.borrow_mut().insert(request.ticket.0, rx);
            self.senders.borrow_mut().insert(request.ticket.0, tx);
        }

        fn release(&self, request: &FetchRequest, body: Result<Value, ListError>) {
            if let Some(tx) = self.senders.borrow_mut().remove(&request.ticket.0) {
                let _ = tx.send(body);
            }
        }
    }

    #[async_trait(?Send)]
    impl ListSource<Value> for ManualSource {
        async fn fetch(&self, request: &FetchRequest) -> FetchOutcome<Value> {
            self.calls.set(self.calls.get() + 1);
            let rx = self.waiting.borrow_mut().remove(&request.ticket.0);
            match rx {
                Some(rx) => match rx.await {
                    Ok(Ok(body)) => normalize_response::<Value>(body, request.query.page, request.query.per_page).into(),
                    Ok(Err(e)) => FetchOutcome::Failed(e),
                    // sender dropped: the request was aborted
                    Err(_) => FetchOutcome::Cancelled,
                },
                None => FetchOutcome::Cancelled,
            }
        }
    }

    type Shared = Rc<RefCell<ListController<Value>>>;

    fn controller(mode: LoadMode) -> Shared {
        let mut config = ListConfig::new("media_admin", "activity", EndpointDescriptor::new("/activity-logs"));
        config.default_load_mode = mode;
        Rc::new(RefCell::new(ListController::new(config)))
    }

    fn spawn_fetch(
        ctl: &Shared,
        source: &Rc<ManualSource>,
        request: FetchRequest,
    ) -> tokio::task::JoinHandle<Completion> {
        source.expect(&request);
        let ctl = ctl.clone();
        let source = source.clone();
        tokio::task::spawn_local(async move {
            let outcome = source.fetch(&request).await;
            ctl.borrow_mut().complete(request.ticket, outcome)
        })
    }

    fn body(ids: &[u32], current: u32, last: u32, total: u32) -> Value {
        let data: Vec<Value> = ids.iter().map(|id| json!({ "id": id, "title": format!("entry {}", id) })).collect();
        json!({ "data": data, "meta": { "current_page": current, "last_page": last, "total": total } })
    }

    #[tokio::test]
    async fn test_late_response_does_not_overwrite_newer() {
        LocalSet::new()
            .run_until(async {
                let ctl = controller(LoadMode::Pagination);
                let source = Rc::new(ManualSource::default());

                let a = ctl.borrow_mut().set_search("rep").unwrap();
                let b = ctl.borrow_mut().set_search("report").unwrap();
                let handle_a = spawn_fetch(&ctl, &source, a.clone());
                let handle_b = spawn_fetch(&ctl, &source, b.clone());

                source.release(&b, Ok(body(&[7], 1, 1, 1)));
                assert_eq!(handle_b.await.unwrap(), Completion::Applied);

                source.release(&a, Ok(body(&[1, 2, 3], 1, 4, 40)));
                assert_eq!(handle_a.await.unwrap(), Completion::Stale);

                let ctl = ctl.borrow();
                assert_eq!(ctl.items().len(), 1);
                assert_eq!(ctl.meta().total, 1);
                assert_eq!(ctl.query().search, "report");
            })
            .await;
    }

    #[tokio::test]
    async fn test_infinite_single_call_until_resolved() {
        LocalSet::new()
            .run_until(async {
                let ctl = controller(LoadMode::Infinite);
                let source = Rc::new(ManualSource::default());

                let first = ctl.borrow_mut().refresh();
                let handle = spawn_fetch(&ctl, &source, first.clone());
                while source.calls.get() == 0 {
                    tokio::task::yield_now().await;
                }

                // sentinel fires repeatedly on a slow network
                for _ in 0..5 {
                    assert!(ctl.borrow_mut().load_next().is_none());
                }
                assert_eq!(source.calls.get(), 1);

                source.release(&first, Ok(body(&[1, 2], 1, 2, 4)));
                handle.await.unwrap();

                let second = ctl.borrow_mut().load_next().unwrap();
                let handle = spawn_fetch(&ctl, &source, second.clone());
                source.release(&second, Ok(body(&[3, 4], 2, 2, 4)));
                handle.await.unwrap();

                assert_eq!(source.calls.get(), 2);
                assert_eq!(ctl.borrow().items().len(), 4);
                assert!(ctl.borrow_mut().load_next().is_none());
            })
            .await;
    }

    #[tokio::test]
    async fn test_error_then_manual_retry() {
        LocalSet::new()
            .run_until(async {
                let ctl = controller(LoadMode::Pagination);
                let source = Rc::new(ManualSource::default());

                let req = ctl.borrow_mut().refresh();
                let handle = spawn_fetch(&ctl, &source, req.clone());
                source.release(&req, Err(ListError::from_response(503, Some(&json!({ "message": "Maintenance" })))));
                handle.await.unwrap();

                {
                    let ctl = ctl.borrow();
                    assert_eq!(ctl.phase(), Phase::Error);
                    assert_eq!(ctl.error().map(|e| e.banner().message), Some("Maintenance".to_string()));
                }

                let retry = ctl.borrow_mut().retry().unwrap();
                assert_eq!(retry.query, req.query);
                let handle = spawn_fetch(&ctl, &source, retry.clone());
                source.release(&retry, Ok(body(&[1], 1, 1, 1)));
                handle.await.unwrap();

                assert_eq!(ctl.borrow().phase(), Phase::Success);
                assert!(ctl.borrow().error().is_none());
            })
            .await;
    }

    #[tokio::test]
    async fn test_aborted_request_is_silent() {
        LocalSet::new()
            .run_until(async {
                let ctl = controller(LoadMode::Pagination);
                let source = Rc::new(ManualSource::default());

                let req = ctl.borrow_mut().refresh();
                let handle = spawn_fetch(&ctl, &source, req.clone());
                // dropping the sender is what an abort looks like to the source
                source.senders.borrow_mut().remove(&req.ticket.0);

                assert_eq!(handle.await.unwrap(), Completion::Cancelled);
                assert!(ctl.borrow().error().is_none());
                assert_eq!(ctl.borrow().phase(), Phase::Idle);
            })
            .await;
    }
}
