//! Remote List Fetching
//!
//! A `FetchRequest` is a query bound to an endpoint and stamped with the
//! ticket of the list's single in-flight slot.

use async_trait::async_trait;

use crate::error::ListError;
use crate::query::{EndpointDescriptor, ListQuery};
use crate::response::ListResult;

/// Identifies one issued request within a list instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestTicket(pub u64);

#[derive(Debug, Clone, PartialEq)]
pub struct FetchRequest {
    pub ticket: RequestTicket,
    pub endpoint: EndpointDescriptor,
    pub query: ListQuery,
}

impl FetchRequest {
    pub fn params(&self) -> Vec<(String, String)> {
        self.query.to_params(&self.endpoint)
    }
}

/// How a fetch ended. Cancellation is its own variant, not an error.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome<R> {
    Loaded(ListResult<R>),
    Failed(ListError),
    Cancelled,
}

impl<R> From<Result<ListResult<R>, ListError>> for FetchOutcome<R> {
    fn from(result: Result<ListResult<R>, ListError>) -> Self {
        match result {
            Ok(r) => FetchOutcome::Loaded(r),
            Err(e) => FetchOutcome::Failed(e),
        }
    }
}

/// Performs list requests against some backend.
///
/// Futures are `!Send`: the browser implementation runs on the UI thread.
#[async_trait(?Send)]
pub trait ListSource<R> {
    async fn fetch(&self, request: &FetchRequest) -> FetchOutcome<R>;
}
