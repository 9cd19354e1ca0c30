//! Link resolution: turn a source media URL into a direct archive URL.
//!
//! The resolution service runs an asynchronous job per (source URL, quality)
//! pair. The client holds no job id; it re-queries with the same inputs and
//! reads one of three states from each answer. `resolve` drives that loop
//! against a deadline; `ServiceClient` is the HTTP `StatusSource`.

mod payload;
mod poll;
mod request;
mod service;

pub use payload::{PayloadError, StatusPayload};
pub use poll::resolve;
pub use request::{Deadline, QualityLevel, ResolutionRequest};
pub use service::ServiceClient;

use crate::error::Result;

/// State of the service-side job as seen by one status query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolutionOutcome {
    Pending,
    Ready(String),
    Failed(String),
}

/// One status query against a resolution backend.
pub trait StatusSource {
    fn query(&self, request: &ResolutionRequest) -> Result<ResolutionOutcome>;
}
