//! Polling loop: query until the job is ready, failed, or the deadline passes.

use std::time::Duration;

use super::{ResolutionOutcome, ResolutionRequest, StatusSource};
use crate::error::{MdlError, Result};

/// Polls `source` until it yields a download URL.
///
/// - `Ready(url)` returns `url`.
/// - `Failed(reason)` returns `ResolutionRejected` without retrying.
/// - `Pending` returns `ResolutionTimeout` once the deadline has passed,
///   otherwise sleeps `min(poll_interval, remaining)` and queries again.
///
/// Query errors are returned as-is on first occurrence.
pub fn resolve<S>(
    source: &S,
    request: &ResolutionRequest,
    poll_interval: Duration,
) -> Result<String>
where
    S: StatusSource + ?Sized,
{
    let deadline = request.deadline();
    let mut attempts = 0u32;

    loop {
        attempts += 1;
        let outcome = source.query(request)?;
        tracing::debug!(attempt = attempts, ?outcome, "resolution status");

        match outcome {
            ResolutionOutcome::Ready(url) => {
                tracing::info!(attempts, "download link ready");
                return Ok(url);
            }
            ResolutionOutcome::Failed(reason) => {
                tracing::warn!(attempts, %reason, "resolution rejected");
                return Err(MdlError::ResolutionRejected { reason });
            }
            ResolutionOutcome::Pending => {
                if deadline.is_expired() {
                    tracing::warn!(attempts, "deadline passed while job pending");
                    return Err(MdlError::ResolutionTimeout { attempts });
                }
                std::thread::sleep(poll_interval.min(deadline.remaining()));
            }
        }
    }
}
