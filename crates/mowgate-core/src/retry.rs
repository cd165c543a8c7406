// ── Retry controller ──
//
// Bounded-attempt loop around a full vendor operation. Every failure is
// treated as "the session may be stale": the attempt (including its
// login) is discarded wholesale and the next iteration starts from a
// fresh login. No second error taxonomy — transient network faults and
// auth expiry take the same path, at the cost of extra login
// round-trips on a low-frequency control plane.

use std::future::Future;

use tracing::{debug, error};

use crate::error::CoreError;

/// Attempt budget for one-shot CLI invocations.
pub const CLI_ATTEMPTS: u32 = 5;

/// Attempt budget for HTTP-triggered invocations.
pub const HTTP_ATTEMPTS: u32 = 3;

/// Run `attempt` up to `max_attempts` times, returning the first success.
///
/// Each invocation of `attempt` must be a complete, self-contained
/// operation (fresh login, action, logout) — nothing is carried over
/// between iterations. Failures are logged once per attempt; only
/// [`CoreError::RetryExhausted`] is surfaced when the budget runs out.
///
/// Pre-flight errors (invalid command, malformed URL) short-circuit:
/// they cannot be cured by a fresh session.
pub async fn run<T, F, Fut>(max_attempts: u32, mut attempt: F) -> Result<T, CoreError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, mowgate_api::Error>>,
{
    for n in 1..=max_attempts {
        match attempt().await {
            Ok(value) => {
                debug!(attempt = n, "operation succeeded");
                return Ok(value);
            }
            Err(err) if err.is_pre_flight() => return Err(err.into()),
            Err(err) => {
                error!(attempt = n, max_attempts, error = %err, "attempt failed, discarding session");
            }
        }
    }

    Err(CoreError::RetryExhausted {
        attempts: max_attempts,
    })
}
