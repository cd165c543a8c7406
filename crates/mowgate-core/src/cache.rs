// ── Status cache ──
//
// Single-slot TTL cache for the last fetched status document, shared
// by every HTTP /status request. The slot is replaced wholesale on a
// successful refresh and left untouched when a refresh fails, so
// consumers keep erroring until the upstream recovers rather than
// silently serving stale data as fresh.
//
// The mutex is held across the refresh: two racing requests after
// expiry produce exactly one upstream fetch.

use std::future::Future;
use std::time::{Duration, Instant};

use serde_json::Value;
use tokio::sync::Mutex;
use tracing::debug;

use crate::error::CoreError;

struct CachedStatus {
    payload: Value,
    fetched_at: Instant,
}

/// TTL-bounded single-slot cache for the mower status document.
pub struct StatusCache {
    ttl: Duration,
    slot: Mutex<Option<CachedStatus>>,
}

impl StatusCache {
    /// An empty cache whose entries stay fresh for `ttl`.
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            slot: Mutex::new(None),
        }
    }

    /// Return the cached payload if it is still fresh, otherwise await
    /// `refresh` and store its result with `fetched_at = now`.
    pub async fn get_or_refresh<F, Fut>(&self, refresh: F) -> Result<Value, CoreError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Value, CoreError>>,
    {
        self.get_or_refresh_at(Instant::now(), refresh).await
    }

    /// [`get_or_refresh`](Self::get_or_refresh) with an explicit `now`,
    /// so freshness decisions are testable without touching the clock.
    pub async fn get_or_refresh_at<F, Fut>(
        &self,
        now: Instant,
        refresh: F,
    ) -> Result<Value, CoreError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Value, CoreError>>,
    {
        let mut slot = self.slot.lock().await;

        if let Some(cached) = slot.as_ref() {
            if now.duration_since(cached.fetched_at) < self.ttl {
                debug!("serving status from cache");
                return Ok(cached.payload.clone());
            }
        }

        debug!("status cache stale, fetching fresh");
        let payload = refresh().await?;

        *slot = Some(CachedStatus {
            payload: payload.clone(),
            fetched_at: now,
        });

        Ok(payload)
    }
}
