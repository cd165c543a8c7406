//! Route table for the gateway.
//!
//! Exactly four paths; everything else is a 400 with no body, matching
//! the fixed contract home-automation callers rely on.

use std::sync::Arc;

use axum::{routing::get, Router};

use super::{handlers, AppState};

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/status", get(handlers::status))
        .route("/start", get(handlers::start))
        .route("/stop", get(handlers::stop))
        .route("/park", get(handlers::park))
        .fallback(handlers::unknown)
        .with_state(state)
}
