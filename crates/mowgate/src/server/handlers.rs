//! HTTP request handlers.
//!
//! Outcome mapping is deliberately coarse: 200 on success, 500 when the
//! retry budget is exhausted. Per-attempt causes are already logged by
//! the retry loop; callers only need to know whether to try again.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use tracing::error;

use mowgate_core::{retry, session, Command as MowerAction, HTTP_ATTEMPTS};

use super::AppState;

/// GET /status — served from the cache while fresh, otherwise one
/// retry-wrapped fetch refills the slot.
pub async fn status(State(state): State<Arc<AppState>>) -> Response {
    let result = state
        .cache
        .get_or_refresh(|| async {
            retry::run(HTTP_ATTEMPTS, || session::status(&state.gateway)).await
        })
        .await;

    match result {
        Ok(payload) => (StatusCode::OK, Json(payload)).into_response(),
        Err(e) => {
            error!(error = %e, "status fetch failed");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// GET /start
pub async fn start(State(state): State<Arc<AppState>>) -> StatusCode {
    control(&state, MowerAction::Start).await
}

/// GET /stop
pub async fn stop(State(state): State<Arc<AppState>>) -> StatusCode {
    control(&state, MowerAction::Stop).await
}

/// GET /park
pub async fn park(State(state): State<Arc<AppState>>) -> StatusCode {
    control(&state, MowerAction::Park).await
}

/// Any other path.
pub async fn unknown() -> StatusCode {
    StatusCode::BAD_REQUEST
}

async fn control(state: &AppState, action: MowerAction) -> StatusCode {
    match retry::run(HTTP_ATTEMPTS, || session::control(&state.gateway, action)).await {
        Ok(()) => StatusCode::OK,
        Err(e) => {
            error!(error = %e, action = %action, "control failed");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}
