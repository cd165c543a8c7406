//! HTTP gateway: four fixed routes over the retry-wrapped vendor ops.
//!
//! The status cache is constructed once here and shared by reference
//! through the router state; control requests each run their own
//! login/logout cycle, so requests may be served concurrently without
//! any cross-request session state.

mod handlers;
mod routes;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tower_http::trace::TraceLayer;
use tracing::info;

use mowgate_config::Config;
use mowgate_core::{GatewayConfig, StatusCache};

use crate::cli::{GlobalOpts, ServerArgs};
use crate::commands::gateway_config;
use crate::error::CliError;

pub use routes::router;

/// Shared application state: the connection config and the status cache.
pub struct AppState {
    pub gateway: GatewayConfig,
    pub cache: StatusCache,
}

impl AppState {
    pub fn new(gateway: GatewayConfig, status_ttl: Duration) -> Self {
        Self {
            gateway,
            cache: StatusCache::new(status_ttl),
        }
    }
}

/// Bind and serve until externally terminated.
pub async fn run(config: &Config, global: &GlobalOpts, args: &ServerArgs) -> Result<(), CliError> {
    let gateway = gateway_config(config, global)?;
    let ttl = Duration::from_secs(config.expire_status);

    let state = Arc::new(AppState::new(gateway, ttl));
    let app = router(state).layer(TraceLayer::new_for_http());

    let addr = SocketAddr::new(args.address, args.port);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(addr = %listener.local_addr()?, ttl_secs = config.expire_status, "gateway listening");

    axum::serve(listener, app).await?;
    Ok(())
}
