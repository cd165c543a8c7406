// ── Session cycles ──
//
// One complete login → action → logout round against the vendor API.
// The session never outlives the call: a failed action abandons its
// session (the token expires upstream), and logout only runs once a
// login has actually established one.

use serde_json::Value;
use tracing::warn;

use mowgate_api::{Command, Error, MowerClient};

use crate::config::GatewayConfig;

/// Log in, send `command` to the selected mower, log out.
pub async fn control(config: &GatewayConfig, command: Command) -> Result<(), Error> {
    let mut client = connect(config).await?;
    client.control(command).await?;
    finish(client).await;
    Ok(())
}

/// Log in, fetch the mower's status document, log out.
pub async fn status(config: &GatewayConfig) -> Result<Value, Error> {
    let mut client = connect(config).await?;
    let payload = client.status().await?;
    finish(client).await;
    Ok(payload)
}

/// Build a fresh client and establish a session (binds the first mower).
async fn connect(config: &GatewayConfig) -> Result<MowerClient, Error> {
    let mut client = MowerClient::new(
        config.identity_url.clone(),
        config.track_url.clone(),
        &config.transport(),
    )?;
    client.login(&config.login, &config.password).await?;
    Ok(client)
}

/// End a session whose action succeeded. A logout failure does not
/// invalidate the completed action — the token just expires upstream.
async fn finish(mut client: MowerClient) {
    if let Err(e) = client.logout().await {
        warn!(error = %e, "logout failed (non-fatal)");
    }
}
