//! One-shot command handlers: `control` and `status`.
//!
//! Both wrap a full login → action → logout cycle in the CLI retry
//! budget. The status command always fetches fresh — the TTL cache
//! belongs to the HTTP server alone.

use mowgate_config::{Config, ConfigError};
use mowgate_core::{retry, session, Command as MowerAction, GatewayConfig, CLI_ATTEMPTS};

use crate::cli::GlobalOpts;
use crate::error::CliError;

/// Send one control action to the mower.
pub async fn control(
    config: &Config,
    global: &GlobalOpts,
    action: MowerAction,
) -> Result<(), CliError> {
    let gateway = gateway_config(config, global)?;
    retry::run(CLI_ATTEMPTS, || session::control(&gateway, action)).await?;
    tracing::info!(action = %action, "command delivered");
    Ok(())
}

/// Fetch the mower's status and print it as JSON on stdout.
pub async fn status(config: &Config, global: &GlobalOpts) -> Result<(), CliError> {
    let gateway = gateway_config(config, global)?;
    let payload = retry::run(CLI_ATTEMPTS, || session::status(&gateway)).await?;
    println!("{payload}");
    Ok(())
}

/// Translate the merged config (plus host overrides) into a runtime
/// [`GatewayConfig`], surfacing missing credentials as the usage error.
pub fn gateway_config(config: &Config, global: &GlobalOpts) -> Result<GatewayConfig, CliError> {
    let mut gateway = config.to_gateway_config().map_err(|e| match e {
        ConfigError::MissingCredentials => CliError::MissingCredentials {
            path: mowgate_config::config_path().display().to_string(),
        },
        other => CliError::Config(other),
    })?;

    if let Some(ref url) = global.identity_url {
        gateway.identity_url = url.clone();
    }
    if let Some(ref url) = global.track_url {
        gateway.track_url = url.clone();
    }

    Ok(gateway)
}
