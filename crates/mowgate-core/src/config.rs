// ── Runtime connection configuration ──
//
// Describes *how* to reach the vendor API. Carries credential data and
// transport tuning, but never touches disk — mowgate-config constructs
// a `GatewayConfig` from the persisted store and hands it in.

use std::time::Duration;

use secrecy::SecretString;
use url::Url;

use mowgate_api::transport::DEFAULT_TIMEOUT_SECS;
use mowgate_api::{TransportConfig, DEFAULT_IDENTITY_URL, DEFAULT_TRACK_URL};

use crate::error::CoreError;

/// Configuration for one authenticated vendor session.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Account login (email address).
    pub login: String,
    /// Account password.
    pub password: SecretString,
    /// Identity host issuing and revoking tokens.
    pub identity_url: Url,
    /// Tracking host serving mower collections, status, and control.
    pub track_url: Url,
    /// Per-request timeout for every vendor call.
    pub timeout: Duration,
}

impl GatewayConfig {
    /// Build a config against the production vendor hosts.
    pub fn new(login: String, password: SecretString) -> Result<Self, CoreError> {
        let identity_url = Url::parse(DEFAULT_IDENTITY_URL).map_err(|e| CoreError::Config {
            message: format!("invalid identity URL: {e}"),
        })?;
        let track_url = Url::parse(DEFAULT_TRACK_URL).map_err(|e| CoreError::Config {
            message: format!("invalid track URL: {e}"),
        })?;

        Ok(Self {
            login,
            password,
            identity_url,
            track_url,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        })
    }

    pub(crate) fn transport(&self) -> TransportConfig {
        TransportConfig {
            timeout: self.timeout,
        }
    }
}
