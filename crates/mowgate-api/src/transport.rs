// Transport configuration for building reqwest::Client instances.
//
// Every vendor call goes through a client built here, so the per-call
// timeout is enforced uniformly (the vendor API has no SLA and a hung
// status poll would otherwise block the whole gateway).

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};

use crate::error::Error;

/// Default per-request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Shared transport configuration for building HTTP clients.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub timeout: Duration,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl TransportConfig {
    /// Build a `reqwest::Client` from this config.
    ///
    /// All vendor endpoints speak JSON, so `Accept: application/json`
    /// is set as a default header. `Content-Type` is added per-request
    /// by `RequestBuilder::json`.
    pub fn build_client(&self) -> Result<reqwest::Client, Error> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent("mowgate/0.1.0")
            .default_headers(headers)
            .build()?;

        Ok(client)
    }
}
