// Automower Connect HTTP client
//
// Wraps `reqwest::Client` with the vendor's two-host URL construction
// (identity vs tracking), bearer-token session state, and status-code
// to error mapping. One `MowerClient` owns exactly one session: the
// token, the auth provider echoed by the login response, and the id of
// the single selected mower.

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;
use url::Url;

use crate::command::Command;
use crate::error::Error;
use crate::transport::TransportConfig;

/// Identity host (token issue/revoke).
pub const DEFAULT_IDENTITY_URL: &str = "https://iam-api.dss.husqvarnagroup.net/api/v3/";

/// Tracking host (mower collection, status, geofence, control).
pub const DEFAULT_TRACK_URL: &str = "https://amc-api.dss.husqvarnagroup.net/v1/";

/// One mower as it appears in the `GET /mowers` collection.
///
/// The payload carries more fields (model, battery, operating mode);
/// only what the gateway needs is deserialized.
#[derive(Debug, Clone, Deserialize)]
pub struct MowerSummary {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Deserialize)]
struct TokenResponse {
    data: TokenData,
}

#[derive(Deserialize)]
struct TokenData {
    id: String,
    attributes: TokenAttributes,
}

#[derive(Deserialize)]
struct TokenAttributes {
    provider: String,
}

/// Session-owning client for the Automower Connect API.
///
/// Created unauthenticated; [`login`](Self::login) establishes the
/// session and binds the first mower on the account. All operations
/// other than login require an established session and fail with
/// [`Error::NoSession`] before any network activity otherwise.
pub struct MowerClient {
    http: reqwest::Client,
    identity_url: Url,
    track_url: Url,
    token: Option<String>,
    provider: Option<String>,
    device_id: Option<String>,
}

impl MowerClient {
    /// Create an unauthenticated client against the given hosts.
    pub fn new(identity_url: Url, track_url: Url, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self {
            http,
            identity_url,
            track_url,
            token: None,
            provider: None,
            device_id: None,
        })
    }

    /// Create a client against the production Husqvarna hosts.
    pub fn connect_default(transport: &TransportConfig) -> Result<Self, Error> {
        let identity_url = Url::parse(DEFAULT_IDENTITY_URL)?;
        let track_url = Url::parse(DEFAULT_TRACK_URL)?;
        Self::new(identity_url, track_url, transport)
    }

    /// The id of the selected mower, once a session is established.
    pub fn device_id(&self) -> Option<&str> {
        self.device_id.as_deref()
    }

    // ── URL builders ─────────────────────────────────────────────────

    fn identity_endpoint(&self, path: &str) -> Result<Url, Error> {
        let base = self.identity_url.as_str().trim_end_matches('/');
        Ok(Url::parse(&format!("{base}/{path}"))?)
    }

    fn track_endpoint(&self, path: &str) -> Result<Url, Error> {
        let base = self.track_url.as_str().trim_end_matches('/');
        Ok(Url::parse(&format!("{base}/{path}"))?)
    }

    // ── Session lifecycle ────────────────────────────────────────────

    /// Authenticate and bind the first mower on the account.
    ///
    /// POSTs credentials to the identity host, stores the bearer token
    /// and the auth provider echoed by the response, then selects the
    /// first mower so that every subsequent call has a device to target.
    pub async fn login(&mut self, login: &str, password: &SecretString) -> Result<(), Error> {
        let url = self.identity_endpoint("token")?;
        debug!("logging in at {}", url);

        let body = json!({
            "data": {
                "attributes": {
                    "password": password.expose_secret(),
                    "username": login,
                },
                "type": "token",
            }
        });

        let resp = self.http.post(url).json(&body).send().await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(Error::Authentication {
                message: format!("login rejected (HTTP {status})"),
            });
        }

        let text = resp.text().await?;
        let token: TokenResponse = serde_json::from_str(&text).map_err(|e| Error::Protocol {
            message: format!("unexpected token response shape: {e}"),
        })?;

        self.token = Some(token.data.id);
        self.provider = Some(token.data.attributes.provider);
        debug!("login successful");

        self.select_first_mower().await
    }

    /// Revoke the session token and clear all session state.
    ///
    /// A no-op when no session is held, so calling it twice (or on a
    /// client whose login never succeeded) is safe.
    pub async fn logout(&mut self) -> Result<(), Error> {
        let Some(token) = self.token.take() else {
            return Ok(());
        };
        let provider = self.provider.take();
        self.device_id = None;

        let url = self.identity_endpoint(&format!("token/{token}"))?;
        debug!("logging out at {}", url);

        let mut req = self.http.delete(url).bearer_auth(&token);
        if let Some(provider) = provider {
            req = req.header("Authorization-Provider", provider);
        }

        let resp = req.send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(Error::Upstream {
                status: status.as_u16(),
                message: "token revocation failed".into(),
            });
        }

        debug!("logout complete");
        Ok(())
    }

    // ── Authenticated request helpers ────────────────────────────────

    fn authed(&self, builder: reqwest::RequestBuilder) -> Result<reqwest::RequestBuilder, Error> {
        let token = self.token.as_deref().ok_or(Error::NoSession)?;
        let provider = self.provider.as_deref().ok_or(Error::NoSession)?;
        Ok(builder
            .bearer_auth(token)
            .header("Authorization-Provider", provider))
    }

    fn selected_device(&self) -> Result<&str, Error> {
        self.device_id.as_deref().ok_or(Error::NoSession)
    }

    /// Map a non-2xx tracking-host response to `Error::Upstream`.
    async fn check_status(resp: reqwest::Response, context: &str) -> Result<reqwest::Response, Error> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        let body = resp.text().await.unwrap_or_default();
        // Truncate by characters, not bytes: error bodies are not ASCII-only.
        let preview: String = body.chars().take(200).collect();
        Err(Error::Upstream {
            status: status.as_u16(),
            message: format!("{context}: {preview}"),
        })
    }

    // ── Mower operations ─────────────────────────────────────────────

    /// List all mowers paired with the account, in upstream order.
    pub async fn list_mowers(&self) -> Result<Vec<MowerSummary>, Error> {
        let url = self.track_endpoint("mowers")?;
        debug!("GET {}", url);

        let resp = self.authed(self.http.get(url))?.send().await?;
        let resp = Self::check_status(resp, "listing mowers").await?;

        let text = resp.text().await?;
        serde_json::from_str(&text).map_err(|e| Error::Protocol {
            message: format!("unexpected mower list shape: {e}"),
        })
    }

    /// Bind the first mower of the account as the session's device.
    ///
    /// Fails with [`Error::NoDevice`] when the account has no mowers.
    pub async fn select_first_mower(&mut self) -> Result<(), Error> {
        let mowers = self.list_mowers().await?;
        let first = mowers.into_iter().next().ok_or(Error::NoDevice)?;
        debug!(mower = %first.id, name = ?first.name, "selected first mower");
        self.device_id = Some(first.id);
        Ok(())
    }

    /// Fetch the selected mower's status document.
    pub async fn status(&self) -> Result<Value, Error> {
        let id = self.selected_device()?;
        let url = self.track_endpoint(&format!("mowers/{id}/status"))?;
        debug!("GET {}", url);

        let resp = self.authed(self.http.get(url))?.send().await?;
        let resp = Self::check_status(resp, "fetching status").await?;

        Ok(resp.json().await?)
    }

    /// Fetch the selected mower's geofence document.
    pub async fn geo_status(&self) -> Result<Value, Error> {
        let id = self.selected_device()?;
        let url = self.track_endpoint(&format!("mowers/{id}/geofence"))?;
        debug!("GET {}", url);

        let resp = self.authed(self.http.get(url))?.send().await?;
        let resp = Self::check_status(resp, "fetching geofence").await?;

        Ok(resp.json().await?)
    }

    /// Send a control action to the selected mower.
    pub async fn control(&self, command: Command) -> Result<(), Error> {
        let id = self.selected_device()?;
        let url = self.track_endpoint(&format!("mowers/{id}/control"))?;
        debug!(action = %command, "POST {}", url);

        let body = json!({ "action": command.as_action() });
        let resp = self.authed(self.http.post(url).json(&body))?.send().await?;
        Self::check_status(resp, "sending control action").await?;

        Ok(())
    }
}
