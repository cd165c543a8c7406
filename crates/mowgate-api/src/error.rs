use thiserror::Error;

/// Top-level error type for the `mowgate-api` crate.
///
/// Covers every failure mode of the vendor API surface: authentication,
/// transport, response-shape, and local pre-flight validation.
/// `mowgate-core` maps these into user-facing diagnostics.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// Login rejected by the identity endpoint (wrong credentials,
    /// account locked, etc.)
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    /// An authenticated call was attempted without an established session.
    #[error("No session established -- login first")]
    NoSession,

    // ── Upstream ────────────────────────────────────────────────────
    /// Any non-2xx response from a non-auth vendor call.
    #[error("Upstream error (HTTP {status}): {message}")]
    Upstream { status: u16, message: String },

    /// Response body did not have the expected shape.
    #[error("Protocol error: {message}")]
    Protocol { message: String },

    /// The account has no paired mowers.
    #[error("No mower registered on this account")]
    NoDevice,

    // ── Local validation ────────────────────────────────────────────
    /// Control action outside {START, STOP, PARK}. Detected before any
    /// network call and never retried.
    #[error("Unknown control action '{action}' (expected START, STOP, or PARK)")]
    InvalidCommand { action: String },

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, timeout).
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl Error {
    /// Returns `true` if this error came from the login step.
    pub fn is_auth(&self) -> bool {
        matches!(self, Self::Authentication { .. })
    }

    /// Returns `true` for errors detected before any network activity.
    /// These are never worth retrying with a fresh session.
    pub fn is_pre_flight(&self) -> bool {
        matches!(self, Self::InvalidCommand { .. } | Self::InvalidUrl(_))
    }
}
