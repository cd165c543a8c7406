// ── Core error types ──
//
// What consumers (CLI, HTTP gateway) see. Individual attempt failures
// stay inside the retry loop — they are logged there, and only
// `RetryExhausted` escapes it.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Every attempt of a retry-wrapped operation failed. The per-attempt
    /// causes were logged as they happened; this carries only the budget.
    #[error("Operation failed after {attempts} attempts")]
    RetryExhausted { attempts: u32 },

    /// A vendor-API error that escaped without entering the retry loop
    /// (pre-flight validation, or a caller driving the client directly).
    #[error(transparent)]
    Api(#[from] mowgate_api::Error),

    /// Bad runtime configuration.
    #[error("Configuration error: {message}")]
    Config { message: String },
}
