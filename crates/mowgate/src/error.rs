//! CLI error types with miette diagnostics.

use miette::Diagnostic;
use thiserror::Error;

use mowgate_config::ConfigError;
use mowgate_core::CoreError;

/// Exit codes. The CLI contract is binary: success, or failure with 1.
pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL: i32 = 1;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    #[error("Missing login or password")]
    #[diagnostic(
        code(mowgate::missing_credentials),
        help(
            "Pass --login and --password (add --save to persist them).\n\
             Config file: {path}"
        )
    )]
    MissingCredentials { path: String },

    #[error(transparent)]
    #[diagnostic(code(mowgate::config))]
    Config(#[from] ConfigError),

    #[error(transparent)]
    #[diagnostic(code(mowgate::operation_failed))]
    Core(#[from] CoreError),

    #[error(transparent)]
    #[diagnostic(code(mowgate::io))]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        exit_code::GENERAL
    }

    /// Whether the top-level handler should append usage help.
    pub fn wants_usage(&self) -> bool {
        matches!(self, Self::MissingCredentials { .. })
    }
}
