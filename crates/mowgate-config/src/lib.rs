//! Persisted configuration for the mowgate CLI and HTTP gateway.
//!
//! One TOML file (login, password, log level, status cache expiry),
//! merged through figment: built-in defaults → file → `MOWGATE_*`
//! environment variables. CLI flag overrides are applied on top by the
//! binary before anything touches the network.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use directories::ProjectDirs;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use mowgate_core::GatewayConfig;

/// Default freshness window for the HTTP status cache, in seconds.
pub const DEFAULT_EXPIRE_STATUS_SECS: u64 = 30;

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("login and password must both be configured")]
    MissingCredentials,

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── Log level ───────────────────────────────────────────────────────

/// Persisted log verbosity. Two levels only, matching the config file
/// contract: everything, or errors only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogLevel {
    #[default]
    Info,
    Error,
}

impl LogLevel {
    /// The tracing-subscriber directive for this level.
    pub fn as_filter(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Error => "error",
        }
    }
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "INFO" => Ok(Self::Info),
            "ERROR" => Ok(Self::Error),
            other => Err(ConfigError::Validation {
                field: "log_level".into(),
                reason: format!("expected INFO or ERROR, got '{other}'"),
            }),
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Info => f.write_str("INFO"),
            Self::Error => f.write_str("ERROR"),
        }
    }
}

// ── Config ──────────────────────────────────────────────────────────

/// The persisted key/value store, as one flat TOML document.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Account login (email address).
    #[serde(default)]
    pub login: String,

    /// Account password (plaintext in the file, as the vendor API needs
    /// it verbatim; the file lives under the user config dir).
    #[serde(default)]
    pub password: String,

    /// Log verbosity: INFO or ERROR.
    #[serde(default)]
    pub log_level: LogLevel,

    /// Seconds before a cached status document goes stale.
    #[serde(default = "default_expire_status")]
    pub expire_status: u64,
}

fn default_expire_status() -> u64 {
    DEFAULT_EXPIRE_STATUS_SECS
}

impl Default for Config {
    fn default() -> Self {
        Self {
            login: String::new(),
            password: String::new(),
            log_level: LogLevel::default(),
            expire_status: DEFAULT_EXPIRE_STATUS_SECS,
        }
    }
}

impl Config {
    /// Reject values that parsed but make no sense.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.expire_status == 0 {
            return Err(ConfigError::Validation {
                field: "expire_status".into(),
                reason: "must be a positive number of seconds".into(),
            });
        }
        Ok(())
    }

    /// Translate the persisted store into a runtime [`GatewayConfig`].
    ///
    /// Fails with [`ConfigError::MissingCredentials`] unless both login
    /// and password are non-empty — no session is ever created without
    /// them.
    pub fn to_gateway_config(&self) -> Result<GatewayConfig, ConfigError> {
        if self.login.is_empty() || self.password.is_empty() {
            return Err(ConfigError::MissingCredentials);
        }

        GatewayConfig::new(self.login.clone(), SecretString::from(self.password.clone()))
            .map_err(|e| ConfigError::Validation {
                field: "config".into(),
                reason: e.to_string(),
            })
    }
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "mowgate", "mowgate").map_or_else(
        || {
            let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
            p.push(".config");
            p.push("mowgate");
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

// ── Loading / saving ────────────────────────────────────────────────

/// Load the config from the canonical path plus environment.
///
/// A missing file is not an error — defaults apply. A present but
/// malformed file (unparseable TOML, non-numeric `expire_status`) is.
pub fn load() -> Result<Config, ConfigError> {
    load_from(&config_path())
}

/// [`load`] against an explicit file path.
pub fn load_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("MOWGATE_"));

    let config: Config = figment.extract()?;
    config.validate()?;
    Ok(config)
}

/// Serialize the config and rewrite the canonical file wholesale.
pub fn save(cfg: &Config) -> Result<(), ConfigError> {
    save_to(cfg, &config_path())
}

/// [`save`] against an explicit file path.
pub fn save_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = load_from(&dir.path().join("nope.toml")).unwrap();

        assert_eq!(cfg.login, "");
        assert_eq!(cfg.log_level, LogLevel::Info);
        assert_eq!(cfg.expire_status, DEFAULT_EXPIRE_STATUS_SECS);
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let cfg = Config {
            login: "user@example.com".into(),
            password: "hunter2".into(),
            log_level: LogLevel::Error,
            expire_status: 60,
        };
        save_to(&cfg, &path).unwrap();

        let loaded = load_from(&path).unwrap();
        assert_eq!(loaded.login, "user@example.com");
        assert_eq!(loaded.password, "hunter2");
        assert_eq!(loaded.log_level, LogLevel::Error);
        assert_eq!(loaded.expire_status, 60);
    }

    #[test]
    fn non_numeric_expiry_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "expire_status = \"soon\"\n").unwrap();

        assert!(matches!(load_from(&path), Err(ConfigError::Figment(_))));
    }

    #[test]
    fn zero_expiry_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "expire_status = 0\n").unwrap();

        assert!(matches!(load_from(&path), Err(ConfigError::Validation { .. })));
    }

    #[test]
    fn gateway_config_requires_both_credentials() {
        let mut cfg = Config::default();
        assert!(matches!(
            cfg.to_gateway_config(),
            Err(ConfigError::MissingCredentials)
        ));

        cfg.login = "user@example.com".into();
        assert!(matches!(
            cfg.to_gateway_config(),
            Err(ConfigError::MissingCredentials)
        ));

        cfg.password = "hunter2".into();
        assert!(cfg.to_gateway_config().is_ok());
    }

    #[test]
    fn log_level_parses_case_insensitively() {
        assert_eq!("error".parse::<LogLevel>().ok(), Some(LogLevel::Error));
        assert_eq!("INFO".parse::<LogLevel>().ok(), Some(LogLevel::Info));
        assert!("DEBUG".parse::<LogLevel>().is_err());
    }
}
