// mowgate-core: Policy layer between mowgate-api and the CLI/HTTP surfaces.
//
// Owns what the raw client deliberately does not: the bounded
// fresh-session retry loop, the login → action → logout cycle, and the
// single-slot TTL status cache shared by HTTP requests.

pub mod cache;
pub mod config;
pub mod error;
pub mod retry;
pub mod session;

pub use cache::StatusCache;
pub use config::GatewayConfig;
pub use error::CoreError;
pub use retry::{CLI_ATTEMPTS, HTTP_ATTEMPTS};

// Re-export the api types consumers need at the crate root.
pub use mowgate_api::{Command, Error as ApiError};
