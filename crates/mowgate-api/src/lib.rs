// mowgate-api: Async Rust client for the Husqvarna Automower Connect API

pub mod client;
pub mod command;
pub mod error;
pub mod transport;

pub use client::{MowerClient, MowerSummary, DEFAULT_IDENTITY_URL, DEFAULT_TRACK_URL};
pub use command::Command;
pub use error::Error;
pub use transport::TransportConfig;
