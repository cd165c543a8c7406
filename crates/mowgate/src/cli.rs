//! Clap derive structures for the `mowgate` CLI.

use std::net::IpAddr;

use clap::{Args, Parser, Subcommand};
use url::Url;

use mowgate_config::LogLevel;
use mowgate_core::Command as MowerAction;

// ── Top-Level CLI ────────────────────────────────────────────────────

/// mowgate -- talk to your robotic mower
#[derive(Debug, Parser)]
#[command(
    name = "mowgate",
    version,
    about = "Control and monitor a Husqvarna Automower",
    long_about = "A gateway for the Husqvarna Automower Connect API.\n\n\
        One-shot control and status commands, plus an HTTP server with a\n\
        time-bounded status cache for home-automation integrations.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Account login (email address)
    #[arg(long, env = "MOWGATE_LOGIN", global = true)]
    pub login: Option<String>,

    /// Account password
    #[arg(long, env = "MOWGATE_PASSWORD", global = true, hide_env = true)]
    pub password: Option<String>,

    /// Persist the merged configuration back to the config file
    #[arg(long, global = true)]
    pub save: bool,

    /// Log verbosity (INFO or ERROR)
    #[arg(long, global = true)]
    pub log_level: Option<LogLevel>,

    /// Override the identity API host (self-hosted proxies, testing)
    #[arg(long, env = "MOWGATE_IDENTITY_URL", global = true, hide = true)]
    pub identity_url: Option<Url>,

    /// Override the tracking API host (self-hosted proxies, testing)
    #[arg(long, env = "MOWGATE_TRACK_URL", global = true, hide = true)]
    pub track_url: Option<Url>,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Send a control action to the mower
    Control {
        /// The action: START, STOP, or PARK
        action: MowerAction,
    },

    /// Fetch and print the mower's status document
    Status,

    /// Run the HTTP gateway
    Server(ServerArgs),
}

#[derive(Debug, Args)]
pub struct ServerArgs {
    /// Bind address for the HTTP server
    #[arg(long, default_value = "127.0.0.1")]
    pub address: IpAddr,

    /// Bind port for the HTTP server
    #[arg(long, default_value_t = 1234)]
    pub port: u16,

    /// Seconds before a cached status document goes stale
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub expire: Option<u64>,
}
