// mowgate: CLI front end and HTTP gateway for the Automower Connect API.
//
// Library target exists so integration tests can drive the router and
// command handlers in-process; `main.rs` is a thin shell around `run`.

pub mod cli;
pub mod commands;
pub mod error;
pub mod server;

use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Command};
use crate::error::CliError;

/// Merge config, set up logging, and dispatch the parsed command line.
pub async fn run(cli: Cli) -> Result<(), CliError> {
    let mut config = mowgate_config::load()?;
    apply_overrides(&mut config, &cli);

    init_tracing(config.log_level);

    if cli.global.save {
        // A config without credentials is never persisted.
        commands::gateway_config(&config, &cli.global)?;
        mowgate_config::save(&config)?;
        tracing::info!(path = %mowgate_config::config_path().display(), "configuration saved");
    }

    match cli.command {
        Command::Control { action } => commands::control(&config, &cli.global, action).await,
        Command::Status => commands::status(&config, &cli.global).await,
        Command::Server(args) => server::run(&config, &cli.global, &args).await,
    }
}

/// Fold CLI flags into the persisted config before anything runs.
fn apply_overrides(config: &mut mowgate_config::Config, cli: &Cli) {
    if let Some(ref login) = cli.global.login {
        config.login.clone_from(login);
    }
    if let Some(ref password) = cli.global.password {
        config.password.clone_from(password);
    }
    if let Some(level) = cli.global.log_level {
        config.log_level = level;
    }
    if let Command::Server(ref args) = cli.command {
        if let Some(expire) = args.expire {
            config.expire_status = expire;
        }
    }
}

fn init_tracing(level: mowgate_config::LogLevel) {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(level.as_filter())),
        )
        .with_target(false)
        .init();
}
