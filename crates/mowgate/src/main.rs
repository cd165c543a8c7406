use clap::{CommandFactory, Parser};

use mowgate::cli::Cli;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(err) = mowgate::run(cli).await {
        let code = err.exit_code();
        if err.wants_usage() {
            let _ = Cli::command().print_help();
            eprintln!();
        }
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}
