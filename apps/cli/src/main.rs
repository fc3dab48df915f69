//! keyrot
//!
//! Rotates the IAM access keys of a fixed roster of users.
//!
//! Usage:
//!   keyrot run            # apply the lifecycle, notify owners, publish the summary
//!   keyrot plan           # list keys and show what a run would do
//!   keyrot check-config   # validate the configuration and roster
//!
//! The configuration file comes from `--config` or `KEYROT_CONFIG`; any value
//! can be overridden with `KEYROT_<SECTION>__<KEY>` variables.

mod cli;
mod commands;
mod wiring;

use std::process::ExitCode;

use clap::Parser;

use cli::{Cli, Command};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let _log = match keyrot_log::init_with(cli.log_config()) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let result = match &cli.command {
        Command::Run(args) => commands::run::execute(&cli, args).await,
        Command::Plan(args) => commands::plan::execute(&cli, args).await,
        Command::CheckConfig => commands::check::execute(&cli),
    };

    // A completed run exits 0 even when identities failed; only setup errors land here.
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
