//! Subcommands

pub mod check;
pub mod plan;
pub mod run;

use anyhow::Result;
use keyrot_config::Settings;
use keyrot_engine::RunReport;

use crate::cli::Cli;

fn load_settings(cli: &Cli) -> Result<Settings> {
    Ok(Settings::load(cli.config.as_deref())?)
}

fn print_report(report: &RunReport, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
        return Ok(());
    }

    println!("{}", report.summary);
    println!(
        "{} users, {} keys issued, {} errors, {} alerts",
        report.identities,
        report.keys_issued,
        report.total_errors(),
        report.alerts
    );
    Ok(())
}
