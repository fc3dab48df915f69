//! `keyrot run`

use anyhow::Result;

use super::{load_settings, print_report};
use crate::cli::{Cli, ReportArgs};
use crate::wiring::build_job;

pub async fn execute(cli: &Cli, args: &ReportArgs) -> Result<()> {
    let settings = load_settings(cli)?;
    settings.validate_for_run()?;

    let job = build_job(&settings).await?;
    let report = job.run(&settings.roster).await;

    if !report.summary_published {
        tracing::warn!("run summary was not published; see the log above");
    }
    print_report(&report, args.json)
}
