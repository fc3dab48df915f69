//! `keyrot plan`

use anyhow::Result;
use chrono::Utc;

use super::{load_settings, print_report};
use crate::cli::{Cli, ReportArgs};
use crate::wiring::build_job;

pub async fn execute(cli: &Cli, args: &ReportArgs) -> Result<()> {
    let settings = load_settings(cli)?;

    let job = build_job(&settings).await?;
    let report = job.plan_only(&settings.roster, Utc::now()).await;

    print_report(&report, args.json)
}
