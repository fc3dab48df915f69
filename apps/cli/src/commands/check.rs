//! `keyrot check-config`

use anyhow::Result;

use super::load_settings;
use crate::cli::Cli;

pub fn execute(cli: &Cli) -> Result<()> {
    let settings = load_settings(cli)?;
    settings.validate_for_run()?;
    let policy = settings.policy.to_policy()?;

    let thresholds = policy.thresholds();
    println!("configuration OK");
    println!(
        "policy: create {} / deactivate {} / delete {} days, max {} keys",
        thresholds.create_age(),
        thresholds.deactivate_age(),
        thresholds.delete_age(),
        policy.max_keys()
    );
    println!("roster: {} entries", settings.roster.len());

    // Incomplete entries do not fail the check; the job skips them at run time.
    for (index, entry) in settings.roster.iter().enumerate() {
        if let Err(e) = entry.validate() {
            println!("  skipped at run time: {}: {e}", entry.label(index));
        }
    }
    Ok(())
}
