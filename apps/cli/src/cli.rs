//! Command-line structure

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};

/// Rotate IAM access keys for a fixed roster of users
#[derive(Debug, Parser)]
#[command(name = "keyrot")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Configuration file (TOML)
    #[arg(short, long, global = true, env = "KEYROT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Log format (defaults to KEYROT_LOG_FORMAT, then compact)
    #[arg(long, global = true, value_enum)]
    pub log_format: Option<LogFormat>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Apply the key lifecycle to every roster user and publish the summary
    Run(ReportArgs),
    /// List keys and record the planned transitions without changing anything
    Plan(ReportArgs),
    /// Validate the configuration and report ineligible roster entries
    CheckConfig,
}

#[derive(Debug, Args)]
pub struct ReportArgs {
    /// Print the run report as JSON instead of the summary table
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogFormat {
    Pretty,
    Compact,
    Json,
}

impl From<LogFormat> for keyrot_log::Format {
    fn from(format: LogFormat) -> Self {
        match format {
            LogFormat::Pretty => Self::Pretty,
            LogFormat::Compact => Self::Compact,
            LogFormat::Json => Self::Json,
        }
    }
}

impl Cli {
    /// Logger configuration: environment (or the build preset), flags on top
    pub fn log_config(&self) -> keyrot_log::Config {
        self.apply_log_flags(keyrot_log::Config::from_env_or_preset())
    }

    fn apply_log_flags(&self, mut config: keyrot_log::Config) -> keyrot_log::Config {
        match self.verbose {
            0 => {}
            1 => config.level = "debug".into(),
            _ => config.level = "trace".into(),
        }
        if let Some(format) = self.log_format {
            config.format = format.into();
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    fn preset(debug_build: bool) -> keyrot_log::Config {
        keyrot_log::Config::select(|_| None, debug_build)
    }

    #[test]
    fn without_flags_the_preset_is_kept() {
        let cli = Cli::parse_from(["keyrot", "check-config"]);
        assert_eq!(cli.apply_log_flags(preset(true)), keyrot_log::Config::development());
        assert_eq!(cli.apply_log_flags(preset(false)), keyrot_log::Config::production());
    }

    #[test]
    fn flags_override_the_production_preset() {
        let cli = Cli::parse_from(["keyrot", "-v", "--log-format", "compact", "run"]);
        let config = cli.apply_log_flags(preset(false));
        assert_eq!(config.level, "debug");
        assert_eq!(config.format, keyrot_log::Format::Compact);
        assert_eq!(config.fields.service.as_deref(), Some("keyrot"));
    }

    #[test]
    fn verbosity_raises_level() {
        let cli = Cli::parse_from(["keyrot", "-vv", "--log-format", "json", "plan"]);
        let config = cli.apply_log_flags(preset(true));
        assert_eq!(config.level, "trace");
        assert_eq!(config.format, keyrot_log::Format::Json);
        assert!(matches!(cli.command, Command::Plan(ReportArgs { json: false })));
    }
}
