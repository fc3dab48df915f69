//! Logger builder

mod format;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Registry};

use self::format::{create_fmt_layer, create_json_layer};
use crate::config::{Config, Format};
use crate::writer::make_writer;
use crate::{LogError, LogResult};

/// Keeps the root span alive for the lifetime of the process
#[derive(Debug)]
pub struct LoggerGuard {
    _root: Option<tracing::span::EnteredSpan>,
}

/// Builds and installs the global subscriber
#[derive(Debug, Clone)]
pub struct LoggerBuilder {
    config: Config,
}

impl LoggerBuilder {
    #[must_use]
    pub const fn from_config(config: Config) -> Self {
        Self { config }
    }

    /// Parse the filter directives without installing anything
    pub fn filter(&self) -> LogResult<EnvFilter> {
        EnvFilter::try_new(&self.config.level).map_err(|e| LogError::InvalidFilter {
            filter: self.config.level.clone(),
            message: e.to_string(),
        })
    }

    /// Install the subscriber as the global default
    pub fn build(self) -> LogResult<LoggerGuard> {
        let filter = self.filter()?;
        let writer = make_writer(&self.config.writer);
        let display = &self.config.display;
        let registry = Registry::default().with(filter);

        let installed = match self.config.format {
            Format::Pretty => registry
                .with(create_fmt_layer!(pretty, display, writer))
                .try_init(),
            Format::Compact => registry
                .with(create_fmt_layer!(compact, display, writer))
                .try_init(),
            Format::Json => registry.with(create_json_layer!(display, writer)).try_init(),
        };
        installed.map_err(|e| LogError::AlreadyInitialized(e.to_string()))?;

        let fields = &self.config.fields;
        let root = (!fields.is_empty()).then(|| {
            tracing::info_span!(
                "app",
                service = fields.service.as_deref().unwrap_or("keyrot"),
                env = fields.env.as_deref().unwrap_or("unknown"),
            )
            .entered()
        });

        tracing::debug!(format = ?self.config.format, level = %self.config.level, "logger initialized");
        Ok(LoggerGuard { _root: root })
    }
}
