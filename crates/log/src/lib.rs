//! # keyrot Log
//!
//! `tracing` subscriber setup for the keyrot binary.
//!
//! ```rust,no_run
//! fn main() -> Result<(), keyrot_log::LogError> {
//!     let _guard = keyrot_log::init_with(keyrot_log::Config::from_env_or_preset())?;
//!     tracing::info!(roster = 4, "starting rotation");
//!     Ok(())
//! }
//! ```
//!
//! With none of `KEYROT_LOG`, `RUST_LOG` or `KEYROT_LOG_FORMAT` set, debug
//! builds use [`Config::development`] and release builds [`Config::production`].
//!
//! Environment:
//! - `KEYROT_LOG` (falls back to `RUST_LOG`): filter directives, e.g. `info,keyrot_engine=debug`
//! - `KEYROT_LOG_FORMAT`: `pretty`, `compact` or `json`
//! - `KEYROT_LOG_SOURCE`, `KEYROT_LOG_COLORS`: `0`/`false` to disable

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

mod builder;
mod config;
mod writer;

pub use builder::{LoggerBuilder, LoggerGuard};
pub use config::{Config, DisplayConfig, Fields, Format, WriterConfig};

/// Error type for logger setup
#[derive(Debug, thiserror::Error)]
pub enum LogError {
    /// Filter directives could not be parsed
    #[error("invalid log filter `{filter}`: {message}")]
    InvalidFilter {
        /// The rejected directives
        filter: String,
        /// Parser message
        message: String,
    },

    /// A global subscriber is already installed
    #[error("logger already initialized: {0}")]
    AlreadyInitialized(String),
}

/// Result type for logger setup
pub type LogResult<T> = Result<T, LogError>;

/// Initialize with a custom configuration
pub fn init_with(config: Config) -> LogResult<LoggerGuard> {
    LoggerBuilder::from_config(config).build()
}
