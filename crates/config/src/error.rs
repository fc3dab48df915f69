//! Configuration error types

use std::path::PathBuf;

use keyrot_credential::PolicyError;
use thiserror::Error;

/// Configuration error type
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Explicitly requested configuration file does not exist
    #[error("configuration file not found: {path}")]
    FileNotFound {
        /// Path that was requested
        path: PathBuf,
    },

    /// A source could not be read or did not match the settings shape
    #[error("failed to load configuration: {0}")]
    Load(#[from] Box<figment::Error>),

    /// Lifecycle policy values are inconsistent
    #[error("invalid policy: {0}")]
    Policy(#[from] PolicyError),

    /// A value is present but unusable
    #[error("invalid configuration `{field}`: {reason}")]
    Invalid {
        /// Dotted key of the offending value
        field: &'static str,
        /// What is wrong with it
        reason: String,
    },
}

impl ConfigError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            field,
            reason: reason.into(),
        }
    }
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Load(Box::new(err))
    }
}

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;
