//! Policy configuration errors

use thiserror::Error;

/// Errors raised while constructing a lifecycle policy
///
/// Planning itself cannot fail; only an inconsistent configuration is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PolicyError {
    /// Age thresholds are not strictly increasing
    #[error(
        "Invalid age thresholds: expected create_age < deactivate_age < delete_age, got {create_age} / {deactivate_age} / {delete_age}"
    )]
    InvalidThresholds {
        /// Age at which a replacement key is issued
        create_age: u64,
        /// Age at which an active key is deactivated
        deactivate_age: u64,
        /// Age at which a key is deleted
        delete_age: u64,
    },

    /// The concurrent key ceiling must allow at least one key
    #[error("Invalid max_keys: must be a positive integer, got {0}")]
    InvalidMaxKeys(usize),
}

/// Result type for policy construction
pub type PolicyResult<T> = Result<T, PolicyError>;
