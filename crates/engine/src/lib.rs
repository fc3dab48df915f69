//! keyrot Engine - the rotation job
//!
//! Drives every roster identity through the lifecycle decided by
//! [`keyrot_credential::LifecyclePolicy`], talking to the outside world only
//! through the [`gateway`] traits and recording every step in a [`RunLedger`].
//!
//! Identities are processed strictly one after another. Every gateway call is
//! awaited before the next one starts, so an interrupted run leaves at most one
//! identity partially processed.
#![forbid(unsafe_code)]

/// Error types for gateway calls
pub mod error;
/// Narrow interfaces to the identity provider, secret store and notifier
pub mod gateway;
/// The orchestrator
pub mod job;
/// Per-run append-only record
pub mod ledger;

/// In-memory gateways with failure injection
#[cfg(feature = "test-util")]
pub mod testing;

pub use error::{GatewayError, GatewayResult};
pub use gateway::{IdentityProvider, Notifier, SecretStore, TaskReceipt};
pub use job::{RotationJob, RotationJobBuilder, RunMode, RunReport};
pub use ledger::{ErrorCategory, LedgerAction, LedgerEntry, RunLedger};

/// Commonly used types and traits
pub mod prelude {
    pub use crate::error::{GatewayError, GatewayResult};
    pub use crate::gateway::{IdentityProvider, Notifier, SecretStore, TaskReceipt};
    pub use crate::job::{RotationJob, RunMode, RunReport};
    pub use crate::ledger::{ErrorCategory, LedgerAction, LedgerEntry, RunLedger};
}
