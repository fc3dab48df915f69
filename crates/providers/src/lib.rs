//! keyrot Providers
//!
//! Adapters behind the `keyrot-engine` gateway traits:
//!
//! - [`aws::IamIdentityProvider`] for access keys (feature `aws`)
//! - [`aws::SsmSecretStore`] for issued secrets and the task-tracker token (feature `aws`)
//! - [`aws::SnsSummaryPublisher`] for the run summary (feature `aws`)
//! - [`AsanaTaskClient`] for owner tasks
//! - [`OpsNotifier`] combining a summary publisher with the task client
#![forbid(unsafe_code)]

pub mod asana;
pub mod notifier;
pub mod retry;

#[cfg(feature = "aws")]
pub mod aws;

pub use asana::{AsanaConfig, AsanaTaskClient, NewTask};
pub use notifier::{OpsNotifier, SummaryPublisher};
pub use retry::{RetryPolicy, retry_with_policy};
