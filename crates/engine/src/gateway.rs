//! Gateway traits
//!
//! The job talks to the outside world only through these three interfaces.
//! Implementations live in `keyrot-providers`; in-memory doubles live in
//! [`crate::testing`].

use async_trait::async_trait;
use keyrot_credential::{AccessKey, IssuedKey, KeyStatus};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};

use crate::error::GatewayResult;

/// Identity provider holding each user's access keys
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Current key snapshot for a user
    async fn list_keys(&self, user_name: &str) -> GatewayResult<Vec<AccessKey>>;

    /// Issue a new key. The returned secret is only available here.
    async fn create_key(&self, user_name: &str) -> GatewayResult<IssuedKey>;

    /// Change the status of an existing key
    async fn set_status(&self, user_name: &str, key_id: &str, status: KeyStatus)
    -> GatewayResult<()>;

    /// Remove a key permanently
    async fn delete_key(&self, user_name: &str, key_id: &str) -> GatewayResult<()>;
}

/// Encrypted key/value store for secret material
#[async_trait]
pub trait SecretStore: Send + Sync {
    /// Write a secret, replacing any existing value at `path`
    async fn put_secret(&self, path: &str, value: &SecretString) -> GatewayResult<()>;

    /// Read and decrypt the secret at `path`
    async fn get_secret(&self, path: &str) -> GatewayResult<SecretString>;
}

/// Owner tasks and the operations summary
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Ask the owner to pick up a newly stored key
    async fn create_task(
        &self,
        user_name: &str,
        secret_path: &str,
        assignee: &str,
    ) -> GatewayResult<TaskReceipt>;

    /// Publish the run summary to the operations channel
    async fn publish_summary(&self, subject: &str, body: &str) -> GatewayResult<()>;
}

/// Acknowledgement of a created task
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskReceipt {
    /// Link to the task, when the ticketing system returns one
    pub url: Option<String>,
}

impl TaskReceipt {
    /// Receipt carrying a task link
    pub fn with_url(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
        }
    }
}

impl std::fmt::Display for TaskReceipt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.url.as_deref().unwrap_or("(no link)"))
    }
}
