//! Builder for [`RotationJob`]

use std::sync::Arc;

use keyrot_credential::LifecyclePolicy;
use thiserror::Error;

use super::RotationJob;
use crate::gateway::{IdentityProvider, Notifier, SecretStore};

/// Error returned when a job is built without one of its gateways
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("rotation job is missing its {0}")]
pub struct BuildError(&'static str);

/// Assembles a [`RotationJob`] from its gateways and policy.
///
/// The policy defaults to [`LifecyclePolicy::default`].
#[derive(Default)]
pub struct RotationJobBuilder {
    identity: Option<Arc<dyn IdentityProvider>>,
    secrets: Option<Arc<dyn SecretStore>>,
    notifier: Option<Arc<dyn Notifier>>,
    policy: Option<LifecyclePolicy>,
}

impl RotationJobBuilder {
    #[must_use]
    pub fn identity_provider(mut self, provider: Arc<dyn IdentityProvider>) -> Self {
        self.identity = Some(provider);
        self
    }

    #[must_use]
    pub fn secret_store(mut self, store: Arc<dyn SecretStore>) -> Self {
        self.secrets = Some(store);
        self
    }

    #[must_use]
    pub fn notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    #[must_use]
    pub fn policy(mut self, policy: LifecyclePolicy) -> Self {
        self.policy = Some(policy);
        self
    }

    /// Build the job.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError`] naming the first missing gateway.
    pub fn build(self) -> Result<RotationJob, BuildError> {
        Ok(RotationJob {
            identity: self.identity.ok_or(BuildError("identity provider"))?,
            secrets: self.secrets.ok_or(BuildError("secret store"))?,
            notifier: self.notifier.ok_or(BuildError("notifier"))?,
            policy: self.policy.unwrap_or_default(),
        })
    }
}

impl std::fmt::Debug for RotationJobBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RotationJobBuilder")
            .field("identity", &self.identity.is_some())
            .field("secrets", &self.secrets.is_some())
            .field("notifier", &self.notifier.is_some())
            .field("policy", &self.policy)
            .finish()
    }
}
