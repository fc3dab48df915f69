//! Access key snapshot types
//!
//! An [`AccessKey`] is one row of the identity provider's key listing. The
//! rotation job never caches these across runs; each run re-fetches the live set.

use chrono::{DateTime, Utc};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};

/// Status of an access key
///
/// Keys only ever move `Active → Inactive`; an inactive key is later deleted
/// and never reactivated by the job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyStatus {
    /// Key can be used to sign requests
    Active,
    /// Key is disabled but still counts against the per-user key limit
    Inactive,
}

impl KeyStatus {
    /// Check if the key is active
    #[must_use]
    pub fn is_active(self) -> bool {
        matches!(self, KeyStatus::Active)
    }

    /// Provider wire name (`Active` / `Inactive`)
    pub fn as_str(self) -> &'static str {
        match self {
            KeyStatus::Active => "Active",
            KeyStatus::Inactive => "Inactive",
        }
    }
}

impl std::fmt::Display for KeyStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One access key belonging to a user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessKey {
    /// Opaque key identifier (unique within the user's key set)
    pub id: String,

    /// When the identity provider created the key
    pub created_at: DateTime<Utc>,

    /// Current key status
    pub status: KeyStatus,
}

impl AccessKey {
    /// Create a key snapshot
    pub fn new(id: impl Into<String>, created_at: DateTime<Utc>, status: KeyStatus) -> Self {
        Self {
            id: id.into(),
            created_at,
            status,
        }
    }

    /// Create an active key snapshot
    pub fn active(id: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self::new(id, created_at, KeyStatus::Active)
    }

    /// Create an inactive key snapshot
    pub fn inactive(id: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self::new(id, created_at, KeyStatus::Inactive)
    }
}

/// A freshly created key together with its secret material
///
/// The secret is only ever handed to the secret store. `Debug` redacts it.
#[derive(Clone)]
pub struct IssuedKey {
    /// Identifier of the new key
    pub id: String,

    /// Secret half of the key pair
    pub secret: SecretString,
}

impl IssuedKey {
    /// Wrap a newly created key
    pub fn new(id: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            secret: SecretString::from(secret.into()),
        }
    }
}

impl std::fmt::Debug for IssuedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IssuedKey")
            .field("id", &self.id)
            .field("secret", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issued_key_debug_redacts_secret() {
        let key = IssuedKey::new("AKIAEXAMPLE", "very-secret-material");
        let debug = format!("{key:?}");
        assert!(debug.contains("AKIAEXAMPLE"));
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("very-secret-material"));
    }

    #[test]
    fn status_wire_names() {
        assert_eq!(KeyStatus::Active.to_string(), "Active");
        assert_eq!(KeyStatus::Inactive.as_str(), "Inactive");
        assert!(KeyStatus::Active.is_active());
        assert!(!KeyStatus::Inactive.is_active());
    }
}
