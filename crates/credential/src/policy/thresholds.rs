//! Age thresholds and the lifecycle policy value

use serde::{Deserialize, Serialize};

use super::error::{PolicyError, PolicyResult};

/// Key age thresholds, in whole days
///
/// Invariant: `create_age < deactivate_age < delete_age`. The only way to
/// obtain a value is through [`AgeThresholds::new`], which enforces it.
///
/// # Example
///
/// ```
/// use keyrot_credential::AgeThresholds;
///
/// let thresholds = AgeThresholds::new(90, 100, 110).unwrap();
/// assert_eq!(thresholds.deactivate_age(), 100);
///
/// assert!(AgeThresholds::new(100, 100, 110).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AgeThresholds {
    create_age: u64,
    deactivate_age: u64,
    delete_age: u64,
}

impl AgeThresholds {
    /// Create thresholds with validation
    ///
    /// # Errors
    ///
    /// * `InvalidThresholds` unless `create_age < deactivate_age < delete_age`
    pub fn new(create_age: u64, deactivate_age: u64, delete_age: u64) -> PolicyResult<Self> {
        let thresholds = Self {
            create_age,
            deactivate_age,
            delete_age,
        };
        thresholds.validate()?;
        Ok(thresholds)
    }

    /// Validate threshold ordering
    pub fn validate(&self) -> PolicyResult<()> {
        if self.create_age < self.deactivate_age && self.deactivate_age < self.delete_age {
            Ok(())
        } else {
            Err(PolicyError::InvalidThresholds {
                create_age: self.create_age,
                deactivate_age: self.deactivate_age,
                delete_age: self.delete_age,
            })
        }
    }

    /// Age at which the newest key triggers issuance of a replacement
    pub fn create_age(&self) -> u64 {
        self.create_age
    }

    /// Age at which an active key is deactivated
    pub fn deactivate_age(&self) -> u64 {
        self.deactivate_age
    }

    /// Age at which a key is deleted regardless of status
    pub fn delete_age(&self) -> u64 {
        self.delete_age
    }
}

impl Default for AgeThresholds {
    fn default() -> Self {
        Self {
            create_age: 90,
            deactivate_age: 100,
            delete_age: 110,
        }
    }
}

impl<'de> Deserialize<'de> for AgeThresholds {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct Raw {
            create_age: u64,
            deactivate_age: u64,
            delete_age: u64,
        }

        let raw = Raw::deserialize(deserializer)?;
        AgeThresholds::new(raw.create_age, raw.deactivate_age, raw.delete_age)
            .map_err(serde::de::Error::custom)
    }
}

/// Lifecycle policy: age thresholds plus the concurrent key ceiling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LifecyclePolicy {
    thresholds: AgeThresholds,
    max_keys: usize,
}

impl LifecyclePolicy {
    /// IAM allows two access keys per user
    pub const DEFAULT_MAX_KEYS: usize = 2;

    /// Create a policy with validation
    ///
    /// # Errors
    ///
    /// * `InvalidMaxKeys` if `max_keys` is zero
    pub fn new(thresholds: AgeThresholds, max_keys: usize) -> PolicyResult<Self> {
        if max_keys == 0 {
            return Err(PolicyError::InvalidMaxKeys(max_keys));
        }
        Ok(Self {
            thresholds,
            max_keys,
        })
    }

    /// Age thresholds
    pub fn thresholds(&self) -> &AgeThresholds {
        &self.thresholds
    }

    /// Maximum number of keys a user may hold at once
    pub fn max_keys(&self) -> usize {
        self.max_keys
    }
}

impl Default for LifecyclePolicy {
    fn default() -> Self {
        Self {
            thresholds: AgeThresholds::default(),
            max_keys: Self::DEFAULT_MAX_KEYS,
        }
    }
}
