//! Transition plan types

use serde::{Deserialize, Serialize};

/// Lifecycle transition applied to one key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Transition {
    /// Set the key status to `Inactive`
    Deactivate,
    /// Remove the key
    Delete,
}

impl std::fmt::Display for Transition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Transition::Deactivate => write!(f, "deactivate"),
            Transition::Delete => write!(f, "delete"),
        }
    }
}

/// A transition scheduled for a specific key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannedTransition {
    /// Target key
    pub key_id: String,
    /// Key age in days at planning time
    pub age_days: u64,
    /// What to do with the key
    pub transition: Transition,
}

/// Replacement decision, with the reason it was reached
///
/// Computed from the live snapshot, before any transition is applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum Replacement {
    /// The user holds no keys at all and must be re-provisioned
    NoKeys,

    /// The user already holds the maximum number of keys
    AtCapacity {
        /// Keys currently held
        count: usize,
        /// Identifiers of those keys, in snapshot order
        key_ids: Vec<String>,
    },

    /// The newest key is old enough that a successor should be issued
    NewestAged {
        /// Newest key
        key_id: String,
        /// Its age in days
        age_days: u64,
    },

    /// The newest key is still fresh
    NewestFresh {
        /// Newest key
        key_id: String,
        /// Its age in days
        age_days: u64,
    },
}

impl Replacement {
    /// Whether a new key must be issued
    #[must_use]
    pub fn issue_new(&self) -> bool {
        matches!(self, Replacement::NoKeys | Replacement::NewestAged { .. })
    }
}

/// Output of the lifecycle policy for one user
///
/// `transitions` holds every delete first, then every deactivation; within a
/// group keys keep their snapshot order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionPlan {
    /// Ordered transitions
    pub transitions: Vec<PlannedTransition>,
    /// Replacement decision
    pub replacement: Replacement,
}

impl TransitionPlan {
    /// Whether a new key must be issued
    #[must_use]
    pub fn issue_new(&self) -> bool {
        self.replacement.issue_new()
    }

    /// Keys planned for deletion
    pub fn deletes(&self) -> impl Iterator<Item = &PlannedTransition> {
        self.of_kind(Transition::Delete)
    }

    /// Keys planned for deactivation
    pub fn deactivations(&self) -> impl Iterator<Item = &PlannedTransition> {
        self.of_kind(Transition::Deactivate)
    }

    /// Transition planned for a key, if any
    pub fn transition_for(&self, key_id: &str) -> Option<Transition> {
        self.transitions
            .iter()
            .find(|t| t.key_id == key_id)
            .map(|t| t.transition)
    }

    /// Check if the plan changes nothing
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.transitions.is_empty() && !self.issue_new()
    }

    fn of_kind(&self, kind: Transition) -> impl Iterator<Item = &PlannedTransition> {
        self.transitions.iter().filter(move |t| t.transition == kind)
    }
}
