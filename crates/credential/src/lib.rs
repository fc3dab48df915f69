//! keyrot Credential - access-key model and lifecycle policy
//!
//! The pure half of the rotation job: everything here works on data that has
//! already been fetched from the identity provider and never performs I/O.
//!
//! # Features
//!
//! - **Age calculation** - whole-day key ages, rounded up, skew-tolerant
//! - **Eligibility** - roster entries are validated at first use
//! - **Lifecycle policy** - deactivate → delete → recreate decisions for one user
#![forbid(unsafe_code)]

/// Core types: access keys and roster identities
pub mod core;
/// Lifecycle policy engine
pub mod policy;
/// Time helpers (key age, display dates)
pub mod utils;

// ── Root re-exports ─────────────────────────────────────────────────────────

pub use crate::core::{
    AccessKey, EligibilityError, Identity, IssuedKey, KeyStatus, RosterEntry, is_eligible,
};
pub use crate::policy::{
    AgeThresholds, LifecyclePolicy, PlannedTransition, PolicyError, PolicyResult, Replacement,
    Transition, TransitionPlan,
};
pub use crate::utils::age_in_days;

/// Commonly used types
pub mod prelude {
    pub use crate::core::{AccessKey, Identity, IssuedKey, KeyStatus, RosterEntry, is_eligible};
    pub use crate::policy::{
        AgeThresholds, LifecyclePolicy, Replacement, Transition, TransitionPlan,
    };
    pub use crate::utils::age_in_days;
}
