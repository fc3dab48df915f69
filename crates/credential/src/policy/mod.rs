//! Lifecycle policy
//!
//! Decides, for one user's key snapshot, which keys to deactivate or delete
//! and whether a replacement key must be issued.

mod engine;
mod error;
mod plan;
mod thresholds;

pub use error::{PolicyError, PolicyResult};
pub use plan::{PlannedTransition, Replacement, Transition, TransitionPlan};
pub use thresholds::{AgeThresholds, LifecyclePolicy};
