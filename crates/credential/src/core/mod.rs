//! Core types for access-key rotation

mod identity;
mod key;

pub use identity::{EligibilityError, Identity, RosterEntry, is_eligible};
pub use key::{AccessKey, IssuedKey, KeyStatus};
