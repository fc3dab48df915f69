//! Ledger entry types

use serde::{Serialize, Serializer};

/// Category of a recorded failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Roster entry is missing a required field
    Validation,
    /// Key snapshot could not be retrieved
    Fetch,
    /// A deactivate, delete or create call failed
    Transition,
    /// Secret write or task creation failed after a key was created
    Persistence,
}

impl ErrorCategory {
    /// Tag shown in the ACTION column
    #[must_use]
    pub fn tag(self) -> &'static str {
        match self {
            ErrorCategory::Validation => "INVALID",
            ErrorCategory::Fetch => "FETCH-ERROR",
            ErrorCategory::Transition => "ERROR",
            ErrorCategory::Persistence => "ALERT",
        }
    }

    /// Alerts need operator attention: a key exists that its owner may not
    /// know about.
    #[must_use]
    pub fn is_alert(self) -> bool {
        matches!(self, ErrorCategory::Persistence)
    }
}

/// What a ledger entry records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LedgerAction {
    /// Key snapshot retrieved
    List,
    /// Informational note (key ages, capacity)
    Info,
    /// Planned transition (plan-only runs)
    Plan,
    Deleting,
    Deleted,
    Deactivating,
    Deactivated,
    Creating,
    Created,
    Updating,
    Updated,
    /// A failure of the given category
    Failed(ErrorCategory),
}

impl LedgerAction {
    /// Tag shown in the ACTION column
    #[must_use]
    pub fn tag(self) -> &'static str {
        match self {
            LedgerAction::List => "LIST",
            LedgerAction::Info => "INFO",
            LedgerAction::Plan => "PLAN",
            LedgerAction::Deleting => "DELETING",
            LedgerAction::Deleted => "DELETED",
            LedgerAction::Deactivating => "DEACTIVATING",
            LedgerAction::Deactivated => "DEACTIVATED",
            LedgerAction::Creating => "CREATING",
            LedgerAction::Created => "CREATED",
            LedgerAction::Updating => "UPDATING",
            LedgerAction::Updated => "UPDATED",
            LedgerAction::Failed(category) => category.tag(),
        }
    }

    /// Error category, if this action records a failure
    #[must_use]
    pub fn error_category(self) -> Option<ErrorCategory> {
        match self {
            LedgerAction::Failed(category) => Some(category),
            _ => None,
        }
    }
}

impl std::fmt::Display for LedgerAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

impl Serialize for LedgerAction {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.tag())
    }
}

/// One immutable ledger line
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LedgerEntry {
    /// Position in the run, strictly increasing from 1
    pub seq: u64,
    /// User name, or `roster[i]` for an entry without one
    pub identity: String,
    /// What happened
    pub action: LedgerAction,
    /// Free-form detail
    pub message: String,
}

impl LedgerEntry {
    /// Whether this entry records a failure
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.action.error_category().is_some()
    }
}

impl std::fmt::Display for LedgerEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {}", self.identity, self.action, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_actions_use_category_tags() {
        assert_eq!(LedgerAction::Failed(ErrorCategory::Validation).tag(), "INVALID");
        assert_eq!(LedgerAction::Failed(ErrorCategory::Fetch).tag(), "FETCH-ERROR");
        assert_eq!(LedgerAction::Failed(ErrorCategory::Transition).tag(), "ERROR");
        assert_eq!(LedgerAction::Failed(ErrorCategory::Persistence).tag(), "ALERT");
        assert!(ErrorCategory::Persistence.is_alert());
        assert!(!ErrorCategory::Transition.is_alert());
    }

    #[test]
    fn entry_serializes_action_as_tag() {
        let entry = LedgerEntry {
            seq: 3,
            identity: "alice".into(),
            action: LedgerAction::Deactivated,
            message: "key: AKIA1".into(),
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["action"], "DEACTIVATED");
        assert_eq!(entry.to_string(), "alice DEACTIVATED key: AKIA1");
    }
}
