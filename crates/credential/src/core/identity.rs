//! Roster identities and the eligibility filter
//!
//! The roster is static configuration. Entries are deliberately loose
//! ([`RosterEntry`] keeps every field optional) so an incomplete entry still
//! loads; it is rejected when the job reaches it, not at startup.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Raw roster entry as it appears in configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RosterEntry {
    /// IAM user name used in every provider call
    pub user_name: Option<String>,

    /// Contact email of the key owner
    pub email: Option<String>,

    /// Task-tracker assignee of rotation tasks
    pub assignee_id: Option<String>,

    /// Secret-store path the new key material is written to
    pub parameter_name: Option<String>,
}

/// Validated identity: every attribute is a non-empty string
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// IAM user name
    pub user_name: String,
    /// Contact email
    pub email: String,
    /// Task-tracker assignee
    pub assignee_id: String,
    /// Secret-store path for key material
    pub parameter_name: String,
}

/// Reason a roster entry is not eligible for processing
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EligibilityError {
    /// A required attribute is absent or blank
    #[error("invalid user: missing {field}")]
    MissingField {
        /// Name of the first missing attribute
        field: &'static str,
    },
}

impl RosterEntry {
    /// Build an entry with every attribute present
    pub fn new(
        user_name: impl Into<String>,
        email: impl Into<String>,
        assignee_id: impl Into<String>,
        parameter_name: impl Into<String>,
    ) -> Self {
        Self {
            user_name: Some(user_name.into()),
            email: Some(email.into()),
            assignee_id: Some(assignee_id.into()),
            parameter_name: Some(parameter_name.into()),
        }
    }

    /// Validate the entry into an [`Identity`]
    ///
    /// Fields are checked in declaration order; the first missing one is reported.
    /// Whitespace-only values count as missing.
    pub fn validate(&self) -> Result<Identity, EligibilityError> {
        Ok(Identity {
            user_name: required(self.user_name.as_deref(), "user_name")?,
            email: required(self.email.as_deref(), "email")?,
            assignee_id: required(self.assignee_id.as_deref(), "assignee_id")?,
            parameter_name: required(self.parameter_name.as_deref(), "parameter_name")?,
        })
    }

    /// Label used for this entry in the run ledger
    ///
    /// Falls back to the roster position when the entry has no usable name.
    pub fn label(&self, index: usize) -> String {
        match self.user_name.as_deref() {
            Some(name) if !name.trim().is_empty() => name.to_string(),
            _ => format!("roster[{index}]"),
        }
    }
}

/// Blank values are rejected; accepted values are kept verbatim.
fn required(value: Option<&str>, field: &'static str) -> Result<String, EligibilityError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v.to_string()),
        _ => Err(EligibilityError::MissingField { field }),
    }
}

/// Check whether a roster entry carries every required attribute
#[must_use]
pub fn is_eligible(entry: &RosterEntry) -> bool {
    entry.validate().is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn complete() -> RosterEntry {
        RosterEntry::new("user1", "user1@domain.com", "assignee-1", "/iam/user1/keys")
    }

    #[test]
    fn complete_entry_is_eligible() {
        let entry = complete();
        assert!(is_eligible(&entry));
        assert_eq!(
            entry.validate().unwrap(),
            Identity {
                user_name: "user1".into(),
                email: "user1@domain.com".into(),
                assignee_id: "assignee-1".into(),
                parameter_name: "/iam/user1/keys".into(),
            }
        );
    }

    #[rstest]
    #[case::no_user_name(RosterEntry { user_name: None, ..complete() }, "user_name")]
    #[case::no_email(RosterEntry { email: None, ..complete() }, "email")]
    #[case::blank_email(RosterEntry { email: Some("   ".into()), ..complete() }, "email")]
    #[case::empty_assignee(RosterEntry { assignee_id: Some(String::new()), ..complete() }, "assignee_id")]
    #[case::no_parameter(RosterEntry { parameter_name: None, ..complete() }, "parameter_name")]
    fn missing_field_is_reported(#[case] entry: RosterEntry, #[case] field: &'static str) {
        assert!(!is_eligible(&entry));
        assert_eq!(
            entry.validate().unwrap_err(),
            EligibilityError::MissingField { field }
        );
    }

    #[test]
    fn first_missing_field_wins() {
        let entry = RosterEntry {
            user_name: Some("user1".into()),
            ..RosterEntry::default()
        };
        assert_eq!(
            entry.validate().unwrap_err().to_string(),
            "invalid user: missing email"
        );
    }

    #[test]
    fn label_falls_back_to_position() {
        assert_eq!(complete().label(0), "user1");
        assert_eq!(RosterEntry::default().label(3), "roster[3]");
        let blank = RosterEntry {
            user_name: Some("  ".into()),
            ..complete()
        };
        assert_eq!(blank.label(1), "roster[1]");
    }

    #[test]
    fn accepted_values_are_not_rewritten() {
        let entry = RosterEntry {
            user_name: Some(" alice ".into()),
            ..complete()
        };
        assert_eq!(entry.validate().unwrap().user_name, " alice ");
        assert_eq!(entry.label(0), " alice ");
    }

    #[test]
    fn entry_with_missing_fields_deserializes() {
        let entry: RosterEntry =
            serde_json::from_str(r#"{"user_name":"user2","assignee_id":"a-2"}"#).unwrap();
        assert_eq!(entry.email, None);
        assert!(!is_eligible(&entry));
    }
}
