//! Run report

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::ledger::{ErrorCategory, LedgerEntry};

/// How a run treats the identity provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunMode {
    /// Apply transitions, issue keys, notify owners and publish the summary
    Apply,
    /// List and plan only; nothing is mutated or published
    PlanOnly,
}

/// Outcome of one run
///
/// A run that reaches the end of the roster has completed, whatever the
/// per-identity outcomes were.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub mode: RunMode,
    /// Reference time used for every age computation in the run
    pub started_at: DateTime<Utc>,
    /// Roster entries processed (eligible or not)
    pub identities: usize,
    /// Keys created during the run
    pub keys_issued: usize,
    pub validation_errors: usize,
    pub fetch_errors: usize,
    pub transition_errors: usize,
    /// Secret-store or task failures after a key was created
    pub alerts: usize,
    /// Whether the summary reached the operations channel
    pub summary_published: bool,
    /// Rendered ledger, as published
    pub summary: String,
    /// Every ledger entry, in order
    pub entries: Vec<LedgerEntry>,
}

impl RunReport {
    /// Failures of one category
    #[must_use]
    pub fn errors(&self, category: ErrorCategory) -> usize {
        match category {
            ErrorCategory::Validation => self.validation_errors,
            ErrorCategory::Fetch => self.fetch_errors,
            ErrorCategory::Transition => self.transition_errors,
            ErrorCategory::Persistence => self.alerts,
        }
    }

    /// Total failures across all categories
    #[must_use]
    pub fn total_errors(&self) -> usize {
        self.validation_errors + self.fetch_errors + self.transition_errors + self.alerts
    }

    /// Entries recorded for one identity
    pub fn entries_for<'a>(&'a self, identity: &'a str) -> impl Iterator<Item = &'a LedgerEntry> {
        self.entries.iter().filter(move |e| e.identity == identity)
    }
}
