//! Run ledger
//!
//! Append-only record of every decision and outcome of one run. It is the
//! only thing operators see, so nothing that happens during a run may bypass
//! it. Each append is mirrored as a `tracing` event.

mod entry;
mod render;

use chrono::{DateTime, Utc};

pub use entry::{ErrorCategory, LedgerAction, LedgerEntry};

/// Per-run record, owned by the running job
#[derive(Debug, Clone)]
pub struct RunLedger {
    header: String,
    entries: Vec<LedgerEntry>,
    next_seq: u64,
}

impl RunLedger {
    /// Start an empty ledger for a run beginning at `started_at`
    #[must_use]
    pub fn new(started_at: DateTime<Utc>) -> Self {
        Self {
            header: format!("Log entries for {}", started_at.to_rfc2822()),
            entries: Vec::new(),
            next_seq: 1,
        }
    }

    /// Header line rendered above the table
    #[must_use]
    pub fn header(&self) -> &str {
        &self.header
    }

    /// Append an entry
    pub fn record(
        &mut self,
        identity: impl Into<String>,
        action: LedgerAction,
        message: impl Into<String>,
    ) -> &LedgerEntry {
        let entry = LedgerEntry {
            seq: self.next_seq,
            identity: identity.into(),
            action,
            message: message.into(),
        };
        self.next_seq += 1;
        trace_entry(&entry);
        self.entries.push(entry);
        &self.entries[self.entries.len() - 1]
    }

    /// Append a failure entry
    pub fn record_error(
        &mut self,
        identity: impl Into<String>,
        category: ErrorCategory,
        message: impl Into<String>,
    ) -> &LedgerEntry {
        self.record(identity, LedgerAction::Failed(category), message)
    }

    /// Entries recorded so far, in order
    #[must_use]
    pub fn entries(&self) -> &[LedgerEntry] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of failures of one category
    #[must_use]
    pub fn count(&self, category: ErrorCategory) -> usize {
        self.entries
            .iter()
            .filter(|e| e.action.error_category() == Some(category))
            .count()
    }

    /// Render the header and bordered table
    #[must_use]
    pub fn render(&self) -> String {
        render::table(&self.header, &self.entries)
    }

    /// Consume the ledger, handing back its entries
    #[must_use]
    pub fn into_entries(self) -> Vec<LedgerEntry> {
        self.entries
    }
}

fn trace_entry(entry: &LedgerEntry) {
    let action = entry.action.tag();
    match entry.action.error_category() {
        Some(category) if category.is_alert() => {
            tracing::error!(identity = %entry.identity, action, "{}", entry.message);
        }
        Some(_) => tracing::warn!(identity = %entry.identity, action, "{}", entry.message),
        None => tracing::info!(identity = %entry.identity, action, "{}", entry.message),
    }
}
