//! Rotation job
//!
//! For each roster entry, in roster order: validate, fetch the key snapshot,
//! plan, apply deletes then deactivations, and when the plan asks for it
//! issue a replacement, store its secret and open an owner task. After the
//! roster the rendered ledger is published as one summary.
//!
//! Every failure is recorded against the identity it happened to and the run
//! moves on. A key that was created is never rolled back.

mod builder;
mod report;

use std::sync::Arc;

use chrono::{DateTime, Utc};
use keyrot_credential::{
    Identity, IssuedKey, KeyStatus, LifecyclePolicy, Replacement, RosterEntry, TransitionPlan,
    age_in_days, utils::short_date,
};
use secrecy::{ExposeSecret, SecretString};
use tracing::Instrument;

pub use builder::{BuildError, RotationJobBuilder};
pub use report::{RunMode, RunReport};

use crate::gateway::{IdentityProvider, Notifier, SecretStore};
use crate::ledger::{ErrorCategory, LedgerAction, RunLedger};

/// Subject line prefix of the published summary
pub const SUMMARY_SUBJECT: &str = "IAM Key Rotation Logs";

/// The rotation orchestrator
///
/// Holds no state between runs; everything a run learns lives in its
/// [`RunLedger`] and is returned in the [`RunReport`].
pub struct RotationJob {
    identity: Arc<dyn IdentityProvider>,
    secrets: Arc<dyn SecretStore>,
    notifier: Arc<dyn Notifier>,
    policy: LifecyclePolicy,
}

impl RotationJob {
    /// Start building a job
    #[must_use]
    pub fn builder() -> RotationJobBuilder {
        RotationJobBuilder::default()
    }

    /// Policy the job plans with
    #[must_use]
    pub fn policy(&self) -> &LifecyclePolicy {
        &self.policy
    }

    /// Run over the roster using the current time.
    pub async fn run(&self, roster: &[RosterEntry]) -> RunReport {
        self.run_at(roster, Utc::now()).await
    }

    /// Run over the roster with an explicit reference time.
    ///
    /// `now` is shared by every identity, so two users whose keys were
    /// created at the same instant always see the same age.
    pub async fn run_at(&self, roster: &[RosterEntry], now: DateTime<Utc>) -> RunReport {
        self.execute(roster, now, RunMode::Apply).await
    }

    /// List and plan every identity without changing anything.
    ///
    /// Planned transitions are recorded as `PLAN` entries. No key is touched,
    /// no secret is written and no summary is published.
    pub async fn plan_only(&self, roster: &[RosterEntry], now: DateTime<Utc>) -> RunReport {
        self.execute(roster, now, RunMode::PlanOnly).await
    }

    async fn execute(&self, roster: &[RosterEntry], now: DateTime<Utc>, mode: RunMode) -> RunReport {
        let span = tracing::info_span!("rotation_run", ?mode, identities = roster.len());
        async move {
            let mut ledger = RunLedger::new(now);
            let mut keys_issued = 0;

            for (index, entry) in roster.iter().enumerate() {
                let label = entry.label(index);
                let span = tracing::info_span!("identity", user = %label);
                keys_issued += self
                    .process(entry, &label, now, mode, &mut ledger)
                    .instrument(span)
                    .await;
            }

            self.finish(ledger, now, mode, roster.len(), keys_issued).await
        }
        .instrument(span)
        .await
    }

    /// Process one roster entry. Returns the number of keys issued.
    async fn process(
        &self,
        entry: &RosterEntry,
        label: &str,
        now: DateTime<Utc>,
        mode: RunMode,
        ledger: &mut RunLedger,
    ) -> usize {
        let identity = match entry.validate() {
            Ok(identity) => identity,
            Err(err) => {
                ledger.record_error(label, ErrorCategory::Validation, err.to_string());
                return 0;
            }
        };
        let user = identity.user_name.as_str();

        let keys = match self.identity.list_keys(user).await {
            Ok(keys) => keys,
            Err(err) => {
                ledger.record_error(
                    user,
                    ErrorCategory::Fetch,
                    format!("could not list access keys: {err}"),
                );
                return 0;
            }
        };
        ledger.record(
            user,
            LedgerAction::List,
            format!("listed access keys: {}", keys.len()),
        );
        for key in &keys {
            ledger.record(
                user,
                LedgerAction::Info,
                format!("key: {} age: {} days", key.id, age_in_days(now, key.created_at)),
            );
        }

        let plan = self.policy.plan(&keys, now);
        tracing::debug!(
            deletes = plan.deletes().count(),
            deactivations = plan.deactivations().count(),
            issue_new = plan.issue_new(),
            "planned"
        );

        match mode {
            RunMode::PlanOnly => {
                record_plan(user, &plan, ledger);
                0
            }
            RunMode::Apply => {
                self.apply_transitions(user, &plan, ledger).await;
                record_capacity(user, &plan, ledger);
                if plan.issue_new() {
                    self.issue(&identity, ledger).await
                } else {
                    0
                }
            }
        }
    }

    /// Apply every delete, then every deactivation. A failed call is recorded
    /// and the next one still runs.
    async fn apply_transitions(&self, user: &str, plan: &TransitionPlan, ledger: &mut RunLedger) {
        for planned in plan.deletes() {
            let id = planned.key_id.as_str();
            ledger.record(user, LedgerAction::Deleting, format!("key: {id}"));
            match self.identity.delete_key(user, id).await {
                Ok(()) => ledger.record(user, LedgerAction::Deleted, format!("key: {id}")),
                Err(err) => ledger.record_error(
                    user,
                    ErrorCategory::Transition,
                    format!("could not delete key {id}: {err}"),
                ),
            };
        }

        for planned in plan.deactivations() {
            let id = planned.key_id.as_str();
            ledger.record(user, LedgerAction::Deactivating, format!("key: {id}"));
            match self.identity.set_status(user, id, KeyStatus::Inactive).await {
                Ok(()) => ledger.record(user, LedgerAction::Deactivated, format!("key: {id}")),
                Err(err) => ledger.record_error(
                    user,
                    ErrorCategory::Transition,
                    format!("could not deactivate key {id}: {err}"),
                ),
            };
        }
    }

    /// Create a key, store it and tell its owner. Returns 1 when a key was
    /// created, even if storing or notifying failed afterwards.
    async fn issue(&self, identity: &Identity, ledger: &mut RunLedger) -> usize {
        let user = identity.user_name.as_str();

        ledger.record(user, LedgerAction::Creating, "new access key");
        let issued = match self.identity.create_key(user).await {
            Ok(issued) => issued,
            Err(err) => {
                ledger.record_error(
                    user,
                    ErrorCategory::Transition,
                    format!("could not create key: {err}"),
                );
                return 0;
            }
        };
        ledger.record(user, LedgerAction::Created, format!("key: {}", issued.id));

        self.store_secret(identity, &issued, ledger).await;
        self.notify_owner(identity, ledger).await;
        1
    }

    async fn store_secret(&self, identity: &Identity, issued: &IssuedKey, ledger: &mut RunLedger) {
        let user = identity.user_name.as_str();
        let path = identity.parameter_name.as_str();

        ledger.record(user, LedgerAction::Updating, format!("parameter: {path}"));
        match self.secrets.put_secret(path, &stored_secret(issued)).await {
            Ok(()) => {
                ledger.record(user, LedgerAction::Updated, format!("parameter: {path}"));
            }
            Err(err) => {
                ledger.record_error(
                    user,
                    ErrorCategory::Persistence,
                    format!("key {} created but parameter {path} not updated: {err}", issued.id),
                );
            }
        }
    }

    async fn notify_owner(&self, identity: &Identity, ledger: &mut RunLedger) {
        let user = identity.user_name.as_str();

        ledger.record(user, LedgerAction::Creating, "new task");
        match self
            .notifier
            .create_task(user, &identity.parameter_name, &identity.assignee_id)
            .await
        {
            Ok(receipt) => {
                ledger.record(user, LedgerAction::Created, format!("new task: {receipt}"));
            }
            Err(err) => {
                ledger.record_error(
                    user,
                    ErrorCategory::Persistence,
                    format!("could not create task: {err}"),
                );
            }
        }
    }

    async fn finish(
        &self,
        ledger: RunLedger,
        now: DateTime<Utc>,
        mode: RunMode,
        identities: usize,
        keys_issued: usize,
    ) -> RunReport {
        let summary = ledger.render();

        let summary_published = match mode {
            RunMode::Apply => {
                let subject = format!("{SUMMARY_SUBJECT} {}", short_date(now));
                match self.notifier.publish_summary(&subject, &summary).await {
                    Ok(()) => {
                        tracing::info!(%subject, "published run summary");
                        true
                    }
                    Err(err) => {
                        tracing::error!(error = %err, "could not publish run summary");
                        false
                    }
                }
            }
            RunMode::PlanOnly => false,
        };
        tracing::info!("run summary\n{summary}");

        RunReport {
            mode,
            started_at: now,
            identities,
            keys_issued,
            validation_errors: ledger.count(ErrorCategory::Validation),
            fetch_errors: ledger.count(ErrorCategory::Fetch),
            transition_errors: ledger.count(ErrorCategory::Transition),
            alerts: ledger.count(ErrorCategory::Persistence),
            summary_published,
            summary,
            entries: ledger.into_entries(),
        }
    }
}

impl std::fmt::Debug for RotationJob {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RotationJob")
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

/// JSON document stored for a new key
fn stored_secret(issued: &IssuedKey) -> SecretString {
    let value = serde_json::json!({
        "AccessKeyId": issued.id,
        "SecretAccessKey": issued.secret.expose_secret(),
    });
    SecretString::from(value.to_string())
}

fn record_capacity(user: &str, plan: &TransitionPlan, ledger: &mut RunLedger) {
    if let Replacement::AtCapacity { count, key_ids } = &plan.replacement {
        ledger.record(
            user,
            LedgerAction::Info,
            format!("{count} keys meets max allowed. keys: {}", key_ids.join(", ")),
        );
    }
}

fn record_plan(user: &str, plan: &TransitionPlan, ledger: &mut RunLedger) {
    for planned in &plan.transitions {
        ledger.record(
            user,
            LedgerAction::Plan,
            format!(
                "{} key: {} age: {} days",
                planned.transition, planned.key_id, planned.age_days
            ),
        );
    }
    record_capacity(user, plan, ledger);

    let reason = match &plan.replacement {
        Replacement::NoKeys => Some("no keys held".to_string()),
        Replacement::NewestAged { key_id, age_days } => {
            Some(format!("newest key {key_id} is {age_days} days old"))
        }
        Replacement::AtCapacity { .. } | Replacement::NewestFresh { .. } => None,
    };
    if let Some(reason) = reason {
        ledger.record(user, LedgerAction::Plan, format!("create new access key: {reason}"));
    }
}
