//! Lifecycle planning
//!
//! Turns a live key snapshot into a [`TransitionPlan`]. Pure computation over
//! data the caller already fetched; it cannot fail.

use chrono::{DateTime, Utc};

use super::plan::{PlannedTransition, Replacement, Transition, TransitionPlan};
use super::thresholds::LifecyclePolicy;
use crate::core::AccessKey;
use crate::utils::age_in_days;

impl LifecyclePolicy {
    /// Plan transitions and the replacement decision for one user
    ///
    /// # Rules
    ///
    /// - age ≥ `delete_age` → delete, regardless of status
    /// - else age ≥ `deactivate_age` and active → deactivate
    /// - otherwise no transition
    ///
    /// The replacement decision looks at the snapshot as given: no keys means
    /// issue, a full key set means do not issue, otherwise the newest key's age
    /// against `create_age` decides. When several keys share the newest
    /// creation time, the one with the greatest id is taken.
    ///
    /// # Example
    ///
    /// ```
    /// use chrono::{Duration, Utc};
    /// use keyrot_credential::{AccessKey, LifecyclePolicy, Transition};
    ///
    /// let now = Utc::now();
    /// let policy = LifecyclePolicy::default();
    /// let keys = [AccessKey::active("AKIA1", now - Duration::days(110))];
    ///
    /// let plan = policy.plan(&keys, now);
    /// assert_eq!(plan.transition_for("AKIA1"), Some(Transition::Delete));
    /// assert!(plan.issue_new());
    /// ```
    #[must_use]
    pub fn plan(&self, keys: &[AccessKey], now: DateTime<Utc>) -> TransitionPlan {
        let thresholds = self.thresholds();
        let mut deletes = Vec::new();
        let mut deactivations = Vec::new();

        for key in keys {
            let age_days = age_in_days(now, key.created_at);
            let transition = if age_days >= thresholds.delete_age() {
                Transition::Delete
            } else if age_days >= thresholds.deactivate_age() && key.status.is_active() {
                Transition::Deactivate
            } else {
                continue;
            };

            let planned = PlannedTransition {
                key_id: key.id.clone(),
                age_days,
                transition,
            };
            match transition {
                Transition::Delete => deletes.push(planned),
                Transition::Deactivate => deactivations.push(planned),
            }
        }

        deletes.append(&mut deactivations);

        TransitionPlan {
            transitions: deletes,
            replacement: self.replacement(keys, now),
        }
    }

    fn replacement(&self, keys: &[AccessKey], now: DateTime<Utc>) -> Replacement {
        if keys.len() >= self.max_keys() {
            return Replacement::AtCapacity {
                count: keys.len(),
                key_ids: keys.iter().map(|k| k.id.clone()).collect(),
            };
        }

        let newest = keys.iter().max_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.id.cmp(&b.id))
        });

        let Some(newest) = newest else {
            return Replacement::NoKeys;
        };

        let age_days = age_in_days(now, newest.created_at);
        let key_id = newest.id.clone();
        if age_days >= self.thresholds().create_age() {
            Replacement::NewestAged { key_id, age_days }
        } else {
            Replacement::NewestFresh { key_id, age_days }
        }
    }
}
