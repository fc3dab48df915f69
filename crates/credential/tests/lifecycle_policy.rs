//! Integration tests for the lifecycle policy
//!
//! These exercise the policy through the public API only: thresholds are
//! built with validation, plans are applied to a simulated snapshot and
//! re-planned.

use chrono::{DateTime, Duration, TimeZone, Utc};
use keyrot_credential::prelude::*;
use pretty_assertions::assert_eq;
use rstest::rstest;

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 15, 9, 30, 0).unwrap()
}

fn aged(id: &str, days: i64, status: KeyStatus) -> AccessKey {
    AccessKey::new(id, now() - Duration::days(days), status)
}

/// Apply a plan to a snapshot the way the identity provider would
fn apply(keys: &[AccessKey], plan: &TransitionPlan) -> Vec<AccessKey> {
    keys.iter()
        .filter(|k| plan.transition_for(&k.id) != Some(Transition::Delete))
        .map(|k| match plan.transition_for(&k.id) {
            Some(Transition::Deactivate) => AccessKey {
                status: KeyStatus::Inactive,
                ..k.clone()
            },
            _ => k.clone(),
        })
        .collect()
}

#[test]
fn single_key_at_delete_age_is_deleted_and_replaced() {
    // GIVEN: one active key aged exactly delete_age and room for another key
    let policy = LifecyclePolicy::default();
    let delete_age = policy.thresholds().delete_age() as i64;
    let keys = [aged("AKIAOLD", delete_age, KeyStatus::Active)];

    // WHEN: the policy plans
    let plan = policy.plan(&keys, now());

    // THEN: the key is deleted and a replacement is requested
    assert_eq!(plan.transitions.len(), 1);
    assert_eq!(plan.transition_for("AKIAOLD"), Some(Transition::Delete));
    assert!(plan.issue_new());
}

#[test]
fn newest_not_oldest_key_drives_replacement() {
    let policy = LifecyclePolicy::new(AgeThresholds::new(90, 100, 110).unwrap(), 3).unwrap();
    let keys = [
        aged("younger", 89, KeyStatus::Active),
        aged("older", 91, KeyStatus::Active),
    ];
    assert!(!policy.plan(&keys, now()).issue_new());

    let keys = [
        aged("newest", 91, KeyStatus::Active),
        aged("oldest", 95, KeyStatus::Active),
    ];
    let plan = policy.plan(&keys, now());
    assert!(plan.issue_new());
    assert_eq!(
        plan.replacement,
        Replacement::NewestAged {
            key_id: "newest".into(),
            age_days: 91
        }
    );
}

#[test]
fn create_age_boundary_uses_newest_key() {
    // Ages create_age - 1 and create_age + 1 with room for a third key: the
    // newest is still fresh, so nothing is issued.
    let policy = LifecyclePolicy::new(AgeThresholds::default(), 3).unwrap();
    let create_age = policy.thresholds().create_age() as i64;
    let keys = [
        aged("fresh", create_age - 1, KeyStatus::Active),
        aged("stale", create_age + 1, KeyStatus::Active),
    ];
    assert!(!policy.plan(&keys, now()).issue_new());

    // Same ages under the default ceiling of two: at capacity, nothing is issued.
    assert!(!LifecyclePolicy::default().plan(&keys, now()).issue_new());

    // A single key one day past create_age triggers issuance.
    let keys = [aged("stale", create_age + 1, KeyStatus::Active)];
    assert!(LifecyclePolicy::default().plan(&keys, now()).issue_new());
}

#[rstest]
#[case::two_fresh(&[5, 10])]
#[case::two_expired(&[150, 200])]
#[case::mixed(&[1, 300])]
fn at_capacity_never_issues(#[case] ages: &[i64]) {
    let policy = LifecyclePolicy::default();
    let keys: Vec<_> = ages
        .iter()
        .enumerate()
        .map(|(i, age)| aged(&format!("AKIA{i}"), *age, KeyStatus::Active))
        .collect();
    let plan = policy.plan(&keys, now());
    assert!(!plan.issue_new());
    assert!(matches!(plan.replacement, Replacement::AtCapacity { count: 2, .. }));
}

#[rstest]
#[case(KeyStatus::Active)]
#[case(KeyStatus::Inactive)]
fn delete_age_always_wins_over_deactivate(#[case] status: KeyStatus) {
    let policy = LifecyclePolicy::default();
    for age in [110, 111, 500, 36_500] {
        let plan = policy.plan(&[aged("AKIA", age, status)], now());
        assert_eq!(plan.transition_for("AKIA"), Some(Transition::Delete), "age {age}");
        assert_eq!(plan.deactivations().count(), 0);
    }
}

#[test]
fn replanning_after_applying_never_repeats_work() {
    // GIVEN: a mixed snapshot
    let policy = LifecyclePolicy::new(AgeThresholds::default(), 4).unwrap();
    let keys = vec![
        aged("delete-active", 130, KeyStatus::Active),
        aged("delete-inactive", 111, KeyStatus::Inactive),
        aged("deactivate", 104, KeyStatus::Active),
        aged("keep", 12, KeyStatus::Active),
    ];

    // WHEN: the plan is applied and the policy runs again on the result
    let first = policy.plan(&keys, now());
    let after = apply(&keys, &first);
    let second = policy.plan(&after, now());

    // THEN: deleted keys are gone and the deactivated key is left alone
    assert_eq!(
        after.iter().map(|k| k.id.as_str()).collect::<Vec<_>>(),
        vec!["deactivate", "keep"]
    );
    assert!(second.transitions.is_empty());
    for planned in &first.transitions {
        assert_ne!(
            second.transition_for(&planned.key_id),
            Some(planned.transition)
        );
    }
}

#[test]
fn plan_serializes_with_reason_tag() {
    let plan = LifecyclePolicy::default().plan(&[], now());
    let json = serde_json::to_value(&plan).unwrap();
    assert_eq!(json["replacement"]["reason"], "no_keys");
    assert_eq!(json["transitions"], serde_json::json!([]));
}
