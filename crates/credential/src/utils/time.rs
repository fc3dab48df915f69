//! Time utilities for key ages

use chrono::{DateTime, Datelike, Utc};

/// Milliseconds in one day
pub const MS_PER_DAY: u64 = 24 * 60 * 60 * 1000;

/// Age of a key in whole days, rounded up
///
/// Uses the absolute difference, so a creation timestamp that lies in the
/// future (clock skew) still yields a positive age. The result is symmetric:
/// `age_in_days(a, b) == age_in_days(b, a)`.
///
/// # Example
///
/// ```
/// use chrono::{Duration, Utc};
/// use keyrot_credential::age_in_days;
///
/// let now = Utc::now();
/// assert_eq!(age_in_days(now, now - Duration::hours(1)), 1);
/// assert_eq!(age_in_days(now, now - Duration::days(90)), 90);
/// ```
#[must_use]
pub fn age_in_days(now: DateTime<Utc>, created_at: DateTime<Utc>) -> u64 {
    let elapsed_ms = now
        .signed_duration_since(created_at)
        .num_milliseconds()
        .unsigned_abs();
    elapsed_ms.div_ceil(MS_PER_DAY)
}

/// `M/D/YYYY` date used in notification subjects and task titles
#[must_use]
pub fn short_date(date: DateTime<Utc>) -> String {
    format!("{}/{}/{}", date.month(), date.day(), date.year())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use rstest::rstest;

    fn reference() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    #[rstest]
    #[case::same_instant(Duration::zero(), 0)]
    #[case::one_millisecond(Duration::milliseconds(1), 1)]
    #[case::exactly_one_day(Duration::days(1), 1)]
    #[case::just_over_one_day(Duration::days(1) + Duration::seconds(1), 2)]
    #[case::ninety_days(Duration::days(90), 90)]
    #[case::ten_years(Duration::days(3650), 3650)]
    fn rounds_partial_days_up(#[case] elapsed: Duration, #[case] expected: u64) {
        let now = reference();
        assert_eq!(age_in_days(now, now - elapsed), expected);
    }

    #[rstest]
    #[case(Duration::hours(5))]
    #[case(Duration::days(100) + Duration::minutes(3))]
    #[case(Duration::days(-7))]
    fn age_is_symmetric(#[case] offset: Duration) {
        let now = reference();
        let other = now - offset;
        assert_eq!(age_in_days(now, other), age_in_days(other, now));
    }

    #[test]
    fn future_creation_date_is_not_negative() {
        let now = reference();
        assert_eq!(age_in_days(now, now + Duration::days(3)), 3);
    }

    #[test]
    fn short_date_has_no_padding() {
        let date = Utc.with_ymd_and_hms(2024, 3, 7, 0, 0, 0).unwrap();
        assert_eq!(short_date(date), "3/7/2024");
    }
}
