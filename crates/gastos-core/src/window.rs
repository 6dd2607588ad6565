//! Calendar window resolution against a reference instant.
//!
//! Instants are stored in UTC but bucketed by the host's local calendar, so an
//! expense logged at 23:30 local time belongs to that local day even when the
//! UTC date has already rolled over. Nothing here is cached: callers pass the
//! reference instant on every query.

use chrono::{DateTime, Duration, Local, NaiveDate, Utc};

use gastos_domain::{DateWindow, Granularity};

/// Local calendar date of an instant.
pub fn local_date(instant: DateTime<Utc>) -> NaiveDate {
    instant.with_timezone(&Local).date_naive()
}

/// Window of `granularity` that contains `reference`.
pub fn window_containing(granularity: Granularity, reference: DateTime<Utc>) -> DateWindow {
    granularity.window_containing(local_date(reference))
}

/// Returns `true` when `record_date` falls in the same `granularity` period as `reference`.
pub fn in_window(
    record_date: DateTime<Utc>,
    granularity: Granularity,
    reference: DateTime<Utc>,
) -> bool {
    window_containing(granularity, reference).contains(local_date(record_date))
}

pub fn is_same_day(a: DateTime<Utc>, b: DateTime<Utc>) -> bool {
    local_date(a) == local_date(b)
}

/// `true` when `candidate` falls on the local calendar day before `reference`.
pub fn is_day_before(candidate: DateTime<Utc>, reference: DateTime<Utc>) -> bool {
    local_date(candidate) + Duration::days(1) == local_date(reference)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn local_noon(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Local
            .with_ymd_and_hms(y, m, d, 12, 0, 0)
            .single()
            .expect("unambiguous local noon")
            .with_timezone(&Utc)
    }

    #[test]
    fn day_window_matches_only_same_local_date() {
        let reference = local_noon(2024, 6, 12);
        assert!(in_window(local_noon(2024, 6, 12), Granularity::Day, reference));
        assert!(!in_window(local_noon(2024, 6, 11), Granularity::Day, reference));
    }

    #[test]
    fn week_window_uses_calendar_weeks_not_rolling_days() {
        // Wednesday 2024-06-12; Monday 2024-06-10 is in the same week,
        // Sunday 2024-06-09 (three days earlier) is not.
        let reference = local_noon(2024, 6, 12);
        assert!(in_window(local_noon(2024, 6, 10), Granularity::Week, reference));
        assert!(in_window(local_noon(2024, 6, 16), Granularity::Week, reference));
        assert!(!in_window(local_noon(2024, 6, 9), Granularity::Week, reference));
    }

    #[test]
    fn month_and_year_windows() {
        let reference = local_noon(2024, 6, 12);
        assert!(in_window(local_noon(2024, 6, 1), Granularity::Month, reference));
        assert!(!in_window(local_noon(2024, 5, 31), Granularity::Month, reference));
        assert!(in_window(local_noon(2024, 1, 1), Granularity::Year, reference));
        assert!(!in_window(local_noon(2023, 12, 31), Granularity::Year, reference));
    }

    #[test]
    fn day_before_crosses_month_boundary() {
        assert!(is_day_before(local_noon(2024, 2, 29), local_noon(2024, 3, 1)));
        assert!(!is_day_before(local_noon(2024, 2, 28), local_noon(2024, 3, 1)));
        assert!(is_same_day(local_noon(2024, 3, 1), local_noon(2024, 3, 1)));
    }
}
