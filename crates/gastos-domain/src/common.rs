//! Shared traits, calendar granularities, and period enums.

use std::fmt;

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Exposes a stable identifier for entities stored in the ledger.
pub trait Identifiable {
    fn id(&self) -> Uuid;
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
/// Calendar unit used to resolve the window that contains a reference date.
pub enum Granularity {
    Day,
    Week,
    Month,
    Year,
}

impl Granularity {
    /// Returns the first calendar date of the period that contains `date`.
    ///
    /// Weeks follow ISO-8601 and start on Monday.
    pub fn period_start(self, date: NaiveDate) -> NaiveDate {
        match self {
            Granularity::Day => date,
            Granularity::Week => {
                let delta = date.weekday().num_days_from_monday() as i64;
                date - Duration::days(delta)
            }
            Granularity::Month => date.with_day(1).unwrap_or(date),
            Granularity::Year => NaiveDate::from_ymd_opt(date.year(), 1, 1).unwrap_or(date),
        }
    }

    /// Advances a period start by exactly one period.
    pub fn next_start(self, start: NaiveDate) -> NaiveDate {
        match self {
            Granularity::Day => start + Duration::days(1),
            Granularity::Week => start + Duration::weeks(1),
            Granularity::Month => shift_month(start, 1),
            Granularity::Year => shift_year(start, 1),
        }
    }

    /// Resolves the half-open window of this granularity that contains `date`.
    pub fn window_containing(self, date: NaiveDate) -> DateWindow {
        let start = self.period_start(date);
        DateWindow {
            start,
            end: self.next_start(start),
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Granularity::Day => "Day",
            Granularity::Week => "Week",
            Granularity::Month => "Month",
            Granularity::Year => "Year",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
/// Enumerates canonical budgeting cadences.
pub enum BudgetPeriod {
    Daily,
    Weekly,
    #[default]
    Monthly,
    Yearly,
}

impl BudgetPeriod {
    pub const ALL: [BudgetPeriod; 4] = [
        BudgetPeriod::Daily,
        BudgetPeriod::Weekly,
        BudgetPeriod::Monthly,
        BudgetPeriod::Yearly,
    ];

    /// Returns the nominal day-count representation for the period.
    ///
    /// Only used for averaging; window resolution goes through [`Granularity`].
    pub fn days(self) -> u32 {
        match self {
            BudgetPeriod::Daily => 1,
            BudgetPeriod::Weekly => 7,
            BudgetPeriod::Monthly => 30,
            BudgetPeriod::Yearly => 365,
        }
    }

    pub fn granularity(self) -> Granularity {
        match self {
            BudgetPeriod::Daily => Granularity::Day,
            BudgetPeriod::Weekly => Granularity::Week,
            BudgetPeriod::Monthly => Granularity::Month,
            BudgetPeriod::Yearly => Granularity::Year,
        }
    }
}

impl fmt::Display for BudgetPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            BudgetPeriod::Daily => "Daily",
            BudgetPeriod::Weekly => "Weekly",
            BudgetPeriod::Monthly => "Monthly",
            BudgetPeriod::Yearly => "Yearly",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
/// Reporting horizons offered by period reports.
pub enum ReportPeriod {
    Week,
    Month,
    Year,
}

impl ReportPeriod {
    pub fn days(self) -> u32 {
        match self {
            ReportPeriod::Week => 7,
            ReportPeriod::Month => 30,
            ReportPeriod::Year => 365,
        }
    }

    pub fn granularity(self) -> Granularity {
        match self {
            ReportPeriod::Week => Granularity::Week,
            ReportPeriod::Month => Granularity::Month,
            ReportPeriod::Year => Granularity::Year,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
/// Half-open calendar interval `[start, end)`.
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date < self.end
    }

    /// Number of calendar days covered by the window.
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days()
    }
}

fn shift_month(date: NaiveDate, months: i32) -> NaiveDate {
    let mut year = date.year();
    let mut month = date.month() as i32 + months;
    while month > 12 {
        month -= 12;
        year += 1;
    }
    while month < 1 {
        month += 12;
        year -= 1;
    }
    let day = date.day().min(days_in_month(year, month as u32));
    NaiveDate::from_ymd_opt(year, month as u32, day).unwrap_or(date)
}

fn shift_year(date: NaiveDate, years: i32) -> NaiveDate {
    let year = date.year() + years;
    let month = date.month();
    let day = date.day().min(days_in_month(year, month));
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or(date)
}

fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .map(|first_next| (first_next - Duration::days(1)).day())
        .unwrap_or(28)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn week_window_starts_on_monday() {
        // 2024-03-14 is a Thursday.
        let window = Granularity::Week.window_containing(date(2024, 3, 14));
        assert_eq!(window.start, date(2024, 3, 11));
        assert_eq!(window.end, date(2024, 3, 18));
        assert!(window.contains(date(2024, 3, 17)));
        assert!(!window.contains(date(2024, 3, 18)));
    }

    #[test]
    fn month_window_handles_year_rollover() {
        let window = Granularity::Month.window_containing(date(2023, 12, 31));
        assert_eq!(window.start, date(2023, 12, 1));
        assert_eq!(window.end, date(2024, 1, 1));
        assert_eq!(window.days(), 31);
    }

    #[test]
    fn leap_year_windows_cover_full_period() {
        assert_eq!(Granularity::Month.window_containing(date(2024, 2, 10)).days(), 29);
        assert_eq!(Granularity::Year.window_containing(date(2024, 7, 1)).days(), 366);
        assert_eq!(Granularity::Day.window_containing(date(2024, 2, 29)).days(), 1);
    }

    #[test]
    fn budget_periods_map_to_granularities() {
        assert_eq!(BudgetPeriod::Weekly.granularity(), Granularity::Week);
        assert_eq!(BudgetPeriod::Yearly.days(), 365);
        assert_eq!(BudgetPeriod::default(), BudgetPeriod::Monthly);
    }
}
