//! Quick-filter date ranges
//!
//! Maps a named quick filter to a concrete calendar range relative to an
//! explicit anchor date. Weeks start on Monday; month boundaries come from
//! calendar arithmetic so year rollovers fall out naturally.

use chrono::{Datelike, Duration, NaiveDate};

/// A preset reporting window selectable with a single key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuickFilter {
    Today,
    Yesterday,
    ThisWeek,
    LastWeek,
    ThisMonth,
    LastMonth,
    All,
}

/// Inclusive calendar range; both sides open means "unfiltered"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    fn single(date: NaiveDate) -> Self {
        Self {
            start: Some(date),
            end: Some(date),
        }
    }

    fn span(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
        }
    }
}

impl QuickFilter {
    /// Parse a filter token; unrecognized tokens select the unfiltered view
    pub fn from_token(token: &str) -> Self {
        match token {
            "today" => Self::Today,
            "yesterday" => Self::Yesterday,
            "this-week" => Self::ThisWeek,
            "last-week" => Self::LastWeek,
            "this-month" => Self::ThisMonth,
            "last-month" => Self::LastMonth,
            _ => Self::All,
        }
    }

    /// Resolve the filter into a concrete range anchored at `today`
    pub fn resolve(self, today: NaiveDate) -> DateRange {
        match self {
            Self::Today => DateRange::single(today),
            Self::Yesterday => DateRange::single(today - Duration::days(1)),
            Self::ThisWeek => DateRange::span(week_start(today), today),
            Self::LastWeek => {
                let start = week_start(today) - Duration::days(7);
                DateRange::span(start, start + Duration::days(6))
            }
            Self::ThisMonth => DateRange::span(month_start(today), today),
            Self::LastMonth => {
                let end = month_start(today) - Duration::days(1);
                DateRange::span(month_start(end), end)
            }
            Self::All => DateRange::default(),
        }
    }
}

/// Monday of the week containing `date`
fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
}

/// First day of the month containing `date`
fn month_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.day0()))
}
