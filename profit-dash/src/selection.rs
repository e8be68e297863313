//! Active reporting window
//!
//! Single mutable record of the currently selected window and grouping,
//! owned by the app controller. The two mutation entry points overwrite the
//! whole record, never individual fields.

use chrono::NaiveDate;
use profit_client::Grouping;

use crate::range::QuickFilter;

/// Current reporting window and aggregation granularity.
///
/// With both `start` and `end` unset the dashboard is unfiltered (today
/// plus all-time totals); either side set switches it to range mode.
/// `group` only matters in range mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Selection {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    pub group: Grouping,
    /// The quick filter currently marked active, if the window came from
    /// one. Manual ranges clear it; at most one filter is active at a time.
    pub active_quick: Option<QuickFilter>,
}

impl Selection {
    /// True when either range boundary is set
    pub fn range_mode(&self) -> bool {
        self.start.is_some() || self.end.is_some()
    }

    pub fn start_string(&self) -> Option<String> {
        self.start.map(|date| date.to_string())
    }

    pub fn end_string(&self) -> Option<String> {
        self.end.map(|date| date.to_string())
    }

    /// Select a quick filter: resolve it against `today`, reset grouping to
    /// daily and mark the filter as the active one.
    pub fn apply_quick_filter(&mut self, filter: QuickFilter, today: NaiveDate) {
        let range = filter.resolve(today);
        *self = Self {
            start: range.start,
            end: range.end,
            group: Grouping::Daily,
            active_quick: Some(filter),
        };
    }

    /// Apply a manually entered range and grouping, clearing any active
    /// quick-filter marker.
    pub fn apply_manual(
        &mut self,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
        group: Grouping,
    ) {
        *self = Self {
            start,
            end,
            group,
            active_quick: None,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn quick_filter_forces_daily_grouping_and_marks_itself_active() {
        let mut selection = Selection::default();
        selection.apply_manual(None, None, Grouping::Yearly);

        selection.apply_quick_filter(QuickFilter::ThisWeek, date(2024, 3, 6));
        assert!(selection.range_mode());
        assert_eq!(selection.group, Grouping::Daily);
        assert_eq!(selection.active_quick, Some(QuickFilter::ThisWeek));
        assert_eq!(selection.start, Some(date(2024, 3, 4)));
        assert_eq!(selection.end, Some(date(2024, 3, 6)));
    }

    #[test]
    fn manual_apply_clears_the_quick_filter_marker() {
        let mut selection = Selection::default();
        selection.apply_quick_filter(QuickFilter::LastMonth, date(2024, 3, 6));
        assert!(selection.active_quick.is_some());

        selection.apply_manual(Some(date(2024, 1, 1)), None, Grouping::Monthly);
        assert_eq!(selection.active_quick, None);
        assert!(selection.range_mode());
        assert_eq!(selection.group, Grouping::Monthly);
        assert_eq!(selection.end, None);
    }

    #[test]
    fn quick_filter_replaces_a_previous_quick_filter_wholesale() {
        let mut selection = Selection::default();
        selection.apply_quick_filter(QuickFilter::LastWeek, date(2024, 3, 6));
        selection.apply_quick_filter(QuickFilter::Today, date(2024, 3, 6));

        assert_eq!(selection.active_quick, Some(QuickFilter::Today));
        assert_eq!(selection.start, Some(date(2024, 3, 6)));
        assert_eq!(selection.end, Some(date(2024, 3, 6)));
    }

    #[test]
    fn the_all_filter_returns_to_unfiltered_mode() {
        let mut selection = Selection::default();
        selection.apply_quick_filter(QuickFilter::ThisMonth, date(2024, 3, 6));
        selection.apply_quick_filter(QuickFilter::All, date(2024, 3, 6));

        assert!(!selection.range_mode());
        assert_eq!(selection.active_quick, Some(QuickFilter::All));
    }

    #[test]
    fn one_sided_manual_range_still_counts_as_range_mode() {
        let mut selection = Selection::default();
        selection.apply_manual(None, Some(date(2024, 2, 1)), Grouping::Daily);
        assert!(selection.range_mode());
    }
}
