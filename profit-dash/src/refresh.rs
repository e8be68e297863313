//! Refresh orchestration
//!
//! Picks the backend query shape for the current selection, runs the
//! fetches on the runtime and reports outcomes back to the controller over
//! a channel. Every outcome carries the request token it was issued with;
//! the controller drops outcomes whose token is no longer the latest for
//! that refresh kind, so a slow response can never overwrite a newer one.

use profit_client::{
    ClientError, Grouping, HttpClient, PeriodAggregate, RangeTotals, RecordRow, Summary,
};
use tokio::sync::mpsc::UnboundedSender;

use crate::app::AppEvent;
use crate::selection::Selection;

/// Row cap for the unfiltered most-recent listing
pub const RECENT_LIMIT: u32 = 50;

/// Which backend call serves the records panel for a given selection
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordsPlan {
    /// Range mode with a non-daily grouping: aggregated buckets
    Grouped {
        start: Option<String>,
        end: Option<String>,
        group: Grouping,
    },
    /// Range mode with daily grouping: raw records for the range
    Ranged {
        start: Option<String>,
        end: Option<String>,
    },
    /// No range: the most recent records, optionally windowed by days
    Recent { limit: u32, days: Option<u32> },
}

/// Decide the records query shape. A "daily" grouping in range mode lists
/// raw records rather than day buckets, matching the backend's split
/// between `records_range` and `summary_range`.
pub fn records_plan(selection: &Selection, days_filter: Option<u32>) -> RecordsPlan {
    if selection.range_mode() {
        let start = selection.start_string();
        let end = selection.end_string();
        if selection.group == Grouping::Daily {
            RecordsPlan::Ranged { start, end }
        } else {
            RecordsPlan::Grouped {
                start,
                end,
                group: selection.group,
            }
        }
    } else {
        RecordsPlan::Recent {
            limit: RECENT_LIMIT,
            days: days_filter,
        }
    }
}

/// Result of one summary refresh
#[derive(Debug)]
pub struct SummaryFetch {
    pub today: Summary,
    /// Range-mode totals. `Some(Err)` means the ranged call failed after
    /// the today call succeeded; the today cards still repaint.
    pub range_totals: Option<Result<RangeTotals, ClientError>>,
}

/// Result of one records refresh
#[derive(Debug)]
pub enum RecordsFetch {
    Rows(Vec<RecordRow>),
    Groups(Vec<PeriodAggregate>),
}

/// A completed refresh, tagged with the token it was issued under
#[derive(Debug)]
pub enum Outcome {
    Summary {
        token: u64,
        result: Result<SummaryFetch, ClientError>,
    },
    Records {
        token: u64,
        plan: RecordsPlan,
        result: Result<RecordsFetch, ClientError>,
    },
}

/// Run a summary refresh in the background
pub fn spawn_summary(
    client: HttpClient,
    selection: Selection,
    token: u64,
    tx: UnboundedSender<AppEvent>,
) {
    tokio::spawn(async move {
        let result = fetch_summary(&client, &selection).await;
        let _ = tx.send(AppEvent::Refresh(Outcome::Summary { token, result }));
    });
}

async fn fetch_summary(
    client: &HttpClient,
    selection: &Selection,
) -> Result<SummaryFetch, ClientError> {
    let today = client.summary().await?;
    let range_totals = if selection.range_mode() {
        let start = selection.start_string();
        let end = selection.end_string();
        Some(
            client
                .summary_range(start.as_deref(), end.as_deref(), selection.group)
                .await
                .map(|range| range.totals),
        )
    } else {
        None
    };
    Ok(SummaryFetch { today, range_totals })
}

/// Run a records refresh for the given plan in the background
pub fn spawn_records(
    client: HttpClient,
    plan: RecordsPlan,
    token: u64,
    tx: UnboundedSender<AppEvent>,
) {
    tokio::spawn(async move {
        let result = fetch_records(&client, &plan).await;
        let _ = tx.send(AppEvent::Refresh(Outcome::Records {
            token,
            plan,
            result,
        }));
    });
}

async fn fetch_records(
    client: &HttpClient,
    plan: &RecordsPlan,
) -> Result<RecordsFetch, ClientError> {
    match plan {
        RecordsPlan::Grouped { start, end, group } => {
            let range = client
                .summary_range(start.as_deref(), end.as_deref(), *group)
                .await?;
            Ok(RecordsFetch::Groups(range.groups))
        }
        RecordsPlan::Ranged { start, end } => {
            let rows = client.records_range(start.as_deref(), end.as_deref()).await?;
            Ok(RecordsFetch::Rows(rows))
        }
        RecordsPlan::Recent { limit, days } => {
            let rows = client.records(*limit, *days).await?;
            Ok(RecordsFetch::Rows(rows))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::range::QuickFilter;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn unfiltered_selection_lists_recent_records() {
        let selection = Selection::default();
        assert_eq!(
            records_plan(&selection, None),
            RecordsPlan::Recent {
                limit: RECENT_LIMIT,
                days: None
            }
        );
        assert_eq!(
            records_plan(&selection, Some(7)),
            RecordsPlan::Recent {
                limit: RECENT_LIMIT,
                days: Some(7)
            }
        );
    }

    #[test]
    fn ranged_daily_selection_lists_raw_records() {
        let mut selection = Selection::default();
        selection.apply_manual(Some(date(2024, 1, 1)), Some(date(2024, 1, 31)), Grouping::Daily);

        assert_eq!(
            records_plan(&selection, Some(7)),
            RecordsPlan::Ranged {
                start: Some("2024-01-01".to_string()),
                end: Some("2024-01-31".to_string()),
            }
        );
    }

    #[test]
    fn ranged_grouped_selection_fetches_aggregates() {
        let mut selection = Selection::default();
        selection.apply_manual(
            Some(date(2024, 1, 1)),
            Some(date(2024, 1, 31)),
            Grouping::Monthly,
        );

        assert_eq!(
            records_plan(&selection, None),
            RecordsPlan::Grouped {
                start: Some("2024-01-01".to_string()),
                end: Some("2024-01-31".to_string()),
                group: Grouping::Monthly,
            }
        );
    }

    #[test]
    fn quick_filters_always_plan_raw_records() {
        let mut selection = Selection::default();
        selection.apply_quick_filter(QuickFilter::LastMonth, date(2024, 1, 15));

        match records_plan(&selection, None) {
            RecordsPlan::Ranged { start, end } => {
                assert_eq!(start.as_deref(), Some("2023-12-01"));
                assert_eq!(end.as_deref(), Some("2023-12-31"));
            }
            other => panic!("expected ranged plan, got {other:?}"),
        }
    }

    #[test]
    fn one_sided_ranges_keep_the_open_side_unset() {
        let mut selection = Selection::default();
        selection.apply_manual(Some(date(2024, 2, 1)), None, Grouping::Yearly);

        assert_eq!(
            records_plan(&selection, None),
            RecordsPlan::Grouped {
                start: Some("2024-02-01".to_string()),
                end: None,
                group: Grouping::Yearly,
            }
        );
    }
}
