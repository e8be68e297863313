//! View-models for the dashboard panels
//!
//! Pure builders turning API payloads into the structures the renderer
//! paints. Keeping them paint-free makes the refresh logic testable without
//! a terminal.

use profit_client::{PeriodAggregate, RangeTotals, RecordRow, RecordType, Summary};

use crate::i18n::Strings;
use crate::refresh::RecordsPlan;

/// Fixed currency suffix used for every monetary value
pub const CURRENCY: &str = "SEK";

/// Format money with two decimals and the currency suffix
pub fn format_money(value: f64) -> String {
    format!("{value:.2} {CURRENCY}")
}

/// One stat card: a label and an already-formatted value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub label: String,
    pub value: String,
}

/// A titled row of stat cards
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardSet {
    pub title: String,
    pub cards: Vec<Card>,
}

/// Column layout of the records table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableLayout {
    /// Date / Type / Amount
    Records,
    /// Period / Sales / Expenses / Profit
    Aggregates,
}

/// The records panel: header, rows and the window suffix describing what
/// the rows cover. Suffix and rows travel together so they cannot drift
/// apart across refreshes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableView {
    pub title: String,
    pub suffix: String,
    pub layout: TableLayout,
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

fn card(label: &str, value: String) -> Card {
    Card {
        label: label.to_string(),
        value,
    }
}

fn metric_cards(
    s: &Strings,
    sales: f64,
    expenses: f64,
    profit: f64,
    orders: i64,
    items: i64,
    discount: f64,
) -> Vec<Card> {
    vec![
        card(s.sales, format_money(sales)),
        card(s.expenses, format_money(expenses)),
        card(s.profit, format_money(profit)),
        card(s.orders, orders.to_string()),
        card(s.items, items.to_string()),
        card(s.discount, format_money(discount)),
    ]
}

/// Today's card set, titled with the business date it refers to
pub fn today_cards(summary: &Summary, s: &Strings) -> CardSet {
    CardSet {
        title: format!("{} · {}", s.today_title, summary.today_date),
        cards: metric_cards(
            s,
            summary.today_sales,
            summary.today_expenses,
            summary.today_profit,
            summary.today_orders,
            summary.today_items,
            summary.today_discount,
        ),
    }
}

/// All-time totals taken from the today-fixed summary payload
pub fn totals_from_summary(summary: &Summary, s: &Strings) -> CardSet {
    CardSet {
        title: s.totals_title.to_string(),
        cards: metric_cards(
            s,
            summary.total_sales,
            summary.total_expenses,
            summary.total_profit,
            summary.total_orders,
            summary.total_items,
            summary.total_discount,
        ),
    }
}

/// Totals for the selected range
pub fn totals_from_range(totals: &RangeTotals, s: &Strings) -> CardSet {
    CardSet {
        title: s.totals_title.to_string(),
        cards: metric_cards(
            s,
            totals.sales,
            totals.expenses,
            totals.profit,
            totals.orders,
            totals.items,
            totals.discount,
        ),
    }
}

fn type_label(record_type: RecordType, s: &Strings) -> &'static str {
    match record_type {
        RecordType::Sale => s.type_sale,
        RecordType::Expense => s.type_expense,
    }
}

/// Raw-record table: Date / Type / Amount
pub fn records_table(rows: &[RecordRow], suffix: String, s: &Strings) -> TableView {
    TableView {
        title: s.records_title.to_string(),
        suffix,
        layout: TableLayout::Records,
        header: vec![
            s.header_date.to_string(),
            s.header_type.to_string(),
            s.header_amount.to_string(),
        ],
        rows: rows
            .iter()
            .map(|row| {
                vec![
                    row.record_date.clone(),
                    type_label(row.record_type, s).to_string(),
                    format_money(row.amount),
                ]
            })
            .collect(),
    }
}

/// Aggregated table: Period / Sales / Expenses / Profit
pub fn aggregates_table(groups: &[PeriodAggregate], suffix: String, s: &Strings) -> TableView {
    TableView {
        title: s.records_title.to_string(),
        suffix,
        layout: TableLayout::Aggregates,
        header: vec![
            s.header_period.to_string(),
            s.sales.to_string(),
            s.expenses.to_string(),
            s.profit.to_string(),
        ],
        rows: groups
            .iter()
            .map(|group| {
                vec![
                    group.period.clone(),
                    format_money(group.sales),
                    format_money(group.expenses),
                    format_money(group.profit),
                ]
            })
            .collect(),
    }
}

/// Human-readable description of the window a records fetch covered
pub fn window_suffix(plan: &RecordsPlan, s: &Strings) -> String {
    match plan {
        RecordsPlan::Grouped { start, end, group } => {
            let group = match group {
                profit_client::Grouping::Daily => s.group_daily,
                profit_client::Grouping::Monthly => s.group_monthly,
                profit_client::Grouping::Yearly => s.group_yearly,
            };
            format!("({} → {} · {})", bound(start), bound(end), group)
        }
        RecordsPlan::Ranged { start, end } => {
            format!("({} → {})", bound(start), bound(end))
        }
        RecordsPlan::Recent {
            days: Some(days), ..
        } => s.suffix_last_days.replace("{n}", &days.to_string()),
        RecordsPlan::Recent { limit, days: None } => {
            s.suffix_last_records.replace("{n}", &limit.to_string())
        }
    }
}

fn bound(side: &Option<String>) -> &str {
    side.as_deref().unwrap_or("…")
}
