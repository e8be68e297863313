//! Wire types for the ProfitApp JSON API
//!
//! Field names follow the backend payloads exactly. Numeric fields the
//! backend may omit default to zero so older server builds decode cleanly.

use serde::{Deserialize, Serialize};

// ============================================================================
// Enums
// ============================================================================

/// Record type stored with every transaction line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecordType {
    Sale,
    Expense,
}

impl RecordType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sale => "Sale",
            Self::Expense => "Expense",
        }
    }

    /// Flip between the two types (form toggle)
    pub fn toggle(self) -> Self {
        match self {
            Self::Sale => Self::Expense,
            Self::Expense => Self::Sale,
        }
    }
}

/// Aggregation granularity for ranged queries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Grouping {
    #[default]
    Daily,
    Monthly,
    Yearly,
}

impl Grouping {
    /// Query-parameter value expected by the backend
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
        }
    }

    /// Cycle through the granularities (form toggle)
    pub fn next(self) -> Self {
        match self {
            Self::Daily => Self::Monthly,
            Self::Monthly => Self::Yearly,
            Self::Yearly => Self::Daily,
        }
    }
}

/// Export download format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Excel,
}

impl ExportFormat {
    /// API path for the download
    pub fn path(self) -> &'static str {
        match self {
            Self::Csv => "api/export/csv",
            Self::Excel => "api/export/excel",
        }
    }

    /// File extension for saving the download
    pub fn extension(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Excel => "xlsx",
        }
    }
}

// ============================================================================
// Summary DTOs
// ============================================================================

/// Today-fixed summary: the current day's metrics plus all-time totals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    /// Business date the "today" block refers to (YYYY-MM-DD)
    pub today_date: String,
    #[serde(default)]
    pub today_sales: f64,
    #[serde(default)]
    pub today_expenses: f64,
    #[serde(default)]
    pub today_profit: f64,
    #[serde(default)]
    pub today_orders: i64,
    #[serde(default)]
    pub today_items: i64,
    #[serde(default)]
    pub today_discount: f64,
    #[serde(default)]
    pub today_gross: f64,
    #[serde(default)]
    pub today_avg_sale: f64,
    #[serde(default)]
    pub total_sales: f64,
    #[serde(default)]
    pub total_expenses: f64,
    #[serde(default)]
    pub total_profit: f64,
    #[serde(default)]
    pub total_orders: i64,
    #[serde(default)]
    pub total_items: i64,
    #[serde(default)]
    pub total_discount: f64,
    #[serde(default)]
    pub total_gross: f64,
    #[serde(default)]
    pub total_avg_sale: f64,
}

/// Totals over a requested date range
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RangeTotals {
    #[serde(default)]
    pub sales: f64,
    #[serde(default)]
    pub expenses: f64,
    #[serde(default)]
    pub profit: f64,
    #[serde(default)]
    pub orders: i64,
    #[serde(default)]
    pub items: i64,
    #[serde(default)]
    pub discount: f64,
    #[serde(default)]
    pub gross: f64,
    #[serde(default)]
    pub avg_sale: f64,
}

/// One aggregated bucket (day, month or year) of a ranged query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodAggregate {
    /// Bucket label: YYYY-MM-DD, YYYY-MM or YYYY depending on grouping
    pub period: String,
    #[serde(default)]
    pub sales: f64,
    #[serde(default)]
    pub expenses: f64,
    #[serde(default)]
    pub profit: f64,
    #[serde(default)]
    pub orders: i64,
    #[serde(default)]
    pub items: i64,
    #[serde(default)]
    pub discount: f64,
    #[serde(default)]
    pub gross: f64,
    #[serde(default)]
    pub avg_sale: f64,
}

/// Response of the ranged-summary endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RangeSummary {
    /// Grouping the server actually applied
    #[serde(default)]
    pub group: Grouping,
    #[serde(default)]
    pub groups: Vec<PeriodAggregate>,
    #[serde(default)]
    pub totals: RangeTotals,
}

// ============================================================================
// Record DTOs
// ============================================================================

/// One raw transaction line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordRow {
    #[serde(default)]
    pub id: i64,
    /// Record date (YYYY-MM-DD)
    pub record_date: String,
    #[serde(rename = "type")]
    pub record_type: RecordType,
    pub amount: f64,
}

/// Response of both record-listing endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordsResponse {
    #[serde(default)]
    pub records: Vec<RecordRow>,
}

/// Payload for creating a new record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewRecord {
    pub record_date: String,
    #[serde(rename = "type")]
    pub record_type: RecordType,
    pub amount: f64,
}

/// Generic write acknowledgement: `{success, error?}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ack {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_totals_default_missing_fields_to_zero() {
        let totals: RangeTotals = serde_json::from_str(r#"{"sales": 12.5}"#).unwrap();
        assert_eq!(totals.sales, 12.5);
        assert_eq!(totals.expenses, 0.0);
        assert_eq!(totals.profit, 0.0);
        assert_eq!(totals.orders, 0);
        assert_eq!(totals.discount, 0.0);
    }

    #[test]
    fn summary_tolerates_missing_optional_counters() {
        let payload = r#"{
            "today_date": "2024-05-01",
            "today_sales": 100.0,
            "total_sales": 500.0
        }"#;
        let summary: Summary = serde_json::from_str(payload).unwrap();
        assert_eq!(summary.today_orders, 0);
        assert_eq!(summary.total_sales, 500.0);
    }

    #[test]
    fn record_row_uses_wire_name_for_type() {
        let row: RecordRow = serde_json::from_str(
            r#"{"id": 3, "record_date": "2024-05-01", "type": "Expense", "amount": 42.0}"#,
        )
        .unwrap();
        assert_eq!(row.record_type, RecordType::Expense);

        let back = serde_json::to_value(&row).unwrap();
        assert_eq!(back["type"], "Expense");
    }

    #[test]
    fn grouping_serializes_lowercase() {
        assert_eq!(serde_json::to_value(Grouping::Monthly).unwrap(), "monthly");
        let group: Grouping = serde_json::from_str(r#""yearly""#).unwrap();
        assert_eq!(group, Grouping::Yearly);
        assert_eq!(Grouping::default(), Grouping::Daily);
    }
}
