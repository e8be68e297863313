//! Profit Client - HTTP client for the ProfitApp backend
//!
//! Provides typed calls to the JSON API the ProfitApp dashboard consumes:
//! summary statistics, ranged aggregates, raw records, record submission,
//! plan changes, CSV/Excel exports and the language side-channel.

pub mod config;
pub mod error;
pub mod http;
pub mod types;

pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use http::HttpClient;
pub use types::{
    Ack, ExportFormat, Grouping, NewRecord, PeriodAggregate, RangeSummary, RangeTotals, RecordRow,
    RecordType, RecordsResponse, Summary,
};
