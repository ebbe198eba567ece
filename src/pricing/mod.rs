// Pricing module - historical price/dividend providers

pub mod csv_files;
pub mod memory;
pub mod yahoo;

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use csv_files::CsvDirectoryProvider;
pub use memory::MemoryProvider;
pub use yahoo::YahooProvider;

/// One trading day of history for a symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryPoint {
    pub date: NaiveDate,
    pub adjusted_close: Decimal,
    /// Per-share distribution paid on this date, zero when none
    pub dividend: Decimal,
}

impl HistoryPoint {
    pub fn new(date: NaiveDate, adjusted_close: Decimal, dividend: Decimal) -> Self {
        Self {
            date,
            adjusted_close,
            dividend,
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    #[error("no data for {0}")]
    NoData(String),
    #[error("transport error: {0}")]
    Transport(String),
    #[error("parsing error: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        ProviderError::Transport(err.to_string())
    }
}

/// Source of daily price and dividend history.
///
/// Implementations return points in ascending date order, restricted to
/// `[start, end]`, and `ProviderError::NoData` when the window is empty.
#[async_trait]
pub trait HistoryProvider: Send + Sync {
    async fn fetch_history(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<HistoryPoint>, ProviderError>;
}

/// Keep the points inside `[start, end]` and sort them by date
pub(crate) fn clip_to_window(
    mut points: Vec<HistoryPoint>,
    start: NaiveDate,
    end: NaiveDate,
) -> Vec<HistoryPoint> {
    points.retain(|p| p.date >= start && p.date <= end);
    points.sort_by_key(|p| p.date);
    points
}
