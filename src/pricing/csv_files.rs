//! Offline provider reading one CSV file per symbol
//!
//! Layout: `<root>/<SYMBOL>.csv` with a `date,adj_close,dividend` header.
//! The dividend column may be left empty on days without a distribution.
//!
//! ```text
//! date,adj_close,dividend
//! 2024-01-08,100.00,
//! 2024-01-09,100.00,1.00
//! ```

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::{clip_to_window, HistoryPoint, HistoryProvider, ProviderError};

#[derive(Debug, Deserialize)]
struct CsvRow {
    date: NaiveDate,
    adj_close: Decimal,
    dividend: Option<Decimal>,
}

#[derive(Debug, Clone)]
pub struct CsvDirectoryProvider {
    root: PathBuf,
}

impl CsvDirectoryProvider {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn path_for(&self, symbol: &str) -> PathBuf {
        self.root.join(format!("{}.csv", symbol))
    }
}

/// Parse the CSV body of one symbol's history
pub fn parse_history_csv(content: &str) -> Result<Vec<HistoryPoint>, ProviderError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());

    reader
        .deserialize::<CsvRow>()
        .map(|row| {
            let row = row.map_err(|e| ProviderError::Parse(e.to_string()))?;
            Ok(HistoryPoint::new(
                row.date,
                row.adj_close,
                row.dividend.unwrap_or(Decimal::ZERO),
            ))
        })
        .collect()
}

async fn read_if_exists(path: &Path) -> Result<Option<String>, ProviderError> {
    match tokio::fs::read_to_string(path).await {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(ProviderError::Transport(format!(
            "failed to read {}: {}",
            path.display(),
            e
        ))),
    }
}

#[async_trait]
impl HistoryProvider for CsvDirectoryProvider {
    async fn fetch_history(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<HistoryPoint>, ProviderError> {
        let path = self.path_for(symbol);
        let Some(content) = read_if_exists(&path).await? else {
            debug!("No history file for {} at {}", symbol, path.display());
            return Err(ProviderError::NoData(symbol.to_string()));
        };

        let points = clip_to_window(parse_history_csv(&content)?, start, end);
        if points.is_empty() {
            return Err(ProviderError::NoData(symbol.to_string()));
        }

        debug!("Loaded {} rows for {} from {}", points.len(), symbol, path.display());
        Ok(points)
    }
}
