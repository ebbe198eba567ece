use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::HashMap;

use super::{clip_to_window, HistoryPoint, HistoryProvider, ProviderError};

/// Provider backed by fixed in-memory histories
#[derive(Debug, Clone, Default)]
pub struct MemoryProvider {
    histories: HashMap<String, Vec<HistoryPoint>>,
}

impl MemoryProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_history(mut self, symbol: &str, points: Vec<HistoryPoint>) -> Self {
        self.insert(symbol, points);
        self
    }

    pub fn insert(&mut self, symbol: &str, points: Vec<HistoryPoint>) {
        self.histories.insert(symbol.to_string(), points);
    }
}

#[async_trait]
impl HistoryProvider for MemoryProvider {
    async fn fetch_history(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<HistoryPoint>, ProviderError> {
        let points = self
            .histories
            .get(symbol)
            .cloned()
            .map(|points| clip_to_window(points, start, end))
            .unwrap_or_default();

        if points.is_empty() {
            return Err(ProviderError::NoData(symbol.to_string()));
        }
        Ok(points)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn test_unknown_symbol_is_no_data() {
        let provider = MemoryProvider::new();
        let d = NaiveDate::from_ymd_opt(2024, 1, 8).unwrap();

        let err = provider.fetch_history("NOPE", d, d).await.unwrap_err();
        assert_eq!(err, ProviderError::NoData("NOPE".to_string()));
    }

    #[tokio::test]
    async fn test_window_outside_history_is_no_data() {
        let d = |day| NaiveDate::from_ymd_opt(2024, 1, day).unwrap();
        let provider = MemoryProvider::new()
            .with_history("AAPL", vec![HistoryPoint::new(d(8), dec!(100), dec!(0))]);

        assert!(provider.fetch_history("AAPL", d(8), d(8)).await.is_ok());
        assert!(matches!(
            provider.fetch_history("AAPL", d(9), d(12)).await,
            Err(ProviderError::NoData(_))
        ));
    }
}
