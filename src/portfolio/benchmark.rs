//! Benchmark index normalization and display names

use once_cell::sync::Lazy;
use rust_decimal::Decimal;
use std::collections::BTreeMap;

use crate::error::{Result, SimulationError};
use crate::pricing::HistoryPoint;
use crate::series::{SeriesPoint, ValueSeries};

/// Index field value meaning "no benchmark"
pub const NO_BENCHMARK: &str = "None";

/// Label for symbols outside the known set
pub const FALLBACK_INDEX_NAME: &str = "Index";

static INDEX_NAMES: Lazy<BTreeMap<&'static str, &'static str>> = Lazy::new(|| {
    BTreeMap::from([
        ("^GSPC", "S&P 500"),
        ("^NDX", "Nasdaq 100"),
        ("^DJI", "Dow Jones Industrial Average"),
        ("^RUT", "Russell 2000"),
    ])
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BenchmarkSelection {
    None,
    Index(String),
}

impl BenchmarkSelection {
    /// `None` (any case) or a blank field disables the benchmark
    pub fn parse(field: &str) -> Self {
        let symbol = field.trim();
        if symbol.is_empty() || symbol.eq_ignore_ascii_case(NO_BENCHMARK) {
            BenchmarkSelection::None
        } else {
            BenchmarkSelection::Index(symbol.to_string())
        }
    }

    pub fn symbol(&self) -> Option<&str> {
        match self {
            BenchmarkSelection::None => None,
            BenchmarkSelection::Index(symbol) => Some(symbol),
        }
    }
}

pub fn index_display_name(symbol: &str) -> &'static str {
    INDEX_NAMES
        .get(symbol)
        .copied()
        .unwrap_or(FALLBACK_INDEX_NAME)
}

/// Known index symbols and their display names, ordered by symbol
pub fn known_indices() -> Vec<(&'static str, &'static str)> {
    INDEX_NAMES.iter().map(|(s, n)| (*s, *n)).collect()
}

/// Rescale an index history so its first close equals `investment`.
///
/// The series is named after the index's display name.
pub fn normalize(symbol: &str, history: &[HistoryPoint], investment: Decimal) -> Result<ValueSeries> {
    let first = history
        .first()
        .ok_or_else(|| SimulationError::DataUnavailable(symbol.to_string()))?;

    if let Some(bad) = history.iter().find(|p| p.adjusted_close <= Decimal::ZERO) {
        return Err(SimulationError::InvalidPriceData {
            symbol: symbol.to_string(),
            date: bad.date,
        });
    }

    let base = first.adjusted_close;
    let points = history
        .iter()
        .map(|p| {
            p.adjusted_close
                .checked_div(base)
                .and_then(|ratio| ratio.checked_mul(investment))
                .map(|value| SeriesPoint { date: p.date, value })
                .ok_or_else(|| SimulationError::InvalidPriceData {
                    symbol: symbol.to_string(),
                    date: p.date,
                })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(ValueSeries::new(index_display_name(symbol), points))
}
