//! Error handling for reinvest
//!
//! Every failure a simulation can hit is a distinct `SimulationError` variant
//! naming the offending symbol or input field. The binary wraps these in
//! anyhow for context chaining.

use chrono::NaiveDate;
use thiserror::Error;

/// Core error types for simulation operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SimulationError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("invalid weights: {0}")]
    InvalidWeights(String),

    #[error("invalid date range: {start} to {end}")]
    InvalidDateRange { start: NaiveDate, end: NaiveDate },

    #[error("{0} has no data for the given period")]
    DataUnavailable(String),

    #[error("{symbol} has a non-positive price on {date}")]
    InvalidPriceData { symbol: String, date: NaiveDate },

    #[error("{symbol} has a negative dividend on {date}")]
    InvalidDividendData { symbol: String, date: NaiveDate },

    #[error("{symbol} history is not in ascending date order at {date}")]
    UnorderedHistory { symbol: String, date: NaiveDate },

    #[error("{0} has no observation on any business day of the window")]
    UnalignedSeries(String),

    #[error("cannot compute a return on an empty series")]
    EmptySeries,

    #[error("cannot compute a return against a zero basis")]
    ZeroBasis,

    #[error("market data error for {symbol}: {message}")]
    Provider { symbol: String, message: String },

    #[error("simulation task failed: {0}")]
    Task(String),
}

/// Result type alias for simulation operations
pub type Result<T, E = SimulationError> = std::result::Result<T, E>;
