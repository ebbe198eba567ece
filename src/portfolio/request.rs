use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::allocation::{build_allocations, AssetAllocation};
use super::benchmark::BenchmarkSelection;
use crate::error::{Result, SimulationError};

/// A validated simulation request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationRequest {
    pub allocations: Vec<AssetAllocation>,
    pub benchmark: BenchmarkSelection,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub initial_investment: Decimal,
}

fn parse_date(field: &str, raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|_| {
        SimulationError::InvalidInput(format!(
            "{} '{}' is not a YYYY-MM-DD date",
            field, raw
        ))
    })
}

impl SimulationRequest {
    /// Build a request from the raw form fields: repeated tickers and weights,
    /// an index symbol or `None`, and ISO start/end dates (both inclusive).
    pub fn from_form(
        tickers: &[String],
        weights: &[String],
        index: &str,
        start_date: &str,
        end_date: &str,
        initial_investment: Decimal,
    ) -> Result<Self> {
        let start = parse_date("start_date", start_date)?;
        let end = parse_date("end_date", end_date)?;
        if start > end {
            return Err(SimulationError::InvalidDateRange { start, end });
        }

        Ok(Self {
            allocations: build_allocations(tickers, weights, initial_investment)?,
            benchmark: BenchmarkSelection::parse(index),
            start,
            end,
            initial_investment,
        })
    }
}
