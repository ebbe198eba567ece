use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::portfolio::allocation::AssetAllocation;
use crate::series::ValueSeries;

/// Name of the portfolio series in charts and exports
pub const PORTFOLIO_SERIES_NAME: &str = "Your Portfolio";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BenchmarkReport {
    pub symbol: String,
    pub name: String,
    /// Index value rescaled to the initial investment, on the simulation calendar
    pub series: ValueSeries,
    pub index_return: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SimulationReport {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub initial_investment: Decimal,
    pub allocations: Vec<AssetAllocation>,
    /// Portfolio value on every business day of the window
    pub portfolio: ValueSeries,
    pub portfolio_return: Decimal,
    pub benchmark: Option<BenchmarkReport>,
}

impl SimulationReport {
    pub fn index_return(&self) -> Option<Decimal> {
        self.benchmark.as_ref().map(|b| b.index_return)
    }

    pub fn index_name(&self) -> Option<&str> {
        self.benchmark.as_ref().map(|b| b.name.as_str())
    }

    pub fn final_value(&self) -> Option<Decimal> {
        self.portfolio.last().map(|p| p.value)
    }

    /// Response payload: returns, index name and the chart specification
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "start_date": self.start,
            "end_date": self.end,
            "initial_investment": self.initial_investment,
            "final_value": self.final_value(),
            "allocations": self.allocations,
            "portfolio_return": self.portfolio_return,
            "index_return": self.index_return(),
            "index_name": self.index_name(),
            "chart": super::chart::chart_spec(self),
        })
    }
}
