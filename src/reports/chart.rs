//! Renderer-agnostic chart specification
//!
//! One scatter trace per series with dates on x and values on y, in the shape
//! most charting front ends accept directly.

use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use serde::Serialize;

use super::simulation::SimulationReport;
use crate::series::ValueSeries;

pub const CHART_TITLE: &str = "Portfolio vs Index";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub data: Vec<ChartTrace>,
    pub layout: ChartLayout,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartTrace {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub x: Vec<NaiveDate>,
    pub y: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartLayout {
    pub title: &'static str,
}

impl From<&ValueSeries> for ChartTrace {
    fn from(series: &ValueSeries) -> Self {
        Self {
            name: series.name.clone(),
            kind: "scatter",
            x: series.dates().collect(),
            y: series
                .values()
                .map(|v| v.round_dp(2).to_f64().unwrap_or(f64::NAN))
                .collect(),
        }
    }
}

/// Portfolio trace first, then the benchmark trace when one was requested
pub fn chart_spec(report: &SimulationReport) -> ChartSpec {
    let mut data = vec![ChartTrace::from(&report.portfolio)];
    if let Some(benchmark) = &report.benchmark {
        data.push(ChartTrace::from(&benchmark.series));
    }

    ChartSpec {
        data,
        layout: ChartLayout { title: CHART_TITLE },
    }
}
