// Reports module - simulation results, chart specification and CSV export

pub mod chart;
pub mod export;
pub mod simulation;

pub use chart::{chart_spec, ChartSpec, ChartTrace};
pub use export::write_series_csv;
pub use simulation::{BenchmarkReport, SimulationReport, PORTFOLIO_SERIES_NAME};
