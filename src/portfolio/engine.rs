//! Simulation engine
//!
//! Fans out one task per asset (fetch history, simulate reinvestment) bounded
//! by a semaphore, plus one unbounded task for the benchmark. Results are
//! collected back into request order before anything is aligned or summed;
//! the first failure aborts every remaining task.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

use super::aggregate::aggregate;
use super::benchmark::{self, BenchmarkSelection};
use super::reinvest::simulate_reinvestment;
use super::request::SimulationRequest;
use super::returns::{percent_return, percent_return_from_basis};
use crate::calendar::Calendar;
use crate::config::{Config, DEFAULT_MAX_CONCURRENT_FETCHES};
use crate::error::{Result, SimulationError};
use crate::pricing::{HistoryPoint, HistoryProvider, ProviderError};
use crate::reports::{BenchmarkReport, SimulationReport, PORTFOLIO_SERIES_NAME};
use crate::series::{SeriesPoint, ValueSeries};

enum TaskOutput {
    Asset { index: usize, values: ValueSeries },
    Benchmark { symbol: String, values: ValueSeries },
}

/// Runs simulations against a history provider. Holds no per-run state.
pub struct Simulator {
    provider: Arc<dyn HistoryProvider>,
    max_concurrent_fetches: usize,
}

async fn fetch(
    provider: &dyn HistoryProvider,
    symbol: &str,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Vec<HistoryPoint>> {
    provider
        .fetch_history(symbol, start, end)
        .await
        .map_err(|err| match err {
            ProviderError::NoData(_) => SimulationError::DataUnavailable(symbol.to_string()),
            other => SimulationError::Provider {
                symbol: symbol.to_string(),
                message: other.to_string(),
            },
        })
}

/// Zero-valued series on the asset's trading days, for a 0% allocation
fn unheld(symbol: &str, history: &[HistoryPoint]) -> ValueSeries {
    let points = history
        .iter()
        .map(|p| SeriesPoint {
            date: p.date,
            value: Decimal::ZERO,
        })
        .collect();
    ValueSeries::new(symbol, points)
}

impl Simulator {
    pub fn new(provider: Arc<dyn HistoryProvider>) -> Self {
        Self {
            provider,
            max_concurrent_fetches: DEFAULT_MAX_CONCURRENT_FETCHES,
        }
    }

    pub fn from_config(provider: Arc<dyn HistoryProvider>, config: &Config) -> Self {
        Self::new(provider).with_max_concurrent_fetches(config.max_concurrent_fetches)
    }

    pub fn with_max_concurrent_fetches(mut self, limit: usize) -> Self {
        self.max_concurrent_fetches = limit.max(1);
        self
    }

    pub async fn run(&self, request: &SimulationRequest) -> Result<SimulationReport> {
        let calendar = Calendar::business_days(request.start, request.end)?;
        info!(
            "Simulating {} assets from {} to {} ({} business days)",
            request.allocations.len(),
            request.start,
            request.end,
            calendar.len()
        );

        let mut join_set = self.spawn_tasks(request);

        let mut assets: Vec<Option<ValueSeries>> = vec![None; request.allocations.len()];
        let mut benchmark_values = None;
        while let Some(joined) = join_set.join_next().await {
            let output = joined
                .map_err(|e| SimulationError::Task(e.to_string()))
                .and_then(|result| result);

            match output {
                Ok(TaskOutput::Asset { index, values }) => assets[index] = Some(values),
                Ok(TaskOutput::Benchmark { symbol, values }) => {
                    benchmark_values = Some((symbol, values))
                }
                Err(err) => {
                    warn!("Simulation aborted: {}", err);
                    join_set.abort_all();
                    return Err(err);
                }
            }
        }

        let aligned = assets
            .into_iter()
            .zip(&request.allocations)
            .map(|(values, allocation)| {
                let values = values
                    .ok_or_else(|| SimulationError::Task(format!("{} did not finish", allocation.ticker)))?;
                calendar.align(&values)
            })
            .collect::<Result<Vec<_>>>()?;

        let portfolio = aggregate(PORTFOLIO_SERIES_NAME, &calendar, &aligned);
        let portfolio_return = percent_return_from_basis(request.initial_investment, &portfolio)?;

        let benchmark = match (&request.benchmark, benchmark_values) {
            (BenchmarkSelection::Index(_), Some((symbol, values))) => {
                let index_return = percent_return(&values)?;
                let series = calendar.align(&values)?.to_value_series(&calendar);
                Some(BenchmarkReport {
                    name: values.name.clone(),
                    symbol,
                    series,
                    index_return,
                })
            }
            (BenchmarkSelection::Index(symbol), None) => {
                return Err(SimulationError::Task(format!("{} did not finish", symbol)))
            }
            (BenchmarkSelection::None, _) => None,
        };

        info!(
            "Portfolio return {}%{}",
            portfolio_return,
            benchmark
                .as_ref()
                .map(|b| format!(", {} return {}%", b.name, b.index_return))
                .unwrap_or_default()
        );

        Ok(SimulationReport {
            start: request.start,
            end: request.end,
            initial_investment: request.initial_investment,
            allocations: request.allocations.clone(),
            portfolio,
            portfolio_return,
            benchmark,
        })
    }

    fn spawn_tasks(&self, request: &SimulationRequest) -> JoinSet<Result<TaskOutput>> {
        let semaphore = Arc::new(Semaphore::new(self.max_concurrent_fetches));
        let mut join_set = JoinSet::new();
        let (start, end) = (request.start, request.end);

        for (index, allocation) in request.allocations.iter().enumerate() {
            let provider = Arc::clone(&self.provider);
            let sem = Arc::clone(&semaphore);
            let ticker = allocation.ticker.clone();
            let investment: Decimal = allocation.investment;

            join_set.spawn(async move {
                // Limits concurrent provider requests
                let _permit = sem
                    .acquire_owned()
                    .await
                    .map_err(|e| SimulationError::Task(e.to_string()))?;

                debug!("Fetching {} ({} invested)", ticker, investment);
                let history = fetch(provider.as_ref(), &ticker, start, end).await?;
                let values = if investment.is_zero() {
                    unheld(&ticker, &history)
                } else {
                    simulate_reinvestment(&ticker, investment, &history)?.values
                };
                Ok(TaskOutput::Asset { index, values })
            });
        }

        if let BenchmarkSelection::Index(symbol) = &request.benchmark {
            let provider = Arc::clone(&self.provider);
            let symbol = symbol.clone();
            let investment = request.initial_investment;

            join_set.spawn(async move {
                let history = fetch(provider.as_ref(), &symbol, start, end).await?;
                let values = benchmark::normalize(&symbol, &history, investment)?;
                Ok(TaskOutput::Benchmark { symbol, values })
            });
        }

        join_set
    }
}
