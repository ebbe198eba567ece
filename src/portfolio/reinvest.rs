//! Dividend reinvestment simulator
//!
//! Walks one asset's history in date order, carrying a share count:
//!
//! - open: `shares = investment / price[0]`
//! - each later day: if a dividend is paid, the cash `shares × dividend` buys
//!   `cash / price` more shares at that day's price; otherwise nothing changes
//!
//! The dividend is read from each point as it is visited, so the price and
//! dividend of a day can never come from different rows.

use chrono::NaiveDate;
use itertools::Itertools;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::debug;

use crate::error::{Result, SimulationError};
use crate::pricing::HistoryPoint;
use crate::series::{SeriesPoint, ValueSeries};

/// Shares held at the close of a trading day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SharePosition {
    pub date: NaiveDate,
    pub shares: Decimal,
}

/// Share positions and market value of one asset on its own trading days
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReinvestmentResult {
    pub positions: Vec<SharePosition>,
    pub values: ValueSeries,
    /// Number of dividends reinvested
    pub reinvestments: usize,
}

#[derive(Debug, Clone, Copy)]
struct Holding {
    shares: Decimal,
}

impl Holding {
    /// `None` when the share count does not fit in a `Decimal`
    fn open(investment: Decimal, price: Decimal) -> Option<Self> {
        investment.checked_div(price).map(|shares| Self { shares })
    }

    fn reinvest(self, dividend: Decimal, price: Decimal) -> Option<Self> {
        if dividend <= Decimal::ZERO {
            return Some(self);
        }
        let cash = self.shares.checked_mul(dividend)?;
        let bought = cash.checked_div(price)?;
        self.shares.checked_add(bought).map(|shares| Self { shares })
    }

    fn value_at(self, price: Decimal) -> Option<Decimal> {
        self.shares.checked_mul(price)
    }
}

fn out_of_range(symbol: &str, date: NaiveDate) -> SimulationError {
    SimulationError::InvalidPriceData {
        symbol: symbol.to_string(),
        date,
    }
}

fn check_point(symbol: &str, point: &HistoryPoint) -> Result<()> {
    if point.adjusted_close <= Decimal::ZERO {
        return Err(SimulationError::InvalidPriceData {
            symbol: symbol.to_string(),
            date: point.date,
        });
    }
    if point.dividend < Decimal::ZERO {
        return Err(SimulationError::InvalidDividendData {
            symbol: symbol.to_string(),
            date: point.date,
        });
    }
    Ok(())
}

/// Simulate buying `investment` worth of `symbol` on its first trading day
/// and reinvesting every later dividend.
///
/// A dividend on the first day is not reinvested: the position is opened at
/// that day's close.
pub fn simulate_reinvestment(
    symbol: &str,
    investment: Decimal,
    history: &[HistoryPoint],
) -> Result<ReinvestmentResult> {
    if investment <= Decimal::ZERO {
        return Err(SimulationError::InvalidInput(format!(
            "investment in {} must be positive, got {}",
            symbol, investment
        )));
    }
    let Some(first) = history.first() else {
        return Err(SimulationError::DataUnavailable(symbol.to_string()));
    };
    if let Some((_, later)) = history
        .iter()
        .tuple_windows()
        .find(|(prev, next)| next.date <= prev.date)
    {
        return Err(SimulationError::UnorderedHistory {
            symbol: symbol.to_string(),
            date: later.date,
        });
    }

    check_point(symbol, first)?;
    let mut holding = Holding::open(investment, first.adjusted_close)
        .ok_or_else(|| out_of_range(symbol, first.date))?;
    let mut positions = Vec::with_capacity(history.len());
    let mut values = Vec::with_capacity(history.len());
    let mut reinvestments = 0;

    for (i, point) in history.iter().enumerate() {
        if i > 0 {
            check_point(symbol, point)?;
            if point.dividend > Decimal::ZERO {
                reinvestments += 1;
            }
            holding = holding
                .reinvest(point.dividend, point.adjusted_close)
                .ok_or_else(|| out_of_range(symbol, point.date))?;
        }
        let value = holding
            .value_at(point.adjusted_close)
            .ok_or_else(|| out_of_range(symbol, point.date))?;

        positions.push(SharePosition {
            date: point.date,
            shares: holding.shares,
        });
        values.push(SeriesPoint {
            date: point.date,
            value,
        });
    }

    debug!(
        "{}: {} trading days, {} dividends reinvested, {} shares at end",
        symbol,
        history.len(),
        reinvestments,
        holding.shares.round_dp(6)
    );

    Ok(ReinvestmentResult {
        positions,
        values: ValueSeries::new(symbol, values),
        reinvestments,
    })
}
