use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::{Result, SimulationError};
use crate::series::ValueSeries;

/// Round a percentage for presentation: exactly two places, halves away from zero
pub fn round_percent(value: Decimal) -> Decimal {
    let mut rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    rounded
}

/// `(last - basis) / basis × 100`, rounded to two places
pub fn percent_return_from_basis(basis: Decimal, series: &ValueSeries) -> Result<Decimal> {
    let last = series.last().ok_or(SimulationError::EmptySeries)?.value;
    let change = (last - basis) * Decimal::ONE_HUNDRED;
    let pct = change.checked_div(basis).ok_or(SimulationError::ZeroBasis)?;
    Ok(round_percent(pct))
}

/// `(last - first) / first × 100`, rounded to two places
pub fn percent_return(series: &ValueSeries) -> Result<Decimal> {
    let first = series.first().ok_or(SimulationError::EmptySeries)?.value;
    percent_return_from_basis(first, series)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::series::SeriesPoint;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn series(values: &[Decimal]) -> ValueSeries {
        let start = NaiveDate::from_ymd_opt(2024, 1, 8).unwrap();
        ValueSeries::new(
            "S",
            values
                .iter()
                .zip(start.iter_days())
                .map(|(&value, date)| SeriesPoint { date, value })
                .collect(),
        )
    }

    #[test]
    fn test_growth_return() {
        let s = series(&[dec!(10000), dec!(11000), dec!(12100)]);
        assert_eq!(percent_return(&s).unwrap(), dec!(21.00));
    }

    #[test]
    fn test_loss_return() {
        let s = series(&[dec!(10000), dec!(8765.4321)]);
        assert_eq!(percent_return(&s).unwrap(), dec!(-12.35));
    }

    #[test]
    fn test_basis_overrides_first_value() {
        // Late-listing asset: first aligned value differs from money invested
        let s = series(&[dec!(9800), dec!(11000)]);
        assert_eq!(percent_return_from_basis(dec!(10000), &s).unwrap(), dec!(10.00));
        assert_eq!(percent_return(&s).unwrap(), dec!(12.24));
    }

    #[test]
    fn test_rounding_halves_away_from_zero() {
        assert_eq!(round_percent(dec!(1.005)), dec!(1.01));
        assert_eq!(round_percent(dec!(-1.005)), dec!(-1.01));
        assert_eq!(round_percent(dec!(2.344)), dec!(2.34));
        assert_eq!(round_percent(dec!(11.1)).to_string(), "11.10");
        assert_eq!(round_percent(dec!(21)).to_string(), "21.00");
    }

    #[test]
    fn test_empty_series_rejected() {
        let s = series(&[]);
        assert_eq!(percent_return(&s).unwrap_err(), SimulationError::EmptySeries);
        assert_eq!(
            percent_return_from_basis(dec!(10000), &s).unwrap_err(),
            SimulationError::EmptySeries
        );
    }

    #[test]
    fn test_zero_basis_rejected() {
        let s = series(&[dec!(0), dec!(5)]);
        assert_eq!(percent_return(&s).unwrap_err(), SimulationError::ZeroBasis);
    }
}
