//! Ticker/weight parsing and validation

use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::HashSet;
use std::str::FromStr;

use crate::error::{Result, SimulationError};

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// Share of the initial investment assigned to one ticker
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssetAllocation {
    pub ticker: String,
    /// Percentage of the total, in [0, 100]
    pub weight: Decimal,
    /// total_initial_investment × weight / 100
    pub investment: Decimal,
}

/// Parse a weight field exactly as typed; `33.3` stays `33.3`.
pub fn parse_weight(ticker: &str, raw: &str) -> Result<Decimal> {
    let trimmed = raw.trim();
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .map_err(|_| {
            SimulationError::InvalidInput(format!(
                "weight '{}' for {} is not a valid number",
                raw, ticker
            ))
        })
}

/// Build allocations from parallel ticker and weight fields.
///
/// Weights must each be in [0, 100] and sum to exactly 100.
pub fn build_allocations(
    tickers: &[String],
    weights: &[String],
    total_investment: Decimal,
) -> Result<Vec<AssetAllocation>> {
    if tickers.len() != weights.len() {
        return Err(SimulationError::InvalidInput(format!(
            "{} tickers but {} weights",
            tickers.len(),
            weights.len()
        )));
    }
    if tickers.is_empty() {
        return Err(SimulationError::InvalidInput(
            "at least one ticker is required".to_string(),
        ));
    }

    let mut seen = HashSet::new();
    let mut parsed = Vec::with_capacity(tickers.len());
    for (ticker, raw_weight) in tickers.iter().zip(weights) {
        let ticker = ticker.trim();
        if ticker.is_empty() {
            return Err(SimulationError::InvalidInput(
                "ticker symbol cannot be empty".to_string(),
            ));
        }
        if !seen.insert(ticker.to_uppercase()) {
            return Err(SimulationError::InvalidInput(format!(
                "ticker {} is listed more than once",
                ticker
            )));
        }

        let weight = parse_weight(ticker, raw_weight)?;
        if weight < Decimal::ZERO || weight > HUNDRED {
            return Err(SimulationError::InvalidWeights(format!(
                "weight for {} must be between 0 and 100, got {}",
                ticker, weight
            )));
        }
        parsed.push((ticker.to_string(), weight));
    }

    let total_weight: Decimal = parsed.iter().map(|(_, w)| *w).sum();
    if total_weight != HUNDRED {
        return Err(SimulationError::InvalidWeights(format!(
            "weights must sum to 100%, got {}%",
            total_weight.normalize()
        )));
    }

    Ok(parsed
        .into_iter()
        .map(|(ticker, weight)| AssetAllocation {
            investment: total_investment * weight / HUNDRED,
            ticker,
            weight,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_even_split() {
        let allocations =
            build_allocations(&strings(&["AAPL", "MSFT"]), &strings(&["50", "50"]), dec!(10000))
                .unwrap();

        assert_eq!(allocations.len(), 2);
        assert_eq!(allocations[0].ticker, "AAPL");
        assert_eq!(allocations[0].investment, dec!(5000));
        assert_eq!(allocations[1].investment, dec!(5000));
    }

    #[test]
    fn test_thirds_sum_exactly() {
        let allocations = build_allocations(
            &strings(&["A", "B", "C"]),
            &strings(&["33.3", "33.3", "33.4"]),
            dec!(10000),
        )
        .unwrap();

        let invested: Decimal = allocations.iter().map(|a| a.investment).sum();
        assert_eq!(invested, dec!(10000));
        assert_eq!(allocations[2].investment, dec!(3340));
    }

    #[test]
    fn test_short_sum_rejected() {
        let err = build_allocations(&strings(&["A", "B"]), &strings(&["50", "49"]), dec!(10000))
            .unwrap_err();
        assert!(matches!(err, SimulationError::InvalidWeights(_)));
        assert!(err.to_string().contains("got 99%"));
    }

    #[test]
    fn test_unparsable_weight_is_invalid_input() {
        let err = build_allocations(&strings(&["A"]), &strings(&["fifty"]), dec!(10000))
            .unwrap_err();
        assert!(matches!(err, SimulationError::InvalidInput(_)));
        assert!(err.to_string().contains("fifty"));
    }

    #[test]
    fn test_weight_whitespace_and_scientific_notation() {
        assert_eq!(parse_weight("A", " 25 ").unwrap(), dec!(25));
        assert_eq!(parse_weight("A", "1e2").unwrap(), dec!(100));
    }

    #[test]
    fn test_out_of_range_weights_rejected() {
        for weights in [["-10", "110"], ["100.5", "-0.5"]] {
            let err = build_allocations(&strings(&["A", "B"]), &strings(&weights), dec!(10000))
                .unwrap_err();
            assert!(matches!(err, SimulationError::InvalidWeights(_)));
        }
    }

    #[test]
    fn test_zero_weight_allowed() {
        let allocations =
            build_allocations(&strings(&["A", "B"]), &strings(&["0", "100"]), dec!(10000))
                .unwrap();

        assert_eq!(allocations[0].weight, dec!(0));
        assert!(allocations[0].investment.is_zero());
        assert_eq!(allocations[1].investment, dec!(10000));
    }

    #[test]
    fn test_mismatched_lengths_rejected() {
        let err = build_allocations(&strings(&["A", "B"]), &strings(&["100"]), dec!(10000))
            .unwrap_err();
        assert!(matches!(err, SimulationError::InvalidInput(_)));
    }

    #[test]
    fn test_duplicate_and_blank_tickers_rejected() {
        let dup = build_allocations(&strings(&["KO", "ko"]), &strings(&["50", "50"]), dec!(1))
            .unwrap_err();
        assert!(dup.to_string().contains("more than once"));

        let blank =
            build_allocations(&strings(&["  "]), &strings(&["100"]), dec!(1)).unwrap_err();
        assert!(matches!(blank, SimulationError::InvalidInput(_)));
    }

    #[test]
    fn test_empty_request_rejected() {
        let err = build_allocations(&[], &[], dec!(10000)).unwrap_err();
        assert!(matches!(err, SimulationError::InvalidInput(_)));
    }
}
