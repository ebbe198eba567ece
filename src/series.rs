//! Dated value series shared by the simulators, the aligner and the reports.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

/// A single dated observation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SeriesPoint {
    pub date: NaiveDate,
    pub value: Decimal,
}

/// Ordered sequence of dated values for one asset, index or portfolio
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValueSeries {
    pub name: String,
    pub points: Vec<SeriesPoint>,
}

impl ValueSeries {
    pub fn new(name: impl Into<String>, points: Vec<SeriesPoint>) -> Self {
        Self {
            name: name.into(),
            points,
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> Option<&SeriesPoint> {
        self.points.first()
    }

    pub fn last(&self) -> Option<&SeriesPoint> {
        self.points.last()
    }

    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.points.iter().map(|p| p.date)
    }

    pub fn values(&self) -> impl Iterator<Item = Decimal> + '_ {
        self.points.iter().map(|p| p.value)
    }

    /// Value observed on exactly this date, if any
    pub fn value_on(&self, date: NaiveDate) -> Option<Decimal> {
        self.points
            .binary_search_by_key(&date, |p| p.date)
            .ok()
            .map(|i| self.points[i].value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, day).unwrap()
    }

    #[test]
    fn test_value_on_exact_dates_only() {
        let series = ValueSeries::new(
            "AAPL",
            vec![
                SeriesPoint { date: d(8), value: dec!(1) },
                SeriesPoint { date: d(10), value: dec!(3) },
            ],
        );

        assert_eq!(series.value_on(d(8)), Some(dec!(1)));
        assert_eq!(series.value_on(d(9)), None);
        assert_eq!(series.value_on(d(10)), Some(dec!(3)));
        assert_eq!(series.last().map(|p| p.value), Some(dec!(3)));
    }
}
