//! Canonical business-day calendar and series alignment
//!
//! Asset histories start, stop and pause on different days (listings, halts,
//! exchange holidays). Before series can be summed they are reindexed onto one
//! calendar of Monday–Friday dates:
//!
//! 1. Reindex: keep observations whose date is on the calendar, drop the rest.
//! 2. Forward-fill: a value persists until the next observation.
//! 3. Backward-fill: slots before the first observation take its value.
//!
//! A slot still empty after both passes means the series never touched the
//! calendar, which is reported as `UnalignedSeries` instead of being guessed.

use chrono::{Datelike, NaiveDate, Weekday};
use rust_decimal::Decimal;
use std::collections::HashMap;
use tracing::debug;

use crate::error::{Result, SimulationError};
use crate::series::{SeriesPoint, ValueSeries};

/// Ordered business days of a simulation window
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Calendar {
    dates: Vec<NaiveDate>,
}

/// A series reindexed onto a `Calendar`, exactly one value per calendar date.
///
/// Only `Calendar::align` builds these.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlignedSeries {
    name: String,
    values: Vec<Decimal>,
}

impl Calendar {
    /// Monday–Friday dates in `[start, end]`, both inclusive
    pub fn business_days(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if start > end {
            return Err(SimulationError::InvalidDateRange { start, end });
        }

        let dates: Vec<NaiveDate> = start
            .iter_days()
            .take_while(|d| *d <= end)
            .filter(|d| !matches!(d.weekday(), Weekday::Sat | Weekday::Sun))
            .collect();

        if dates.is_empty() {
            return Err(SimulationError::InvalidDateRange { start, end });
        }

        Ok(Self { dates })
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Reindex `series` onto this calendar, then forward-fill, then backward-fill.
    pub fn align(&self, series: &ValueSeries) -> Result<AlignedSeries> {
        let observed: HashMap<NaiveDate, Decimal> =
            series.points.iter().map(|p| (p.date, p.value)).collect();

        let mut slots: Vec<Option<Decimal>> =
            self.dates.iter().map(|d| observed.get(d).copied()).collect();
        let matched = slots.iter().filter(|s| s.is_some()).count();

        let mut carry = None;
        for slot in slots.iter_mut() {
            match slot {
                Some(value) => carry = Some(*value),
                None => *slot = carry,
            }
        }

        let mut carry = None;
        for slot in slots.iter_mut().rev() {
            match slot {
                Some(value) => carry = Some(*value),
                None => *slot = carry,
            }
        }

        let values = slots
            .into_iter()
            .collect::<Option<Vec<Decimal>>>()
            .ok_or_else(|| SimulationError::UnalignedSeries(series.name.clone()))?;

        debug!(
            "Aligned {}: {} of {} observations on calendar, {} slots filled",
            series.name,
            matched,
            series.len(),
            self.dates.len() - matched
        );

        Ok(AlignedSeries {
            name: series.name.clone(),
            values,
        })
    }
}

impl AlignedSeries {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn values(&self) -> &[Decimal] {
        &self.values
    }

    /// Pair the values back up with the calendar they were aligned to
    pub fn to_value_series(&self, calendar: &Calendar) -> ValueSeries {
        let points = calendar
            .dates()
            .iter()
            .zip(&self.values)
            .map(|(&date, &value)| SeriesPoint { date, value })
            .collect();
        ValueSeries::new(self.name.clone(), points)
    }
}
