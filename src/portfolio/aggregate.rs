use rust_decimal::Decimal;

use crate::calendar::{AlignedSeries, Calendar};
use crate::series::{SeriesPoint, ValueSeries};

/// Sum aligned per-asset series date by date.
///
/// Every input must already be aligned to `calendar`; gaps are the aligner's
/// job, not this one's.
pub fn aggregate(name: &str, calendar: &Calendar, assets: &[AlignedSeries]) -> ValueSeries {
    let mut totals = vec![Decimal::ZERO; calendar.len()];
    for asset in assets {
        debug_assert_eq!(asset.values().len(), calendar.len(), "{}", asset.name());
        for (total, value) in totals.iter_mut().zip(asset.values()) {
            *total += *value;
        }
    }

    let points = calendar
        .dates()
        .iter()
        .zip(totals)
        .map(|(&date, value)| SeriesPoint { date, value })
        .collect();
    ValueSeries::new(name, points)
}
