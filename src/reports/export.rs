use rust_decimal::Decimal;
use std::io::Write;

use super::simulation::SimulationReport;

fn cell(value: Decimal) -> String {
    format!("{:.2}", value.round_dp(2))
}

/// Write the aligned value series as CSV: `date,portfolio[,benchmark]`
pub fn write_series_csv<W: Write>(report: &SimulationReport, writer: W) -> csv::Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);

    match &report.benchmark {
        Some(_) => wtr.write_record(["date", "portfolio", "benchmark"])?,
        None => wtr.write_record(["date", "portfolio"])?,
    }

    for point in &report.portfolio.points {
        let mut record = vec![point.date.to_string(), cell(point.value)];
        if let Some(benchmark) = &report.benchmark {
            let value = benchmark
                .series
                .value_on(point.date)
                .map(cell)
                .unwrap_or_default();
            record.push(value);
        }
        wtr.write_record(&record)?;
    }

    wtr.flush()?;
    Ok(())
}
