//! Output formatting module for CLI display
//!
//! This module handles all terminal output formatting, separating
//! the concerns of simulation from presentation.

use colored::Colorize;
use reinvest::reports::SimulationReport;
use reinvest::utils::{format_amount, format_percent};
use rust_decimal::Decimal;
use tabled::{
    settings::{object::Columns, Alignment, Style},
    Table, Tabled,
};

fn colored_percent(value: Decimal) -> String {
    let text = format_percent(value);
    if value >= Decimal::ZERO {
        text.green().to_string()
    } else {
        text.red().to_string()
    }
}

/// Format a simulation report for terminal table output
pub fn format_report_table(report: &SimulationReport) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "\n{} Portfolio simulation {} to {}\n\n",
        "📈".cyan().bold(),
        report.start,
        report.end
    ));

    #[derive(Tabled)]
    struct AllocationRow {
        #[tabled(rename = "Ticker")]
        ticker: String,
        #[tabled(rename = "Weight")]
        weight: String,
        #[tabled(rename = "Invested")]
        invested: String,
    }

    let rows: Vec<AllocationRow> = report
        .allocations
        .iter()
        .map(|a| AllocationRow {
            ticker: a.ticker.clone(),
            weight: format!("{}%", a.weight.normalize()),
            invested: format_amount(a.investment),
        })
        .collect();

    let mut table = Table::new(&rows);
    table.with(Style::modern());
    table.modify(Columns::new(1..), Alignment::right());
    output.push_str(&table.to_string());

    output.push_str(&format!("\n\n{} Summary", "━".repeat(60).bright_black()));
    output.push_str(&format!(
        "\n{:<20} {}",
        "Initial Investment:".bold(),
        format_amount(report.initial_investment)
    ));
    if let Some(final_value) = report.final_value() {
        output.push_str(&format!(
            "\n{:<20} {}",
            "Final Value:".bold(),
            format_amount(final_value)
        ));
    }
    output.push_str(&format!(
        "\n{:<20} {}",
        "Portfolio Return:".bold(),
        colored_percent(report.portfolio_return)
    ));

    if let Some(benchmark) = &report.benchmark {
        output.push_str(&format!(
            "\n{:<20} {} ({})",
            "Index Return:".bold(),
            colored_percent(benchmark.index_return),
            benchmark.name
        ));
    }
    output.push('\n');

    output
}

/// Format the known benchmark indices
pub fn format_indices_table(indices: &[(&str, &str)]) -> String {
    #[derive(Tabled)]
    struct IndexRow {
        #[tabled(rename = "Symbol")]
        symbol: String,
        #[tabled(rename = "Name")]
        name: String,
    }

    let rows: Vec<IndexRow> = indices
        .iter()
        .map(|(symbol, name)| IndexRow {
            symbol: symbol.to_string(),
            name: name.to_string(),
        })
        .collect();

    let mut table = Table::new(&rows);
    table.with(Style::modern());
    format!("{}\n", table)
}
