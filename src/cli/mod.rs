use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub mod formatters;
pub mod runner;

#[derive(Parser)]
#[command(name = "reinvest")]
#[command(
    version,
    about = "Portfolio growth simulator with dividend reinvestment"
)]
#[command(
    long_about = "Simulate a fixed-weight portfolio bought at the start of a date range, reinvest every dividend, and compare the total return against a benchmark index."
)]
pub struct Cli {
    /// Disable colorized/ANSI output
    #[arg(long = "no-color", global = true)]
    pub no_color: bool,

    /// Output results in JSON format
    #[arg(long = "json", global = true)]
    pub json: bool,

    /// Path to a TOML config file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Simulate a portfolio over a date range
    Simulate {
        /// Ticker symbol (repeat once per asset, e.g., -t AAPL -t KO)
        #[arg(short, long = "ticker", required = true)]
        tickers: Vec<String>,

        /// Weight in percent for the ticker at the same position; must sum to 100
        #[arg(short, long = "weight", required = true, allow_negative_numbers = true)]
        weights: Vec<String>,

        /// Benchmark index symbol (e.g., ^GSPC) or None
        #[arg(short, long, default_value = "None")]
        index: String,

        /// Start date (YYYY-MM-DD, inclusive)
        #[arg(short, long)]
        start: String,

        /// End date (YYYY-MM-DD, inclusive)
        #[arg(short, long)]
        end: String,

        /// Read history from <DIR>/<SYMBOL>.csv instead of Yahoo Finance
        #[arg(long)]
        data_dir: Option<PathBuf>,

        /// Write the daily value series to a CSV file
        #[arg(long)]
        export: Option<PathBuf>,
    },

    /// List benchmark indices with known display names
    Indices,
}
