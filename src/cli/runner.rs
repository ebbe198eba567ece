use anyhow::{Context, Result};
use std::fs::File;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

use crate::cli::{formatters, Cli, Commands};
use reinvest::config::{load_config, Config};
use reinvest::portfolio::{known_indices, SimulationRequest, Simulator};
use reinvest::pricing::{CsvDirectoryProvider, HistoryProvider, YahooProvider};
use reinvest::reports::write_series_csv;

/// Execute a parsed command line
pub async fn run(cli: Cli) -> Result<()> {
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Simulate {
            tickers,
            weights,
            index,
            start,
            end,
            data_dir,
            export,
        } => {
            let request = SimulationRequest::from_form(
                &tickers,
                &weights,
                &index,
                &start,
                &end,
                config.initial_investment,
            )?;
            let provider = build_provider(&config, data_dir.as_deref())?;
            let simulator = Simulator::from_config(provider, &config);

            let report = simulator
                .run(&request)
                .await
                .context("Simulation failed")?;

            if let Some(path) = export {
                let file = File::create(&path)
                    .with_context(|| format!("Failed to create {}", path.display()))?;
                write_series_csv(&report, file)
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                info!("Exported value series to {}", path.display());
            }

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&report.to_json())?);
            } else {
                print!("{}", formatters::format_report_table(&report));
            }
            Ok(())
        }

        Commands::Indices => {
            let indices = known_indices();
            if cli.json {
                let payload: Vec<_> = indices
                    .iter()
                    .map(|(symbol, name)| serde_json::json!({"symbol": symbol, "name": name}))
                    .collect();
                println!("{}", serde_json::to_string_pretty(&payload)?);
            } else {
                print!("{}", formatters::format_indices_table(&indices));
            }
            Ok(())
        }
    }
}

fn build_provider(config: &Config, data_dir: Option<&Path>) -> Result<Arc<dyn HistoryProvider>> {
    match data_dir {
        Some(dir) => {
            info!("Reading history from {}", dir.display());
            Ok(Arc::new(CsvDirectoryProvider::new(dir)))
        }
        None => {
            let provider = YahooProvider::new(&config.provider)
                .context("Failed to create Yahoo Finance client")?;
            Ok(Arc::new(provider))
        }
    }
}
