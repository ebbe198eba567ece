//! Optional TOML configuration
//!
//! Looked up in order: an explicit `--config` path, `$REINVEST_CONFIG`, then
//! `<config home>/reinvest/config.toml`. A missing file means defaults.
//!
//! ```toml
//! initial_investment = 10000
//! max_concurrent_fetches = 5
//!
//! [provider]
//! base_url = "https://query1.finance.yahoo.com/v8/finance/chart"
//! timeout_secs = 30
//! adjusted_close = true
//! ```

use anyhow::{anyhow, bail, Context, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Total amount invested at the start of every simulation
pub const DEFAULT_INITIAL_INVESTMENT: Decimal = Decimal::from_parts(10000, 0, 0, false, 0);

/// Maximum concurrent history requests to avoid rate limiting
pub const DEFAULT_MAX_CONCURRENT_FETCHES: usize = 5;

const CONFIG_ENV_VAR: &str = "REINVEST_CONFIG";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub initial_investment: Decimal,
    pub max_concurrent_fetches: usize,
    pub provider: ProviderConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProviderConfig {
    pub base_url: String,
    pub user_agent: String,
    pub timeout_secs: u64,
    /// Use dividend-adjusted closes rather than raw closes
    pub adjusted_close: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            initial_investment: DEFAULT_INITIAL_INVESTMENT,
            max_concurrent_fetches: DEFAULT_MAX_CONCURRENT_FETCHES,
            provider: ProviderConfig::default(),
        }
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: "https://query1.finance.yahoo.com/v8/finance/chart".to_string(),
            user_agent: "Mozilla/5.0 (compatible; ReinvestBot/1.0)".to_string(),
            timeout_secs: 30,
            adjusted_close: true,
        }
    }
}

impl Config {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content).context("Invalid configuration file")?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.initial_investment <= Decimal::ZERO {
            bail!(
                "initial_investment must be positive, got {}",
                self.initial_investment
            );
        }
        if self.max_concurrent_fetches == 0 {
            bail!("max_concurrent_fetches must be at least 1");
        }
        if self.provider.timeout_secs == 0 {
            bail!("provider.timeout_secs must be at least 1");
        }
        Ok(())
    }
}

/// Default config file location, honoring XDG_CONFIG_HOME
pub fn default_config_path() -> Result<PathBuf> {
    let config_dir = std::env::var_os("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(dir_spec::config_home)
        .ok_or_else(|| anyhow!("Could not determine config directory"))?;
    Ok(config_dir.join("reinvest").join("config.toml"))
}

/// Load configuration. An explicitly named file must exist; the implicit
/// locations fall back to defaults when absent.
pub fn load_config(explicit: Option<&Path>) -> Result<Config> {
    let (path, required) = match explicit {
        Some(p) => (p.to_path_buf(), true),
        None => match std::env::var_os(CONFIG_ENV_VAR) {
            Some(p) => (PathBuf::from(p), true),
            None => match default_config_path() {
                Ok(p) => (p, false),
                Err(_) => return Ok(Config::default()),
            },
        },
    };

    if !path.exists() {
        if required {
            bail!("Config file not found: {}", path.display());
        }
        debug!("No config file at {}, using defaults", path.display());
        return Ok(Config::default());
    }

    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    debug!("Loaded config from {}", path.display());
    Config::from_toml_str(&content).with_context(|| format!("In {}", path.display()))
}
