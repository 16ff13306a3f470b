use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::path::Path;

pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";
pub const BASE_URL_ENV: &str = "TICKER_ANALYTICS_BASE_URL";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub provider: ProviderConfig,
    #[serde(default)]
    pub analysis: AnalysisConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    pub base_url: String,
    pub history_years: u32,
    pub user_agent: String,
    pub timeout_secs: u64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: "https://query1.finance.yahoo.com".to_string(),
            history_years: 15,
            user_agent: "Mozilla/5.0 (compatible; ticker-analytics)".to_string(),
            timeout_secs: 30,
        }
    }
}

/// Window lengths for every computed series. Defaults are the reported bundle:
/// RSI-14, MACD(12,26,9), EMA-200, VWMA-20, EMA-50, 5-point averages, spikes 20/5.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub rsi_period: usize,
    pub macd_short_period: usize,
    pub macd_long_period: usize,
    pub macd_signal_period: usize,
    pub long_ema_period: usize,
    pub vwma_period: usize,
    pub trend_ema_period: usize,
    pub recent_average_period: usize,
    pub spike_lookback: usize,
    pub spike_scan: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            rsi_period: 14,
            macd_short_period: 12,
            macd_long_period: 26,
            macd_signal_period: 9,
            long_ema_period: 200,
            vwma_period: 20,
            trend_ema_period: 50,
            recent_average_period: 5,
            spike_lookback: 20,
            spike_scan: 5,
        }
    }
}

impl AnalysisConfig {
    pub fn validate(&self) -> Result<()> {
        let periods = [
            ("rsi_period", self.rsi_period),
            ("macd_short_period", self.macd_short_period),
            ("macd_long_period", self.macd_long_period),
            ("macd_signal_period", self.macd_signal_period),
            ("long_ema_period", self.long_ema_period),
            ("vwma_period", self.vwma_period),
            ("trend_ema_period", self.trend_ema_period),
            ("recent_average_period", self.recent_average_period),
            ("spike_lookback", self.spike_lookback),
            ("spike_scan", self.spike_scan),
        ];
        for (name, value) in periods {
            if value == 0 {
                bail!("analysis.{} must be > 0", name);
            }
        }
        if self.macd_short_period >= self.macd_long_period {
            bail!(
                "analysis.macd_short_period ({}) must be less than macd_long_period ({})",
                self.macd_short_period,
                self.macd_long_period
            );
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(Path::new(DEFAULT_CONFIG_PATH))
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        dotenvy::dotenv().ok();

        let config_str = std::fs::read_to_string(config_path)
            .with_context(|| format!("failed to read {}", config_path.display()))?;
        let mut config = Self::parse(&config_str)
            .with_context(|| format!("failed to parse {}", config_path.display()))?;

        if let Ok(url) = std::env::var(BASE_URL_ENV) {
            if !url.trim().is_empty() {
                config.provider.base_url = url.trim().to_string();
            }
        }
        Ok(config)
    }

    pub fn parse(config_str: &str) -> Result<Self> {
        let config: Config = toml::from_str(config_str)?;
        config
            .analysis
            .validate()
            .context("analysis section is invalid")?;
        if config.provider.history_years == 0 {
            bail!("provider.history_years must be > 0");
        }
        Ok(config)
    }
}
