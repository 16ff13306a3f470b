use serde::Serialize;

use crate::backtest::run_backtest;
use crate::config::AnalysisConfig;
use crate::error::AppError;
use crate::indicator::{calculate_average_price_volume, IndicatorSet};
use crate::model::price::PriceSeries;
use crate::provider::HistoryProvider;
use crate::report::MarketReport;
use crate::spike_detector::detect_spikes;

/// Compute the full report for an already-fetched, ascending series.
pub fn analyze(
    symbol: &str,
    series: PriceSeries,
    cfg: &AnalysisConfig,
) -> Result<MarketReport, AppError> {
    if series.is_empty() {
        return Err(AppError::NoData(symbol.to_string()));
    }
    cfg.validate()
        .map_err(|e| AppError::Config(format!("{:#}", e)))?;

    let indicators = IndicatorSet::compute(&series, cfg);
    let recent_averages = calculate_average_price_volume(series.points(), cfg.recent_average_period);
    let spikes = detect_spikes(series.points(), cfg.spike_lookback, cfg.spike_scan);
    let backtest = run_backtest(series.points(), &indicators.vwma20, &indicators.ema50);

    tracing::info!(
        symbol,
        points = series.len(),
        spikes = spikes.len(),
        trades = backtest.trades.len(),
        closed_trades = backtest.total_trades,
        profit_loss = backtest.profit_loss,
        win_rate = backtest.win_rate,
        "Analysis complete"
    );

    Ok(MarketReport {
        symbol: symbol.to_string(),
        series,
        indicators,
        recent_averages,
        spikes,
        backtest,
    })
}

/// Fetch `symbol` once from `provider`, then analyze it.
pub async fn analyze_symbol<P: HistoryProvider>(
    provider: &P,
    symbol: &str,
    cfg: &AnalysisConfig,
) -> Result<MarketReport, AppError> {
    let raw = match provider.fetch_daily_history(symbol).await {
        Ok(points) => points,
        Err(e) => {
            tracing::error!(symbol, error = %format!("{:#}", e), "Failed to fetch historical data");
            return Err(AppError::Fetch {
                symbol: symbol.to_string(),
            });
        }
    };
    analyze(symbol, PriceSeries::from_unsorted(raw), cfg)
}

/// What callers receive: the full bundle, or one error message and nothing else.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum AnalysisResponse {
    Success(Box<MarketReport>),
    Failure { error: String },
}

impl AnalysisResponse {
    pub fn from_result(result: Result<MarketReport, AppError>) -> Self {
        match result {
            Ok(report) => Self::Success(Box::new(report)),
            Err(e) => Self::Failure {
                error: e.to_string(),
            },
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    pub fn to_json(&self) -> Result<String, AppError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
