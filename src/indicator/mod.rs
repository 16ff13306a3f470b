pub mod averages;
pub mod ema;
pub mod macd;
pub mod rsi;
pub mod sma;
pub mod vwma;

use serde::Serialize;

use crate::config::AnalysisConfig;
use crate::model::price::PriceSeries;
use crate::model::IndicatorSeries;

pub use averages::{calculate_average_price_volume, RecentAverages};
pub use ema::{calculate_ema, Ema};
pub use macd::{calculate_macd, MacdPoint};
pub use rsi::{calculate_rsi, Rsi};
pub use sma::{calculate_sma, Sma};
pub use vwma::calculate_vwma;

/// The indicator series reported for one symbol, each parallel to the price series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndicatorSet {
    pub rsi14: IndicatorSeries,
    pub macd: Vec<MacdPoint>,
    pub ema200: IndicatorSeries,
    pub vwma20: IndicatorSeries,
    pub ema50: IndicatorSeries,
}

impl IndicatorSet {
    pub fn compute(series: &PriceSeries, cfg: &AnalysisConfig) -> Self {
        let closes = series.closes();
        Self {
            rsi14: calculate_rsi(&closes, cfg.rsi_period),
            macd: calculate_macd(
                &closes,
                cfg.macd_short_period,
                cfg.macd_long_period,
                cfg.macd_signal_period,
            ),
            ema200: calculate_ema(&closes, cfg.long_ema_period),
            vwma20: calculate_vwma(series.points(), cfg.vwma_period),
            ema50: calculate_ema(&closes, cfg.trend_ema_period),
        }
    }
}
