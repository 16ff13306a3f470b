use chrono::NaiveDate;
use serde::Serialize;

use crate::backtest::BacktestResult;
use crate::indicator::{IndicatorSet, MacdPoint, RecentAverages};
use crate::model::price::PriceSeries;
use crate::model::spike::Spike;
use crate::model::IndicatorSeries;

/// Everything computed for one symbol. All series are index-aligned with `series`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarketReport {
    pub symbol: String,
    pub series: PriceSeries,
    pub indicators: IndicatorSet,
    pub recent_averages: RecentAverages,
    pub spikes: Vec<Spike>,
    pub backtest: BacktestResult,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TradeMarker {
    Buy,
    Sell,
}

/// One price point joined with its indicators, trade marker and spikes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    pub index: usize,
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
    pub vwma20: Option<f64>,
    pub ema50: Option<f64>,
    pub ema200: Option<f64>,
    pub rsi: Option<f64>,
    pub trade: Option<TradeMarker>,
    pub spike_descriptions: Vec<String>,
}

impl ChartPoint {
    pub fn has_spike(&self) -> bool {
        !self.spike_descriptions.is_empty()
    }
}

/// Most recent defined value of every indicator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct IndicatorSnapshot {
    pub rsi14: Option<f64>,
    pub ema200: Option<f64>,
    pub vwma20: Option<f64>,
    pub ema50: Option<f64>,
    pub macd: Option<MacdPoint>,
}

impl IndicatorSnapshot {
    pub fn latest(indicators: &IndicatorSet) -> Self {
        Self {
            rsi14: latest_defined(&indicators.rsi14),
            ema200: latest_defined(&indicators.ema200),
            vwma20: latest_defined(&indicators.vwma20),
            ema50: latest_defined(&indicators.ema50),
            macd: indicators.macd.iter().rev().find(|m| m.macd.is_some()).copied(),
        }
    }
}

fn latest_defined(series: &IndicatorSeries) -> Option<f64> {
    series.iter().rev().find_map(|v| *v)
}

/// The compact view handed to narrative/presentation consumers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisSummary {
    pub symbol: String,
    pub profit_loss: f64,
    pub win_rate: f64,
    pub entry_points: usize,
    pub exit_points: usize,
    pub average_trade_length: f64,
    pub recent_averages: RecentAverages,
    pub spike_descriptions: Vec<String>,
    pub latest: IndicatorSnapshot,
}

impl MarketReport {
    pub fn chart_points(&self) -> Vec<ChartPoint> {
        let ind = &self.indicators;
        let mut points: Vec<ChartPoint> = self
            .series
            .points()
            .iter()
            .enumerate()
            .map(|(i, p)| ChartPoint {
                index: i,
                date: p.date,
                open: p.open,
                high: p.high,
                low: p.low,
                close: p.close,
                volume: p.volume,
                vwma20: ind.vwma20.get(i).copied().flatten(),
                ema50: ind.ema50.get(i).copied().flatten(),
                ema200: ind.ema200.get(i).copied().flatten(),
                rsi: ind.rsi14.get(i).copied().flatten(),
                trade: None,
                spike_descriptions: Vec::new(),
            })
            .collect();

        for trade in &self.backtest.trades {
            if let Some(point) = points.get_mut(trade.entry_index()) {
                point.trade = Some(TradeMarker::Buy);
            }
            if let Some(point) = trade.exit_index().and_then(|i| points.get_mut(i)) {
                point.trade = Some(TradeMarker::Sell);
            }
        }
        for spike in &self.spikes {
            if let Some(point) = points.get_mut(spike.index) {
                point.spike_descriptions.push(spike.description.clone());
            }
        }
        points
    }

    pub fn summary(&self) -> AnalysisSummary {
        let bt = &self.backtest;
        AnalysisSummary {
            symbol: self.symbol.clone(),
            profit_loss: bt.profit_loss,
            win_rate: bt.win_rate,
            entry_points: bt.trades.len(),
            exit_points: bt.total_trades,
            average_trade_length: bt.average_trade_length,
            recent_averages: self.recent_averages,
            spike_descriptions: self.spikes.iter().map(|s| s.description.clone()).collect(),
            latest: IndicatorSnapshot::latest(&self.indicators),
        }
    }
}
