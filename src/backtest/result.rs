use chrono::NaiveDate;
use serde::Serialize;

use crate::model::trade::{ClosedTrade, Trade};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BacktestResult {
    pub trades: Vec<Trade>,
    pub profit_loss: f64,
    /// Percentage of closed trades with a positive profit, 0-100.
    pub win_rate: f64,
    /// Closed trades only.
    pub total_trades: usize,
    pub winning_trades: usize,
    pub losing_trades: usize,
    /// In calendar days.
    pub average_trade_length: f64,
    pub average_win: Option<f64>,
    pub average_loss: Option<f64>,
}

/// Running profit after each closed trade, keyed by its exit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProfitPoint {
    pub index: usize,
    pub date: NaiveDate,
    pub cumulative: f64,
}

impl BacktestResult {
    pub fn from_trades(trades: Vec<Trade>) -> Self {
        let closed: Vec<&ClosedTrade> = trades.iter().filter_map(Trade::as_closed).collect();
        let wins: Vec<f64> = closed.iter().filter(|t| t.is_win()).map(|t| t.profit).collect();
        let losses: Vec<f64> = closed.iter().filter(|t| t.is_loss()).map(|t| t.profit).collect();

        let total_trades = closed.len();
        let profit_loss = closed.iter().map(|t| t.profit).sum();
        let total_length: i64 = closed.iter().map(|t| t.trade_length_days).sum();
        let (win_rate, average_trade_length) = if total_trades == 0 {
            (0.0, 0.0)
        } else {
            (
                wins.len() as f64 / total_trades as f64 * 100.0,
                total_length as f64 / total_trades as f64,
            )
        };

        Self {
            profit_loss,
            win_rate,
            total_trades,
            winning_trades: wins.len(),
            losing_trades: losses.len(),
            average_trade_length,
            average_win: average(&wins),
            average_loss: average(&losses),
            trades,
        }
    }

    pub fn open_trade(&self) -> Option<&Trade> {
        self.trades.iter().find(|t| t.is_open())
    }

    pub fn closed_trades(&self) -> impl Iterator<Item = &ClosedTrade> {
        self.trades.iter().filter_map(Trade::as_closed)
    }

    pub fn cumulative_profit(&self) -> Vec<ProfitPoint> {
        let mut running = 0.0;
        self.closed_trades()
            .map(|t| {
                running += t.profit;
                ProfitPoint {
                    index: t.exit_index,
                    date: t.exit_date,
                    cumulative: running,
                }
            })
            .collect()
    }
}

fn average(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}
