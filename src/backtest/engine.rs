use crate::model::price::PricePoint;
use crate::model::trade::{OpenTrade, Trade};

use super::result::BacktestResult;

#[derive(Debug, Clone, PartialEq)]
enum PositionState {
    Flat,
    Long(OpenTrade),
}

/// Long-only VWMA / EMA crossover simulation.
///
/// Enter at the close when VWMA crosses above the EMA. Exit at the close when the whole
/// candle sits below the VWMA (`high < vwma`) and the VWMA is itself below the EMA.
#[derive(Debug)]
pub struct CrossoverBacktest<'a> {
    data: &'a [PricePoint],
    vwma: &'a [Option<f64>],
    ema: &'a [Option<f64>],
    position: PositionState,
    trades: Vec<Trade>,
}

impl<'a> CrossoverBacktest<'a> {
    pub fn new(data: &'a [PricePoint], vwma: &'a [Option<f64>], ema: &'a [Option<f64>]) -> Self {
        Self {
            data,
            vwma,
            ema,
            position: PositionState::Flat,
            trades: Vec::new(),
        }
    }

    pub fn run(mut self) -> BacktestResult {
        for i in 1..self.data.len() {
            self.step(i);
        }
        if let PositionState::Long(open) = self.position {
            tracing::debug!(entry_date = %open.entry_date, "Trade still open at end of series");
            self.trades.push(Trade::Open(open));
        }
        BacktestResult::from_trades(self.trades)
    }

    fn indicator_pair(&self, i: usize) -> Option<(f64, f64)> {
        let vwma = self.vwma.get(i).copied().flatten()?;
        let ema = self.ema.get(i).copied().flatten()?;
        Some((vwma, ema))
    }

    fn step(&mut self, i: usize) {
        let (Some((vwma, ema)), Some((prev_vwma, prev_ema))) =
            (self.indicator_pair(i), self.indicator_pair(i - 1))
        else {
            return;
        };
        let candle = &self.data[i];

        self.position = match std::mem::replace(&mut self.position, PositionState::Flat) {
            PositionState::Flat if vwma > ema && prev_vwma <= prev_ema => {
                tracing::debug!(date = %candle.date, price = candle.close, "Entering long");
                PositionState::Long(OpenTrade::new(i, candle.date, candle.close))
            }
            PositionState::Long(open) if candle.high < vwma && vwma < ema => {
                let closed = open.close(i, candle.date, candle.close);
                tracing::debug!(
                    date = %candle.date,
                    price = candle.close,
                    profit = closed.profit,
                    "Exiting long"
                );
                self.trades.push(Trade::Closed(closed));
                PositionState::Flat
            }
            unchanged => unchanged,
        };
    }
}

/// Run the crossover strategy over `data` with index-aligned VWMA and EMA series.
pub fn run_backtest(data: &[PricePoint], vwma: &[Option<f64>], ema: &[Option<f64>]) -> BacktestResult {
    CrossoverBacktest::new(data, vwma, ema).run()
}
