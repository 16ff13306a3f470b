use super::sma::Sma;
use crate::model::IndicatorSeries;

/// Exponential Moving Average, seeded with the SMA of the first `period` values.
#[derive(Debug, Clone)]
pub struct Ema {
    period: usize,
    multiplier: f64,
    ema: Option<f64>,
    seed: Sma,
}

impl Ema {
    pub fn new(period: usize) -> Self {
        assert!(period > 0, "EMA period must be > 0");
        Self {
            period,
            multiplier: 2.0 / (period as f64 + 1.0),
            ema: None,
            seed: Sma::new(period),
        }
    }

    /// Push a new value, return the current EMA if enough data.
    pub fn push(&mut self, value: f64) -> Option<f64> {
        self.ema = match self.ema {
            Some(prev) => Some(value * self.multiplier + prev * (1.0 - self.multiplier)),
            None => self.seed.push(value),
        };
        self.ema
    }

    pub fn value(&self) -> Option<f64> {
        self.ema
    }

    pub fn is_ready(&self) -> bool {
        self.ema.is_some()
    }

    pub fn period(&self) -> usize {
        self.period
    }
}

/// EMA over `values`. All `None` when there are fewer than `period` values; otherwise
/// exactly `period - 1` leading `None`s.
pub fn calculate_ema(values: &[f64], period: usize) -> IndicatorSeries {
    if period == 0 || values.len() < period {
        return vec![None; values.len()];
    }
    let mut ema = Ema::new(period);
    let mut out = Vec::with_capacity(values.len());
    for &v in values {
        out.push(ema.push(v));
    }
    out
}
