use crate::model::IndicatorSeries;

/// Relative Strength Index with Wilder's smoothing.
///
/// The first value is emitted once `period` price differences have been seen, i.e. on
/// the `period + 1`-th push.
#[derive(Debug, Clone)]
pub struct Rsi {
    period: usize,
    prev_close: Option<f64>,
    diffs_seen: usize,
    gain_sum: f64,
    loss_sum: f64,
    avg_gain: f64,
    avg_loss: f64,
    value: Option<f64>,
}

impl Rsi {
    pub fn new(period: usize) -> Self {
        assert!(period > 0, "RSI period must be > 0");
        Self {
            period,
            prev_close: None,
            diffs_seen: 0,
            gain_sum: 0.0,
            loss_sum: 0.0,
            avg_gain: 0.0,
            avg_loss: 0.0,
            value: None,
        }
    }

    pub fn push(&mut self, close: f64) -> Option<f64> {
        let Some(prev) = self.prev_close.replace(close) else {
            return None;
        };
        let diff = close - prev;
        let gain = if diff > 0.0 { diff } else { 0.0 };
        let loss = if diff < 0.0 { -diff } else { 0.0 };
        self.diffs_seen += 1;

        let period = self.period as f64;
        if self.diffs_seen < self.period {
            self.gain_sum += gain;
            self.loss_sum += loss;
            return None;
        }
        if self.diffs_seen == self.period {
            self.avg_gain = (self.gain_sum + gain) / period;
            self.avg_loss = (self.loss_sum + loss) / period;
        } else {
            self.avg_gain = (self.avg_gain * (period - 1.0) + gain) / period;
            self.avg_loss = (self.avg_loss * (period - 1.0) + loss) / period;
        }
        self.value = Some(rsi_from_averages(self.avg_gain, self.avg_loss));
        self.value
    }

    pub fn value(&self) -> Option<f64> {
        self.value
    }

    pub fn is_ready(&self) -> bool {
        self.value.is_some()
    }

    pub fn period(&self) -> usize {
        self.period
    }
}

fn rsi_from_averages(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 {
        100.0
    } else {
        100.0 - 100.0 / (1.0 + avg_gain / avg_loss)
    }
}

/// RSI over closing prices. All `None` when `prices.len() <= period`.
pub fn calculate_rsi(prices: &[f64], period: usize) -> IndicatorSeries {
    if period == 0 || prices.len() <= period {
        return vec![None; prices.len()];
    }
    let mut rsi = Rsi::new(period);
    let mut out = Vec::with_capacity(prices.len());
    for &p in prices {
        out.push(rsi.push(p));
    }
    out
}
