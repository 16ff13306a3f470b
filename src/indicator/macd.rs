use serde::Serialize;

use super::ema::{calculate_ema, Ema};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct MacdPoint {
    pub macd: Option<f64>,
    pub signal: Option<f64>,
    pub histogram: Option<f64>,
}

/// MACD line, signal line and histogram, index-aligned with `prices`.
///
/// The signal EMA runs over the defined MACD values only and is written back at the
/// index each of those values came from.
pub fn calculate_macd(
    prices: &[f64],
    short_period: usize,
    long_period: usize,
    signal_period: usize,
) -> Vec<MacdPoint> {
    let ema_short = calculate_ema(prices, short_period);
    let ema_long = calculate_ema(prices, long_period);

    let mut out = vec![MacdPoint::default(); prices.len()];
    let mut signal_ema = (signal_period > 0).then(|| Ema::new(signal_period));

    for (i, point) in out.iter_mut().enumerate() {
        let (Some(short), Some(long)) = (ema_short[i], ema_long[i]) else {
            continue;
        };
        let macd = short - long;
        let signal = signal_ema.as_mut().and_then(|ema| ema.push(macd));
        point.macd = Some(macd);
        point.signal = signal;
        point.histogram = signal.map(|s| macd - s);
    }
    out
}
