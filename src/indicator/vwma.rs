use crate::model::price::PricePoint;
use crate::model::IndicatorSeries;

/// Volume weighted moving average of closes over a sliding window of `period` points.
///
/// A window with zero total volume yields that window's last close.
pub fn calculate_vwma(data: &[PricePoint], period: usize) -> IndicatorSeries {
    if period == 0 || data.len() < period {
        return vec![None; data.len()];
    }
    let mut out = vec![None; period - 1];
    out.reserve(data.len() + 1 - period);
    for window in data.windows(period) {
        let (weighted, volume) = window.iter().fold((0.0, 0.0), |(pv, v), p| {
            (pv + p.close * p.volume, v + p.volume)
        });
        let value = if volume == 0.0 {
            window[period - 1].close
        } else {
            weighted / volume
        };
        out.push(Some(value));
    }
    out
}
