use serde::Serialize;

use crate::model::price::PricePoint;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct RecentAverages {
    pub average_price: f64,
    pub average_volume: f64,
}

/// Mean close and mean volume of the trailing `period` points.
///
/// Returns the all-zero value when fewer than `period` points exist.
pub fn calculate_average_price_volume(data: &[PricePoint], period: usize) -> RecentAverages {
    if period == 0 || data.len() < period {
        return RecentAverages::default();
    }
    let window = &data[data.len() - period..];
    let (price_sum, volume_sum) = window
        .iter()
        .fold((0.0, 0.0), |(p, v), point| (p + point.close, v + point.volume));
    RecentAverages {
        average_price: price_sum / period as f64,
        average_volume: volume_sum / period as f64,
    }
}
