use crate::model::price::PricePoint;
use crate::model::spike::Spike;

/// A scanned value must exceed this multiple of its baseline to be flagged.
pub const SIGNIFICANT_CHANGE_THRESHOLD: f64 = 2.0;

/// Flag volume and price anomalies in the trailing `periods_to_scan` points against a
/// baseline built from the `lookback_periods` points before them.
///
/// Returns nothing when the series is shorter than either window.
pub fn detect_spikes(
    data: &[PricePoint],
    lookback_periods: usize,
    periods_to_scan: usize,
) -> Vec<Spike> {
    let mut spikes = Vec::new();
    if data.is_empty() || data.len() < lookback_periods.max(periods_to_scan) {
        return spikes;
    }

    let recent = &data[data.len().saturating_sub(lookback_periods + periods_to_scan)..];
    let baseline = &recent[..lookback_periods.min(recent.len())];
    let avg_volume = mean(baseline.iter().map(|p| p.volume));
    let avg_change = mean(
        baseline
            .windows(2)
            .map(|pair| daily_change(&pair[0], &pair[1])),
    );

    let scan_start = data.len() - periods_to_scan;
    for (index, current) in data.iter().enumerate().skip(scan_start) {
        if avg_volume > 0.0 && current.volume > avg_volume * SIGNIFICANT_CHANGE_THRESHOLD {
            spikes.push(Spike::volume(index, current.date, current.volume, avg_volume));
        }

        // The first scanned point compares against the point just before the scan window.
        let Some(prev) = index.checked_sub(1).map(|i| &data[i]) else {
            continue;
        };
        if prev.close <= 0.0 {
            continue;
        }
        let change = daily_change(prev, current);
        if avg_change > 0.0 && change > avg_change * SIGNIFICANT_CHANGE_THRESHOLD {
            spikes.push(Spike::price(index, current.date, change, avg_change));
        }
    }

    if !spikes.is_empty() {
        tracing::debug!(count = spikes.len(), avg_volume, avg_change, "Spikes detected");
    }
    spikes
}

/// Absolute close-to-close change as a fraction of the earlier close.
fn daily_change(prev: &PricePoint, current: &PricePoint) -> f64 {
    if prev.close == 0.0 {
        return 0.0;
    }
    (current.close - prev.close).abs() / prev.close
}

/// Arithmetic mean; zero for an empty input.
fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, count) = values.fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mean_of_nothing_is_zero() {
        assert_eq!(mean(std::iter::empty()), 0.0);
    }

    #[test]
    fn mean_of_values() {
        assert!((mean([1.0, 2.0, 6.0].into_iter()) - 3.0).abs() < f64::EPSILON);
    }
}
