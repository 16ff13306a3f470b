use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SpikeKind {
    Volume { volume: f64, baseline: f64 },
    /// Both values are fractions (0.05 == 5%).
    Price {
        change_percent: f64,
        baseline_percent: f64,
    },
}

/// A flagged volume or price anomaly at one point of the series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Spike {
    pub index: usize,
    pub date: NaiveDate,
    pub kind: SpikeKind,
    pub description: String,
}

impl Spike {
    pub fn volume(index: usize, date: NaiveDate, volume: f64, baseline: f64) -> Self {
        Self {
            index,
            date,
            kind: SpikeKind::Volume { volume, baseline },
            description: format!("Volume spike: {} (Avg: {})", volume, baseline),
        }
    }

    pub fn price(index: usize, date: NaiveDate, change_percent: f64, baseline_percent: f64) -> Self {
        Self {
            index,
            date,
            kind: SpikeKind::Price {
                change_percent,
                baseline_percent,
            },
            description: format!(
                "Price spike: {:.2}% change (Avg daily change: {:.2}%)",
                change_percent * 100.0,
                baseline_percent * 100.0
            ),
        }
    }

    pub fn is_volume(&self) -> bool {
        matches!(self.kind, SpikeKind::Volume { .. })
    }
}
