pub mod yahoo;

use std::collections::HashMap;
use std::future::Future;

use anyhow::{anyhow, Result};

use crate::model::price::PricePoint;

pub use yahoo::YahooChartClient;

/// Source of raw daily OHLCV history. Records may arrive in any order.
pub trait HistoryProvider {
    fn fetch_daily_history(
        &self,
        symbol: &str,
    ) -> impl Future<Output = Result<Vec<PricePoint>>> + Send;
}

/// In-memory history keyed by upper-cased symbol.
#[derive(Debug, Clone, Default)]
pub struct StaticHistoryProvider {
    data: HashMap<String, Vec<PricePoint>>,
}

impl StaticHistoryProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_symbol(mut self, symbol: &str, points: Vec<PricePoint>) -> Self {
        self.data.insert(symbol.trim().to_ascii_uppercase(), points);
        self
    }
}

impl HistoryProvider for StaticHistoryProvider {
    async fn fetch_daily_history(&self, symbol: &str) -> Result<Vec<PricePoint>> {
        self.data
            .get(&symbol.trim().to_ascii_uppercase())
            .cloned()
            .ok_or_else(|| anyhow!("unknown symbol '{}'", symbol))
    }
}
