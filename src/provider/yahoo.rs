use std::time::Duration;

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Months, NaiveDate, Utc};
use serde::Deserialize;

use super::HistoryProvider;
use crate::config::ProviderConfig;
use crate::model::price::PricePoint;

/// Client for the public Yahoo Finance chart endpoint (daily bars).
pub struct YahooChartClient {
    http: reqwest::Client,
    base_url: String,
    history_years: u32,
}

#[derive(Debug, Deserialize)]
struct ChartEnvelope {
    chart: ChartBody,
}

#[derive(Debug, Deserialize)]
struct ChartBody {
    #[serde(default)]
    result: Option<Vec<ChartResult>>,
    #[serde(default)]
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    #[serde(default)]
    code: String,
    #[serde(default)]
    description: String,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    #[serde(default)]
    meta: ChartMeta,
    #[serde(default)]
    timestamp: Vec<i64>,
    indicators: ChartIndicators,
}

#[derive(Debug, Default, Deserialize)]
struct ChartMeta {
    #[serde(default)]
    gmtoffset: i64,
}

#[derive(Debug, Deserialize)]
struct ChartIndicators {
    #[serde(default)]
    quote: Vec<QuoteColumns>,
    #[serde(default)]
    adjclose: Vec<AdjCloseColumn>,
}

#[derive(Debug, Default, Deserialize)]
struct QuoteColumns {
    #[serde(default)]
    open: Vec<Option<f64>>,
    #[serde(default)]
    high: Vec<Option<f64>>,
    #[serde(default)]
    low: Vec<Option<f64>>,
    #[serde(default)]
    close: Vec<Option<f64>>,
    #[serde(default)]
    volume: Vec<Option<f64>>,
}

#[derive(Debug, Default, Deserialize)]
struct AdjCloseColumn {
    #[serde(default)]
    adjclose: Vec<Option<f64>>,
}

impl YahooChartClient {
    pub fn new(cfg: &ProviderConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(cfg.user_agent.as_str())
            .timeout(Duration::from_secs(cfg.timeout_secs))
            .build()
            .context("failed to build Yahoo HTTP client")?;
        Ok(Self {
            http,
            base_url: cfg.base_url.trim_end_matches('/').to_string(),
            history_years: cfg.history_years,
        })
    }

    fn history_start(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        now.checked_sub_months(Months::new(self.history_years.saturating_mul(12)))
            .unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
    }

    async fn fetch(&self, symbol: &str) -> Result<Vec<PricePoint>> {
        let symbol = symbol.trim().to_ascii_uppercase();
        if symbol.is_empty() {
            bail!("symbol is empty");
        }
        let now = Utc::now();
        let endpoint = format!("{}/v8/finance/chart/{}", self.base_url, symbol);
        let period1 = self.history_start(now).timestamp().to_string();
        let period2 = now.timestamp().to_string();

        let body = self
            .http
            .get(&endpoint)
            .query(&[
                ("period1", period1.as_str()),
                ("period2", period2.as_str()),
                ("interval", "1d"),
                ("events", "history"),
            ])
            .send()
            .await
            .context("yahoo chart HTTP failed")?
            .text()
            .await
            .context("yahoo chart body read failed")?;

        let points = parse_chart_response(&body)?;
        tracing::info!(symbol = %symbol, count = points.len(), "Fetched daily history");
        Ok(points)
    }
}

impl HistoryProvider for YahooChartClient {
    async fn fetch_daily_history(&self, symbol: &str) -> Result<Vec<PricePoint>> {
        self.fetch(symbol).await
    }
}

fn compact_error_body(body: &str) -> String {
    let normalized = body.split_whitespace().collect::<Vec<_>>().join(" ");
    match normalized.char_indices().nth(180) {
        Some((cut, _)) => format!("{}...", &normalized[..cut]),
        None => normalized,
    }
}

/// Decode a chart response into price points, dropping rows with any missing OHLCV field.
fn parse_chart_response(body: &str) -> Result<Vec<PricePoint>> {
    let envelope: ChartEnvelope = serde_json::from_str(body).with_context(|| {
        format!(
            "yahoo chart JSON parse failed: {}",
            compact_error_body(body)
        )
    })?;
    if let Some(err) = envelope.chart.error {
        bail!("yahoo chart error ({}): {}", err.code, err.description);
    }
    let Some(result) = envelope.chart.result.and_then(|r| r.into_iter().next()) else {
        return Ok(Vec::new());
    };

    let quote = result.indicators.quote.into_iter().next().unwrap_or_default();
    let adj = result
        .indicators
        .adjclose
        .into_iter()
        .next()
        .unwrap_or_default()
        .adjclose;
    let column = |col: &[Option<f64>], i: usize| col.get(i).copied().flatten();

    let mut points = Vec::with_capacity(result.timestamp.len());
    for (i, &ts) in result.timestamp.iter().enumerate() {
        let Some(date) = trading_date(ts, result.meta.gmtoffset) else {
            continue;
        };
        let (Some(open), Some(high), Some(low), Some(close), Some(volume)) = (
            column(&quote.open, i),
            column(&quote.high, i),
            column(&quote.low, i),
            column(&quote.close, i),
            column(&quote.volume, i),
        ) else {
            continue;
        };
        points.push(PricePoint {
            date,
            open,
            high,
            low,
            close,
            volume,
            adj_close: column(&adj, i),
        });
    }
    Ok(points)
}

/// Exchange-local calendar date of a bar timestamp.
fn trading_date(timestamp: i64, gmtoffset: i64) -> Option<NaiveDate> {
    DateTime::from_timestamp(timestamp.checked_add(gmtoffset)?, 0).map(|dt| dt.date_naive())
}
