use chrono::{Days, NaiveDate};
use ticker_analytics::analysis::{analyze, analyze_symbol, AnalysisResponse};
use ticker_analytics::config::AnalysisConfig;
use ticker_analytics::error::AppError;
use ticker_analytics::model::price::{PricePoint, PriceSeries};
use ticker_analytics::provider::StaticHistoryProvider;

fn history(len: usize) -> Vec<PricePoint> {
    (0..len)
        .map(|i| {
            let x = i as f64;
            let close = 50.0 + 8.0 * (x * 0.05).sin() + 0.02 * x;
            PricePoint {
                date: NaiveDate::from_ymd_opt(2010, 1, 4).unwrap() + Days::new(i as u64),
                open: close - 0.3,
                high: close + 0.8,
                low: close - 0.9,
                close,
                volume: 2_000_000.0 + 250_000.0 * (x * 0.2).cos(),
                adj_close: None,
            }
        })
        .collect()
}

#[tokio::test]
async fn full_bundle_for_known_symbol() {
    let mut raw = history(320);
    raw.reverse();
    // A duplicated day from the provider must not shift alignment.
    raw.push(raw[10].clone());
    let provider = StaticHistoryProvider::new().with_symbol("ACME", raw);

    let report = analyze_symbol(&provider, "acme", &AnalysisConfig::default())
        .await
        .unwrap();

    let n = report.series.len();
    assert_eq!(n, 320);
    assert!(report
        .series
        .points()
        .windows(2)
        .all(|w| w[0].date < w[1].date));

    let ind = &report.indicators;
    assert_eq!(ind.rsi14.len(), n);
    assert_eq!(ind.macd.len(), n);
    assert_eq!(ind.ema200.len(), n);
    assert_eq!(ind.vwma20.len(), n);
    assert_eq!(ind.ema50.len(), n);
    assert_eq!(ind.ema200.iter().take_while(|v| v.is_none()).count(), 199);
    assert_eq!(ind.ema50.iter().take_while(|v| v.is_none()).count(), 49);
    assert_eq!(ind.vwma20.iter().take_while(|v| v.is_none()).count(), 19);
    assert_eq!(ind.rsi14.iter().take_while(|v| v.is_none()).count(), 14);
    assert!(report.recent_averages.average_price > 0.0);
    assert!(report.chart_points().len() == n);
}

#[tokio::test]
async fn unknown_symbol_is_a_fetch_error() {
    let provider = StaticHistoryProvider::new();
    let err = analyze_symbol(&provider, "NOPE", &AnalysisConfig::default())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Fetch { .. }));
    assert_eq!(
        err.to_string(),
        "Could not fetch data for NOPE. Please check the symbol and try again."
    );
}

#[test]
fn empty_history_is_a_no_data_error() {
    let provider = StaticHistoryProvider::new().with_symbol("EMPTY", Vec::new());
    let result = tokio_test::block_on(analyze_symbol(
        &provider,
        "EMPTY",
        &AnalysisConfig::default(),
    ));
    let err = result.unwrap_err();
    assert!(matches!(err, AppError::NoData(_)));
    assert_eq!(err.to_string(), "No data found for symbol EMPTY.");
}

#[test]
fn short_history_still_succeeds() {
    let series = PriceSeries::from_unsorted(history(3));
    let report = analyze("TINY", series, &AnalysisConfig::default()).unwrap();
    assert!(report.spikes.is_empty());
    assert!(report.backtest.trades.is_empty());
    assert_eq!(report.recent_averages.average_price, 0.0);
    assert!(report.indicators.ema50.iter().all(Option::is_none));
}

#[test]
fn invalid_config_is_rejected() {
    let cfg = AnalysisConfig {
        vwma_period: 0,
        ..AnalysisConfig::default()
    };
    let err = analyze("ACME", PriceSeries::from_unsorted(history(30)), &cfg).unwrap_err();
    assert!(matches!(err, AppError::Config(_)));
}

#[test]
fn failure_response_is_a_single_message() {
    let response = AnalysisResponse::from_result(Err(AppError::NoData("XYZ".to_string())));
    assert!(!response.is_success());
    let json: serde_json::Value = serde_json::from_str(&response.to_json().unwrap()).unwrap();
    assert_eq!(
        json,
        serde_json::json!({ "error": "No data found for symbol XYZ." })
    );
}

#[test]
fn success_response_is_the_bundle() {
    let report = analyze(
        "ACME",
        PriceSeries::from_unsorted(history(60)),
        &AnalysisConfig::default(),
    )
    .unwrap();
    let response = AnalysisResponse::from_result(Ok(report));
    assert!(response.is_success());
    let json: serde_json::Value = serde_json::from_str(&response.to_json().unwrap()).unwrap();
    assert_eq!(json["symbol"], "ACME");
    assert!(json.get("error").is_none());
    assert_eq!(json["series"].as_array().unwrap().len(), 60);
}
