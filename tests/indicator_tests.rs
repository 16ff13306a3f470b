use chrono::{Days, NaiveDate};
use ticker_analytics::indicator::{
    calculate_average_price_volume, calculate_ema, calculate_macd, calculate_rsi, calculate_sma,
    calculate_vwma, Ema, Rsi,
};
use ticker_analytics::model::price::PricePoint;

fn bar(i: u64, close: f64, volume: f64) -> PricePoint {
    PricePoint {
        date: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap() + Days::new(i),
        open: close,
        high: close,
        low: close,
        close,
        volume,
        adj_close: None,
    }
}

fn wave(len: usize) -> Vec<f64> {
    (0..len)
        .map(|i| 100.0 + 10.0 * (i as f64 * 0.3).sin() + (i as f64 * 0.05))
        .collect()
}

#[test]
fn sma_trailing_mean() {
    let out = calculate_sma(&[1.0, 2.0, 3.0, 4.0, 5.0], 3);
    assert_eq!(out[0], None);
    assert_eq!(out[1], None);
    assert!((out[2].unwrap() - 2.0).abs() < f64::EPSILON);
    assert!((out[3].unwrap() - 3.0).abs() < f64::EPSILON);
    assert!((out[4].unwrap() - 4.0).abs() < f64::EPSILON);
}

#[test]
fn sma_zero_period_is_undefined() {
    assert_eq!(calculate_sma(&[1.0, 2.0], 0), vec![None, None]);
}

#[test]
fn basic_ema() {
    let mut ema = Ema::new(3);
    assert_eq!(ema.push(2.0), None);
    assert_eq!(ema.push(5.0), None);
    assert!(!ema.is_ready());

    let v = ema.push(8.0).unwrap();
    assert!((v - 5.0).abs() < f64::EPSILON);
    assert!(ema.is_ready());

    let v = ema.push(11.0).unwrap();
    assert!((v - 8.0).abs() < f64::EPSILON);

    let v = ema.push(14.0).unwrap();
    assert!((v - 11.0).abs() < f64::EPSILON);
}

#[test]
fn ema_warm_up_length_matches_period() {
    let values = wave(250);
    for period in [1usize, 2, 12, 26, 50, 200, 250] {
        let out = calculate_ema(&values, period);
        assert_eq!(out.len(), values.len());
        assert!(
            out[..period - 1].iter().all(Option::is_none),
            "period {} has a defined value in warm-up",
            period
        );
        assert!(
            out[period - 1..].iter().all(Option::is_some),
            "period {} has a gap after warm-up",
            period
        );
    }
}

#[test]
fn ema_shorter_than_period_is_all_undefined() {
    let out = calculate_ema(&[1.0, 2.0, 3.0], 4);
    assert_eq!(out, vec![None, None, None]);
}

#[test]
fn ema_seed_is_simple_mean() {
    let out = calculate_ema(&[4.0, 8.0, 6.0, 10.0], 3);
    assert!((out[2].unwrap() - 6.0).abs() < f64::EPSILON);
    // k = 0.5
    assert!((out[3].unwrap() - 8.0).abs() < f64::EPSILON);
}

#[test]
fn rsi_known_values() {
    let out = calculate_rsi(&[1.0, 2.0, 1.0, 2.0], 2);
    assert_eq!(out[0], None);
    assert_eq!(out[1], None);
    // gains [1, 0], losses [0, 1]
    assert!((out[2].unwrap() - 50.0).abs() < 1e-12);
    // avg gain 0.75, avg loss 0.25
    assert!((out[3].unwrap() - 75.0).abs() < 1e-12);
}

#[test]
fn rsi_insufficient_history_is_undefined() {
    assert!(calculate_rsi(&[1.0, 2.0, 3.0], 3).iter().all(Option::is_none));
    assert!(calculate_rsi(&[], 14).is_empty());
}

#[test]
fn rsi_rising_series_is_one_hundred() {
    let prices: Vec<f64> = (0..30).map(|i| 10.0 + i as f64).collect();
    let out = calculate_rsi(&prices, 14);
    assert!(out[..14].iter().all(Option::is_none));
    assert!(out[14..].iter().all(|v| *v == Some(100.0)));
}

#[test]
fn rsi_stays_in_range() {
    let prices = wave(500);
    let out = calculate_rsi(&prices, 14);
    for v in out.iter().flatten() {
        assert!((0.0..=100.0).contains(v), "RSI out of range: {}", v);
        assert!(v.is_finite());
    }
}

#[test]
fn streaming_rsi_matches_series() {
    let prices = wave(80);
    let series = calculate_rsi(&prices, 14);
    let mut rsi = Rsi::new(14);
    for (i, &p) in prices.iter().enumerate() {
        assert_eq!(rsi.push(p), series[i]);
    }
    assert!(rsi.is_ready());
}

#[test]
fn macd_alignment_and_histogram() {
    let prices = wave(60);
    let out = calculate_macd(&prices, 3, 6, 4);
    assert_eq!(out.len(), prices.len());

    for (i, point) in out.iter().enumerate() {
        assert_eq!(point.macd.is_some(), i >= 5, "macd at {}", i);
        assert_eq!(point.signal.is_some(), i >= 8, "signal at {}", i);
        assert_eq!(
            point.histogram.is_some(),
            point.macd.is_some() && point.signal.is_some()
        );
        if let (Some(m), Some(s), Some(h)) = (point.macd, point.signal, point.histogram) {
            assert_eq!(h, m - s);
        }
    }
}

#[test]
fn macd_line_is_difference_of_emas() {
    let prices = wave(40);
    let short = calculate_ema(&prices, 12);
    let long = calculate_ema(&prices, 26);
    let out = calculate_macd(&prices, 12, 26, 9);
    for i in 25..prices.len() {
        assert_eq!(out[i].macd, Some(short[i].unwrap() - long[i].unwrap()));
    }
    // 26 + 9 - 2 = 33 is the first index with a signal value.
    assert!(out[32].signal.is_none());
    assert!(out[33].signal.is_some());
}

#[test]
fn macd_signal_seeded_from_defined_values_only() {
    let prices = wave(30);
    let out = calculate_macd(&prices, 2, 4, 3);
    let defined: Vec<f64> = out.iter().filter_map(|p| p.macd).collect();
    let expected_seed = (defined[0] + defined[1] + defined[2]) / 3.0;
    assert!((out[5].signal.unwrap() - expected_seed).abs() < 1e-12);
}

#[test]
fn vwma_weights_by_volume() {
    let data = vec![bar(0, 10.0, 1.0), bar(1, 20.0, 3.0), bar(2, 30.0, 0.0)];
    let out = calculate_vwma(&data, 2);
    assert_eq!(out[0], None);
    assert!((out[1].unwrap() - 17.5).abs() < f64::EPSILON);
    assert!((out[2].unwrap() - 20.0).abs() < f64::EPSILON);
}

#[test]
fn vwma_zero_volume_window_uses_last_close() {
    let data: Vec<PricePoint> = (0..5).map(|i| bar(i, 10.0 + i as f64, 0.0)).collect();
    let out = calculate_vwma(&data, 3);
    assert_eq!(out[2], Some(12.0));
    assert_eq!(out[3], Some(13.0));
    assert_eq!(out[4], Some(14.0));
    assert!(out.iter().flatten().all(|v| v.is_finite()));
}

#[test]
fn vwma_short_series_is_undefined() {
    let data = vec![bar(0, 10.0, 5.0)];
    assert_eq!(calculate_vwma(&data, 20), vec![None]);
}

#[test]
fn recent_averages_over_trailing_window() {
    let data: Vec<PricePoint> = (0..7).map(|i| bar(i, i as f64, 100.0 * i as f64)).collect();
    let avg = calculate_average_price_volume(&data, 5);
    assert!((avg.average_price - 4.0).abs() < f64::EPSILON);
    assert!((avg.average_volume - 400.0).abs() < f64::EPSILON);
}

#[test]
fn recent_averages_insufficient_data_is_zero() {
    let data = vec![bar(0, 10.0, 5.0)];
    let avg = calculate_average_price_volume(&data, 5);
    assert_eq!(avg.average_price, 0.0);
    assert_eq!(avg.average_volume, 0.0);
}
