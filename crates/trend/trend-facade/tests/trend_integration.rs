//! Integration tests for trend augmentation

use trend_facade::prelude::*;
use trend_facade::{compute_bands, detect_signal_field, future_keys};

const DAY_MS: i64 = 86_400_000;
const START_MS: i64 = 1_704_067_200_000; // 2024-01-01T00:00:00Z

fn daily_series(values: &[i64]) -> Vec<Observation> {
    values
        .iter()
        .enumerate()
        .map(|(i, &v)| Observation::new((START_MS + i as i64 * DAY_MS).to_string()).with_count(v))
        .collect()
}

fn weekly_counts(n: usize) -> Vec<i64> {
    let pattern = [12, 15, 14, 16, 13, 4, 3];
    (0..n).map(|i| pattern[i % 7] + (i / 7) as i64).collect()
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_digit())
}

/// `MM-yyyy`
fn is_month_label(label: &str) -> bool {
    let parts: Vec<&str> = label.split('-').collect();
    parts.len() == 2 && parts[0].len() == 2 && parts[1].len() == 4 && parts.iter().all(|p| is_digits(p))
}

/// `dd-MM-yyyy`
fn is_day_label(label: &str) -> bool {
    let parts: Vec<&str> = label.split('-').collect();
    parts.len() == 3
        && parts[0].len() == 2
        && parts[1].len() == 2
        && parts[2].len() == 4
        && parts.iter().all(|p| is_digits(p))
}

fn fast_config() -> TrendConfig {
    TrendConfig::default().with_order(SarimaOrder::new(1, 0, 0))
}

// ============================================================================
// Passthrough and shape
// ============================================================================

#[test]
fn test_short_series_is_returned_unchanged() {
    let input = daily_series(&weekly_counts(19));
    let output = trend_facade::augment::augment(&input, Some("day"));

    assert_eq!(output, input);
    assert!(output.iter().all(|o| o.bollinger_avg.is_none()));
}

#[test]
fn test_empty_series_is_returned_unchanged() {
    assert!(trend_facade::augment::augment(&[], None).is_empty());
}

#[test]
fn test_bands_on_every_original_observation() {
    let input = daily_series(&weekly_counts(25));
    let output = TrendAugmenter::new(TrendConfig::default()).augment(&input, None);

    assert_eq!(output.len(), 35);
    for (original, augmented) in input.iter().zip(&output) {
        assert_eq!(augmented.key, original.key);
        assert_eq!(augmented.count, original.count);
        assert!(augmented.bollinger_avg.is_some());
        assert!(augmented.bollinger_std.is_some());
        assert!(!augmented.is_forecast());
    }
    assert!(output[25..].iter().all(|o| o.is_forecast()));
}

#[test]
fn test_rolling_mean_at_first_full_window() {
    let values: Vec<i64> = (0..25).map(|i| (i * i) % 17).collect();
    let output = TrendAugmenter::new(fast_config()).augment(&daily_series(&values), None);

    let expected = values[..20].iter().sum::<i64>() as f64 / 20.0;
    let avg = output[20].bollinger_avg.unwrap();
    assert!((avg - expected).abs() < 1e-12, "avg {} != {}", avg, expected);

    // Leading positions carry the zero placeholder
    assert_eq!(output[19].bollinger_avg, Some(0.0));
    assert_eq!(output[19].bollinger_std, Some(0.0));
}

#[test]
fn test_band_values_match_calculator() {
    let values = weekly_counts(30);
    let signal: Vec<f64> = values.iter().map(|&v| v as f64).collect();
    let bands = compute_bands(&signal, 20);
    let output = TrendAugmenter::new(fast_config()).augment(&daily_series(&values), None);

    for (band, obs) in bands.iter().zip(&output) {
        assert_eq!(obs.bollinger_avg, Some(band.avg));
        assert_eq!(obs.bollinger_std, Some(band.std));
    }
}

// ============================================================================
// Keys
// ============================================================================

#[test]
fn test_key_extrapolation_from_last_two_keys() {
    let keys = future_keys("200", "100", 3).unwrap();
    assert_eq!(keys, vec!["300", "400", "500"]);
}

#[test]
fn test_forecast_keys_continue_bucket_step() {
    let input = daily_series(&weekly_counts(25));
    let output = TrendAugmenter::new(fast_config()).augment(&input, None);

    let keys: Vec<i64> = output[25..].iter().map(|o| o.key.parse().unwrap()).collect();
    let expected: Vec<i64> = (25..35).map(|i| START_MS + i * DAY_MS).collect();
    assert_eq!(keys, expected);
}

// ============================================================================
// Fail-open
// ============================================================================

#[test]
fn test_unparseable_key_returns_input() {
    let mut input = daily_series(&weekly_counts(25));
    input[24].key = "bucket-24".to_string();

    let augmenter = TrendAugmenter::new(TrendConfig::default());
    assert!(augmenter.try_augment(&input, None).is_err());
    assert_eq!(augmenter.augment(&input, None), input);
}

#[test]
fn test_missing_signal_returns_input() {
    let mut input = daily_series(&weekly_counts(25));
    input[10].count = None;

    let output = TrendAugmenter::new(fast_config()).augment(&input, None);
    assert_eq!(output, input);
}

#[test]
fn test_failing_model_returns_input() {
    struct Diverging;

    impl SignalForecaster for Diverging {
        fn forecast(&self, _history: &[f64], _horizon: usize) -> Result<Vec<ForecastPoint>> {
            Err(TrendError::ModelFit("conditional sum of squares diverged".to_string()))
        }

        fn min_history(&self) -> usize {
            1
        }
    }

    let input = daily_series(&weekly_counts(25));
    let augmenter = TrendAugmenter::with_forecaster(TrendConfig::default(), Diverging);
    assert_eq!(augmenter.augment(&input, None), input);
}

// ============================================================================
// Forecast precondition
// ============================================================================

#[test]
fn test_nineteen_points_yield_no_forecast() {
    let config = TrendConfig::default().with_window_size(5);
    let output = TrendAugmenter::new(config).augment(&daily_series(&weekly_counts(19)), None);

    assert_eq!(output.len(), 19);
    assert!(output.iter().all(|o| o.bollinger_avg.is_some()));
    assert!(output.iter().all(|o| !o.is_forecast()));
}

#[test]
fn test_twenty_points_yield_full_horizon() {
    let config = TrendConfig::default().with_window_size(5);
    let output = TrendAugmenter::new(config).augment(&daily_series(&weekly_counts(20)), None);

    assert_eq!(output.len(), 30);
    for obs in &output[20..] {
        let mid = obs.prediction.unwrap();
        let lower = obs.prediction_lower_bound.unwrap();
        let upper = obs.prediction_upper_bound.unwrap();
        assert!(lower <= mid && mid <= upper, "{} <= {} <= {}", lower, mid, upper);
        assert!(obs.count.is_none());
        assert!(obs.bollinger_avg.is_none());
    }
}

// ============================================================================
// Interval labels
// ============================================================================

#[test]
fn test_month_interval_labels() {
    let output = TrendAugmenter::new(fast_config()).augment(&daily_series(&weekly_counts(25)), Some("month"));

    let labels: Vec<&str> = output[25..]
        .iter()
        .map(|o| o.additional_key.as_deref().unwrap())
        .collect();
    assert!(labels.iter().all(|l| is_month_label(l)), "{:?}", labels);
    assert_eq!(labels[0], "01-2024");
    assert_eq!(labels[9], "02-2024");
}

#[test]
fn test_unknown_interval_falls_back_to_day() {
    let augmenter = TrendAugmenter::new(fast_config());
    let input = daily_series(&weekly_counts(25));

    for interval in [Some("fortnight"), Some(""), None] {
        let output = augmenter.augment(&input, interval);
        let labels: Vec<&str> = output[25..]
            .iter()
            .map(|o| o.additional_key.as_deref().unwrap())
            .collect();
        assert!(labels.iter().all(|l| is_day_label(l)), "{:?}", labels);
        assert_eq!(labels[0], "26-01-2024");
    }
}

#[test]
fn test_week_labels_keep_calendar_year_at_boundary() {
    // Last bucket 2024-12-28, so forecasts cover 2024-12-29 .. 2025-01-07
    let end = 1_735_344_000_000i64;
    let input: Vec<Observation> = (0..25)
        .map(|i| Observation::new((end - (24 - i) * DAY_MS).to_string()).with_count(i % 7))
        .collect();

    let output = TrendAugmenter::new(fast_config()).augment(&input, Some("week"));
    let labels: Vec<&str> = output[25..]
        .iter()
        .map(|o| o.additional_key.as_deref().unwrap())
        .collect();

    assert_eq!(labels[0], "52-2024");
    assert_eq!(labels[1], "01-2024");
    assert_eq!(labels[2], "01-2024");
    assert_eq!(labels[3], "01-2025");
}

#[test]
fn test_interval_names_are_case_insensitive() {
    let output = TrendAugmenter::new(fast_config()).augment(&daily_series(&weekly_counts(25)), Some("YEAR"));
    assert_eq!(output[25].additional_key.as_deref(), Some("2024"));
}

#[test]
fn test_timezone_shifts_labels() {
    // 02:00 UTC on New Year's Day is still the previous year in Los Angeles
    let base = START_MS + 2 * 3_600_000 - 25 * DAY_MS;
    let input: Vec<Observation> = (0..25)
        .map(|i| Observation::new((base + i * DAY_MS).to_string()).with_count(i % 7))
        .collect();

    let utc = TrendAugmenter::new(fast_config()).augment(&input, Some("year"));
    assert_eq!(utc[25].additional_key.as_deref(), Some("2024"));

    let config = fast_config().with_timezone(chrono_tz::America::Los_Angeles);
    let local = TrendAugmenter::new(config).augment(&input, Some("year"));
    assert_eq!(local[25].additional_key.as_deref(), Some("2023"));
}

// ============================================================================
// Signal detection
// ============================================================================

#[test]
fn test_registry_order_decides_signal() {
    let mut obs = Observation::new("1");
    obs.sum = Some(5.0);
    obs.count = Some(2);
    assert_eq!(detect_signal_field(&[obs]).map(|f| f.name()), Some("count"));
}

#[test]
fn test_total_only_series_is_untouched() {
    let input: Vec<Observation> = (0..25)
        .map(|i| Observation::new((START_MS + i * DAY_MS).to_string()).with_total(i))
        .collect();
    assert_eq!(TrendAugmenter::new(fast_config()).augment(&input, None), input);
}

#[test]
fn test_disabled_config_is_untouched() {
    let input = daily_series(&weekly_counts(25));
    let config = TrendConfig::default().with_enabled(false);
    assert_eq!(TrendAugmenter::new(config).augment(&input, None), input);
}

// ============================================================================
// Concurrency
// ============================================================================

#[test]
fn test_shared_augmenter_across_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<TrendAugmenter>();

    let augmenter = &TrendAugmenter::new(fast_config());
    let input = &daily_series(&weekly_counts(25));
    let expected = augmenter.augment(input, Some("week"));

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(move || augmenter.augment(input, Some("week"))))
            .collect();
        for handle in handles {
            let output = handle.join().unwrap();
            assert_eq!(output.len(), expected.len());
            assert_eq!(output[..25], expected[..25]);
        }
    });
}
