//! End-to-end workflows: compose a basket, analyse it over a timeframe and
//! read the combined report the way a presentation layer would.

use folio_core::{
    Analysis, AnalysisRequest, Basket, EngineConfig, Timeframe, ValidationError, ZeroWeightPolicy,
};
use folio_tests::{
    assert_close, day, daily_closes, store_with, synthetic_closes, ticker, weighted_basket,
};

// =============================================================================
// Workflow: Building a Basket
// =============================================================================

#[test]
fn user_builds_a_basket_by_hand_then_rebalances_it() {
    // Given: an empty basket
    let mut basket = Basket::new();

    // When: tickers are added one by one
    assert!(basket.add(ticker("aapl")));
    assert!(basket.add(ticker("MSFT")));
    assert!(!basket.add(ticker("AAPL")), "duplicates are ignored");

    // Then: the first ticker holds the full allocation
    let weights: Vec<f64> = basket.entries().iter().map(|e| e.weight).collect();
    assert_eq!(weights, vec![100.0, 0.0]);

    // When: the user rebalances
    basket.set_weight(&ticker("AAPL"), 60.0).expect("valid weight");
    basket.set_weight(&ticker("MSFT"), 40.0).expect("valid weight");

    // Then: the basket is fully allocated and keeps insertion order
    assert!(basket.is_fully_allocated());
    let names: Vec<&str> = basket.tickers().map(|t| t.as_str()).collect();
    assert_eq!(names, vec!["AAPL", "MSFT"]);

    // And: invalid edits are refused
    assert!(matches!(
        basket.set_weight(&ticker("AAPL"), -5.0),
        Err(ValidationError::InvalidWeight { .. })
    ));
    assert!(matches!(
        basket.set_weight(&ticker("TSLA"), 5.0),
        Err(ValidationError::UnknownTicker { .. })
    ));
}

#[test]
fn a_persisted_basket_round_trips_through_json_unchanged() {
    // Given: a basket as it would be stored by the host application
    let basket = weighted_basket(&[("AAPL", 60.0), ("MSFT", 40.0)]);

    // When: it is serialized and read back
    let json = serde_json::to_string(&basket).expect("serialize");
    let restored: Basket = serde_json::from_str(&json).expect("deserialize");

    // Then: nothing changed
    assert_eq!(restored, basket);
    assert!(
        serde_json::from_str::<Basket>(r#"[{"ticker":"AAPL","weight":-1}]"#).is_err(),
        "negative weights are rejected on load"
    );
}

// =============================================================================
// Workflow: Full Analysis
// =============================================================================

#[test]
fn user_analyses_a_basket_against_the_market_over_three_months() {
    // Given: six months of history for two members and a benchmark
    let store = store_with(vec![
        ("AAPL", daily_closes("2024-01-01", &synthetic_closes(31, 180))),
        ("MSFT", daily_closes("2024-01-01", &synthetic_closes(32, 180))),
        ("SPY", daily_closes("2024-01-01", &synthetic_closes(33, 180))),
    ]);
    let basket = weighted_basket(&[("AAPL", 60.0), ("MSFT", 40.0)]);
    let as_of = day("2024-06-28");
    let window = Timeframe::ThreeMonths.window_ending(as_of);
    let request = AnalysisRequest::new(window)
        .with_comparisons(vec![ticker("SPY"), ticker("GONE")])
        .with_sma_periods(vec![20, 50]);

    // When: the analysis runs
    let report = Analysis::default().run(&store, &basket, &request);

    // Then: the full index keeps history before the window
    assert_eq!(report.index.len(), 180);
    assert_eq!(report.index.first().expect("points").value, 100.0);
    assert!(report.windowed.iter().all(|p| window.contains(p.day)));
    assert_eq!(report.windowed.len(), 91);

    // And: moving averages span the whole window thanks to earlier lookback
    for sma in &report.summary.moving_averages {
        assert_eq!(sma.points.len(), report.windowed.len(), "SMA({})", sma.period);
    }

    // And: the missing comparison is dropped, SPY starts where the index does
    assert_eq!(report.comparisons.len(), 1);
    assert_close(
        report.comparisons[0].points[0].value,
        report.windowed[0].value,
        1e-9,
    );

    // And: members and the benchmark are ranked, the unknown ticker is not
    let ranked: Vec<&str> = report
        .correlations
        .results()
        .iter()
        .map(|r| r.ticker.as_str())
        .collect();
    assert!(ranked.contains(&"AAPL"));
    assert!(ranked.contains(&"SPY"));
    assert!(!ranked.contains(&"GONE"));

    // And: the whole report serializes for the presentation layer
    let json = serde_json::to_value(&report).expect("report serializes");
    assert!(json["summary"]["return_pct"].is_number());
    assert!(json["correlations"].is_array());
}

#[test]
fn engine_settings_change_how_sparse_data_is_treated() {
    // Given: a candidate with six paired returns and a zero-weight basket
    let store = store_with(vec![
        ("AAPL", daily_closes("2024-01-01", &synthetic_closes(34, 7))),
        ("SPY", daily_closes("2024-01-01", &synthetic_closes(35, 7))),
    ]);
    let basket = weighted_basket(&[("AAPL", 0.0)]);
    let window = Timeframe::OneMonth.window_ending(day("2024-01-07"));
    let request = AnalysisRequest::new(window);

    let mut strict = EngineConfig::default();
    strict.correlation.min_observations = 10;
    strict.index.zero_weight_policy = ZeroWeightPolicy::Skip;

    // When: analysed with default and with stricter settings
    let default_report = Analysis::default().run(&store, &basket, &request);
    let strict_report = Analysis::new(strict).run(&store, &basket, &request);

    // Then: default settings hold the index flat and rank SPY
    assert!(default_report.index.points().iter().all(|p| p.value == 100.0));
    assert_eq!(default_report.index.len(), 7);
    assert!(default_report.correlations.get(&ticker("SPY")).is_some());

    // And: stricter settings skip flat days and demand more overlap
    assert_eq!(strict_report.index.len(), 1);
    assert!(strict_report.correlations.is_empty());
}
