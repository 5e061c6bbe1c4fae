//! Unit tests for the Bollinger Bands strategy

use chrono::Utc;
use dextrix::models::signal::SignalAction;
use dextrix::strategies::bollinger::BollingerStrategy;
use dextrix::strategies::StrategyContext;

fn ctx<'a>(prices: &'a [f64]) -> StrategyContext<'a> {
    StrategyContext {
        token: "WETH",
        prices,
        volumes: &[],
        tier_quotes: &[],
        dca_position: None,
        now: Utc::now(),
    }
}

/// Ten each of 100 and 102 interleaved: mean 101, sigma 1, bands at 99
/// and 103.
fn alternating_series(last: f64) -> Vec<f64> {
    let mut prices = Vec::new();
    for i in 0..19 {
        prices.push(if i % 2 == 0 { 100.0 } else { 102.0 });
    }
    prices.push(last);
    prices
}

#[test]
fn insufficient_history_holds() {
    let strategy = BollingerStrategy::default();
    let prices = vec![100.0; 19];
    let signal = strategy.evaluate(&ctx(&prices));
    assert_eq!(signal.action, SignalAction::Hold);
    assert_eq!(signal.confidence, 0.0);
}

#[test]
fn flat_series_has_no_bands() {
    let strategy = BollingerStrategy::default();
    let prices = vec![100.0; 25];
    let signal = strategy.evaluate(&ctx(&prices));
    assert_eq!(signal.action, SignalAction::Hold);
}

#[test]
fn price_below_lower_band_buys_capped() {
    let strategy = BollingerStrategy::default();
    let prices = alternating_series(90.0);
    let signal = strategy.evaluate(&ctx(&prices));
    assert_eq!(signal.action, SignalAction::Buy);
    assert!(signal.confidence > 0.0);
    assert!(signal.confidence <= 0.9);
}

#[test]
fn price_above_upper_band_sells_capped() {
    let strategy = BollingerStrategy::default();
    let prices = alternating_series(115.0);
    let signal = strategy.evaluate(&ctx(&prices));
    assert_eq!(signal.action, SignalAction::Sell);
    assert!(signal.confidence > 0.0);
    assert!(signal.confidence <= 0.9);
}

#[test]
fn price_between_mean_and_lower_band_leans_buy() {
    let strategy = BollingerStrategy::default();
    // Ends on 100: below the 101 mean, above the 99 lower band.
    let prices = alternating_series(100.0);
    let signal = strategy.evaluate(&ctx(&prices));
    assert_eq!(signal.action, SignalAction::Buy);
    assert!((signal.confidence - 0.3).abs() < 1e-9);
}

#[test]
fn price_between_mean_and_upper_band_leans_sell() {
    let strategy = BollingerStrategy::default();
    let prices = alternating_series(102.0);
    let signal = strategy.evaluate(&ctx(&prices));
    assert_eq!(signal.action, SignalAction::Sell);
    assert!((signal.confidence - 0.3).abs() < 1e-9);
}
