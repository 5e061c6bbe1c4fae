//! Unit tests for the momentum strategy

use chrono::Utc;
use dextrix::models::signal::SignalAction;
use dextrix::strategies::momentum::MomentumStrategy;
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

#[test]
fn insufficient_history_returns_hold_with_zero_confidence() {
    let strategy = MomentumStrategy::default();
    let prices: Vec<f64> = (0..19).map(|i| 100.0 + i as f64).collect();
    let signal = strategy.evaluate(&ctx(&prices));
    assert_eq!(signal.action, SignalAction::Hold);
    assert_eq!(signal.confidence, 0.0);
}

#[test]
fn rising_means_produce_buy() {
    let strategy = MomentumStrategy::default();
    let mut prices = vec![100.0; 10];
    prices.extend(vec![105.0; 10]);
    let signal = strategy.evaluate(&ctx(&prices));
    assert_eq!(signal.action, SignalAction::Buy);
    // 5% change scales to 0.5 confidence.
    assert!((signal.confidence - 0.5).abs() < 1e-9);
}

#[test]
fn falling_means_produce_sell() {
    let strategy = MomentumStrategy::default();
    let mut prices = vec![100.0; 10];
    prices.extend(vec![96.0; 10]);
    let signal = strategy.evaluate(&ctx(&prices));
    assert_eq!(signal.action, SignalAction::Sell);
    assert!((signal.confidence - 0.4).abs() < 1e-9);
}

#[test]
fn confidence_is_capped() {
    let strategy = MomentumStrategy::default();
    let mut prices = vec![100.0; 10];
    prices.extend(vec![200.0; 10]);
    let signal = strategy.evaluate(&ctx(&prices));
    assert_eq!(signal.action, SignalAction::Buy);
    assert_eq!(signal.confidence, 0.8);
}

#[test]
fn small_change_holds() {
    let strategy = MomentumStrategy::default();
    let mut prices = vec![100.0; 10];
    prices.extend(vec![101.0; 10]);
    let signal = strategy.evaluate(&ctx(&prices));
    assert_eq!(signal.action, SignalAction::Hold);
    assert_eq!(signal.confidence, 0.0);
}
