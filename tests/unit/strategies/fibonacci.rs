//! Unit tests for the Fibonacci retracement/extension strategy

use chrono::Utc;
use dextrix::models::signal::SignalAction;
use dextrix::strategies::fibonacci::FibonacciStrategy;
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

/// Swing window with high 110 and low 100, followed by `last`.
fn swing_series(last: f64) -> Vec<f64> {
    let mut prices = vec![110.0, 108.0, 106.0, 104.0, 100.0, 102.0, 103.0, 105.0, 107.0, 109.0];
    prices.push(last);
    prices
}

#[test]
fn insufficient_history_holds() {
    let strategy = FibonacciStrategy::default();
    let prices = vec![100.0; 10];
    let signal = strategy.evaluate(&ctx(&prices));
    assert_eq!(signal.action, SignalAction::Hold);
    assert_eq!(signal.confidence, 0.0);
}

#[test]
fn flat_swing_range_holds() {
    let strategy = FibonacciStrategy::default();
    let prices = vec![100.0; 11];
    let signal = strategy.evaluate(&ctx(&prices));
    assert_eq!(signal.action, SignalAction::Hold);
}

#[test]
fn deep_retracement_buys_with_boost() {
    let strategy = FibonacciStrategy::default();
    // 101 sits below the 78.6% level (102.14); the 161.8% extension
    // target (116.18) projects a ~15% gain, earning the boost.
    let prices = swing_series(101.0);
    let signal = strategy.evaluate(&ctx(&prices));
    assert_eq!(signal.action, SignalAction::Buy);
    assert!((signal.confidence - 0.95).abs() < 1e-9);
    let target = signal.target_price.expect("buy carries a target");
    assert!((target - 116.18).abs() < 0.01);
    assert_eq!(signal.stop_loss, Some(100.0));
}

#[test]
fn shallow_retracement_buys_weakly() {
    let strategy = FibonacciStrategy::default();
    // 107 only clears the 23.6% level (107.64); projected gain 8.6%
    // stays under the boost threshold.
    let prices = swing_series(107.0);
    let signal = strategy.evaluate(&ctx(&prices));
    assert_eq!(signal.action, SignalAction::Buy);
    assert!((signal.confidence - 0.4).abs() < 1e-9);
}

#[test]
fn extension_levels_sell_with_increasing_confidence() {
    let strategy = FibonacciStrategy::default();

    let prices = swing_series(113.0); // past 127.2%
    let signal = strategy.evaluate(&ctx(&prices));
    assert_eq!(signal.action, SignalAction::Sell);
    assert!((signal.confidence - 0.5).abs() < 1e-9);

    let prices = swing_series(117.0); // past 161.8%
    let signal = strategy.evaluate(&ctx(&prices));
    assert_eq!(signal.action, SignalAction::Sell);
    assert!((signal.confidence - 0.75).abs() < 1e-9);

    let prices = swing_series(121.0); // past 200%
    let signal = strategy.evaluate(&ctx(&prices));
    assert_eq!(signal.action, SignalAction::Sell);
    assert!((signal.confidence - 0.9).abs() < 1e-9);
}

#[test]
fn price_between_retracement_and_extension_holds() {
    let strategy = FibonacciStrategy::default();
    let prices = swing_series(109.0);
    let signal = strategy.evaluate(&ctx(&prices));
    assert_eq!(signal.action, SignalAction::Hold);
}
