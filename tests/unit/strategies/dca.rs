//! Unit tests for the DCA strategy

use chrono::{Duration, Utc};
use dextrix::models::dca::DcaPosition;
use dextrix::models::signal::SignalAction;
use dextrix::strategies::dca::DcaStrategy;
use dextrix::strategies::StrategyContext;

fn ctx<'a>(prices: &'a [f64], position: Option<&'a DcaPosition>) -> StrategyContext<'a> {
    StrategyContext {
        token: "WETH",
        prices,
        volumes: &[],
        tier_quotes: &[],
        dca_position: position,
        now: Utc::now(),
    }
}

/// Position with a 100.0 average entry, outside the cooldown window.
fn position(count: u32, minutes_ago: i64) -> DcaPosition {
    DcaPosition {
        token: "WETH".to_string(),
        total_amount: 10.0,
        total_cost: 1000.0,
        accumulation_count: count,
        last_accumulation: Utc::now() - Duration::minutes(minutes_ago),
    }
}

#[test]
fn first_call_for_unseen_token_opens_with_fixed_confidence() {
    let strategy = DcaStrategy::default();
    let prices = [100.0];
    let signal = strategy.evaluate(&ctx(&prices, None));
    assert_eq!(signal.action, SignalAction::Buy);
    assert!((signal.confidence - 0.6).abs() < 1e-9);
}

#[test]
fn no_price_holds() {
    let strategy = DcaStrategy::default();
    let signal = strategy.evaluate(&ctx(&[], None));
    assert_eq!(signal.action, SignalAction::Hold);
}

#[test]
fn call_within_cooldown_holds_regardless_of_price() {
    let strategy = DcaStrategy::default();
    let pos = position(1, 0);
    // Deep discount, but the cooldown window is still open.
    let prices = [50.0];
    let signal = strategy.evaluate(&ctx(&prices, Some(&pos)));
    assert_eq!(signal.action, SignalAction::Hold);
    assert_eq!(signal.confidence, 0.0);
}

#[test]
fn discount_below_average_accumulates() {
    let strategy = DcaStrategy::default();
    let pos = position(2, 10);
    let prices = [95.0];
    let signal = strategy.evaluate(&ctx(&prices, Some(&pos)));
    assert_eq!(signal.action, SignalAction::Buy);
    // 5% discount scales to 0.4 + 0.25.
    assert!((signal.confidence - 0.65).abs() < 1e-9);
}

#[test]
fn deeper_discount_scales_confidence_up() {
    let strategy = DcaStrategy::default();
    let pos = position(2, 10);
    let shallow = strategy.evaluate(&ctx(&[98.0], Some(&pos)));
    let deep = strategy.evaluate(&ctx(&[90.0], Some(&pos)));
    assert!(deep.confidence > shallow.confidence);
}

#[test]
fn price_at_or_above_average_skips() {
    let strategy = DcaStrategy::default();
    let pos = position(2, 10);
    let signal = strategy.evaluate(&ctx(&[104.0], Some(&pos)));
    assert_eq!(signal.action, SignalAction::Hold);
}

#[test]
fn budget_spent_takes_profit_on_gain() {
    let strategy = DcaStrategy::default();
    let pos = position(5, 10);
    let signal = strategy.evaluate(&ctx(&[106.0], Some(&pos)));
    assert_eq!(signal.action, SignalAction::Sell);
}

#[test]
fn budget_spent_without_gain_holds() {
    let strategy = DcaStrategy::default();
    let pos = position(5, 10);
    let signal = strategy.evaluate(&ctx(&[102.0], Some(&pos)));
    assert_eq!(signal.action, SignalAction::Hold);
}
