//! Unit tests for the signal combiner

use dextrix::models::profile::{
    RiskSettings, StrategyKind, StrategyWeights, TradingProfile, TradingSettings,
};
use dextrix::models::signal::{Signal, SignalAction};
use dextrix::signals::SignalCombiner;

fn profile(weights: &[(StrategyKind, f64)], enabled: &[StrategyKind]) -> TradingProfile {
    TradingProfile {
        id: "test".to_string(),
        name: "Test".to_string(),
        description: String::new(),
        weights: weights.iter().copied().collect::<StrategyWeights>(),
        enabled: enabled.iter().copied().collect(),
        risk: RiskSettings::default(),
        trading: TradingSettings::default(),
        builtin: false,
    }
}

#[test]
fn weighted_blend_follows_net_score() {
    let combiner = SignalCombiner;
    let profile = profile(
        &[
            (StrategyKind::Momentum, 0.4),
            (StrategyKind::TrendCrossover, 0.2),
        ],
        &[StrategyKind::Momentum, StrategyKind::TrendCrossover],
    );
    let signals = vec![
        (
            StrategyKind::Momentum,
            Signal::new(SignalAction::Buy, 0.9, "up"),
        ),
        (
            StrategyKind::TrendCrossover,
            Signal::new(SignalAction::Sell, 0.2, "down"),
        ),
    ];

    let combined = combiner.combine(&signals, &profile);
    // net = 0.4 * 0.9 - 0.2 * 0.2 = 0.32
    assert_eq!(combined.action, SignalAction::Buy);
    assert!((combined.confidence - 0.32).abs() < 1e-9);
}

#[test]
fn net_below_threshold_holds() {
    let combiner = SignalCombiner;
    let profile = profile(&[(StrategyKind::Momentum, 0.3)], &[StrategyKind::Momentum]);
    let signals = vec![(
        StrategyKind::Momentum,
        Signal::new(SignalAction::Buy, 0.9, "up"),
    )];

    let combined = combiner.combine(&signals, &profile);
    // net = 0.27, under the 0.3 threshold
    assert_eq!(combined.action, SignalAction::Hold);
    assert_eq!(combined.confidence, 0.0);
    assert!(combined.reasons.is_empty());
}

#[test]
fn exact_cancellation_holds() {
    let combiner = SignalCombiner;
    let profile = profile(
        &[
            (StrategyKind::Momentum, 0.5),
            (StrategyKind::Bollinger, 0.5),
        ],
        &[StrategyKind::Momentum, StrategyKind::Bollinger],
    );
    let signals = vec![
        (
            StrategyKind::Momentum,
            Signal::new(SignalAction::Buy, 0.8, "up"),
        ),
        (
            StrategyKind::Bollinger,
            Signal::new(SignalAction::Sell, 0.8, "down"),
        ),
    ];

    let combined = combiner.combine(&signals, &profile);
    assert_eq!(combined.action, SignalAction::Hold);
    assert_eq!(combined.confidence, 0.0);
}

#[test]
fn disabled_strategies_do_not_contribute() {
    let combiner = SignalCombiner;
    let profile = profile(
        &[
            (StrategyKind::Momentum, 0.5),
            (StrategyKind::Bollinger, 0.5),
        ],
        &[StrategyKind::Momentum],
    );
    let signals = vec![
        (
            StrategyKind::Momentum,
            Signal::new(SignalAction::Buy, 0.8, "up"),
        ),
        (
            StrategyKind::Bollinger,
            Signal::new(SignalAction::Sell, 0.9, "down"),
        ),
    ];

    let combined = combiner.combine(&signals, &profile);
    assert_eq!(combined.action, SignalAction::Buy);
    assert!((combined.confidence - 0.4).abs() < 1e-9);
}

#[test]
fn rationale_concatenates_contributing_signals() {
    let combiner = SignalCombiner;
    let profile = profile(
        &[
            (StrategyKind::Momentum, 0.4),
            (StrategyKind::Fibonacci, 0.4),
            (StrategyKind::Bollinger, 0.2),
        ],
        &[
            StrategyKind::Momentum,
            StrategyKind::Fibonacci,
            StrategyKind::Bollinger,
        ],
    );
    let signals = vec![
        (
            StrategyKind::Momentum,
            Signal::new(SignalAction::Buy, 0.9, "momentum up"),
        ),
        (
            StrategyKind::Fibonacci,
            Signal::new(SignalAction::Buy, 0.7, "retracement"),
        ),
        (
            StrategyKind::Bollinger,
            Signal::new(SignalAction::Sell, 0.3, "upper band"),
        ),
    ];

    let combined = combiner.combine(&signals, &profile);
    assert_eq!(combined.action, SignalAction::Buy);
    let descriptions: Vec<_> = combined
        .reasons
        .iter()
        .map(|r| r.description.as_str())
        .collect();
    assert_eq!(descriptions, vec!["momentum up", "retracement"]);
}

#[test]
fn combination_is_deterministic() {
    let combiner = SignalCombiner;
    let profile = profile(
        &[
            (StrategyKind::Momentum, 0.4),
            (StrategyKind::TrendCrossover, 0.2),
        ],
        &[StrategyKind::Momentum, StrategyKind::TrendCrossover],
    );
    let signals = vec![
        (
            StrategyKind::Momentum,
            Signal::new(SignalAction::Buy, 0.9, "up"),
        ),
        (
            StrategyKind::TrendCrossover,
            Signal::new(SignalAction::Sell, 0.2, "down"),
        ),
    ];

    let first = combiner.combine(&signals, &profile);
    let second = combiner.combine(&signals, &profile);
    assert_eq!(first.action, second.action);
    assert_eq!(first.confidence, second.confidence);
    assert_eq!(first.reasons.len(), second.reasons.len());
}
