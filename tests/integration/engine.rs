//! Integration tests for the evaluation cycle against the paper
//! connector.

use dextrix::connectors::paper::PaperConnector;
use dextrix::engine::{EngineConfig, TradingEngine};
use dextrix::execution::ExecutionController;
use dextrix::metrics::Metrics;
use dextrix::models::market::TokenInfo;
use dextrix::models::profile::{
    RiskSettings, StrategyKind, StrategyWeights, TradingProfile, TradingSettings,
};
use dextrix::models::signal::SignalAction;
use dextrix::models::trade::TradeStatus;
use dextrix::profiles::ProfileManager;
use std::sync::Arc;

struct Harness {
    engine: Arc<TradingEngine>,
    execution: Arc<ExecutionController>,
    profiles: Arc<ProfileManager>,
}

fn harness(token_price: f64) -> Harness {
    let metrics = Arc::new(Metrics::new().expect("metrics initialization"));
    let profiles = Arc::new(ProfileManager::new());
    let execution = Arc::new(ExecutionController::new());
    let connector = Arc::new(
        PaperConnector::new("USDC")
            .with_token(TokenInfo::new("WETH", "0xweth", 18), token_price)
            .with_balance("USDC", 10_000.0),
    );
    let engine = Arc::new(TradingEngine::new(
        EngineConfig::default(),
        connector,
        profiles.clone(),
        execution.clone(),
        metrics,
    ));
    Harness {
        engine,
        execution,
        profiles,
    }
}

/// Momentum-only dry-run profile with a permissive confidence floor.
fn momentum_profile() -> TradingProfile {
    TradingProfile {
        id: "momentum-only".to_string(),
        name: "Momentum Only".to_string(),
        description: String::new(),
        weights: [(StrategyKind::Momentum, 1.0)]
            .into_iter()
            .collect::<StrategyWeights>(),
        enabled: [StrategyKind::Momentum].into_iter().collect(),
        risk: RiskSettings {
            min_confidence: 0.2,
            ..RiskSettings::default()
        },
        trading: TradingSettings {
            dry_run: true,
            ..TradingSettings::default()
        },
        builtin: false,
    }
}

#[tokio::test]
async fn cycle_without_history_produces_no_trades() {
    let h = harness(110.0);
    let profile = h.profiles.current().await;
    h.engine.run_cycle(&profile).await;
    assert!(h.execution.trade_history().await.is_empty());
}

#[tokio::test]
async fn momentum_breakout_executes_a_dry_run_buy() {
    let h = harness(110.0);
    h.profiles.create(momentum_profile()).await.unwrap();
    assert!(h.profiles.switch("momentum-only").await);

    for _ in 0..10 {
        h.engine.observe("WETH", 100.0, None).await;
    }
    for _ in 0..9 {
        h.engine.observe("WETH", 110.0, None).await;
    }

    let profile = h.profiles.current().await;
    h.engine.run_cycle(&profile).await;

    let history = h.execution.trade_history().await;
    assert_eq!(history.len(), 1);
    let trade = &history[0];
    assert_eq!(trade.token, "WETH");
    assert_eq!(trade.action, SignalAction::Buy);
    assert_eq!(trade.status, TradeStatus::Filled);
    assert_eq!(trade.tx_reference.as_deref(), Some("dry-run"));
    assert!(h.execution.active_trades().await.is_empty());

    // The filled buy opened the position book for the token.
    let positions = h.engine.dca_positions().await;
    assert_eq!(positions.len(), 1);
    assert_eq!(positions[0].token, "WETH");
    assert_eq!(positions[0].accumulation_count, 1);
}

#[tokio::test]
async fn cooldown_suppresses_back_to_back_trades() {
    let h = harness(110.0);
    h.profiles.create(momentum_profile()).await.unwrap();
    assert!(h.profiles.switch("momentum-only").await);

    for _ in 0..10 {
        h.engine.observe("WETH", 100.0, None).await;
    }
    for _ in 0..9 {
        h.engine.observe("WETH", 110.0, None).await;
    }

    let profile = h.profiles.current().await;
    h.engine.run_cycle(&profile).await;
    h.engine.run_cycle(&profile).await;

    // Second cycle still sees upward momentum, but the token is inside
    // the cooldown window.
    assert_eq!(h.execution.trade_history().await.len(), 1);
}

#[tokio::test]
async fn profile_switch_applies_to_the_next_cycle_snapshot() {
    let h = harness(110.0);
    h.profiles.create(momentum_profile()).await.unwrap();
    assert!(h.profiles.switch("momentum-only").await);

    let before = h.profiles.current().await;
    assert!(h.profiles.switch("conservative").await);
    // The snapshot taken before the switch is unchanged; the next
    // snapshot observes the new profile.
    assert_eq!(before.id, "momentum-only");
    assert_eq!(h.profiles.current().await.id, "conservative");
}

#[tokio::test]
async fn cleared_position_reports_whether_it_existed() {
    let h = harness(110.0);
    h.profiles.create(momentum_profile()).await.unwrap();
    assert!(h.profiles.switch("momentum-only").await);

    for _ in 0..10 {
        h.engine.observe("WETH", 100.0, None).await;
    }
    for _ in 0..9 {
        h.engine.observe("WETH", 110.0, None).await;
    }
    let profile = h.profiles.current().await;
    h.engine.run_cycle(&profile).await;

    assert!(h.engine.clear_dca_position("WETH").await);
    assert!(!h.engine.clear_dca_position("WETH").await);
    assert!(h.engine.dca_positions().await.is_empty());
}
