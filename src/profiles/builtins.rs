//! Built-in trading profiles.
//!
//! Three risk appetites shipped with the engine. Weights in each profile
//! sum to exactly 1.0.

use crate::models::profile::{
    RiskSettings, StrategyKind, StrategyWeights, TradingProfile, TradingSettings,
};

pub fn builtin_profiles() -> Vec<TradingProfile> {
    vec![conservative(), balanced(), aggressive()]
}

fn conservative() -> TradingProfile {
    TradingProfile {
        id: "conservative".to_string(),
        name: "Conservative".to_string(),
        description: "Trend-following with tight risk limits and dry-run execution".to_string(),
        weights: [
            (StrategyKind::TrendCrossover, 0.25),
            (StrategyKind::Bollinger, 0.25),
            (StrategyKind::Dca, 0.2),
            (StrategyKind::Momentum, 0.1),
            (StrategyKind::Fibonacci, 0.1),
            (StrategyKind::VolumeSpike, 0.05),
            (StrategyKind::Arbitrage, 0.05),
        ]
        .into_iter()
        .collect::<StrategyWeights>(),
        enabled: [
            StrategyKind::TrendCrossover,
            StrategyKind::Bollinger,
            StrategyKind::Dca,
            StrategyKind::Momentum,
        ]
        .into_iter()
        .collect(),
        risk: RiskSettings {
            max_position_pct: 0.05,
            min_confidence: 0.6,
            max_daily_loss: 50.0,
            max_drawdown_pct: 0.1,
            cooldown_minutes: 60,
            ..RiskSettings::default()
        },
        trading: TradingSettings {
            scan_interval_secs: 120,
            min_profit_pct: 2.0,
            max_slippage_pct: 0.3,
            dry_run: true,
        },
        builtin: true,
    }
}

fn balanced() -> TradingProfile {
    TradingProfile {
        id: "balanced".to_string(),
        name: "Balanced".to_string(),
        description: "Default blend of all seven strategies".to_string(),
        weights: [
            (StrategyKind::Momentum, 0.2),
            (StrategyKind::TrendCrossover, 0.2),
            (StrategyKind::Bollinger, 0.15),
            (StrategyKind::Fibonacci, 0.15),
            (StrategyKind::VolumeSpike, 0.1),
            (StrategyKind::Dca, 0.1),
            (StrategyKind::Arbitrage, 0.1),
        ]
        .into_iter()
        .collect::<StrategyWeights>(),
        enabled: StrategyKind::all().into_iter().collect(),
        risk: RiskSettings::default(),
        trading: TradingSettings::default(),
        builtin: true,
    }
}

fn aggressive() -> TradingProfile {
    TradingProfile {
        id: "aggressive".to_string(),
        name: "Aggressive".to_string(),
        description: "Momentum-heavy, fast cadence, wider risk limits".to_string(),
        weights: [
            (StrategyKind::Momentum, 0.25),
            (StrategyKind::VolumeSpike, 0.15),
            (StrategyKind::Arbitrage, 0.15),
            (StrategyKind::Fibonacci, 0.15),
            (StrategyKind::TrendCrossover, 0.1),
            (StrategyKind::Bollinger, 0.1),
            (StrategyKind::Dca, 0.1),
        ]
        .into_iter()
        .collect::<StrategyWeights>(),
        enabled: StrategyKind::all().into_iter().collect(),
        risk: RiskSettings {
            max_position_pct: 0.15,
            min_confidence: 0.3,
            max_daily_loss: 200.0,
            max_drawdown_pct: 0.3,
            cooldown_minutes: 10,
            win_rate: 0.5,
            avg_win: 0.03,
            avg_loss: 0.015,
        },
        trading: TradingSettings {
            scan_interval_secs: 30,
            min_profit_pct: 0.5,
            max_slippage_pct: 1.0,
            dry_run: false,
        },
        builtin: true,
    }
}
