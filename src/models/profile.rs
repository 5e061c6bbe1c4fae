//! Trading profile data models

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Closed set of indicator strategies the engine dispatches over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum StrategyKind {
    Arbitrage,
    Momentum,
    VolumeSpike,
    TrendCrossover,
    Bollinger,
    Fibonacci,
    Dca,
}

impl StrategyKind {
    pub fn all() -> [StrategyKind; 7] {
        [
            StrategyKind::Arbitrage,
            StrategyKind::Momentum,
            StrategyKind::VolumeSpike,
            StrategyKind::TrendCrossover,
            StrategyKind::Bollinger,
            StrategyKind::Fibonacci,
            StrategyKind::Dca,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            StrategyKind::Arbitrage => "arbitrage",
            StrategyKind::Momentum => "momentum",
            StrategyKind::VolumeSpike => "volume_spike",
            StrategyKind::TrendCrossover => "trend_crossover",
            StrategyKind::Bollinger => "bollinger",
            StrategyKind::Fibonacci => "fibonacci",
            StrategyKind::Dca => "dca",
        }
    }
}

/// Per-strategy blend weights. Weights live in `[0, 1]` and must sum to
/// 1.0 within [`WEIGHT_SUM_TOLERANCE`] across a profile; the sum is
/// validated when a profile is created or updated, not at combination
/// time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrategyWeights(HashMap<StrategyKind, f64>);

pub const WEIGHT_SUM_TOLERANCE: f64 = 0.001;

impl StrategyWeights {
    pub fn new(weights: HashMap<StrategyKind, f64>) -> Self {
        Self(weights)
    }

    pub fn get(&self, kind: StrategyKind) -> f64 {
        self.0.get(&kind).copied().unwrap_or(0.0)
    }

    pub fn sum(&self) -> f64 {
        self.0.values().sum()
    }

    pub fn is_normalized(&self) -> bool {
        (self.sum() - 1.0).abs() <= WEIGHT_SUM_TOLERANCE
    }

    pub fn iter(&self) -> impl Iterator<Item = (&StrategyKind, &f64)> {
        self.0.iter()
    }
}

impl FromIterator<(StrategyKind, f64)> for StrategyWeights {
    fn from_iter<T: IntoIterator<Item = (StrategyKind, f64)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Risk thresholds a profile imposes on execution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskSettings {
    /// Hard cap on position size as a fraction of balance.
    pub max_position_pct: f64,
    /// Combined signals below this confidence are never executed.
    pub min_confidence: f64,
    /// Realized loss (in quote units) after which trading halts for the day.
    pub max_daily_loss: f64,
    /// Drawdown from peak balance (fraction) after which trading halts.
    pub max_drawdown_pct: f64,
    /// Minimum minutes between two trades on the same token.
    pub cooldown_minutes: i64,
    /// Seed Kelly inputs, used until enough resolved trades exist.
    pub win_rate: f64,
    pub avg_win: f64,
    pub avg_loss: f64,
}

impl Default for RiskSettings {
    fn default() -> Self {
        Self {
            max_position_pct: 0.1,
            min_confidence: 0.4,
            max_daily_loss: 100.0,
            max_drawdown_pct: 0.2,
            cooldown_minutes: 30,
            win_rate: 0.55,
            avg_win: 0.02,
            avg_loss: 0.01,
        }
    }
}

/// Trading cadence and execution settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TradingSettings {
    pub scan_interval_secs: u64,
    pub min_profit_pct: f64,
    pub max_slippage_pct: f64,
    pub dry_run: bool,
}

impl Default for TradingSettings {
    fn default() -> Self {
        Self {
            scan_interval_secs: 60,
            min_profit_pct: 1.0,
            max_slippage_pct: 0.5,
            dry_run: false,
        }
    }
}

/// A named bundle of strategy weights, enable flags and risk/trading
/// settings. Exactly one profile is active at a time; built-in profiles
/// are immutable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TradingProfile {
    pub id: String,
    pub name: String,
    pub description: String,
    pub weights: StrategyWeights,
    pub enabled: HashSet<StrategyKind>,
    pub risk: RiskSettings,
    pub trading: TradingSettings,
    #[serde(default)]
    pub builtin: bool,
}

impl TradingProfile {
    pub fn is_enabled(&self, kind: StrategyKind) -> bool {
        self.enabled.contains(&kind)
    }
}
