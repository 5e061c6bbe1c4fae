//! Indicator strategies.
//!
//! Each strategy derives one [`Signal`] from the evaluation context - the
//! retained history plus whatever per-token state it needs. The set is
//! closed and dispatched by [`StrategyKind`]; a strategy that lacks its
//! minimum sample count returns [`Signal::hold`], never an error.

pub mod arbitrage;
pub mod bollinger;
pub mod dca;
pub mod fibonacci;
pub mod math;
pub mod momentum;
pub mod trend;
pub mod volume_spike;

pub use crate::models::profile::StrategyKind;

use crate::models::dca::DcaPosition;
use crate::models::signal::Signal;
use chrono::{DateTime, Utc};

/// Everything a strategy may look at for one token in one cycle.
pub struct StrategyContext<'a> {
    pub token: &'a str,
    /// Retained prices, oldest-first.
    pub prices: &'a [f64],
    /// Retained volumes, oldest-first.
    pub volumes: &'a [f64],
    /// Successful quotes for the same pair across fee tiers, fetched once
    /// per cycle by the engine. Empty when quoting failed outright.
    pub tier_quotes: &'a [f64],
    /// Current DCA position, if one has been opened for this token.
    pub dca_position: Option<&'a DcaPosition>,
    pub now: DateTime<Utc>,
}

impl<'a> StrategyContext<'a> {
    pub fn latest_price(&self) -> Option<f64> {
        self.prices.last().copied()
    }
}

/// The seven strategies with their configurations, dispatched by kind.
#[derive(Debug, Clone, Default)]
pub struct StrategySet {
    pub arbitrage: arbitrage::ArbitrageStrategy,
    pub momentum: momentum::MomentumStrategy,
    pub volume_spike: volume_spike::VolumeSpikeStrategy,
    pub trend: trend::TrendCrossoverStrategy,
    pub bollinger: bollinger::BollingerStrategy,
    pub fibonacci: fibonacci::FibonacciStrategy,
    pub dca: dca::DcaStrategy,
}

impl StrategySet {
    pub fn evaluate(&self, kind: StrategyKind, ctx: &StrategyContext<'_>) -> Signal {
        match kind {
            StrategyKind::Arbitrage => self.arbitrage.evaluate(ctx),
            StrategyKind::Momentum => self.momentum.evaluate(ctx),
            StrategyKind::VolumeSpike => self.volume_spike.evaluate(ctx),
            StrategyKind::TrendCrossover => self.trend.evaluate(ctx),
            StrategyKind::Bollinger => self.bollinger.evaluate(ctx),
            StrategyKind::Fibonacci => self.fibonacci.evaluate(ctx),
            StrategyKind::Dca => self.dca.evaluate(ctx),
        }
    }
}
