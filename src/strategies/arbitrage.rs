//! Arbitrage scanner
//!
//! Compares quotes for the same pair across fee tiers. The engine fetches
//! the tier quotes once per cycle; a failed quote for one tier is simply
//! absent from the slice.

use crate::models::signal::{Signal, SignalAction};
use crate::strategies::StrategyContext;

#[derive(Debug, Clone)]
pub struct ArbitrageStrategy {
    /// Spread (percent) between the best and worst tier required to act.
    pub min_spread_pct: f64,
}

impl Default for ArbitrageStrategy {
    fn default() -> Self {
        Self {
            min_spread_pct: 0.5,
        }
    }
}

impl ArbitrageStrategy {
    pub fn evaluate(&self, ctx: &StrategyContext<'_>) -> Signal {
        let quotes = ctx.tier_quotes;
        if quotes.len() < 2 {
            return Signal::hold();
        }

        let max = quotes.iter().cloned().fold(f64::MIN, f64::max);
        let min = quotes.iter().cloned().fold(f64::MAX, f64::min);
        if min <= 0.0 {
            return Signal::hold();
        }

        let spread_pct = (max - min) / min * 100.0;
        if spread_pct > self.min_spread_pct {
            let confidence = (spread_pct / 2.0).min(1.0);
            Signal::new(
                SignalAction::Buy,
                confidence,
                format!(
                    "fee-tier spread {:.3}% across {} quotes",
                    spread_pct,
                    quotes.len()
                ),
            )
        } else {
            Signal::hold()
        }
    }
}
