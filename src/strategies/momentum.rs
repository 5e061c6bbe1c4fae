//! Momentum strategy
//!
//! Compares the mean of the most recent window against the mean of the
//! window preceding it.

use crate::models::signal::{Signal, SignalAction};
use crate::strategies::math;
use crate::strategies::StrategyContext;

#[derive(Debug, Clone)]
pub struct MomentumStrategy {
    pub window: usize,
    /// Relative change (percent) required before a signal fires.
    pub threshold_pct: f64,
}

impl Default for MomentumStrategy {
    fn default() -> Self {
        Self {
            window: 10,
            threshold_pct: 2.0,
        }
    }
}

impl MomentumStrategy {
    pub fn evaluate(&self, ctx: &StrategyContext<'_>) -> Signal {
        let prices = ctx.prices;
        if prices.len() < self.window * 2 {
            return Signal::hold();
        }

        let recent = &prices[prices.len() - self.window..];
        let prior = &prices[prices.len() - self.window * 2..prices.len() - self.window];

        let (recent_mean, prior_mean) = match (math::mean(recent), math::mean(prior)) {
            (Some(r), Some(p)) if p > 0.0 => (r, p),
            _ => return Signal::hold(),
        };

        let change_pct = (recent_mean - prior_mean) / prior_mean * 100.0;
        let confidence = (change_pct.abs() / 10.0).min(0.8);

        if change_pct > self.threshold_pct {
            Signal::new(
                SignalAction::Buy,
                confidence,
                format!(
                    "momentum up {:.2}% over last {} points",
                    change_pct, self.window
                ),
            )
        } else if change_pct < -self.threshold_pct {
            Signal::new(
                SignalAction::Sell,
                confidence,
                format!(
                    "momentum down {:.2}% over last {} points",
                    change_pct.abs(),
                    self.window
                ),
            )
        } else {
            Signal::hold()
        }
    }
}
