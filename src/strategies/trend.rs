//! Trend-crossover strategy
//!
//! Short simple moving average against a long one.

use crate::models::signal::{Signal, SignalAction};
use crate::strategies::math;
use crate::strategies::StrategyContext;

#[derive(Debug, Clone)]
pub struct TrendCrossoverStrategy {
    pub short_window: usize,
    pub long_window: usize,
    pub threshold_pct: f64,
}

impl Default for TrendCrossoverStrategy {
    fn default() -> Self {
        Self {
            short_window: 5,
            long_window: 15,
            threshold_pct: 1.0,
        }
    }
}

impl TrendCrossoverStrategy {
    pub fn evaluate(&self, ctx: &StrategyContext<'_>) -> Signal {
        let prices = ctx.prices;
        if prices.len() < self.long_window {
            return Signal::hold();
        }

        let (short, long) = match (
            math::sma(prices, self.short_window),
            math::sma(prices, self.long_window),
        ) {
            (Some(s), Some(l)) if l > 0.0 => (s, l),
            _ => return Signal::hold(),
        };

        let diff_pct = (short - long) / long * 100.0;
        let confidence = (diff_pct.abs() / 5.0).min(0.7);

        if diff_pct > self.threshold_pct {
            Signal::new(
                SignalAction::Buy,
                confidence,
                format!(
                    "SMA{} above SMA{} by {:.2}%",
                    self.short_window, self.long_window, diff_pct
                ),
            )
        } else if diff_pct < -self.threshold_pct {
            Signal::new(
                SignalAction::Sell,
                confidence,
                format!(
                    "SMA{} below SMA{} by {:.2}%",
                    self.short_window,
                    self.long_window,
                    diff_pct.abs()
                ),
            )
        } else {
            Signal::hold()
        }
    }
}
