//! Fibonacci retracement/extension strategy
//!
//! Swing high/low over a short lookback anchor the levels. Retracement
//! bands below the swing high argue for a buy, deeper band stronger;
//! extension levels above the swing low argue for a sell.

use crate::models::signal::{Signal, SignalAction};
use crate::strategies::StrategyContext;

const RETRACEMENTS: [(f64, f64); 5] = [
    (0.236, 0.4),
    (0.382, 0.5),
    (0.5, 0.6),
    (0.618, 0.7),
    (0.786, 0.8),
];

const EXTENSIONS: [(f64, f64); 4] = [
    (1.272, 0.5),
    (1.414, 0.6),
    (1.618, 0.75),
    (2.0, 0.9),
];

/// Extension ratio used as the projected profit target for buys.
const TARGET_EXTENSION: f64 = 1.618;

#[derive(Debug, Clone)]
pub struct FibonacciStrategy {
    pub lookback: usize,
    /// Projected gain (percent) at which a buy earns the confidence boost.
    pub boost_gain_pct: f64,
}

impl Default for FibonacciStrategy {
    fn default() -> Self {
        Self {
            lookback: 10,
            boost_gain_pct: 10.0,
        }
    }
}

impl FibonacciStrategy {
    pub fn evaluate(&self, ctx: &StrategyContext<'_>) -> Signal {
        let prices = ctx.prices;
        // Swing anchors come from the points preceding the current price;
        // a price that is its own swing high could never reach an
        // extension level.
        if prices.len() < self.lookback + 1 {
            return Signal::hold();
        }

        let window = &prices[prices.len() - 1 - self.lookback..prices.len() - 1];
        let swing_high = window.iter().cloned().fold(f64::MIN, f64::max);
        let swing_low = window.iter().cloned().fold(f64::MAX, f64::min);
        let range = swing_high - swing_low;
        if range <= 0.0 {
            return Signal::hold();
        }

        let price = prices[prices.len() - 1];

        // Extension zone sits above the swing high; check it first.
        let mut extension_hit = None;
        for (ratio, confidence) in EXTENSIONS {
            if price >= swing_low + ratio * range {
                extension_hit = Some((ratio, confidence));
            }
        }
        if let Some((ratio, confidence)) = extension_hit {
            return Signal::new(
                SignalAction::Sell,
                confidence,
                format!(
                    "price {:.6} at/above {:.1}% extension of swing range",
                    price,
                    ratio * 100.0
                ),
            );
        }

        // Deepest retracement band the price has fallen into.
        let mut retracement_hit = None;
        for (ratio, confidence) in RETRACEMENTS {
            if price <= swing_high - ratio * range {
                retracement_hit = Some((ratio, confidence));
            }
        }
        let (ratio, mut confidence) = match retracement_hit {
            Some(hit) => hit,
            None => return Signal::hold(),
        };

        let target = swing_low + TARGET_EXTENSION * range;
        let projected_gain_pct = (target - price) / price * 100.0;
        if projected_gain_pct >= self.boost_gain_pct {
            confidence = (confidence + 0.2).min(0.95);
        }

        Signal::new(
            SignalAction::Buy,
            confidence,
            format!(
                "price {:.6} in {:.1}% retracement band, projecting {:.1}% to extension target",
                price,
                ratio * 100.0,
                projected_gain_pct
            ),
        )
        .with_targets(Some(target), Some(swing_low))
    }
}
