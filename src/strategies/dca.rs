//! Dollar-cost-averaging strategy
//!
//! The only stateful strategy: it reads the per-token accumulated
//! position. Position mutation happens on execution fill, not here.

use crate::models::signal::{Signal, SignalAction};
use crate::strategies::StrategyContext;
use chrono::Duration;

#[derive(Debug, Clone)]
pub struct DcaStrategy {
    pub cooldown_minutes: i64,
    pub max_accumulations: u32,
    /// Unrealized gain (percent) that triggers a take-profit sell once
    /// the accumulation budget is spent.
    pub take_profit_pct: f64,
    pub open_confidence: f64,
}

impl Default for DcaStrategy {
    fn default() -> Self {
        Self {
            cooldown_minutes: 5,
            max_accumulations: 5,
            take_profit_pct: 5.0,
            open_confidence: 0.6,
        }
    }
}

impl DcaStrategy {
    pub fn evaluate(&self, ctx: &StrategyContext<'_>) -> Signal {
        let price = match ctx.latest_price() {
            Some(p) if p > 0.0 => p,
            _ => return Signal::hold(),
        };

        let position = match ctx.dca_position {
            None => {
                return Signal::new(
                    SignalAction::Buy,
                    self.open_confidence,
                    format!("opening DCA position for {}", ctx.token),
                );
            }
            Some(p) => p,
        };

        let since_last = ctx.now - position.last_accumulation;
        if since_last < Duration::minutes(self.cooldown_minutes) {
            return Signal::hold();
        }

        if position.accumulation_count >= self.max_accumulations {
            let gain_pct = position.unrealized_gain_pct(price);
            if gain_pct >= self.take_profit_pct {
                return Signal::new(
                    SignalAction::Sell,
                    0.7,
                    format!(
                        "DCA budget spent after {} accumulations, taking {:.2}% profit",
                        position.accumulation_count, gain_pct
                    ),
                );
            }
            return Signal::hold();
        }

        let avg = position.avg_price();
        if avg <= 0.0 || price >= avg {
            // Accumulating above the running average only raises it.
            return Signal::hold();
        }

        // The deeper the discount to the average, the larger the add -
        // expressed through confidence, which scales the position size.
        let discount_pct = (avg - price) / avg * 100.0;
        let confidence = (0.4 + discount_pct * 0.05).min(0.9);
        Signal::new(
            SignalAction::Buy,
            confidence,
            format!(
                "price {:.6} is {:.2}% below DCA average {:.6} (accumulation {}/{})",
                price,
                discount_pct,
                avg,
                position.accumulation_count + 1,
                self.max_accumulations
            ),
        )
    }
}
