//! Bollinger Bands strategy
//!
//! 20-period mean and standard deviation, bands at mean +/- 2 sigma.
//! Touching the lower band argues for a buy, the upper band for a sell;
//! anywhere in between yields only a weak lean toward the nearer band's
//! direction.

use crate::models::signal::{Signal, SignalAction};
use crate::strategies::math;
use crate::strategies::StrategyContext;

#[derive(Debug, Clone)]
pub struct BollingerStrategy {
    pub period: usize,
    pub band_sigma: f64,
    pub weak_confidence: f64,
}

impl Default for BollingerStrategy {
    fn default() -> Self {
        Self {
            period: 20,
            band_sigma: 2.0,
            weak_confidence: 0.3,
        }
    }
}

impl BollingerStrategy {
    pub fn evaluate(&self, ctx: &StrategyContext<'_>) -> Signal {
        let prices = ctx.prices;
        if prices.len() < self.period {
            return Signal::hold();
        }

        let (mean, std) = match (
            math::sma(prices, self.period),
            math::standard_deviation(prices, self.period),
        ) {
            (Some(m), Some(s)) if s > 0.0 => (m, s),
            _ => return Signal::hold(),
        };

        let upper = mean + self.band_sigma * std;
        let lower = mean - self.band_sigma * std;
        let price = prices[prices.len() - 1];

        if price <= lower {
            // Deeper below the band, stronger the signal.
            let depth = (lower - price) / std;
            let confidence = (0.6 + depth * 0.3).min(0.9);
            Signal::new(
                SignalAction::Buy,
                confidence,
                format!("price {:.6} at/below lower band {:.6}", price, lower),
            )
        } else if price >= upper {
            let depth = (price - upper) / std;
            let confidence = (0.6 + depth * 0.3).min(0.9);
            Signal::new(
                SignalAction::Sell,
                confidence,
                format!("price {:.6} at/above upper band {:.6}", price, upper),
            )
        } else if price < mean {
            Signal::new(
                SignalAction::Buy,
                self.weak_confidence,
                format!("price {:.6} between mean and lower band", price),
            )
        } else if price > mean {
            Signal::new(
                SignalAction::Sell,
                self.weak_confidence,
                format!("price {:.6} between mean and upper band", price),
            )
        } else {
            Signal::hold()
        }
    }
}
