//! Weighted blending of per-strategy signals into one recommendation.

use crate::models::profile::{StrategyKind, TradingProfile};
use crate::models::signal::{Signal, SignalAction};

/// Net score magnitude below which the combined result is a hold.
pub const NET_THRESHOLD: f64 = 0.3;

/// Deterministic weighted combiner. Only strategies enabled in the
/// active profile contribute; exact buy/sell cancellation resolves to
/// hold.
#[derive(Debug, Clone, Default)]
pub struct SignalCombiner;

impl SignalCombiner {
    pub fn combine(
        &self,
        signals: &[(StrategyKind, Signal)],
        profile: &TradingProfile,
    ) -> Signal {
        let mut buy_score = 0.0;
        let mut sell_score = 0.0;

        for (kind, signal) in signals {
            if !profile.is_enabled(*kind) {
                continue;
            }
            let weighted = profile.weights.get(*kind) * signal.confidence;
            match signal.action {
                SignalAction::Buy => buy_score += weighted,
                SignalAction::Sell => sell_score += weighted,
                SignalAction::Hold => {}
            }
        }

        let net = buy_score - sell_score;
        if net.abs() < NET_THRESHOLD {
            return Signal::hold();
        }

        let action = if net > 0.0 {
            SignalAction::Buy
        } else {
            SignalAction::Sell
        };

        let mut combined = Signal::hold();
        combined.action = action;
        combined.confidence = net.abs().min(1.0);
        for (kind, signal) in signals {
            if !profile.is_enabled(*kind) || signal.action != action {
                continue;
            }
            combined.reasons.extend(signal.reasons.iter().cloned());
            // Carry price targets from whichever contributor set them.
            if combined.target_price.is_none() {
                combined.target_price = signal.target_price;
            }
            if combined.stop_loss.is_none() {
                combined.stop_loss = signal.stop_loss;
            }
        }
        combined
    }
}
