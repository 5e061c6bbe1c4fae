//! Volume-spike strategy
//!
//! Flags a buy when the latest volume runs well above the recent mean.

use crate::models::signal::{Signal, SignalAction};
use crate::strategies::math;
use crate::strategies::StrategyContext;

#[derive(Debug, Clone)]
pub struct VolumeSpikeStrategy {
    /// Volumes averaged for the baseline.
    pub baseline_window: usize,
    pub spike_ratio: f64,
}

impl Default for VolumeSpikeStrategy {
    fn default() -> Self {
        Self {
            baseline_window: 3,
            spike_ratio: 1.5,
        }
    }
}

impl VolumeSpikeStrategy {
    pub fn evaluate(&self, ctx: &StrategyContext<'_>) -> Signal {
        let volumes = ctx.volumes;
        if volumes.len() < self.baseline_window + 1 || ctx.latest_price().is_none() {
            return Signal::hold();
        }

        let latest = volumes[volumes.len() - 1];
        let baseline =
            &volumes[volumes.len() - 1 - self.baseline_window..volumes.len() - 1];
        let baseline_mean = match math::mean(baseline) {
            Some(m) if m > 0.0 => m,
            _ => return Signal::hold(),
        };

        let ratio = latest / baseline_mean;
        if ratio > self.spike_ratio {
            let confidence = ((ratio - 1.0) * 0.3).min(0.6);
            Signal::new(
                SignalAction::Buy,
                confidence,
                format!("volume spike {:.2}x the recent mean", ratio),
            )
        } else {
            Signal::hold()
        }
    }
}
