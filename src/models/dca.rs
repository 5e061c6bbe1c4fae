//! Dollar-cost-averaging position state

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Accumulated DCA position for one token.
///
/// Created on the first filled DCA buy, mutated on every accumulation.
/// Never destroyed implicitly - only an explicit operator action clears
/// it, even after a sell.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DcaPosition {
    pub token: String,
    /// Accumulated token amount.
    pub total_amount: f64,
    /// Total quote units spent.
    pub total_cost: f64,
    pub accumulation_count: u32,
    pub last_accumulation: DateTime<Utc>,
}

impl DcaPosition {
    pub fn open(token: impl Into<String>, amount: f64, cost: f64, at: DateTime<Utc>) -> Self {
        Self {
            token: token.into(),
            total_amount: amount,
            total_cost: cost,
            accumulation_count: 1,
            last_accumulation: at,
        }
    }

    /// Fold one more fill into the position; the average price is
    /// recomputed from the running totals.
    pub fn accumulate(&mut self, amount: f64, cost: f64, at: DateTime<Utc>) {
        self.total_amount += amount;
        self.total_cost += cost;
        self.accumulation_count += 1;
        self.last_accumulation = at;
    }

    /// Weighted average entry price.
    pub fn avg_price(&self) -> f64 {
        if self.total_amount > 0.0 {
            self.total_cost / self.total_amount
        } else {
            0.0
        }
    }

    /// Unrealized gain relative to the average entry, in percent.
    pub fn unrealized_gain_pct(&self, current_price: f64) -> f64 {
        let avg = self.avg_price();
        if avg > 0.0 {
            (current_price - avg) / avg * 100.0
        } else {
            0.0
        }
    }
}
