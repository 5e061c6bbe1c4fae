//! Trade lifecycle data models

use crate::models::signal::{SignalAction, SignalReason};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle state of a trade. A trade is created `Pending` and moves
/// exactly once to `Filled` or `Failed`; there is no way back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TradeStatus {
    Pending,
    Filled,
    Failed,
}

impl TradeStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, TradeStatus::Filled | TradeStatus::Failed)
    }
}

/// One trade as it moves through the execution controller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TradeExecution {
    pub id: String,
    pub token: String,
    pub action: SignalAction,
    /// Trade size in quote units.
    pub amount: f64,
    /// Execution price, filled in post-hoc.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    pub confidence: f64,
    pub reasons: Vec<SignalReason>,
    pub created_at: DateTime<Utc>,
    pub status: TradeStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tx_reference: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Aggregate over resolved trades, exposed read-only to tooling.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PerformanceSummary {
    pub total_trades: u64,
    pub filled: u64,
    pub failed: u64,
    /// Sum of filled trade sizes, in quote units.
    pub total_volume: f64,
    /// Realized profit over matched sell fills, in quote units.
    pub realized_pnl: f64,
    /// Share of matched sell fills that closed at a gain.
    pub win_rate: f64,
}
