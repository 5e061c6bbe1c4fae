//! Risk gating and position sizing.
//!
//! `should_execute` validates a combined signal against the active
//! profile's thresholds; `position_size` applies a capped Kelly formula.
//! A rejection is a normal decision, not an error - the cycle logs it and
//! moves on.

use crate::models::profile::{RiskSettings, TradingProfile};
use crate::models::signal::Signal;
use chrono::{DateTime, Duration, Utc};
use std::fmt;

/// Kelly inputs - seeded from the profile until enough resolved trades
/// exist to track them empirically.
#[derive(Debug, Clone, Copy)]
pub struct TradeStats {
    pub win_rate: f64,
    pub avg_win: f64,
    pub avg_loss: f64,
    pub resolved: u64,
}

/// Resolved-trade count at which empirical stats replace profile seeds.
pub const EMPIRICAL_STATS_MIN: u64 = 10;

impl TradeStats {
    pub fn from_profile(risk: &RiskSettings) -> Self {
        Self {
            win_rate: risk.win_rate,
            avg_win: risk.avg_win,
            avg_loss: risk.avg_loss,
            resolved: 0,
        }
    }
}

/// Account state the gate judges a trade against.
#[derive(Debug, Clone, Copy)]
pub struct RiskSnapshot {
    pub balance: f64,
    /// Realized profit/loss since the start of the UTC day, quote units.
    pub daily_pnl: f64,
    pub peak_balance: f64,
    pub last_trade_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    LowConfidence,
    InsufficientBalance,
    CooldownActive,
    DailyLossLimit,
    DrawdownExceeded,
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RejectReason::LowConfidence => "confidence below profile threshold",
            RejectReason::InsufficientBalance => "balance below minimum",
            RejectReason::CooldownActive => "token inside cooldown window",
            RejectReason::DailyLossLimit => "daily loss limit reached",
            RejectReason::DrawdownExceeded => "drawdown limit exceeded",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateVerdict {
    Approve,
    Reject(RejectReason),
}

impl GateVerdict {
    pub fn approved(&self) -> bool {
        matches!(self, GateVerdict::Approve)
    }
}

pub struct RiskGate {
    /// Absolute balance floor under which nothing trades.
    pub min_balance: f64,
    /// Sizes below this are a no-trade decision.
    pub min_trade_size: f64,
}

impl Default for RiskGate {
    fn default() -> Self {
        Self {
            min_balance: 50.0,
            min_trade_size: 10.0,
        }
    }
}

impl RiskGate {
    pub fn should_execute(
        &self,
        signal: &Signal,
        profile: &TradingProfile,
        snapshot: &RiskSnapshot,
        now: DateTime<Utc>,
    ) -> GateVerdict {
        if !signal.is_actionable() || signal.confidence < profile.risk.min_confidence {
            return GateVerdict::Reject(RejectReason::LowConfidence);
        }
        if snapshot.balance < self.min_balance {
            return GateVerdict::Reject(RejectReason::InsufficientBalance);
        }
        if let Some(last) = snapshot.last_trade_at {
            if now - last < Duration::minutes(profile.risk.cooldown_minutes) {
                return GateVerdict::Reject(RejectReason::CooldownActive);
            }
        }
        if snapshot.daily_pnl <= -profile.risk.max_daily_loss {
            return GateVerdict::Reject(RejectReason::DailyLossLimit);
        }
        if snapshot.peak_balance > 0.0 {
            let drawdown = (snapshot.peak_balance - snapshot.balance) / snapshot.peak_balance;
            if drawdown >= profile.risk.max_drawdown_pct {
                return GateVerdict::Reject(RejectReason::DrawdownExceeded);
            }
        }
        GateVerdict::Approve
    }

    /// Capped Kelly position size in quote units. None means no trade -
    /// a non-positive edge or a size below the floor.
    pub fn position_size(
        &self,
        signal: &Signal,
        profile: &TradingProfile,
        balance: f64,
        stats: &TradeStats,
    ) -> Option<f64> {
        if stats.avg_win <= 0.0 {
            return None;
        }
        let kelly = (stats.win_rate * stats.avg_win
            - (1.0 - stats.win_rate) * stats.avg_loss)
            / stats.avg_win;
        if kelly <= 0.0 {
            return None;
        }
        let fraction = kelly.min(profile.risk.max_position_pct);
        let size = fraction * balance * signal.confidence;
        if size < self.min_trade_size {
            return None;
        }
        Some(size)
    }
}
