use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Directional trading recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SignalAction {
    Buy,
    Sell,
    Hold,
}

/// One contribution to a signal's rationale.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignalReason {
    pub description: String,
    pub weight: f64,
}

impl SignalReason {
    pub fn new(description: impl Into<String>, weight: f64) -> Self {
        Self {
            description: description.into(),
            weight,
        }
    }
}

/// A trading signal with normalized confidence.
///
/// Invariant: a `Hold` carries confidence 0 - there is no such thing as a
/// confident non-action. The constructors enforce this.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Signal {
    pub action: SignalAction,
    pub confidence: f64,
    pub reasons: Vec<SignalReason>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop_loss: Option<f64>,
    pub timestamp: DateTime<Utc>,
}

impl Signal {
    pub fn new(action: SignalAction, confidence: f64, reason: impl Into<String>) -> Self {
        let confidence = if action == SignalAction::Hold {
            0.0
        } else {
            confidence.clamp(0.0, 1.0)
        };
        let reasons = if action == SignalAction::Hold {
            Vec::new()
        } else {
            vec![SignalReason::new(reason, confidence)]
        };
        Self {
            action,
            confidence,
            reasons,
            target_price: None,
            stop_loss: None,
            timestamp: Utc::now(),
        }
    }

    /// The no-action signal. Carries no confidence and no rationale.
    pub fn hold() -> Self {
        Self {
            action: SignalAction::Hold,
            confidence: 0.0,
            reasons: Vec::new(),
            target_price: None,
            stop_loss: None,
            timestamp: Utc::now(),
        }
    }

    pub fn with_targets(mut self, target_price: Option<f64>, stop_loss: Option<f64>) -> Self {
        self.target_price = target_price;
        self.stop_loss = stop_loss;
        self
    }

    pub fn is_actionable(&self) -> bool {
        self.action != SignalAction::Hold
    }
}
