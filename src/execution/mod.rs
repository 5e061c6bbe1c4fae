//! Trade execution controller.
//!
//! Owns the trade lifecycle: every approved signal becomes a `Pending`
//! trade in the active set, transitions exactly once to `Filled` or
//! `Failed`, and is then moved into an append-only history log. Failed
//! trades never re-enter the pipeline and nothing is retried here.

use crate::connectors::{ConnectorError, ExchangeConnector};
use crate::models::profile::TradingSettings;
use crate::models::signal::{Signal, SignalAction};
use crate::models::trade::{PerformanceSummary, TradeExecution, TradeStatus};
use crate::risk::{RiskSnapshot, TradeStats};
use chrono::{DateTime, NaiveDate, Utc};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::RwLock;
use tracing::{info, warn};

/// A matched sell fill, in quote units and relative terms.
#[derive(Debug, Clone, Copy)]
pub struct TradeOutcome {
    pub pnl: f64,
    pub pnl_pct: f64,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy)]
struct DailyPnl {
    day: NaiveDate,
    pnl: f64,
}

pub struct ExecutionController {
    active: RwLock<HashMap<String, TradeExecution>>,
    history: RwLock<Vec<TradeExecution>>,
    last_trade: RwLock<HashMap<String, DateTime<Utc>>>,
    outcomes: RwLock<Vec<TradeOutcome>>,
    daily: RwLock<DailyPnl>,
    peak_balance: RwLock<f64>,
    seq: AtomicU64,
}

impl ExecutionController {
    pub fn new() -> Self {
        Self {
            active: RwLock::new(HashMap::new()),
            history: RwLock::new(Vec::new()),
            last_trade: RwLock::new(HashMap::new()),
            outcomes: RwLock::new(Vec::new()),
            daily: RwLock::new(DailyPnl {
                day: Utc::now().date_naive(),
                pnl: 0.0,
            }),
            peak_balance: RwLock::new(0.0),
            seq: AtomicU64::new(0),
        }
    }

    /// Drive one approved (signal, size) pair through the lifecycle and
    /// return the terminal record.
    ///
    /// `trading_enabled == false` fails the trade without an external
    /// call; `settings.dry_run` simulates a fill at the quoted price; the
    /// live path is quote, swap, confirmation, with any connector error
    /// mapping to `Failed`.
    pub async fn execute(
        &self,
        token: &str,
        signal: &Signal,
        amount: f64,
        connector: &dyn ExchangeConnector,
        quote_token: &str,
        fee_tier: u32,
        settings: &TradingSettings,
        trading_enabled: bool,
    ) -> TradeExecution {
        let trade = self.open(token, signal, amount).await;

        if !trading_enabled {
            return self
                .fail(trade, "trading disabled by configuration")
                .await;
        }

        if settings.dry_run {
            return match connector.quote(quote_token, token, amount, fee_tier).await {
                Ok(price) => self.fill(trade, price, Some("dry-run".to_string())).await,
                Err(e) => {
                    self.fail(trade, &format!("dry-run quote failed: {}", e))
                        .await
                }
            };
        }

        match self
            .execute_live(&trade, connector, quote_token, fee_tier, settings)
            .await
        {
            Ok((price, tx_reference)) => self.fill(trade, price, Some(tx_reference)).await,
            Err(e) => {
                let reason = e.to_string();
                self.fail(trade, &reason).await
            }
        }
    }

    async fn execute_live(
        &self,
        trade: &TradeExecution,
        connector: &dyn ExchangeConnector,
        quote_token: &str,
        fee_tier: u32,
        settings: &TradingSettings,
    ) -> Result<(f64, String), ConnectorError> {
        let slippage = settings.max_slippage_pct / 100.0;
        let price = connector
            .quote(quote_token, &trade.token, trade.amount, fee_tier)
            .await?;
        if price <= 0.0 {
            return Err("quoted price is not positive".into());
        }

        // Amounts are tracked in quote units; the token leg is derived
        // from the quoted price.
        let receipt = match trade.action {
            SignalAction::Buy => {
                let min_out = trade.amount / price * (1.0 - slippage);
                connector
                    .submit_swap(quote_token, &trade.token, fee_tier, trade.amount, min_out)
                    .await?
            }
            SignalAction::Sell => {
                let token_amount = trade.amount / price;
                let min_out = trade.amount * (1.0 - slippage);
                connector
                    .submit_swap(&trade.token, quote_token, fee_tier, token_amount, min_out)
                    .await?
            }
            SignalAction::Hold => return Err("hold signals are not executable".into()),
        };

        Ok((price, receipt.tx_reference))
    }

    async fn open(&self, token: &str, signal: &Signal, amount: f64) -> TradeExecution {
        let n = self.seq.fetch_add(1, Ordering::Relaxed) + 1;
        let now = Utc::now();
        let trade = TradeExecution {
            id: format!("trade-{}-{:06}", now.format("%Y%m%d"), n),
            token: token.to_string(),
            action: signal.action,
            amount,
            price: None,
            confidence: signal.confidence,
            reasons: signal.reasons.clone(),
            created_at: now,
            status: TradeStatus::Pending,
            tx_reference: None,
            error: None,
        };
        self.active
            .write()
            .await
            .insert(trade.id.clone(), trade.clone());
        self.last_trade
            .write()
            .await
            .insert(token.to_string(), now);
        trade
    }

    async fn fill(
        &self,
        mut trade: TradeExecution,
        price: f64,
        tx_reference: Option<String>,
    ) -> TradeExecution {
        trade.status = TradeStatus::Filled;
        trade.price = Some(price);
        trade.tx_reference = tx_reference;
        info!(
            trade = %trade.id,
            token = %trade.token,
            action = ?trade.action,
            price,
            "trade filled"
        );
        self.finish(trade).await
    }

    async fn fail(&self, mut trade: TradeExecution, error: &str) -> TradeExecution {
        trade.status = TradeStatus::Failed;
        trade.error = Some(error.to_string());
        warn!(trade = %trade.id, token = %trade.token, error, "trade failed");
        self.finish(trade).await
    }

    /// The single terminal transition: out of the active set, into the
    /// append-only history.
    async fn finish(&self, trade: TradeExecution) -> TradeExecution {
        self.active.write().await.remove(&trade.id);
        self.history.write().await.push(trade.clone());
        trade
    }

    /// Record the realized result of a matched sell fill.
    pub async fn record_outcome(&self, pnl: f64, pnl_pct: f64) {
        let now = Utc::now();
        self.outcomes.write().await.push(TradeOutcome {
            pnl,
            pnl_pct,
            timestamp: now,
        });

        let mut daily = self.daily.write().await;
        let today = now.date_naive();
        if daily.day != today {
            daily.day = today;
            daily.pnl = 0.0;
        }
        daily.pnl += pnl;
    }

    /// Track the observed balance for drawdown accounting.
    pub async fn note_balance(&self, balance: f64) {
        let mut peak = self.peak_balance.write().await;
        if balance > *peak {
            *peak = balance;
        }
    }

    pub async fn risk_snapshot(&self, token: &str, balance: f64) -> RiskSnapshot {
        let daily = self.daily.read().await;
        let daily_pnl = if daily.day == Utc::now().date_naive() {
            daily.pnl
        } else {
            0.0
        };
        RiskSnapshot {
            balance,
            daily_pnl,
            peak_balance: *self.peak_balance.read().await,
            last_trade_at: self.last_trade.read().await.get(token).copied(),
        }
    }

    /// Empirical Kelly inputs from resolved outcomes.
    pub async fn trade_stats(&self) -> TradeStats {
        let outcomes = self.outcomes.read().await;
        if outcomes.is_empty() {
            return TradeStats {
                win_rate: 0.0,
                avg_win: 0.0,
                avg_loss: 0.0,
                resolved: 0,
            };
        }
        let wins: Vec<f64> = outcomes
            .iter()
            .filter(|o| o.pnl_pct > 0.0)
            .map(|o| o.pnl_pct)
            .collect();
        let losses: Vec<f64> = outcomes
            .iter()
            .filter(|o| o.pnl_pct <= 0.0)
            .map(|o| o.pnl_pct.abs())
            .collect();
        let avg = |v: &[f64]| {
            if v.is_empty() {
                0.0
            } else {
                v.iter().sum::<f64>() / v.len() as f64
            }
        };
        TradeStats {
            win_rate: wins.len() as f64 / outcomes.len() as f64,
            avg_win: avg(&wins),
            avg_loss: avg(&losses),
            resolved: outcomes.len() as u64,
        }
    }

    pub async fn active_trades(&self) -> Vec<TradeExecution> {
        let mut trades: Vec<_> = self.active.read().await.values().cloned().collect();
        trades.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        trades
    }

    pub async fn trade_history(&self) -> Vec<TradeExecution> {
        self.history.read().await.clone()
    }

    pub async fn performance(&self) -> PerformanceSummary {
        let history = self.history.read().await;
        let outcomes = self.outcomes.read().await;

        let filled = history
            .iter()
            .filter(|t| t.status == TradeStatus::Filled)
            .count() as u64;
        let failed = history
            .iter()
            .filter(|t| t.status == TradeStatus::Failed)
            .count() as u64;
        let total_volume = history
            .iter()
            .filter(|t| t.status == TradeStatus::Filled)
            .map(|t| t.amount)
            .sum();
        let realized_pnl = outcomes.iter().map(|o| o.pnl).sum();
        let win_rate = if outcomes.is_empty() {
            0.0
        } else {
            outcomes.iter().filter(|o| o.pnl > 0.0).count() as f64 / outcomes.len() as f64
        };

        PerformanceSummary {
            total_trades: history.len() as u64,
            filled,
            failed,
            total_volume,
            realized_pnl,
            win_rate,
        }
    }
}

impl Default for ExecutionController {
    fn default() -> Self {
        Self::new()
    }
}
