//! The evaluation cycle.
//!
//! One repeating, strictly sequential cycle: refresh observations for
//! every supported token, evaluate the enabled strategies, combine,
//! gate, size and execute. A cycle always runs to completion before the
//! next one is scheduled, so cycles never overlap; stopping the engine
//! prevents the next cycle but lets the one in flight finish. Any single
//! token's failure is logged and skipped.

use crate::connectors::{ConnectorError, ExchangeConnector};
use crate::execution::ExecutionController;
use crate::history::HistoryStore;
use crate::metrics::Metrics;
use crate::models::dca::DcaPosition;
use crate::models::market::TokenInfo;
use crate::models::profile::TradingProfile;
use crate::models::signal::{Signal, SignalAction};
use crate::models::trade::TradeStatus;
use crate::profiles::ProfileManager;
use crate::risk::{GateVerdict, RiskGate, TradeStats, EMPIRICAL_STATS_MIN};
use crate::signals::SignalCombiner;
use crate::strategies::{StrategyContext, StrategySet};
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::{watch, RwLock};
use tracing::{debug, info, warn};

#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Quote currency every pair is priced against.
    pub quote_token: String,
    /// Fee tiers scanned for arbitrage and price refresh.
    pub fee_tiers: Vec<u32>,
    /// Notional amount used when asking for quotes.
    pub probe_amount: f64,
    /// Fee tier trades execute on.
    pub execution_fee_tier: u32,
    /// Master switch; false fails every approved trade without an
    /// external call.
    pub trading_enabled: bool,
    /// Overrides the active profile's scan interval when set.
    pub scan_interval_override: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            quote_token: "USDC".to_string(),
            fee_tiers: vec![500, 3000, 10000],
            probe_amount: 100.0,
            execution_fee_tier: 3000,
            trading_enabled: false,
            scan_interval_override: None,
        }
    }
}

struct EngineState {
    history: HistoryStore,
    dca: HashMap<String, DcaPosition>,
}

pub struct TradingEngine {
    config: EngineConfig,
    connector: Arc<dyn ExchangeConnector>,
    profiles: Arc<ProfileManager>,
    execution: Arc<ExecutionController>,
    strategies: StrategySet,
    combiner: SignalCombiner,
    gate: RiskGate,
    metrics: Arc<Metrics>,
    state: RwLock<EngineState>,
}

impl TradingEngine {
    pub fn new(
        config: EngineConfig,
        connector: Arc<dyn ExchangeConnector>,
        profiles: Arc<ProfileManager>,
        execution: Arc<ExecutionController>,
        metrics: Arc<Metrics>,
    ) -> Self {
        Self {
            config,
            connector,
            profiles,
            execution,
            strategies: StrategySet::default(),
            combiner: SignalCombiner,
            gate: RiskGate::default(),
            metrics,
            state: RwLock::new(EngineState {
                history: HistoryStore::new(),
                dca: HashMap::new(),
            }),
        }
    }

    /// Feed one externally observed price/volume tick.
    pub async fn observe(&self, token: &str, price: f64, volume: Option<f64>) {
        self.state.write().await.history.record(token, price, volume);
    }

    pub async fn dca_positions(&self) -> Vec<DcaPosition> {
        let state = self.state.read().await;
        let mut positions: Vec<_> = state.dca.values().cloned().collect();
        positions.sort_by(|a, b| a.token.cmp(&b.token));
        positions
    }

    /// Explicit operator action - the only way a DCA position goes away.
    pub async fn clear_dca_position(&self, token: &str) -> bool {
        self.state.write().await.dca.remove(token).is_some()
    }

    /// Repeating cycle loop. Returns when the shutdown signal flips; an
    /// in-flight cycle finishes naturally first.
    pub async fn run(&self, mut shutdown: watch::Receiver<bool>) {
        info!("trading engine started");
        loop {
            if *shutdown.borrow() {
                break;
            }

            let profile = self.profiles.current().await;
            let started = Instant::now();
            self.run_cycle(&profile).await;
            self.metrics.evaluation_cycles_total.inc();
            self.metrics
                .evaluation_cycle_duration_seconds
                .observe(started.elapsed().as_secs_f64());

            let interval = self
                .config
                .scan_interval_override
                .unwrap_or(profile.trading.scan_interval_secs)
                .max(1);
            tokio::select! {
                _ = tokio::time::sleep(Duration::from_secs(interval)) => {}
                changed = shutdown.changed() => {
                    if changed.is_err() {
                        break;
                    }
                }
            }
        }
        info!("trading engine stopped");
    }

    /// One full evaluation pass over every supported token.
    pub async fn run_cycle(&self, profile: &TradingProfile) {
        let tokens = match self.connector.list_supported_tokens().await {
            Ok(tokens) => tokens,
            Err(e) => {
                warn!(error = %e, "token listing failed, skipping cycle");
                return;
            }
        };

        debug!(
            profile = %profile.id,
            token_count = tokens.len(),
            "starting evaluation cycle"
        );

        for token in &tokens {
            if token.symbol == self.config.quote_token {
                continue;
            }
            if let Err(e) = self.process_token(token, profile).await {
                warn!(
                    token = %token.symbol,
                    error = %e,
                    "token evaluation failed, continuing with next token"
                );
            }
        }
    }

    async fn process_token(
        &self,
        token: &TokenInfo,
        profile: &TradingProfile,
    ) -> Result<(), ConnectorError> {
        let tier_quotes = self.fetch_tier_quotes(&token.symbol).await;
        if let Some(mid) = mean(&tier_quotes) {
            self.state
                .write()
                .await
                .history
                .record(&token.symbol, mid, None);
        }

        let combined = self.evaluate_signals(&token.symbol, &tier_quotes, profile).await;
        if !combined.is_actionable() {
            return Ok(());
        }
        self.metrics.signals_generated_total.inc();
        info!(
            token = %token.symbol,
            action = ?combined.action,
            confidence = combined.confidence,
            "actionable combined signal"
        );

        let balance = self
            .connector
            .get_balance(&self.config.quote_token)
            .await?;
        self.execution.note_balance(balance).await;

        let snapshot = self.execution.risk_snapshot(&token.symbol, balance).await;
        let verdict = self
            .gate
            .should_execute(&combined, profile, &snapshot, Utc::now());
        if let GateVerdict::Reject(reason) = verdict {
            debug!(token = %token.symbol, %reason, "trade suppressed by risk gate");
            return Ok(());
        }

        let tracked = self.execution.trade_stats().await;
        let stats = if tracked.resolved >= EMPIRICAL_STATS_MIN {
            tracked
        } else {
            TradeStats::from_profile(&profile.risk)
        };
        let size = match self
            .gate
            .position_size(&combined, profile, balance, &stats)
        {
            Some(size) => size,
            None => {
                debug!(token = %token.symbol, "position size below floor, no trade");
                return Ok(());
            }
        };

        let trade = self
            .execution
            .execute(
                &token.symbol,
                &combined,
                size,
                self.connector.as_ref(),
                &self.config.quote_token,
                self.config.execution_fee_tier,
                &profile.trading,
                self.config.trading_enabled || profile.trading.dry_run,
            )
            .await;

        match trade.status {
            TradeStatus::Filled => {
                self.metrics.trades_executed_total.inc();
                self.apply_fill(&token.symbol, &trade.action, size, trade.price)
                    .await;
            }
            TradeStatus::Failed => {
                self.metrics.trades_failed_total.inc();
            }
            TradeStatus::Pending => {}
        }
        Ok(())
    }

    /// Quotes for the same pair across the configured fee tiers. A failed
    /// tier is simply absent.
    async fn fetch_tier_quotes(&self, token: &str) -> Vec<f64> {
        let mut quotes = Vec::with_capacity(self.config.fee_tiers.len());
        for &tier in &self.config.fee_tiers {
            match self
                .connector
                .quote(
                    &self.config.quote_token,
                    token,
                    self.config.probe_amount,
                    tier,
                )
                .await
            {
                Ok(price) if price > 0.0 => quotes.push(price),
                Ok(_) => {}
                Err(e) => {
                    debug!(token, fee_tier = tier, error = %e, "quote unavailable");
                }
            }
        }
        quotes
    }

    async fn evaluate_signals(
        &self,
        token: &str,
        tier_quotes: &[f64],
        profile: &TradingProfile,
    ) -> Signal {
        let state = self.state.read().await;
        let prices = state.history.prices(token);
        let volumes = state.history.volumes(token);
        let ctx = StrategyContext {
            token,
            prices: &prices,
            volumes: &volumes,
            tier_quotes,
            dca_position: state.dca.get(token),
            now: Utc::now(),
        };

        let signals: Vec<_> = profile
            .enabled
            .iter()
            .map(|&kind| (kind, self.strategies.evaluate(kind, &ctx)))
            .collect();
        drop(state);

        for (kind, signal) in &signals {
            if signal.is_actionable() {
                debug!(
                    token,
                    strategy = kind.name(),
                    action = ?signal.action,
                    confidence = signal.confidence,
                    "strategy signal"
                );
            }
        }

        self.combiner.combine(&signals, profile)
    }

    /// Fold a filled trade into the per-token position book. Buys open or
    /// accumulate the position; a sell realizes P&L against the tracked
    /// average without destroying the position record.
    async fn apply_fill(
        &self,
        token: &str,
        action: &SignalAction,
        size: f64,
        price: Option<f64>,
    ) {
        let price = match price {
            Some(p) if p > 0.0 => p,
            _ => return,
        };
        let now = Utc::now();

        match action {
            SignalAction::Buy => {
                let token_amount = size / price;
                let mut state = self.state.write().await;
                match state.dca.get_mut(token) {
                    Some(position) => position.accumulate(token_amount, size, now),
                    None => {
                        state
                            .dca
                            .insert(token.to_string(), DcaPosition::open(token, token_amount, size, now));
                    }
                }
            }
            SignalAction::Sell => {
                let avg = {
                    let state = self.state.read().await;
                    state.dca.get(token).map(|p| p.avg_price())
                };
                if let Some(avg) = avg.filter(|a| *a > 0.0) {
                    let pnl_pct = (price - avg) / avg;
                    let pnl = size * pnl_pct;
                    self.execution.record_outcome(pnl, pnl_pct).await;
                } else {
                    debug!(token, "sell fill without tracked entry, no realized P&L");
                }
            }
            SignalAction::Hold => {}
        }
    }
}

fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}
