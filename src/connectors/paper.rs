//! In-memory paper connector.
//!
//! Deterministic prices with a small tier-dependent adjustment, tracked
//! balances and a log of submitted swaps. Used by default in sandbox,
//! by dry-run execution and by tests.

use crate::connectors::{ConnectorError, ExchangeConnector, SwapReceipt};
use crate::models::market::TokenInfo;
use async_trait::async_trait;
use std::collections::HashMap;
use std::io;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::RwLock;

/// One swap the paper connector accepted.
#[derive(Debug, Clone)]
pub struct PaperSwap {
    pub token_in: String,
    pub token_out: String,
    pub fee_tier: u32,
    pub amount_in: f64,
    pub amount_out: f64,
}

pub struct PaperConnector {
    tokens: Vec<TokenInfo>,
    prices: RwLock<HashMap<String, f64>>,
    balances: RwLock<HashMap<String, f64>>,
    /// Per-(token, tier) price multipliers, for exercising the arbitrage
    /// scanner.
    tier_skew: RwLock<HashMap<(String, u32), f64>>,
    swaps: RwLock<Vec<PaperSwap>>,
    seq: AtomicU64,
    quote_token: String,
}

impl PaperConnector {
    pub fn new(quote_token: impl Into<String>) -> Self {
        Self {
            tokens: Vec::new(),
            prices: RwLock::new(HashMap::new()),
            balances: RwLock::new(HashMap::new()),
            tier_skew: RwLock::new(HashMap::new()),
            swaps: RwLock::new(Vec::new()),
            seq: AtomicU64::new(0),
            quote_token: quote_token.into(),
        }
    }

    pub fn with_token(mut self, token: TokenInfo, price: f64) -> Self {
        self.prices
            .get_mut()
            .insert(token.symbol.clone(), price);
        self.tokens.push(token);
        self
    }

    pub fn with_balance(mut self, token: &str, amount: f64) -> Self {
        self.balances.get_mut().insert(token.to_string(), amount);
        self
    }

    pub async fn set_price(&self, token: &str, price: f64) {
        self.prices.write().await.insert(token.to_string(), price);
    }

    /// Skew one fee tier's quote by a multiplier.
    pub async fn set_tier_skew(&self, token: &str, fee_tier: u32, factor: f64) {
        self.tier_skew
            .write()
            .await
            .insert((token.to_string(), fee_tier), factor);
    }

    pub async fn swaps(&self) -> Vec<PaperSwap> {
        self.swaps.read().await.clone()
    }

    fn base_token<'a>(&self, token_in: &'a str, token_out: &'a str) -> &'a str {
        if token_in == self.quote_token {
            token_out
        } else {
            token_in
        }
    }

    async fn tier_price(&self, token: &str, fee_tier: u32) -> Result<f64, ConnectorError> {
        let prices = self.prices.read().await;
        let base = *prices
            .get(token)
            .ok_or_else(|| not_found(&format!("no pool for token {}", token)))?;
        let skew = self
            .tier_skew
            .read()
            .await
            .get(&(token.to_string(), fee_tier))
            .copied()
            .unwrap_or(1.0);
        // Higher fee tiers quote marginally worse.
        let tier_drag = 1.0 + fee_tier as f64 / 10_000_000.0;
        Ok(base * skew * tier_drag)
    }
}

fn not_found(msg: &str) -> ConnectorError {
    Box::new(io::Error::new(io::ErrorKind::NotFound, msg.to_string()))
}

#[async_trait]
impl ExchangeConnector for PaperConnector {
    async fn list_supported_tokens(&self) -> Result<Vec<TokenInfo>, ConnectorError> {
        Ok(self.tokens.clone())
    }

    async fn quote(
        &self,
        token_in: &str,
        token_out: &str,
        _amount_in: f64,
        fee_tier: u32,
    ) -> Result<f64, ConnectorError> {
        let token = self.base_token(token_in, token_out);
        self.tier_price(token, fee_tier).await
    }

    async fn get_balance(&self, token: &str) -> Result<f64, ConnectorError> {
        Ok(self
            .balances
            .read()
            .await
            .get(token)
            .copied()
            .unwrap_or(0.0))
    }

    async fn submit_swap(
        &self,
        token_in: &str,
        token_out: &str,
        fee_tier: u32,
        amount_in: f64,
        min_amount_out: f64,
    ) -> Result<SwapReceipt, ConnectorError> {
        let token = self.base_token(token_in, token_out);
        let price = self.tier_price(token, fee_tier).await?;

        let amount_out = if token_in == self.quote_token {
            amount_in / price
        } else {
            amount_in * price
        };
        if amount_out < min_amount_out {
            return Err(not_found("slippage bound exceeded"));
        }

        {
            let mut balances = self.balances.write().await;
            let in_balance = balances.get(token_in).copied().unwrap_or(0.0);
            if in_balance < amount_in {
                return Err(not_found(&format!("insufficient {} balance", token_in)));
            }
            balances.insert(token_in.to_string(), in_balance - amount_in);
            *balances.entry(token_out.to_string()).or_insert(0.0) += amount_out;
        }

        let n = self.seq.fetch_add(1, Ordering::Relaxed) + 1;
        let swap = PaperSwap {
            token_in: token_in.to_string(),
            token_out: token_out.to_string(),
            fee_tier,
            amount_in,
            amount_out,
        };
        self.swaps.write().await.push(swap);

        Ok(SwapReceipt {
            tx_reference: format!("paper-{:08}", n),
            amount_out,
        })
    }
}
