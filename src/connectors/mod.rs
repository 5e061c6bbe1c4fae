//! Exchange connectivity boundary.
//!
//! The engine only ever talks to [`ExchangeConnector`]. Quote failures
//! are per-call and non-fatal; the caller treats them as "no data for
//! this attempt".

pub mod http;
pub mod paper;

use crate::models::market::TokenInfo;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub type ConnectorError = Box<dyn std::error::Error + Send + Sync>;

/// Confirmed swap submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwapReceipt {
    pub tx_reference: String,
    /// Amount of `token_out` received.
    pub amount_out: f64,
}

#[async_trait]
pub trait ExchangeConnector: Send + Sync {
    async fn list_supported_tokens(&self) -> Result<Vec<TokenInfo>, ConnectorError>;

    /// Price of `token_out` denominated in `token_in` for the given fee
    /// tier. Fails when no pool exists for that tier.
    async fn quote(
        &self,
        token_in: &str,
        token_out: &str,
        amount_in: f64,
        fee_tier: u32,
    ) -> Result<f64, ConnectorError>;

    async fn get_balance(&self, token: &str) -> Result<f64, ConnectorError>;

    /// Submit a swap and wait for confirmation.
    async fn submit_swap(
        &self,
        token_in: &str,
        token_out: &str,
        fee_tier: u32,
        amount_in: f64,
        min_amount_out: f64,
    ) -> Result<SwapReceipt, ConnectorError>;
}
