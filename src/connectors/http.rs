//! Quote-aggregator HTTP connector.
//!
//! Thin REST client over the aggregator API. Transient failures (network,
//! 5xx) are retried with exponential backoff; a missing pool for a fee
//! tier comes back as 404 and is surfaced as a plain per-call error.

use crate::connectors::{ConnectorError, ExchangeConnector, SwapReceipt};
use crate::models::market::TokenInfo;
use async_trait::async_trait;
use backon::{ExponentialBuilder, Retryable};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use url::Url;

#[derive(Debug)]
enum ApiError {
    /// Worth retrying: connection failures and 5xx responses.
    Transient(String),
    /// Not worth retrying: missing pool, bad request, decode failure.
    Fatal(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Transient(msg) => write!(f, "transient aggregator error: {}", msg),
            ApiError::Fatal(msg) => write!(f, "aggregator error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

#[derive(Debug, Deserialize)]
struct QuoteResponse {
    price: f64,
}

#[derive(Debug, Deserialize)]
struct BalanceResponse {
    amount: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SwapRequest<'a> {
    token_in: &'a str,
    token_out: &'a str,
    fee_tier: u32,
    amount_in: f64,
    min_amount_out: f64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SwapResponse {
    tx_reference: String,
    amount_out: f64,
}

pub struct HttpConnector {
    client: reqwest::Client,
    base: Url,
}

impl HttpConnector {
    pub fn new(base_url: &str) -> Result<Self, ConnectorError> {
        let base = Url::parse(base_url)?;
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;
        Ok(Self { client, base })
    }

    fn retry_policy() -> ExponentialBuilder {
        ExponentialBuilder::default()
            .with_min_delay(Duration::from_millis(100))
            .with_max_times(3)
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: Url) -> Result<T, ApiError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ApiError::Transient(e.to_string()))?;
        Self::decode(response).await
    }

    async fn decode<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ApiError> {
        let status = response.status();
        if status.is_server_error() {
            return Err(ApiError::Transient(format!("status {}", status)));
        }
        if status == StatusCode::NOT_FOUND {
            return Err(ApiError::Fatal("no pool for pair/fee tier".to_string()));
        }
        if !status.is_success() {
            return Err(ApiError::Fatal(format!("status {}", status)));
        }
        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::Fatal(format!("decode: {}", e)))
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        self.base
            .join(path)
            .map_err(|e| ApiError::Fatal(e.to_string()))
    }
}

#[async_trait]
impl ExchangeConnector for HttpConnector {
    async fn list_supported_tokens(&self) -> Result<Vec<TokenInfo>, ConnectorError> {
        let url = self.endpoint("tokens")?;
        let tokens = (|| self.get_json::<Vec<TokenInfo>>(url.clone()))
            .retry(Self::retry_policy())
            .when(|e| matches!(e, ApiError::Transient(_)))
            .await?;
        Ok(tokens)
    }

    async fn quote(
        &self,
        token_in: &str,
        token_out: &str,
        amount_in: f64,
        fee_tier: u32,
    ) -> Result<f64, ConnectorError> {
        let mut url = self.endpoint("quote")?;
        url.query_pairs_mut()
            .append_pair("tokenIn", token_in)
            .append_pair("tokenOut", token_out)
            .append_pair("amountIn", &amount_in.to_string())
            .append_pair("feeTier", &fee_tier.to_string());

        let quote = (|| self.get_json::<QuoteResponse>(url.clone()))
            .retry(Self::retry_policy())
            .when(|e| matches!(e, ApiError::Transient(_)))
            .await?;
        Ok(quote.price)
    }

    async fn get_balance(&self, token: &str) -> Result<f64, ConnectorError> {
        let url = self.endpoint(&format!("balance/{}", token))?;
        let balance = (|| self.get_json::<BalanceResponse>(url.clone()))
            .retry(Self::retry_policy())
            .when(|e| matches!(e, ApiError::Transient(_)))
            .await?;
        Ok(balance.amount)
    }

    async fn submit_swap(
        &self,
        token_in: &str,
        token_out: &str,
        fee_tier: u32,
        amount_in: f64,
        min_amount_out: f64,
    ) -> Result<SwapReceipt, ConnectorError> {
        let url = self.endpoint("swap")?;
        let request = SwapRequest {
            token_in,
            token_out,
            fee_tier,
            amount_in,
            min_amount_out,
        };

        // Swap submission is never retried: a second attempt after an
        // ambiguous failure could double-spend.
        let response = self
            .client
            .post(url)
            .json(&request)
            .send()
            .await
            .map_err(|e| ApiError::Transient(e.to_string()))?;
        let swap: SwapResponse = Self::decode(response).await?;
        Ok(SwapReceipt {
            tx_reference: swap.tx_reference,
            amount_out: swap.amount_out,
        })
    }
}
