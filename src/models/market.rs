use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One observed price for a token.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PricePoint {
    pub price: f64,
    pub timestamp: DateTime<Utc>,
}

impl PricePoint {
    pub fn new(price: f64, timestamp: DateTime<Utc>) -> Self {
        Self { price, timestamp }
    }
}

/// One observed volume for a token.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct VolumePoint {
    pub volume: f64,
    pub timestamp: DateTime<Utc>,
}

impl VolumePoint {
    pub fn new(volume: f64, timestamp: DateTime<Utc>) -> Self {
        Self { volume, timestamp }
    }
}

/// A token the exchange connector supports.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenInfo {
    pub symbol: String,
    pub identifier: String,
    pub decimals: u8,
}

impl TokenInfo {
    pub fn new(symbol: impl Into<String>, identifier: impl Into<String>, decimals: u8) -> Self {
        Self {
            symbol: symbol.into(),
            identifier: identifier.into(),
            decimals,
        }
    }
}
