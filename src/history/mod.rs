//! Per-token bounded history of price and volume observations.
//!
//! Each series is a fixed-capacity ring buffer: the capacity invariant is
//! structural, not enforced by trimming. Append is O(1); read-out is
//! oldest-first.

use crate::models::market::{PricePoint, VolumePoint};
use chrono::Utc;
use std::collections::HashMap;

pub const PRICE_CAPACITY: usize = 100;
pub const VOLUME_CAPACITY: usize = 100;

/// Fixed-capacity ring buffer.
#[derive(Debug, Clone)]
pub struct RingBuffer<T> {
    buf: Vec<T>,
    head: usize,
    capacity: usize,
}

impl<T: Copy> RingBuffer<T> {
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "ring buffer capacity must be positive");
        Self {
            buf: Vec::with_capacity(capacity),
            head: 0,
            capacity,
        }
    }

    pub fn push(&mut self, value: T) {
        if self.buf.len() < self.capacity {
            self.buf.push(value);
        } else {
            self.buf[self.head] = value;
            self.head = (self.head + 1) % self.capacity;
        }
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Elements oldest-first.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        let (wrapped, linear) = self.buf.split_at(self.head);
        linear.iter().chain(wrapped.iter())
    }

    pub fn last(&self) -> Option<&T> {
        if self.buf.is_empty() {
            None
        } else if self.head == 0 {
            self.buf.last()
        } else {
            Some(&self.buf[self.head - 1])
        }
    }

    pub fn to_vec(&self) -> Vec<T> {
        self.iter().copied().collect()
    }
}

/// Per-token price and volume series.
#[derive(Debug, Default)]
pub struct HistoryStore {
    prices: HashMap<String, RingBuffer<PricePoint>>,
    volumes: HashMap<String, RingBuffer<VolumePoint>>,
}

impl HistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one observation. Volume is optional - quote-derived price
    /// ticks carry none.
    pub fn record(&mut self, token: &str, price: f64, volume: Option<f64>) {
        let now = Utc::now();
        self.prices
            .entry(token.to_string())
            .or_insert_with(|| RingBuffer::new(PRICE_CAPACITY))
            .push(PricePoint::new(price, now));
        if let Some(volume) = volume {
            self.volumes
                .entry(token.to_string())
                .or_insert_with(|| RingBuffer::new(VOLUME_CAPACITY))
                .push(VolumePoint::new(volume, now));
        }
    }

    /// Retained prices oldest-first.
    pub fn prices(&self, token: &str) -> Vec<f64> {
        self.prices
            .get(token)
            .map(|s| s.iter().map(|p| p.price).collect())
            .unwrap_or_default()
    }

    /// Retained volumes oldest-first.
    pub fn volumes(&self, token: &str) -> Vec<f64> {
        self.volumes
            .get(token)
            .map(|s| s.iter().map(|v| v.volume).collect())
            .unwrap_or_default()
    }

    pub fn latest_price(&self, token: &str) -> Option<f64> {
        self.prices.get(token).and_then(|s| s.last()).map(|p| p.price)
    }

    pub fn price_len(&self, token: &str) -> usize {
        self.prices.get(token).map(|s| s.len()).unwrap_or(0)
    }

    pub fn tokens(&self) -> Vec<String> {
        self.prices.keys().cloned().collect()
    }
}
