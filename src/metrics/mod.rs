//! Prometheus metrics for the evaluation loop, trade execution and the
//! HTTP surface. Exported as text via [`Metrics::export`] and served at
//! `/metrics`.

use prometheus::{Encoder, Histogram, HistogramOpts, IntCounter, IntGauge, Registry, TextEncoder};

pub struct Metrics {
    registry: Registry,

    pub evaluation_cycles_total: IntCounter,
    pub evaluation_cycle_duration_seconds: Histogram,
    pub signals_generated_total: IntCounter,
    pub trades_executed_total: IntCounter,
    pub trades_failed_total: IntCounter,

    pub http_requests_total: IntCounter,
    pub http_request_duration_seconds: Histogram,
    pub http_requests_in_flight: IntGauge,
}

impl Metrics {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let evaluation_cycles_total = IntCounter::new(
            "evaluation_cycles_total",
            "Completed evaluation cycles",
        )?;
        let evaluation_cycle_duration_seconds = Histogram::with_opts(HistogramOpts::new(
            "evaluation_cycle_duration_seconds",
            "Wall-clock duration of one evaluation cycle",
        ))?;
        let signals_generated_total = IntCounter::new(
            "signals_generated_total",
            "Actionable combined signals produced",
        )?;
        let trades_executed_total = IntCounter::new(
            "trades_executed_total",
            "Trades that reached a FILLED status",
        )?;
        let trades_failed_total = IntCounter::new(
            "trades_failed_total",
            "Trades that reached a FAILED status",
        )?;

        let http_requests_total =
            IntCounter::new("http_requests_total", "HTTP requests received")?;
        let http_request_duration_seconds = Histogram::with_opts(HistogramOpts::new(
            "http_request_duration_seconds",
            "HTTP request latency",
        ))?;
        let http_requests_in_flight =
            IntGauge::new("http_requests_in_flight", "HTTP requests currently in flight")?;

        registry.register(Box::new(evaluation_cycles_total.clone()))?;
        registry.register(Box::new(evaluation_cycle_duration_seconds.clone()))?;
        registry.register(Box::new(signals_generated_total.clone()))?;
        registry.register(Box::new(trades_executed_total.clone()))?;
        registry.register(Box::new(trades_failed_total.clone()))?;
        registry.register(Box::new(http_requests_total.clone()))?;
        registry.register(Box::new(http_request_duration_seconds.clone()))?;
        registry.register(Box::new(http_requests_in_flight.clone()))?;

        Ok(Self {
            registry,
            evaluation_cycles_total,
            evaluation_cycle_duration_seconds,
            signals_generated_total,
            trades_executed_total,
            trades_failed_total,
            http_requests_total,
            http_request_duration_seconds,
            http_requests_in_flight,
        })
    }

    pub fn export(&self) -> Result<String, prometheus::Error> {
        let encoder = TextEncoder::new();
        let mut buffer = Vec::new();
        encoder.encode(&self.registry.gather(), &mut buffer)?;
        Ok(String::from_utf8(buffer).unwrap_or_default())
    }
}
