//! Environment-driven configuration helpers.
//!
//! All process-level settings come from the environment (optionally via a
//! `.env` file loaded in `main`). Defaults favour the sandbox setup: paper
//! connector, trading disabled, port 3000.

use std::env;

/// Deployment environment name (`production`, `sandbox`, ...).
pub fn get_environment() -> String {
    env::var("ENVIRONMENT").unwrap_or_else(|_| "sandbox".to_string())
}

/// HTTP port for the API server.
pub fn get_port() -> u16 {
    env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(3000)
}

/// Base URL of the quote-aggregator API. When unset the engine runs
/// against the paper connector.
pub fn get_quote_api_url() -> Option<String> {
    env::var("QUOTE_API_URL").ok().filter(|u| !u.is_empty())
}

/// Master switch for live execution. When false every approved trade is
/// failed without touching the exchange.
pub fn trading_enabled() -> bool {
    env::var("TRADING_ENABLED")
        .map(|v| matches!(v.to_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}

/// Optional override for the active profile's scan interval.
pub fn scan_interval_override() -> Option<u64> {
    env::var("SCAN_INTERVAL_SECONDS")
        .ok()
        .and_then(|i| i.parse().ok())
        .filter(|&i| i > 0)
}

/// Quote currency every pair is priced against.
pub fn quote_token() -> String {
    env::var("QUOTE_TOKEN").unwrap_or_else(|_| "USDC".to_string())
}
