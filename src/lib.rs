//! Dextrix - multi-strategy signal engine and execution controller
//! for DEX token trading.
//!
//! The pipeline is one-directional: observations land in the
//! [`history::HistoryStore`], the enabled [`strategies`] each derive an
//! independent [`models::signal::Signal`], the [`signals`] combiner blends
//! them under the active [`models::profile::TradingProfile`] weights, the
//! [`risk`] gate validates and sizes the result, and the [`execution`]
//! controller drives the trade through its lifecycle against an
//! [`connectors::ExchangeConnector`].

pub mod api;
pub mod config;
pub mod connectors;
pub mod engine;
pub mod execution;
pub mod history;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod profiles;
pub mod risk;
pub mod signals;
pub mod strategies;
