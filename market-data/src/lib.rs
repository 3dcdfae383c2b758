//! Exchange market data access
//!
//! A transport seam ([`MarketSource`]), a typed client for the exchange's
//! public REST endpoints ([`OkxClient`]) and feed helpers that degrade
//! per-call failures to empty results.

pub mod client;
pub mod config;
pub mod feeds;
pub mod source;

pub use client::{OkxClient, HOURLY_BAR};
pub use config::OkxConfig;
pub use feeds::{fetch_candle_batches, fetch_instruments, fetch_tickers, fetch_trading_rules, BatchPlan, CandleMap};
pub use source::{create_source, HttpMarketSource, InMemoryMarketSource, MarketSource};
