//! Common types and utilities for the market scanner
//!
//! This library contains the exchange data models and the error type shared
//! by the exchange client, the ranking engine, the snapshot exporter and the
//! dashboard.

pub mod error;
pub mod model;

/// Re-export important types
pub use error::{Error, Result, ErrorExt, IntoError};
pub use model::{parse_number, Identified};
pub use model::instrument::{Instrument, InstrumentType, TradingRule};
pub use model::market::{Candle, FundingRate, FundingRateHistory, OpenInterest, Ticker};
pub use model::record::{MergedRecord, PriceChange, RankedRecord, TimeWindow};

// Re-export utoipa for use in model ToSchema derives
#[cfg(feature = "utoipa")]
pub use utoipa;
