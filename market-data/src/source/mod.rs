//! Transport seam: "fetch JSON from an endpoint"

mod http;
mod memory;

use std::sync::Arc;

use async_trait::async_trait;
use common::error::Result;
use serde_json::Value;

use crate::config::OkxConfig;

pub use http::HttpMarketSource;
pub use memory::InMemoryMarketSource;

/// Source of raw exchange responses.
///
/// `endpoint` is the path plus query relative to the API base, for example
/// `/market/tickers?instType=SWAP`. Implementations fail with
/// [`common::Error::Network`] or [`common::Error::Parse`]; interpreting the
/// response envelope is the client's job.
#[async_trait]
pub trait MarketSource: Send + Sync {
    async fn get_json(&self, endpoint: &str) -> Result<Value>;
}

/// Build the HTTP-backed source for `config`
pub fn create_source(config: &OkxConfig) -> Result<Arc<dyn MarketSource>> {
    Ok(Arc::new(HttpMarketSource::new(config)?))
}
