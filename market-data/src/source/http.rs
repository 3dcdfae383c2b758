use async_trait::async_trait;
use common::error::{Error, Result};
use reqwest::Client;
use serde_json::Value;
use tracing::debug;

use super::MarketSource;
use crate::config::OkxConfig;

/// reqwest-backed source talking to the live exchange
#[derive(Debug, Clone)]
pub struct HttpMarketSource {
    client: Client,
    base_url: String,
}

impl HttpMarketSource {
    pub fn new(config: &OkxConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| Error::ConfigurationError(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
        })
    }
}

#[async_trait]
impl MarketSource for HttpMarketSource {
    async fn get_json(&self, endpoint: &str) -> Result<Value> {
        let url = format!("{}{}", self.base_url, endpoint);
        debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| Error::Network(format!("Request to {} failed: {}", url, e)))?;

        // The exchange reports failures inside the envelope, often with a
        // non-2xx status, so the body is decoded regardless of status.
        let body = response
            .text()
            .await
            .map_err(|e| Error::Network(format!("Reading body from {} failed: {}", url, e)))?;

        serde_json::from_str(&body)
            .map_err(|e| Error::Parse(format!("Failed to parse JSON from {}: {}", url, e)))
    }
}
