use std::time::Duration;

use async_trait::async_trait;
use common::error::{Error, Result};
use dashmap::DashMap;
use serde_json::{json, Value};

use super::MarketSource;

/// Canned outcome for one endpoint
#[derive(Debug, Clone)]
enum Canned {
    Body(Value),
    NetworkFailure(String),
    ParseFailure(String),
}

/// In-memory source answering canned responses per endpoint.
///
/// Endpoints without a registered response fail as a network error. Every
/// call is counted, so callers can assert which requests were issued.
#[derive(Debug, Default)]
pub struct InMemoryMarketSource {
    responses: DashMap<String, Canned>,
    hits: DashMap<String, usize>,
    latency: Option<Duration>,
}

impl InMemoryMarketSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delay every response by `latency`
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Answer `endpoint` with an arbitrary JSON body
    pub fn respond(&self, endpoint: &str, body: Value) -> &Self {
        self.responses.insert(endpoint.to_string(), Canned::Body(body));
        self
    }

    /// Answer `endpoint` with a success envelope wrapping `data`
    pub fn respond_ok(&self, endpoint: &str, data: Value) -> &Self {
        self.respond(endpoint, json!({ "code": "0", "msg": "", "data": data }))
    }

    /// Answer `endpoint` with an error envelope
    pub fn respond_api_error(&self, endpoint: &str, code: &str, msg: &str) -> &Self {
        self.respond(endpoint, json!({ "code": code, "msg": msg, "data": [] }))
    }

    /// Fail `endpoint` at the transport level
    pub fn fail_network(&self, endpoint: &str, reason: &str) -> &Self {
        self.responses
            .insert(endpoint.to_string(), Canned::NetworkFailure(reason.to_string()));
        self
    }

    /// Fail `endpoint` as an undecodable body
    pub fn fail_parse(&self, endpoint: &str, reason: &str) -> &Self {
        self.responses
            .insert(endpoint.to_string(), Canned::ParseFailure(reason.to_string()));
        self
    }

    /// Number of calls made to `endpoint`
    pub fn hits(&self, endpoint: &str) -> usize {
        self.hits.get(endpoint).map(|h| *h).unwrap_or(0)
    }

    /// Total number of calls made
    pub fn total_hits(&self) -> usize {
        self.hits.iter().map(|h| *h.value()).sum()
    }
}

#[async_trait]
impl MarketSource for InMemoryMarketSource {
    async fn get_json(&self, endpoint: &str) -> Result<Value> {
        *self.hits.entry(endpoint.to_string()).or_insert(0) += 1;

        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }

        let canned = self.responses.get(endpoint).map(|c| c.value().clone());
        match canned {
            Some(Canned::Body(body)) => Ok(body),
            Some(Canned::NetworkFailure(reason)) => Err(Error::Network(reason)),
            Some(Canned::ParseFailure(reason)) => Err(Error::Parse(reason)),
            None => Err(Error::Network(format!("No route to {}", endpoint))),
        }
    }
}
