//! Typed client for the exchange's public REST endpoints

use std::sync::Arc;

use common::error::{Error, ErrorExt, Result};
use common::model::lenient_string;
use common::{Candle, FundingRate, FundingRateHistory, Instrument, InstrumentType, OpenInterest, Ticker, TradingRule};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::source::MarketSource;

/// Bar size used for all historical candle requests
pub const HOURLY_BAR: &str = "1H";

/// Uniform response envelope: `code` "0" means success
#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(default, deserialize_with = "lenient_string")]
    code: String,
    #[serde(default, deserialize_with = "lenient_string")]
    msg: String,
    #[serde(default)]
    data: Value,
}

/// Exchange client over any [`MarketSource`]
#[derive(Clone)]
pub struct OkxClient {
    source: Arc<dyn MarketSource>,
}

impl OkxClient {
    pub fn new(source: Arc<dyn MarketSource>) -> Self {
        Self { source }
    }

    /// Instrument definitions for one instrument type
    pub async fn instruments(&self, inst_type: InstrumentType) -> Result<Vec<Instrument>> {
        self.get_records(&format!("/public/instruments?instType={}", inst_type)).await
    }

    /// Order size/value limits for every covered instrument
    pub async fn trading_rules(&self) -> Result<Vec<TradingRule>> {
        self.get_records("/public/trading-rules").await
    }

    /// Ticker snapshots for one instrument type
    pub async fn tickers(&self, inst_type: InstrumentType) -> Result<Vec<Ticker>> {
        self.get_records(&format!("/market/tickers?instType={}", inst_type)).await
    }

    /// Hourly candles for one instrument, most recent first
    pub async fn candles(&self, inst_id: &str, limit: usize) -> Result<Vec<Candle>> {
        let endpoint = format!("/market/candles?instId={}&bar={}&limit={}", inst_id, HOURLY_BAR, limit);
        let rows = self.get_data(&endpoint).await?;
        Ok(rows.iter().map(Candle::from_row).collect())
    }

    /// Current funding rate of a perpetual swap
    pub async fn funding_rate(&self, inst_id: &str) -> Result<Vec<FundingRate>> {
        self.get_records(&format!("/public/funding-rate?instId={}", inst_id)).await
    }

    /// Realised funding history of a perpetual swap
    pub async fn funding_rate_history(&self, inst_id: &str) -> Result<Vec<FundingRateHistory>> {
        self.get_records(&format!("/public/funding-rate-history?instId={}", inst_id)).await
    }

    /// Open interest for every instrument of a type
    pub async fn open_interest(&self, inst_type: InstrumentType) -> Result<Vec<OpenInterest>> {
        self.get_records(&format!("/public/open-interest?instType={}", inst_type)).await
    }

    /// Fetch `endpoint` and decode each element of `data` as `T`, skipping
    /// elements that are not records
    async fn get_records<T: DeserializeOwned>(&self, endpoint: &str) -> Result<Vec<T>> {
        let rows = self.get_data(endpoint).await?;
        let total = rows.len();

        let records: Vec<T> = rows
            .into_iter()
            .enumerate()
            .filter_map(|(idx, row)| match serde_json::from_value(row) {
                Ok(record) => Some(record),
                Err(e) => {
                    warn!("Skipping malformed record #{} from {}: {}", idx, endpoint, e);
                    None
                }
            })
            .collect();

        debug!("{}: decoded {}/{} records", endpoint, records.len(), total);
        Ok(records)
    }

    /// Fetch `endpoint` and unwrap the envelope's `data` array
    async fn get_data(&self, endpoint: &str) -> Result<Vec<Value>> {
        let body = self
            .source
            .get_json(endpoint)
            .await
            .with_context(|| format!("GET {}", endpoint))?;
        unwrap_envelope(body, endpoint)
    }
}

/// Check the status code and extract the `data` array. A missing or null
/// `data` on success is an empty result.
fn unwrap_envelope(body: Value, endpoint: &str) -> Result<Vec<Value>> {
    let envelope: Envelope = serde_json::from_value(body)
        .map_err(|e| Error::Parse(format!("Unexpected response shape from {}: {}", endpoint, e)))?;

    if envelope.code != "0" {
        return Err(Error::Api {
            code: envelope.code,
            message: envelope.msg,
        });
    }

    match envelope.data {
        Value::Array(rows) => Ok(rows),
        Value::Null => Ok(Vec::new()),
        other => Err(Error::Parse(format!(
            "Expected data array from {}, got {}",
            endpoint,
            type_name(&other)
        ))),
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
