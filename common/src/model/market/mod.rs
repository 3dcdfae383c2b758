//! Market snapshots: tickers, candles and derivatives statistics

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{lenient_string, parse_number, Identified};
#[cfg(feature = "utoipa")]
use crate::utoipa::ToSchema;

/// Ticker snapshot from `/market/tickers`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Ticker {
    #[serde(deserialize_with = "lenient_string")]
    pub inst_id: String,
    #[serde(deserialize_with = "lenient_string")]
    pub inst_type: String,
    /// Last traded price
    #[serde(deserialize_with = "lenient_string")]
    pub last: String,
    /// Last traded size
    #[serde(deserialize_with = "lenient_string")]
    pub last_sz: String,
    #[serde(deserialize_with = "lenient_string")]
    pub ask_px: String,
    #[serde(deserialize_with = "lenient_string")]
    pub ask_sz: String,
    #[serde(deserialize_with = "lenient_string")]
    pub bid_px: String,
    #[serde(deserialize_with = "lenient_string")]
    pub bid_sz: String,
    #[serde(deserialize_with = "lenient_string")]
    pub open_24h: String,
    #[serde(deserialize_with = "lenient_string")]
    pub high_24h: String,
    #[serde(deserialize_with = "lenient_string")]
    pub low_24h: String,
    /// 24h volume in quote (or settlement) currency
    #[serde(deserialize_with = "lenient_string")]
    pub vol_ccy_24h: String,
    /// 24h volume in base currency (contracts for derivatives)
    #[serde(deserialize_with = "lenient_string")]
    pub vol_24h: String,
    /// Start-of-day price, UTC+0
    #[serde(deserialize_with = "lenient_string")]
    pub sod_utc0: String,
    /// Start-of-day price, UTC+8
    #[serde(deserialize_with = "lenient_string")]
    pub sod_utc8: String,
    /// Snapshot time, Unix milliseconds as text
    #[serde(deserialize_with = "lenient_string")]
    pub ts: String,
}

impl Ticker {
    /// Last price as a number, `None` when absent or malformed
    pub fn last_price(&self) -> Option<f64> {
        parse_number(&self.last)
    }

    /// 24h notional volume: `vol24h × last`.
    ///
    /// This is an approximation: the whole day's base volume is priced at the
    /// current last price rather than at each trade's price. It is only used
    /// as a ranking heuristic. Missing inputs count as zero.
    pub fn notional_volume(&self) -> f64 {
        let volume = parse_number(&self.vol_24h).unwrap_or(0.0);
        let last = self.last_price().unwrap_or(0.0);
        volume * last
    }
}

impl Identified for Ticker {
    fn inst_id(&self) -> &str {
        &self.inst_id
    }
}

/// One hourly bar from `/market/candles`.
///
/// Rows arrive as `[ts, o, h, l, c, vol, ...]`. A malformed row still
/// occupies its slot (with `None` fields) so that offsets into the
/// most-recent-first series keep meaning "hours back".
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(ToSchema))]
pub struct Candle {
    /// Bar open time, Unix milliseconds
    pub timestamp: Option<i64>,
    pub open: Option<f64>,
    pub high: Option<f64>,
    pub low: Option<f64>,
    pub close: Option<f64>,
    pub volume: Option<f64>,
}

impl Candle {
    /// Decode one candle row, tolerating short rows and non-string cells
    pub fn from_row(row: &Value) -> Self {
        let cells = match row.as_array() {
            Some(cells) => cells.as_slice(),
            None => return Self::default(),
        };
        let number = |idx: usize| -> Option<f64> {
            match cells.get(idx)? {
                Value::String(s) => parse_number(s),
                Value::Number(n) => n.as_f64().filter(|v| v.is_finite()),
                _ => None,
            }
        };

        Self {
            timestamp: number(0).map(|ts| ts as i64),
            open: number(1),
            high: number(2),
            low: number(3),
            close: number(4),
            volume: number(5),
        }
    }

    /// Candle with only an open price, handy for building series by hand
    pub fn with_open(open: f64) -> Self {
        Self {
            open: Some(open),
            ..Self::default()
        }
    }
}

/// Funding rate from `/public/funding-rate`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FundingRate {
    #[serde(deserialize_with = "lenient_string")]
    pub inst_id: String,
    #[serde(deserialize_with = "lenient_string")]
    pub funding_rate: String,
    #[serde(deserialize_with = "lenient_string")]
    pub next_funding_rate: String,
    #[serde(deserialize_with = "lenient_string")]
    pub funding_time: String,
    #[serde(deserialize_with = "lenient_string")]
    pub next_funding_time: String,
}

/// Realised funding from `/public/funding-rate-history`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FundingRateHistory {
    #[serde(deserialize_with = "lenient_string")]
    pub inst_id: String,
    #[serde(deserialize_with = "lenient_string")]
    pub funding_rate: String,
    #[serde(deserialize_with = "lenient_string")]
    pub realized_rate: String,
    #[serde(deserialize_with = "lenient_string")]
    pub funding_time: String,
}

/// Open interest from `/public/open-interest`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OpenInterest {
    #[serde(deserialize_with = "lenient_string")]
    pub inst_id: String,
    #[serde(deserialize_with = "lenient_string")]
    pub inst_type: String,
    /// Open interest in contracts
    #[serde(deserialize_with = "lenient_string")]
    pub oi: String,
    /// Open interest in currency
    #[serde(deserialize_with = "lenient_string")]
    pub oi_ccy: String,
    #[serde(deserialize_with = "lenient_string")]
    pub ts: String,
}
