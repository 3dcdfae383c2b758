//! Instrument definitions and trading rules

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{lenient_string, Identified};
use crate::error::Error;
#[cfg(feature = "utoipa")]
use crate::utoipa::ToSchema;

/// Instrument type as understood by the exchange
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(ToSchema))]
#[serde(rename_all = "UPPERCASE")]
pub enum InstrumentType {
    /// Spot pair
    Spot,
    /// Perpetual swap
    Swap,
    /// Dated futures
    Futures,
    /// Option
    Option,
}

impl InstrumentType {
    /// Every instrument type, in the order the exporter requests them
    pub const ALL: [InstrumentType; 4] = [
        InstrumentType::Spot,
        InstrumentType::Swap,
        InstrumentType::Futures,
        InstrumentType::Option,
    ];

    /// Wire representation (`instType` query value)
    pub fn as_str(&self) -> &'static str {
        match self {
            InstrumentType::Spot => "SPOT",
            InstrumentType::Swap => "SWAP",
            InstrumentType::Futures => "FUTURES",
            InstrumentType::Option => "OPTION",
        }
    }
}

impl fmt::Display for InstrumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InstrumentType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "SPOT" => Ok(InstrumentType::Spot),
            "SWAP" => Ok(InstrumentType::Swap),
            "FUTURES" => Ok(InstrumentType::Futures),
            "OPTION" => Ok(InstrumentType::Option),
            other => Err(Error::ValidationError(format!("Unknown instrument type: {}", other))),
        }
    }
}

/// Instrument definition from `/public/instruments`
///
/// Every field is kept as the exchange's text so that exports reproduce it
/// verbatim; absent fields are empty strings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Instrument {
    #[serde(deserialize_with = "lenient_string")]
    pub inst_id: String,
    /// Raw type; see [`Instrument::kind`]
    #[serde(deserialize_with = "lenient_string")]
    pub inst_type: String,
    #[serde(deserialize_with = "lenient_string")]
    pub base_ccy: String,
    #[serde(deserialize_with = "lenient_string")]
    pub quote_ccy: String,
    #[serde(deserialize_with = "lenient_string")]
    pub settle_ccy: String,
    /// Contract value
    #[serde(deserialize_with = "lenient_string")]
    pub ct_val: String,
    /// Contract multiplier
    #[serde(deserialize_with = "lenient_string")]
    pub ct_mult: String,
    #[serde(deserialize_with = "lenient_string")]
    pub ct_val_ccy: String,
    /// Option type (C/P)
    #[serde(deserialize_with = "lenient_string")]
    pub opt_type: String,
    /// Option strike
    #[serde(deserialize_with = "lenient_string")]
    pub stk: String,
    #[serde(deserialize_with = "lenient_string")]
    pub list_time: String,
    #[serde(deserialize_with = "lenient_string")]
    pub exp_time: String,
    #[serde(deserialize_with = "lenient_string")]
    pub tick_sz: String,
    #[serde(deserialize_with = "lenient_string")]
    pub lot_sz: String,
    #[serde(deserialize_with = "lenient_string")]
    pub min_sz: String,
    #[serde(deserialize_with = "lenient_string")]
    pub max_sz: String,
    #[serde(deserialize_with = "lenient_string")]
    pub max_lmt_sz: String,
    #[serde(deserialize_with = "lenient_string")]
    pub max_mkt_sz: String,
    #[serde(deserialize_with = "lenient_string")]
    pub max_twap_sz: String,
    #[serde(deserialize_with = "lenient_string")]
    pub max_iceberg_sz: String,
    #[serde(deserialize_with = "lenient_string")]
    pub max_trigger_sz: String,
    #[serde(deserialize_with = "lenient_string")]
    pub max_stop_sz: String,
}

impl Instrument {
    /// Parsed instrument type, `None` for types this scanner does not know
    pub fn kind(&self) -> Option<InstrumentType> {
        self.inst_type.parse().ok()
    }
}

impl Identified for Instrument {
    fn inst_id(&self) -> &str {
        &self.inst_id
    }
}

/// Order size and value limits from `/public/trading-rules`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TradingRule {
    #[serde(deserialize_with = "lenient_string")]
    pub inst_id: String,
    #[serde(deserialize_with = "lenient_string")]
    pub min_order_size: String,
    #[serde(deserialize_with = "lenient_string")]
    pub max_order_size: String,
    #[serde(deserialize_with = "lenient_string")]
    pub min_order_value: String,
    #[serde(deserialize_with = "lenient_string")]
    pub max_order_value: String,
}

impl Identified for TradingRule {
    fn inst_id(&self) -> &str {
        &self.inst_id
    }
}
