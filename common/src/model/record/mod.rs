//! Output records of the two pipelines

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::Identified;
use crate::error::Error;
#[cfg(feature = "utoipa")]
use crate::utoipa::ToSchema;

/// One exported row: instrument fields, then ticker fields, then trading-rule
/// fields. Field order is the CSV column order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MergedRecord {
    pub inst_id: String,
    pub inst_type: String,
    pub base_ccy: String,
    pub quote_ccy: String,
    pub settle_ccy: String,
    pub ct_val: String,
    pub ct_mult: String,
    pub ct_val_ccy: String,
    pub opt_type: String,
    pub stk: String,
    pub list_time: String,
    pub exp_time: String,
    pub tick_sz: String,
    pub lot_sz: String,
    pub min_sz: String,
    pub max_sz: String,
    pub max_lmt_sz: String,
    pub max_mkt_sz: String,
    pub max_twap_sz: String,
    pub max_iceberg_sz: String,
    pub max_trigger_sz: String,
    pub max_stop_sz: String,
    pub last: String,
    pub last_sz: String,
    pub ask_px: String,
    pub ask_sz: String,
    pub bid_px: String,
    pub bid_sz: String,
    pub open_24h: String,
    pub high_24h: String,
    pub low_24h: String,
    pub vol_ccy_24h: String,
    pub vol_24h: String,
    pub sod_utc0: String,
    pub sod_utc8: String,
    pub ts: String,
    pub min_order_size: String,
    pub max_order_size: String,
    pub min_order_value: String,
    pub max_order_value: String,
}

impl MergedRecord {
    /// Has a ticker with a last price
    pub fn is_active(&self) -> bool {
        !self.last.is_empty()
    }

    /// Perpetual swap instrument
    pub fn is_swap(&self) -> bool {
        self.inst_type == "SWAP"
    }
}

impl Identified for MergedRecord {
    fn inst_id(&self) -> &str {
        &self.inst_id
    }
}

/// Lookback window for price change
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(ToSchema))]
pub enum TimeWindow {
    #[serde(rename = "1h")]
    Hour1,
    #[default]
    #[serde(rename = "4h")]
    Hour4,
    #[serde(rename = "12h")]
    Hour12,
    #[serde(rename = "24h")]
    Hour24,
    #[serde(rename = "7d")]
    Day7,
}

impl TimeWindow {
    /// All supported windows, shortest first
    pub const ALL: [TimeWindow; 5] = [
        TimeWindow::Hour1,
        TimeWindow::Hour4,
        TimeWindow::Hour12,
        TimeWindow::Hour24,
        TimeWindow::Day7,
    ];

    /// Offset of the reference candle in a most-recent-first hourly series
    pub fn hours(&self) -> usize {
        match self {
            TimeWindow::Hour1 => 1,
            TimeWindow::Hour4 => 4,
            TimeWindow::Hour12 => 12,
            TimeWindow::Hour24 => 24,
            TimeWindow::Day7 => 168,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TimeWindow::Hour1 => "1h",
            TimeWindow::Hour4 => "4h",
            TimeWindow::Hour12 => "12h",
            TimeWindow::Hour24 => "24h",
            TimeWindow::Day7 => "7d",
        }
    }

    /// Hourly candles needed to cover every window (offset 168 plus the current bar)
    pub fn required_candles() -> usize {
        Self::ALL.iter().map(|w| w.hours()).max().unwrap_or(0) + 1
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for TimeWindow {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|w| w.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::ValidationError(format!("Invalid time window: {}", s)))
    }
}

/// Percentage price change over one window.
///
/// `Insufficient` is a value, not an error: the candle history could not
/// support the window. It is never conflated with a 0% move. On the wire it
/// is `null`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "Option<f64>", into = "Option<f64>")]
pub enum PriceChange {
    Percent(f64),
    Insufficient,
}

impl PriceChange {
    pub fn value(&self) -> Option<f64> {
        match self {
            PriceChange::Percent(p) => Some(*p),
            PriceChange::Insufficient => None,
        }
    }

    pub fn is_insufficient(&self) -> bool {
        matches!(self, PriceChange::Insufficient)
    }
}

impl From<Option<f64>> for PriceChange {
    fn from(value: Option<f64>) -> Self {
        match value {
            Some(p) if p.is_finite() => PriceChange::Percent(p),
            _ => PriceChange::Insufficient,
        }
    }
}

impl From<PriceChange> for Option<f64> {
    fn from(change: PriceChange) -> Self {
        change.value()
    }
}

/// Dashboard row: one SWAP instrument with every window precomputed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(ToSchema))]
pub struct RankedRecord {
    /// Instrument identifier
    pub ticker: String,
    /// Last price; `None` when the ticker carried no usable price
    pub last: Option<f64>,
    /// 24h notional volume (`vol24h × last`, see [`crate::model::market::Ticker::notional_volume`])
    pub volume: f64,
    /// Change per window; `null` means insufficient history
    #[cfg_attr(feature = "utoipa", schema(value_type = Object))]
    pub changes: BTreeMap<TimeWindow, PriceChange>,
    /// Candle history was available for this instrument
    pub has_data: bool,
}

impl RankedRecord {
    /// Change for `window`; windows never computed read as insufficient
    pub fn change(&self, window: TimeWindow) -> PriceChange {
        self.changes
            .get(&window)
            .copied()
            .unwrap_or(PriceChange::Insufficient)
    }
}

impl Identified for RankedRecord {
    fn inst_id(&self) -> &str {
        &self.ticker
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_window_parse_and_hours() {
        assert_eq!("7d".parse::<TimeWindow>().unwrap(), TimeWindow::Day7);
        assert_eq!("12H".parse::<TimeWindow>().unwrap(), TimeWindow::Hour12);
        assert!("2h".parse::<TimeWindow>().is_err());
        assert_eq!(TimeWindow::default(), TimeWindow::Hour4);
        assert_eq!(TimeWindow::required_candles(), 169);
    }

    #[test]
    fn test_price_change_wire_format() {
        let json = serde_json::to_string(&vec![PriceChange::Percent(1.5), PriceChange::Insufficient]).unwrap();
        assert_eq!(json, "[1.5,null]");

        let back: Vec<PriceChange> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, vec![PriceChange::Percent(1.5), PriceChange::Insufficient]);
    }

    #[test]
    fn test_ranked_record_missing_window_is_insufficient() {
        let record = RankedRecord {
            ticker: "BTC-USDT-SWAP".to_string(),
            last: Some(50000.0),
            volume: 0.0,
            changes: BTreeMap::from([(TimeWindow::Hour1, PriceChange::Percent(0.2))]),
            has_data: true,
        };
        assert_eq!(record.change(TimeWindow::Hour1), PriceChange::Percent(0.2));
        assert!(record.change(TimeWindow::Day7).is_insufficient());

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["changes"]["1h"], serde_json::json!(0.2));
    }
}
