//! Joins on instrument identifier

use std::collections::{HashMap, HashSet};

use common::{Candle, Identified, Instrument, MergedRecord, RankedRecord, Ticker, TradingRule};
use tracing::{debug, warn};

use crate::change::window_changes;

/// Build an identifier lookup. Records without an identifier are skipped;
/// a later record replaces an earlier one with the same identifier.
pub fn index_by_id<T: Identified>(items: impl IntoIterator<Item = T>) -> HashMap<String, T> {
    let mut index = HashMap::new();
    let mut skipped = 0usize;

    for item in items {
        if item.inst_id().is_empty() {
            skipped += 1;
            continue;
        }
        index.insert(item.inst_id().to_string(), item);
    }

    if skipped > 0 {
        warn!("Skipped {} records without an instrument id", skipped);
    }
    index
}

/// Keep the first occurrence of every identifier, preserving order.
/// Records without an identifier are kept as they are.
pub fn dedup_by_id<T: Identified>(items: Vec<T>) -> Vec<T> {
    let before = items.len();
    let mut seen = HashSet::with_capacity(before);

    let unique: Vec<T> = items
        .into_iter()
        .filter(|item| item.inst_id().is_empty() || seen.insert(item.inst_id().to_string()))
        .collect();

    if unique.len() < before {
        debug!("Dropped {} duplicate records", before - unique.len());
    }
    unique
}

/// Left-join instruments with tickers and trading rules.
///
/// Produces exactly one record per instrument, in instrument order. Fields
/// from an absent ticker or rule are empty strings.
pub fn merge_records(
    instruments: &[Instrument],
    tickers: &HashMap<String, Ticker>,
    rules: &HashMap<String, TradingRule>,
) -> Vec<MergedRecord> {
    instruments
        .iter()
        .map(|instrument| {
            merge_one(
                instrument,
                tickers.get(&instrument.inst_id),
                rules.get(&instrument.inst_id),
            )
        })
        .collect()
}

fn merge_one(instrument: &Instrument, ticker: Option<&Ticker>, rule: Option<&TradingRule>) -> MergedRecord {
    MergedRecord {
        inst_id: instrument.inst_id.clone(),
        inst_type: instrument.inst_type.clone(),
        base_ccy: instrument.base_ccy.clone(),
        quote_ccy: instrument.quote_ccy.clone(),
        settle_ccy: instrument.settle_ccy.clone(),
        ct_val: instrument.ct_val.clone(),
        ct_mult: instrument.ct_mult.clone(),
        ct_val_ccy: instrument.ct_val_ccy.clone(),
        opt_type: instrument.opt_type.clone(),
        stk: instrument.stk.clone(),
        list_time: instrument.list_time.clone(),
        exp_time: instrument.exp_time.clone(),
        tick_sz: instrument.tick_sz.clone(),
        lot_sz: instrument.lot_sz.clone(),
        min_sz: instrument.min_sz.clone(),
        max_sz: instrument.max_sz.clone(),
        max_lmt_sz: instrument.max_lmt_sz.clone(),
        max_mkt_sz: instrument.max_mkt_sz.clone(),
        max_twap_sz: instrument.max_twap_sz.clone(),
        max_iceberg_sz: instrument.max_iceberg_sz.clone(),
        max_trigger_sz: instrument.max_trigger_sz.clone(),
        max_stop_sz: instrument.max_stop_sz.clone(),
        last: side_field(ticker, |t| &t.last),
        last_sz: side_field(ticker, |t| &t.last_sz),
        ask_px: side_field(ticker, |t| &t.ask_px),
        ask_sz: side_field(ticker, |t| &t.ask_sz),
        bid_px: side_field(ticker, |t| &t.bid_px),
        bid_sz: side_field(ticker, |t| &t.bid_sz),
        open_24h: side_field(ticker, |t| &t.open_24h),
        high_24h: side_field(ticker, |t| &t.high_24h),
        low_24h: side_field(ticker, |t| &t.low_24h),
        vol_ccy_24h: side_field(ticker, |t| &t.vol_ccy_24h),
        vol_24h: side_field(ticker, |t| &t.vol_24h),
        sod_utc0: side_field(ticker, |t| &t.sod_utc0),
        sod_utc8: side_field(ticker, |t| &t.sod_utc8),
        ts: side_field(ticker, |t| &t.ts),
        min_order_size: side_field(rule, |r| &r.min_order_size),
        max_order_size: side_field(rule, |r| &r.max_order_size),
        min_order_value: side_field(rule, |r| &r.min_order_value),
        max_order_value: side_field(rule, |r| &r.max_order_value),
    }
}

/// Field of an optional side record, or the empty string
fn side_field<T>(side: Option<&T>, field: impl Fn(&T) -> &String) -> String {
    side.map(|record| field(record).clone()).unwrap_or_default()
}

/// Join tickers with their candle history into dashboard records.
///
/// One record per ticker, in ticker order. Instruments without candles
/// (not selected, or their fetch failed) get insufficient changes for every
/// window and `has_data == false`.
pub fn build_ranked_records(tickers: &[Ticker], candles: &HashMap<String, Option<Vec<Candle>>>) -> Vec<RankedRecord> {
    tickers
        .iter()
        .map(|ticker| {
            let last = ticker.last_price();
            let series: &[Candle] = candles
                .get(&ticker.inst_id)
                .and_then(|c| c.as_deref())
                .unwrap_or(&[]);
            let changes = window_changes(series, last);

            if !series.is_empty() {
                debug!(
                    "{} price changes: {}",
                    ticker.inst_id,
                    changes
                        .iter()
                        .map(|(w, c)| format!("{}={}", w, crate::format::format_change(*c)))
                        .collect::<Vec<_>>()
                        .join(", ")
                );
            }

            RankedRecord {
                ticker: ticker.inst_id.clone(),
                last,
                volume: ticker.notional_volume(),
                changes,
                has_data: !series.is_empty(),
            }
        })
        .collect()
}
