//! Feed helpers that never fail the whole run.
//!
//! Each helper catches network, parse and API failures at the boundary of a
//! single call, logs them, and continues with an empty contribution from
//! that call.

use std::collections::HashMap;
use std::future::Future;
use std::time::Duration;

use common::error::Result;
use common::{Candle, Instrument, InstrumentType, Ticker, TradingRule};
use futures::future::join_all;
use tracing::{debug, info, warn};

use crate::client::OkxClient;

/// Candles per instrument; `None` when the fetch for that instrument failed
pub type CandleMap = HashMap<String, Option<Vec<Candle>>>;

/// Throttling plan for historical candle fetches
#[derive(Debug, Clone)]
pub struct BatchPlan {
    /// Concurrent requests per batch
    pub batch_size: usize,
    /// Pause between consecutive batches
    pub pause: Duration,
    /// Candles requested per instrument
    pub limit: usize,
}

impl Default for BatchPlan {
    fn default() -> Self {
        Self {
            batch_size: 3,
            pause: Duration::from_millis(500),
            limit: common::TimeWindow::required_candles(),
        }
    }
}

/// Instrument definitions for every type in `types`, requested one type at
/// a time with `spacing` between requests
pub async fn fetch_instruments(client: &OkxClient, types: &[InstrumentType], spacing: Duration) -> Vec<Instrument> {
    info!("Loading instruments for {} types", types.len());
    collect_by_type(types, spacing, "instruments", |inst_type| client.instruments(inst_type)).await
}

/// Ticker snapshots for every type in `types`, one type at a time
pub async fn fetch_tickers(client: &OkxClient, types: &[InstrumentType], spacing: Duration) -> Vec<Ticker> {
    info!("Loading tickers for {} types", types.len());
    collect_by_type(types, spacing, "tickers", |inst_type| client.tickers(inst_type)).await
}

/// All trading rules, or none if the call fails
pub async fn fetch_trading_rules(client: &OkxClient) -> Vec<TradingRule> {
    info!("Loading trading rules");
    match client.trading_rules().await {
        Ok(rules) => {
            info!("Loaded {} trading rules", rules.len());
            rules
        }
        Err(e) => {
            warn!("Failed to load trading rules: {}", e);
            Vec::new()
        }
    }
}

async fn collect_by_type<T, F, Fut>(types: &[InstrumentType], spacing: Duration, what: &str, fetch: F) -> Vec<T>
where
    F: Fn(InstrumentType) -> Fut,
    Fut: Future<Output = Result<Vec<T>>>,
{
    let mut all = Vec::new();

    for (idx, inst_type) in types.iter().copied().enumerate() {
        if idx > 0 && !spacing.is_zero() {
            tokio::time::sleep(spacing).await;
        }

        match fetch(inst_type).await {
            Ok(records) => {
                info!("Loaded {} {} {}", records.len(), inst_type, what);
                all.extend(records);
            }
            Err(e) => warn!("Failed to load {} {}: {}", inst_type, what, e),
        }
    }

    all
}

/// Fetch hourly candles for `inst_ids` in batches of `plan.batch_size`.
///
/// Requests inside a batch run concurrently; a failed request only marks
/// its own instrument as `None`. Batches are separated by `plan.pause`.
pub async fn fetch_candle_batches(client: &OkxClient, inst_ids: &[String], plan: &BatchPlan) -> CandleMap {
    let batch_size = plan.batch_size.max(1);
    let mut candles = CandleMap::with_capacity(inst_ids.len());

    info!(
        "Fetching {} candles (limit={}) for {} instruments in batches of {}",
        crate::client::HOURLY_BAR,
        plan.limit,
        inst_ids.len(),
        batch_size
    );

    let batches: Vec<&[String]> = inst_ids.chunks(batch_size).collect();
    let batch_count = batches.len();

    for (idx, batch) in batches.into_iter().enumerate() {
        let requests = batch.iter().map(|inst_id| async move {
            match client.candles(inst_id, plan.limit).await {
                Ok(series) => {
                    debug!("{}: {} candles", inst_id, series.len());
                    (inst_id.clone(), Some(series))
                }
                Err(e) => {
                    warn!("Failed to fetch candles for {}: {}", inst_id, e);
                    (inst_id.clone(), None)
                }
            }
        });

        candles.extend(join_all(requests).await);

        if idx + 1 < batch_count && !plan.pause.is_zero() {
            tokio::time::sleep(plan.pause).await;
        }
    }

    candles
}
