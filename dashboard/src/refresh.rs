//! Dashboard data pipeline

use common::error::{ErrorExt, Result};
use common::{InstrumentType, RankedRecord, Ticker};
use market_data::{fetch_candle_batches, OkxClient};
use ranking_engine::{build_ranked_records, dedup_by_id, select_top_by_volume};
use tracing::info;

use crate::config::DashboardConfig;

/// Fetch SWAP tickers, restrict them to the configured suffix, pull candle
/// history for the top instruments by notional volume and derive every
/// window's change.
///
/// A failed ticker fetch fails the whole run; failed candle fetches only
/// degrade their own instrument.
pub async fn load_dataset(client: &OkxClient, config: &DashboardConfig) -> Result<Vec<RankedRecord>> {
    let tickers = client
        .tickers(InstrumentType::Swap)
        .await
        .with_context(|| "loading SWAP tickers")?;
    let total = tickers.len();

    let universe: Vec<Ticker> = dedup_by_id(
        tickers
            .into_iter()
            .filter(|t| t.inst_id.ends_with(&config.inst_suffix))
            .collect(),
    );
    info!("{} of {} SWAP tickers match {}", universe.len(), total, config.inst_suffix);

    let top: Vec<String> = select_top_by_volume(&universe, config.top_n)
        .into_iter()
        .map(|t| t.inst_id.clone())
        .collect();

    let candles = fetch_candle_batches(client, &top, &config.batch_plan()).await;
    let records = build_ranked_records(&universe, &candles);

    info!(
        "Built {} records, {} with candle history",
        records.len(),
        records.iter().filter(|r| r.has_data).count()
    );

    Ok(records)
}
