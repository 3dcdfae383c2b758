//! Availability check for the auxiliary market statistics endpoints

use common::InstrumentType;
use market_data::OkxClient;
use serde::Serialize;
use tracing::{info, warn};

/// Samples logged per endpoint
const SAMPLE_LIMIT: usize = 3;

/// Instrument probed when none is given
pub const DEFAULT_PROBE_INST_ID: &str = "BTC-USDT-SWAP";

/// Which statistics endpoints answered with data
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProbeReport {
    pub inst_id: String,
    pub funding_rate: bool,
    pub open_interest: bool,
    pub funding_rate_history: bool,
}

impl ProbeReport {
    /// Whether every endpoint returned at least one record
    pub fn all_available(&self) -> bool {
        self.funding_rate && self.open_interest && self.funding_rate_history
    }
}

/// Query funding rate, SWAP open interest and funding history for `inst_id`,
/// logging a few samples of each
pub async fn probe_market_stats(client: &OkxClient, inst_id: &str) -> ProbeReport {
    info!("Probing market statistics for {}", inst_id);

    let funding_rate = report("funding rate", client.funding_rate(inst_id).await);
    let open_interest = report("open interest", client.open_interest(InstrumentType::Swap).await);
    let funding_rate_history = report("funding rate history", client.funding_rate_history(inst_id).await);

    let probe = ProbeReport {
        inst_id: inst_id.to_string(),
        funding_rate,
        open_interest,
        funding_rate_history,
    };

    info!(
        "Availability for {}: funding rate={}, open interest={}, funding rate history={}",
        probe.inst_id,
        yes_no(probe.funding_rate),
        yes_no(probe.open_interest),
        yes_no(probe.funding_rate_history)
    );

    probe
}

fn report<T: Serialize>(what: &str, result: common::Result<Vec<T>>) -> bool {
    match result {
        Ok(records) if records.is_empty() => {
            warn!("{}: no data", what);
            false
        }
        Ok(records) => {
            info!("{}: {} records", what, records.len());
            for record in records.iter().take(SAMPLE_LIMIT) {
                match serde_json::to_string(record) {
                    Ok(json) => info!("  {}", json),
                    Err(e) => warn!("  unprintable sample: {}", e),
                }
            }
            true
        }
        Err(e) => {
            warn!("{}: unavailable: {}", what, e);
            false
        }
    }
}

fn yes_no(available: bool) -> &'static str {
    if available {
        "available"
    } else {
        "unavailable"
    }
}
