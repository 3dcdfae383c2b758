//! Configuration for the snapshot exporter

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use common::InstrumentType;

/// Configuration for the snapshot exporter
#[derive(Debug, Clone)]
pub struct ExporterConfig {
    /// Directory the CSV files are written to
    pub output_dir: PathBuf,
    /// Pause between per-type requests within one feed
    pub request_delay: Duration,
    /// Instrument types requested from the instruments endpoint
    pub instrument_types: Vec<InstrumentType>,
    /// Instrument types requested from the tickers endpoint
    pub ticker_types: Vec<InstrumentType>,
    /// File name of the full export
    pub all_file: String,
    /// File name of the export restricted to instruments with a last price
    pub active_file: String,
    /// File name of the SWAP-only export
    pub swap_file: String,
}

impl Default for ExporterConfig {
    fn default() -> Self {
        Self {
            output_dir: env::var("EXPORT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(".")),
            request_delay: Duration::from_millis(
                env::var("EXPORT_REQUEST_DELAY_MS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(100),
            ),
            instrument_types: InstrumentType::ALL.to_vec(),
            ticker_types: vec![InstrumentType::Spot, InstrumentType::Swap, InstrumentType::Futures],
            all_file: "okx_all_pairs.csv".to_string(),
            active_file: "okx_active_pairs.csv".to_string(),
            swap_file: "okx_swap_pairs.csv".to_string(),
        }
    }
}

impl ExporterConfig {
    /// Create a new configuration using environment variables
    pub fn from_env() -> Self {
        Self::default()
    }

    /// Override the output directory
    pub fn with_output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.output_dir = output_dir.into();
        self
    }

    /// Override the per-type request delay
    pub fn with_request_delay(mut self, delay: Duration) -> Self {
        self.request_delay = delay;
        self
    }
}
