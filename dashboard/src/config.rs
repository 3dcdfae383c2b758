//! Dashboard configuration

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use market_data::BatchPlan;

/// Dashboard configuration
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    /// Listening address
    pub addr: String,
    /// Instruments that get candle history, by notional volume
    pub top_n: usize,
    /// Concurrent candle requests per batch
    pub batch_size: usize,
    /// Pause between candle batches
    pub batch_delay: Duration,
    /// Interval of the automatic full refresh
    pub refresh_interval: Duration,
    /// Candles requested per instrument
    pub candle_limit: usize,
    /// Only SWAP tickers ending with this suffix are considered
    pub inst_suffix: String,
    /// Optional JSON file listing flagged tickers
    pub flagged_path: PathBuf,
}

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key).ok().and_then(|v| v.parse().ok()).unwrap_or(default)
}

impl Default for DashboardConfig {
    fn default() -> Self {
        let addr = match env::var("PORT").ok().and_then(|p| p.parse::<u16>().ok()) {
            Some(port) => format!("127.0.0.1:{}", port),
            None => "127.0.0.1:8080".to_string(),
        };

        Self {
            addr,
            top_n: env_or("DASHBOARD_TOP_N", 50),
            batch_size: env_or("DASHBOARD_BATCH_SIZE", 3),
            batch_delay: Duration::from_millis(env_or("DASHBOARD_BATCH_DELAY_MS", 500)),
            refresh_interval: Duration::from_secs(env_or("DASHBOARD_REFRESH_SECS", 3600)),
            candle_limit: env_or("DASHBOARD_CANDLE_LIMIT", common::TimeWindow::required_candles()),
            inst_suffix: env::var("DASHBOARD_INST_SUFFIX").unwrap_or_else(|_| "-USDT-SWAP".to_string()),
            flagged_path: env::var("FLAGGED_TICKERS_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("ginarea-tickers.json")),
        }
    }
}

impl DashboardConfig {
    /// Create a new configuration from environment variables
    pub fn from_env() -> Self {
        Self::default()
    }

    /// Override the listening address
    pub fn with_addr(mut self, addr: impl Into<String>) -> Self {
        self.addr = addr.into();
        self
    }

    /// Override how many instruments get candle history
    pub fn with_top_n(mut self, top_n: usize) -> Self {
        self.top_n = top_n;
        self
    }

    /// Override candle batching
    pub fn with_batching(mut self, batch_size: usize, batch_delay: Duration) -> Self {
        self.batch_size = batch_size;
        self.batch_delay = batch_delay;
        self
    }

    /// Override the flagged tickers file
    pub fn with_flagged_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.flagged_path = path.into();
        self
    }

    /// Candle fetch plan derived from this configuration
    pub fn batch_plan(&self) -> BatchPlan {
        BatchPlan {
            batch_size: self.batch_size,
            pause: self.batch_delay,
            limit: self.candle_limit,
        }
    }
}
