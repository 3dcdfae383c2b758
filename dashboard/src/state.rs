//! Dashboard state shared by the HTTP handlers and the refresh timer

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use common::RankedRecord;
use market_data::{MarketSource, OkxClient};
use serde::Serialize;
use tokio::sync::RwLock;
use tracing::{debug, error, info};

use crate::config::DashboardConfig;
use crate::refresh::load_dataset;

/// Text shown while the first dataset is loading
pub const LOADING_MESSAGE: &str = "Loading data...";
/// Text shown when the last refresh failed
pub const FAILURE_MESSAGE: &str = "Failed to load data. Please try again.";

/// One complete refresh result, replaced as a whole
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub records: Vec<RankedRecord>,
    pub updated_at: DateTime<Utc>,
}

/// Pipeline status
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum Status {
    Loading,
    Ready,
    Failed { message: String },
}

/// Result of asking for a refresh
#[derive(Debug, Clone, PartialEq)]
pub enum RefreshOutcome {
    /// A background refresh was spawned
    Started,
    /// The refresh ran and the dataset was replaced
    Completed { records: usize },
    /// The refresh ran and failed; the previous dataset is kept
    Failed(String),
    /// Another refresh is in flight; nothing was done
    AlreadyRunning,
}

/// Clears the in-flight flag when dropped
pub struct RefreshGuard {
    flag: Arc<AtomicBool>,
}

impl Drop for RefreshGuard {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

/// Application state shared across handlers
pub struct AppState {
    client: OkxClient,
    config: DashboardConfig,
    snapshot: RwLock<Option<Arc<Snapshot>>>,
    status: RwLock<Status>,
    in_flight: Arc<AtomicBool>,
    flagged: HashSet<String>,
}

impl AppState {
    pub fn new(source: Arc<dyn MarketSource>, config: DashboardConfig, flagged: HashSet<String>) -> Self {
        Self {
            client: OkxClient::new(source),
            config,
            snapshot: RwLock::new(None),
            status: RwLock::new(Status::Loading),
            in_flight: Arc::new(AtomicBool::new(false)),
            flagged,
        }
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    pub fn flagged(&self) -> &HashSet<String> {
        &self.flagged
    }

    /// Current dataset, if any refresh has succeeded
    pub async fn snapshot(&self) -> Option<Arc<Snapshot>> {
        self.snapshot.read().await.clone()
    }

    pub async fn status(&self) -> Status {
        self.status.read().await.clone()
    }

    /// Whether a refresh is running
    pub fn is_refreshing(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Claim the in-flight flag; `None` if a refresh is already running
    pub fn begin_refresh(&self) -> Option<RefreshGuard> {
        self.in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| RefreshGuard {
                flag: Arc::clone(&self.in_flight),
            })
    }

    /// Run a refresh to completion, unless one is already running
    pub async fn refresh(&self) -> RefreshOutcome {
        match self.begin_refresh() {
            Some(guard) => self.run_refresh(guard).await,
            None => {
                debug!("Refresh already in flight, skipping");
                RefreshOutcome::AlreadyRunning
            }
        }
    }

    /// Start a refresh in the background, unless one is already running
    pub fn spawn_refresh(self: &Arc<Self>) -> RefreshOutcome {
        match self.begin_refresh() {
            Some(guard) => {
                let state = Arc::clone(self);
                tokio::spawn(async move {
                    state.run_refresh(guard).await;
                });
                RefreshOutcome::Started
            }
            None => {
                debug!("Refresh already in flight, skipping");
                RefreshOutcome::AlreadyRunning
            }
        }
    }

    async fn run_refresh(&self, _guard: RefreshGuard) -> RefreshOutcome {
        info!("Refreshing dashboard data");
        *self.status.write().await = Status::Loading;

        match load_dataset(&self.client, &self.config).await {
            Ok(records) => {
                let count = records.len();
                let snapshot = Snapshot {
                    records,
                    updated_at: Utc::now(),
                };
                *self.snapshot.write().await = Some(Arc::new(snapshot));
                *self.status.write().await = Status::Ready;
                info!("Dashboard data refreshed: {} records", count);
                RefreshOutcome::Completed { records: count }
            }
            Err(e) => {
                error!("Error loading data: {}", e);
                let message = e.to_string();
                *self.status.write().await = Status::Failed {
                    message: message.clone(),
                };
                RefreshOutcome::Failed(message)
            }
        }
    }
}

/// Re-run the pipeline every `config.refresh_interval`. Ticks that land
/// while a refresh is in flight are skipped.
pub fn spawn_auto_refresh(state: Arc<AppState>) -> tokio::task::JoinHandle<()> {
    let period = state.config.refresh_interval.max(std::time::Duration::from_secs(1));
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
        // First tick fires immediately; the initial load is triggered separately
        ticker.tick().await;

        loop {
            ticker.tick().await;
            debug!("Auto-refresh tick");
            state.refresh().await;
        }
    })
}
