//! Exporter orchestration

use std::path::PathBuf;
use std::sync::Arc;

use common::error::{ErrorExt, Result};
use common::{Instrument, MergedRecord, Ticker, TradingRule};
use market_data::{create_source, fetch_instruments, fetch_tickers, fetch_trading_rules, MarketSource, OkxClient, OkxConfig};
use ranking_engine::{dedup_by_id, index_by_id, merge_records};
use tracing::{debug, info};

use crate::config::ExporterConfig;
use crate::writer::write_csv;

/// Raw output of the three feeds for one run
#[derive(Debug, Clone, Default)]
pub struct FeedSnapshot {
    pub instruments: Vec<Instrument>,
    pub rules: Vec<TradingRule>,
    pub tickers: Vec<Ticker>,
}

/// One CSV view of a run
#[derive(Debug, Clone, PartialEq)]
pub struct ExportedFile {
    pub path: PathBuf,
    pub records: usize,
    /// False when the view was empty and nothing was written
    pub written: bool,
}

/// Outcome of an export run
#[derive(Debug, Clone, PartialEq)]
pub struct ExportSummary {
    pub instruments: usize,
    pub rules: usize,
    pub tickers: usize,
    pub all: ExportedFile,
    pub active: ExportedFile,
    pub swap: ExportedFile,
}

impl ExportSummary {
    /// Number of files actually written
    pub fn files_written(&self) -> usize {
        [&self.all, &self.active, &self.swap]
            .iter()
            .filter(|f| f.written)
            .count()
    }
}

/// Snapshot exporter service
pub struct ExportService {
    client: OkxClient,
    config: ExporterConfig,
}

impl ExportService {
    /// Create a new exporter over an existing market source
    pub fn new(source: Arc<dyn MarketSource>, config: ExporterConfig) -> Self {
        Self {
            client: OkxClient::new(source),
            config,
        }
    }

    /// Create a new exporter talking to the exchange over HTTP
    pub fn with_config(config: &ExporterConfig, okx: &OkxConfig) -> Result<Self> {
        let source = create_source(okx)?;
        Ok(Self::new(source, config.clone()))
    }

    /// The active configuration
    pub fn config(&self) -> &ExporterConfig {
        &self.config
    }

    /// Run the three feeds concurrently and wait for all of them
    pub async fn collect(&self) -> FeedSnapshot {
        let delay = self.config.request_delay;

        let (instruments, rules, tickers) = tokio::join!(
            fetch_instruments(&self.client, &self.config.instrument_types, delay),
            fetch_trading_rules(&self.client),
            fetch_tickers(&self.client, &self.config.ticker_types, delay),
        );

        info!(
            "Fetched {} instruments, {} trading rules, {} tickers",
            instruments.len(),
            rules.len(),
            tickers.len()
        );

        FeedSnapshot {
            instruments,
            rules,
            tickers,
        }
    }

    /// Join a feed snapshot into one record per distinct instrument
    pub fn merge(snapshot: &FeedSnapshot) -> Vec<MergedRecord> {
        let instruments = dedup_by_id(snapshot.instruments.clone());
        let tickers = index_by_id(snapshot.tickers.iter().cloned());
        let rules = index_by_id(snapshot.rules.iter().cloned());

        debug!(
            "Merging {} instruments with {} tickers and {} rules",
            instruments.len(),
            tickers.len(),
            rules.len()
        );

        merge_records(&instruments, &tickers, &rules)
    }

    /// Fetch, merge and write the all/active/swap views
    pub async fn run(&self) -> Result<ExportSummary> {
        info!("Starting export into {}", self.config.output_dir.display());

        let snapshot = self.collect().await;
        let records = Self::merge(&snapshot);

        tokio::fs::create_dir_all(&self.config.output_dir)
            .await
            .map_err(common::Error::from)
            .with_context(|| format!("creating {}", self.config.output_dir.display()))?;

        let active: Vec<MergedRecord> = records.iter().filter(|r| r.is_active()).cloned().collect();
        let swap: Vec<MergedRecord> = records.iter().filter(|r| r.is_swap()).cloned().collect();

        let all = self.export_view(&self.config.all_file, &records).await?;
        let active = self.export_view(&self.config.active_file, &active).await?;
        let swap = self.export_view(&self.config.swap_file, &swap).await?;

        let summary = ExportSummary {
            instruments: snapshot.instruments.len(),
            rules: snapshot.rules.len(),
            tickers: snapshot.tickers.len(),
            all,
            active,
            swap,
        };

        info!(
            "Export finished: {} records, {} active, {} swap, {} files written",
            summary.all.records,
            summary.active.records,
            summary.swap.records,
            summary.files_written()
        );

        Ok(summary)
    }

    async fn export_view(&self, file_name: &str, records: &[MergedRecord]) -> Result<ExportedFile> {
        let path = self.config.output_dir.join(file_name);
        let written = write_csv(&path, records)
            .await
            .with_context(|| format!("writing {}", path.display()))?;

        Ok(ExportedFile {
            path,
            records: records.len(),
            written,
        })
    }
}
