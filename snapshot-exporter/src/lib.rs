//! Snapshot exporter: instruments, trading rules and tickers merged into CSV views

pub mod config;
pub mod probe;
pub mod service;
pub mod writer;

pub use config::ExporterConfig;
pub use probe::{probe_market_stats, ProbeReport, DEFAULT_PROBE_INST_ID};
pub use service::{ExportService, ExportSummary, ExportedFile, FeedSnapshot};
pub use writer::{to_csv_bytes, write_csv};
