// This is a metapackage for cross-crate tests
// Re-export crates as modules

pub use common;
pub use dashboard;
pub use market_data;
pub use ranking_engine;
pub use snapshot_exporter;
