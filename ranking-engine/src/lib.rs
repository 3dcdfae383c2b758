//! Merge, change and ranking core shared by the exporter and the dashboard.
//!
//! Everything here is synchronous and side-effect free apart from logging.

pub mod change;
pub mod format;
pub mod merge;
pub mod ranking;

pub use change::{price_change, window_changes};
pub use format::{change_class, format_change, format_volume, ChangeClass, INSUFFICIENT_MARKER};
pub use merge::{build_ranked_records, dedup_by_id, index_by_id, merge_records};
pub use ranking::{filter_records, rank, select_top_by_volume, RankedRow, Ranking, ROWS_PER_TABLE};
