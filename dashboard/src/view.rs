//! Pure rendering of the current dataset into gainers/losers tables

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use common::{RankedRecord, TimeWindow};
use ranking_engine::{change_class, filter_records, format_change, format_volume, rank, ChangeClass, RankedRow, ROWS_PER_TABLE};
use serde::Serialize;
use utoipa::ToSchema;

use crate::state::Status;

/// User selection driving a render
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewSelection {
    pub window: TimeWindow,
    /// Case-insensitive substring filter on the instrument identifier
    pub search: String,
}

impl ViewSelection {
    pub fn new(window: TimeWindow, search: impl Into<String>) -> Self {
        Self {
            window,
            search: search.into(),
        }
    }
}

/// One rendered table row
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct RowView {
    pub ticker: String,
    pub change: String,
    #[schema(value_type = String, example = "positive")]
    pub change_class: ChangeClass,
    pub volume: String,
    pub flagged: bool,
    pub placeholder: bool,
}

impl RowView {
    fn placeholder() -> Self {
        Self {
            ticker: "-".to_string(),
            change: "-".to_string(),
            change_class: ChangeClass::Neutral,
            volume: "-".to_string(),
            flagged: false,
            placeholder: true,
        }
    }

    fn from_record(record: &RankedRecord, window: TimeWindow, flagged: &HashSet<String>) -> Self {
        let change = record.change(window);
        Self {
            ticker: record.ticker.clone(),
            change: format_change(change),
            change_class: change_class(change),
            volume: format_volume(record.volume),
            flagged: flagged.contains(&record.ticker),
            placeholder: false,
        }
    }
}

/// Everything the page needs for one render
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct DashboardView {
    #[schema(value_type = String)]
    pub window: TimeWindow,
    pub search: String,
    #[schema(value_type = Object)]
    pub status: Status,
    pub refreshing: bool,
    pub last_updated: Option<DateTime<Utc>>,
    /// Records left after the search filter
    pub matched: usize,
    pub gainers: Vec<RowView>,
    pub losers: Vec<RowView>,
}

/// Filter by search, rank by the selected window and format every row.
///
/// Always starts from the full record set, so changing the window or the
/// search never depends on a previous render.
pub fn render_tables(
    records: &[RankedRecord],
    selection: &ViewSelection,
    flagged: &HashSet<String>,
) -> (usize, Vec<RowView>, Vec<RowView>) {
    let filtered = filter_records(records, &selection.search);
    let ranking = rank(&filtered, selection.window, ROWS_PER_TABLE);

    (
        filtered.len(),
        render_rows(&ranking.gainers, selection.window, flagged),
        render_rows(&ranking.losers, selection.window, flagged),
    )
}

fn render_rows(rows: &[RankedRow<'_>], window: TimeWindow, flagged: &HashSet<String>) -> Vec<RowView> {
    rows.iter()
        .map(|row| match row.record() {
            Some(record) => RowView::from_record(record, window, flagged),
            None => RowView::placeholder(),
        })
        .collect()
}

/// Render a full view from an optional dataset and the pipeline status
pub fn render_view(
    records: Option<(&[RankedRecord], DateTime<Utc>)>,
    status: Status,
    refreshing: bool,
    selection: &ViewSelection,
    flagged: &HashSet<String>,
) -> DashboardView {
    let (records, last_updated) = match records {
        Some((records, updated_at)) => (records, Some(updated_at)),
        None => (&[][..], None),
    };
    let (matched, gainers, losers) = render_tables(records, selection, flagged);

    DashboardView {
        window: selection.window,
        search: selection.search.clone(),
        status,
        refreshing,
        last_updated,
        matched,
        gainers,
        losers,
    }
}
