//! Gainers/losers bucketing and volume pre-selection

use common::{RankedRecord, Ticker, TimeWindow};
use tracing::debug;

/// Rows presented per table
pub const ROWS_PER_TABLE: usize = 10;

/// One presented row: a real record or an explicit filler
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RankedRow<'a> {
    Record(&'a RankedRecord),
    Placeholder,
}

impl<'a> RankedRow<'a> {
    pub fn record(&self) -> Option<&'a RankedRecord> {
        match self {
            RankedRow::Record(record) => Some(record),
            RankedRow::Placeholder => None,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, RankedRow::Placeholder)
    }
}

/// Rendered gainers and losers tables for one window
#[derive(Debug, Clone, PartialEq)]
pub struct Ranking<'a> {
    pub window: TimeWindow,
    pub gainers: Vec<RankedRow<'a>>,
    pub losers: Vec<RankedRow<'a>>,
}

/// Top `n` tickers by 24h notional volume, highest first. Equal volumes keep
/// their feed order.
pub fn select_top_by_volume(tickers: &[Ticker], n: usize) -> Vec<&Ticker> {
    let mut ranked: Vec<(&Ticker, f64)> = tickers.iter().map(|t| (t, t.notional_volume())).collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
    ranked.into_iter().take(n).map(|(t, _)| t).collect()
}

/// Records whose identifier contains `search`, case-insensitively. An empty
/// search keeps everything.
pub fn filter_records<'a>(records: &'a [RankedRecord], search: &str) -> Vec<&'a RankedRecord> {
    let needle = search.trim().to_lowercase();
    records
        .iter()
        .filter(|r| needle.is_empty() || r.ticker.to_lowercase().contains(&needle))
        .collect()
}

/// Bucket `records` by their change over `window`.
///
/// Gainers are sorted by change descending, losers ascending; both sorts
/// are stable. Neutral records (zero or insufficient change) top up both
/// lists, the first half (rounded up) after the gainers, the rest after the
/// losers. Each list is then cut to `rows` and padded with placeholders.
pub fn rank<'a>(records: &[&'a RankedRecord], window: TimeWindow, rows: usize) -> Ranking<'a> {
    let mut gainers: Vec<(&'a RankedRecord, f64)> = Vec::new();
    let mut losers: Vec<(&'a RankedRecord, f64)> = Vec::new();
    let mut neutral: Vec<&'a RankedRecord> = Vec::new();

    for record in records.iter().copied() {
        match record.change(window).value() {
            Some(change) if change > 0.0 => gainers.push((record, change)),
            Some(change) if change < 0.0 => losers.push((record, change)),
            _ => neutral.push(record),
        }
    }

    debug!(
        "Distribution for {}: {} gainers, {} losers, {} neutral",
        window,
        gainers.len(),
        losers.len(),
        neutral.len()
    );

    gainers.sort_by(|a, b| b.1.total_cmp(&a.1));
    losers.sort_by(|a, b| a.1.total_cmp(&b.1));

    let split = (neutral.len() + 1) / 2;
    let (neutral_gainers, neutral_losers) = neutral.split_at(split);

    let gainers = fill(
        gainers.into_iter().map(|(r, _)| r).chain(neutral_gainers.iter().copied()),
        rows,
    );
    let losers = fill(
        losers.into_iter().map(|(r, _)| r).chain(neutral_losers.iter().copied()),
        rows,
    );

    Ranking { window, gainers, losers }
}

fn fill<'a>(records: impl Iterator<Item = &'a RankedRecord>, rows: usize) -> Vec<RankedRow<'a>> {
    let mut table: Vec<RankedRow<'a>> = records.take(rows).map(RankedRow::Record).collect();
    table.resize(rows, RankedRow::Placeholder);
    table
}
