//! Percentage change against a historical reference candle

use std::collections::BTreeMap;

use common::{Candle, PriceChange, TimeWindow};

/// Change of `last` relative to the open of the candle `hours_back` bars
/// ago in a most-recent-first hourly series (index 0 is the latest bar).
///
/// Insufficient when the series is too short, the reference open is
/// missing, or it is not strictly positive. A non-finite `last` is also
/// insufficient, so the result is never NaN or infinite.
pub fn price_change(candles: &[Candle], last: f64, hours_back: usize) -> PriceChange {
    if !last.is_finite() {
        return PriceChange::Insufficient;
    }

    let reference = match candles.get(hours_back).and_then(|c| c.open) {
        Some(open) if open.is_finite() && open > 0.0 => open,
        _ => return PriceChange::Insufficient,
    };

    PriceChange::from(Some((last - reference) / reference * 100.0))
}

/// Change for every supported window, computed independently per window
pub fn window_changes(candles: &[Candle], last: Option<f64>) -> BTreeMap<TimeWindow, PriceChange> {
    TimeWindow::ALL
        .into_iter()
        .map(|window| {
            let change = match last {
                Some(last) => price_change(candles, last, window.hours()),
                None => PriceChange::Insufficient,
            };
            (window, change)
        })
        .collect()
}
