//! Presentation helpers for volumes and percentage changes

use common::PriceChange;
use serde::Serialize;

/// Rendered in place of a change that could not be computed
pub const INSUFFICIENT_MARKER: &str = "…";

/// Scale a magnitude to K/M/B with two decimals.
///
/// Zero and non-finite input render as a bare `"0"`.
pub fn format_volume(volume: f64) -> String {
    if volume == 0.0 || !volume.is_finite() {
        return "0".to_string();
    }

    if volume >= 1e9 {
        format!("{:.2}B", volume / 1e9)
    } else if volume >= 1e6 {
        format!("{:.2}M", volume / 1e6)
    } else if volume >= 1e3 {
        format!("{:.2}K", volume / 1e3)
    } else {
        format!("{:.2}", volume)
    }
}

/// `"2.04%"`, or the insufficient marker
pub fn format_change(change: PriceChange) -> String {
    match change {
        PriceChange::Percent(p) => format!("{:.2}%", p),
        PriceChange::Insufficient => INSUFFICIENT_MARKER.to_string(),
    }
}

/// Styling class of a change cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeClass {
    Positive,
    Negative,
    Neutral,
}

impl ChangeClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeClass::Positive => "positive",
            ChangeClass::Negative => "negative",
            ChangeClass::Neutral => "neutral",
        }
    }
}

pub fn change_class(change: PriceChange) -> ChangeClass {
    match change.value() {
        Some(p) if p > 0.0 => ChangeClass::Positive,
        Some(p) if p < 0.0 => ChangeClass::Negative,
        _ => ChangeClass::Neutral,
    }
}
