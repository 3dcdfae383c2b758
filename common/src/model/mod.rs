//! Domain models for the market scanner

pub mod instrument;
pub mod market;
pub mod record;

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Anything keyed by an exchange instrument identifier
pub trait Identified {
    /// Instrument identifier (e.g. "BTC-USDT-SWAP"); empty when the exchange omitted it
    fn inst_id(&self) -> &str;
}

/// Deserialize an exchange field as text, whatever JSON type it arrived as.
///
/// The exchange sends numbers as strings, but absent, null or re-typed fields
/// must not reject the whole record: they collapse to the empty string.
pub fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => s,
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    })
}

/// Parse an exchange numeric string, rejecting empty and non-finite values
pub fn parse_number(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}
