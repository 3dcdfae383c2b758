#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use dashboard::{AppState, DashboardConfig};
use market_data::InMemoryMarketSource;
use serde_json::{json, Value};

pub const TICKERS: &str = "/market/tickers?instType=SWAP";

pub fn candles_endpoint(inst_id: &str) -> String {
    format!("/market/candles?instId={}&bar=1H&limit=169", inst_id)
}

pub fn candle_rows(opens: &[&str]) -> Value {
    json!(opens
        .iter()
        .enumerate()
        .map(|(i, open)| json!([format!("{}", 1_700_000_000_000i64 - i as i64 * 3_600_000), open, "0", "0", "0", "1"]))
        .collect::<Vec<_>>())
}

/// BTC (+2.04% over 4h) and ETH (-6.25% over 4h) lead by volume, SOL trails
/// and gets no candles with `top_n == 2`, DOGE-USD-SWAP is outside the
/// USDT universe.
pub fn market() -> InMemoryMarketSource {
    let source = InMemoryMarketSource::new();
    source
        .respond_ok(
            TICKERS,
            json!([
                {"instId": "SOL-USDT-SWAP", "instType": "SWAP", "last": "100", "vol24h": "10"},
                {"instId": "BTC-USDT-SWAP", "instType": "SWAP", "last": "50000", "vol24h": "100"},
                {"instId": "DOGE-USD-SWAP", "instType": "SWAP", "last": "0.1", "vol24h": "1000000000"},
                {"instId": "ETH-USDT-SWAP", "instType": "SWAP", "last": "3000", "vol24h": "1000"}
            ]),
        )
        .respond_ok(
            &candles_endpoint("BTC-USDT-SWAP"),
            candle_rows(&["50100", "50000", "49800", "49500", "49000"]),
        )
        .respond_ok(
            &candles_endpoint("ETH-USDT-SWAP"),
            candle_rows(&["3000", "3100", "3050", "3020", "3200"]),
        );
    source
}

pub fn test_config() -> DashboardConfig {
    DashboardConfig::default()
        .with_top_n(2)
        .with_batching(3, Duration::ZERO)
}

pub fn state_with(source: Arc<InMemoryMarketSource>, flagged: &[&str]) -> Arc<AppState> {
    let flagged: HashSet<String> = flagged.iter().map(|s| s.to_string()).collect();
    Arc::new(AppState::new(source, test_config(), flagged))
}
