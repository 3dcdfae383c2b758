// File: tests/test_helpers.rs

use std::path::PathBuf;

use market_data::InMemoryMarketSource;
use serde_json::{json, Value};
use uuid::Uuid;

/// Unique scratch directory under the system temp dir
pub fn scratch_dir() -> PathBuf {
    std::env::temp_dir().join(format!("okx-pulse-{}", Uuid::new_v4()))
}

fn candle_rows(opens: &[f64]) -> Value {
    json!(opens
        .iter()
        .enumerate()
        .map(|(i, open)| json!([format!("{}", 1_700_000_000_000i64 - i as i64 * 3_600_000), open.to_string(), "0", "0", "0", "1"]))
        .collect::<Vec<_>>())
}

/// One exchange serving both pipelines: a spot pair, two USDT swaps with a
/// week of hourly candles and a coin-margined swap
pub fn exchange() -> InMemoryMarketSource {
    let source = InMemoryMarketSource::new();

    let swap_tickers = json!([
        {"instId": "BTC-USDT-SWAP", "instType": "SWAP", "last": "50000", "vol24h": "200", "ts": "1700000000000"},
        {"instId": "ETH-USDT-SWAP", "instType": "SWAP", "last": "2900", "vol24h": "1000", "ts": "1700000000000"},
        {"instId": "BTC-USD-SWAP", "instType": "SWAP", "last": "50001", "vol24h": "5000", "ts": "1700000000000"}
    ]);

    // BTC: flat at 49000 for a week; ETH: opened every hour at 3000
    let btc: Vec<f64> = (0..169).map(|_| 49000.0).collect();
    let eth: Vec<f64> = (0..169).map(|_| 3000.0).collect();

    source
        .respond_ok(
            "/public/instruments?instType=SPOT",
            json!([{"instId": "BTC-USDT", "instType": "SPOT", "baseCcy": "BTC", "quoteCcy": "USDT"}]),
        )
        .respond_ok(
            "/public/instruments?instType=SWAP",
            json!([
                {"instId": "BTC-USDT-SWAP", "instType": "SWAP", "settleCcy": "USDT", "ctVal": "0.01"},
                {"instId": "ETH-USDT-SWAP", "instType": "SWAP", "settleCcy": "USDT", "ctVal": "0.1"},
                {"instId": "BTC-USD-SWAP", "instType": "SWAP", "settleCcy": "BTC", "ctVal": "100"}
            ]),
        )
        .respond_ok("/public/instruments?instType=FUTURES", json!([]))
        .respond_ok("/public/instruments?instType=OPTION", json!([]))
        .respond_ok(
            "/public/trading-rules",
            json!([{"instId": "BTC-USDT-SWAP", "minOrderSize": "1", "maxOrderSize": "10000"}]),
        )
        .respond_ok("/market/tickers?instType=SPOT", json!([]))
        .respond_ok("/market/tickers?instType=SWAP", swap_tickers)
        .respond_ok("/market/tickers?instType=FUTURES", json!([]))
        .respond_ok("/market/candles?instId=BTC-USDT-SWAP&bar=1H&limit=169", candle_rows(&btc))
        .respond_ok("/market/candles?instId=ETH-USDT-SWAP&bar=1H&limit=169", candle_rows(&eth));

    source
}
