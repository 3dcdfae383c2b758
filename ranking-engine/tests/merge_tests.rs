use std::collections::HashMap;

use common::{Candle, Instrument, Ticker, TimeWindow, TradingRule};
use ranking_engine::{build_ranked_records, dedup_by_id, index_by_id, merge_records};

fn instrument(id: &str, inst_type: &str) -> Instrument {
    Instrument {
        inst_id: id.to_string(),
        inst_type: inst_type.to_string(),
        tick_sz: "0.1".to_string(),
        ..Instrument::default()
    }
}

fn ticker(id: &str, last: &str, vol: &str) -> Ticker {
    Ticker {
        inst_id: id.to_string(),
        last: last.to_string(),
        vol_24h: vol.to_string(),
        ..Ticker::default()
    }
}

fn rule(id: &str, min: &str) -> TradingRule {
    TradingRule {
        inst_id: id.to_string(),
        min_order_size: min.to_string(),
        max_order_size: "1000".to_string(),
        ..TradingRule::default()
    }
}

#[test]
fn test_merge_preserves_instrument_order_and_count() {
    let instruments = vec![
        instrument("ETH-USDT", "SPOT"),
        instrument("BTC-USDT-SWAP", "SWAP"),
        instrument("BTC-USDT", "SPOT"),
    ];
    let tickers = index_by_id(vec![ticker("BTC-USDT", "50000", "10"), ticker("UNLISTED", "1", "1")]);
    let rules = index_by_id(vec![rule("ETH-USDT", "0.001")]);

    let merged = merge_records(&instruments, &tickers, &rules);

    let ids: Vec<&str> = merged.iter().map(|r| r.inst_id.as_str()).collect();
    assert_eq!(ids, vec!["ETH-USDT", "BTC-USDT-SWAP", "BTC-USDT"]);
    assert_eq!(merged[2].last, "50000");
    assert_eq!(merged[0].min_order_size, "0.001");
    assert_eq!(merged[0].tick_sz, "0.1");
}

#[test]
fn test_missing_trading_rule_leaves_empty_fields() {
    let instruments = vec![instrument("X-USDT-SWAP", "SWAP")];
    let tickers = index_by_id(vec![ticker("X-USDT-SWAP", "2.5", "100")]);
    let rules: HashMap<String, TradingRule> = HashMap::new();

    let merged = merge_records(&instruments, &tickers, &rules);

    assert_eq!(merged.len(), 1);
    let record = &merged[0];
    assert_eq!(record.inst_id, "X-USDT-SWAP");
    assert_eq!(record.last, "2.5");
    assert_eq!(record.min_order_size, "");
    assert_eq!(record.max_order_size, "");
    assert_eq!(record.min_order_value, "");
    assert_eq!(record.max_order_value, "");
}

#[test]
fn test_missing_ticker_leaves_empty_fields() {
    let instruments = vec![instrument("BTC-USD-240628", "FUTURES")];
    let merged = merge_records(&instruments, &HashMap::new(), &HashMap::new());

    let record = &merged[0];
    assert_eq!(record.last, "");
    assert_eq!(record.vol_24h, "");
    assert_eq!(record.ts, "");
    assert!(!record.is_active());
    assert!(!record.is_swap());
}

#[test]
fn test_index_skips_records_without_id_and_keeps_latest() {
    let index = index_by_id(vec![
        ticker("BTC-USDT", "1", "1"),
        ticker("", "2", "2"),
        ticker("BTC-USDT", "3", "3"),
    ]);

    assert_eq!(index.len(), 1);
    assert_eq!(index["BTC-USDT"].last, "3");
}

#[test]
fn test_dedup_keeps_first_occurrence() {
    let unique = dedup_by_id(vec![
        instrument("A", "SPOT"),
        instrument("B", "SPOT"),
        instrument("A", "SWAP"),
    ]);

    assert_eq!(unique.len(), 2);
    assert_eq!(unique[0].inst_type, "SPOT");
    assert_eq!(unique[1].inst_id, "B");
}

#[test]
fn test_ranked_records_one_per_ticker() {
    let tickers = vec![
        ticker("BTC-USDT-SWAP", "50000", "2"),
        ticker("ETH-USDT-SWAP", "3000", "10"),
        ticker("DOGE-USDT-SWAP", "", "10"),
    ];
    let mut series: Vec<Candle> = (0..5).map(|_| Candle::with_open(40000.0)).collect();
    series[4] = Candle::with_open(49000.0);
    let candles = HashMap::from([
        ("BTC-USDT-SWAP".to_string(), Some(series)),
        ("ETH-USDT-SWAP".to_string(), None),
    ]);

    let records = build_ranked_records(&tickers, &candles);

    assert_eq!(records.len(), 3);

    let btc = &records[0];
    assert!(btc.has_data);
    assert_eq!(btc.volume, 100000.0);
    let change = btc.change(TimeWindow::Hour4).value().unwrap();
    assert!((change - 2.0408163265306123).abs() < 1e-9);
    assert!(btc.change(TimeWindow::Hour24).is_insufficient());

    let eth = &records[1];
    assert!(!eth.has_data);
    assert_eq!(eth.volume, 30000.0);
    assert!(TimeWindow::ALL.iter().all(|w| eth.change(*w).is_insufficient()));

    let doge = &records[2];
    assert_eq!(doge.last, None);
    assert_eq!(doge.volume, 0.0);
}

#[test]
fn test_merge_is_deterministic() {
    let instruments = vec![instrument("A", "SPOT"), instrument("B", "SWAP")];
    let tickers = index_by_id(vec![ticker("B", "1", "1")]);
    let rules = index_by_id(vec![rule("A", "5")]);

    assert_eq!(
        merge_records(&instruments, &tickers, &rules),
        merge_records(&instruments, &tickers, &rules)
    );
}
