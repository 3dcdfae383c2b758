use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use common::{InstrumentType, MergedRecord};
use market_data::{InMemoryMarketSource, OkxClient};
use serde_json::json;
use snapshot_exporter::{probe_market_stats, to_csv_bytes, write_csv, ExportService, ExporterConfig};
use uuid::Uuid;

fn temp_dir() -> PathBuf {
    std::env::temp_dir().join(format!("okx-export-{}", Uuid::new_v4()))
}

fn test_config(dir: &PathBuf) -> ExporterConfig {
    ExporterConfig::default()
        .with_output_dir(dir)
        .with_request_delay(Duration::ZERO)
}

/// Two SPOT instruments (one without a ticker), one SWAP with a ticker but no
/// trading rule, every other feed empty
fn market() -> InMemoryMarketSource {
    let source = InMemoryMarketSource::new();
    source
        .respond_ok(
            "/public/instruments?instType=SPOT",
            json!([
                {"instId": "BTC-USDT", "instType": "SPOT", "baseCcy": "BTC", "quoteCcy": "USDT", "tickSz": "0.1"},
                {"instId": "DOGE-USDT", "instType": "SPOT", "baseCcy": "DOGE", "quoteCcy": "USDT"}
            ]),
        )
        .respond_ok(
            "/public/instruments?instType=SWAP",
            json!([{"instId": "BTC-USDT-SWAP", "instType": "SWAP", "settleCcy": "USDT", "ctVal": "0.01"}]),
        )
        .respond_ok("/public/instruments?instType=FUTURES", json!([]))
        .respond_ok("/public/instruments?instType=OPTION", json!([]))
        .respond_ok(
            "/public/trading-rules",
            json!([{"instId": "BTC-USDT", "minOrderSize": "0.0001", "maxOrderSize": "100", "minOrderValue": "1", "maxOrderValue": "1000000"}]),
        )
        .respond_ok(
            "/market/tickers?instType=SPOT",
            json!([{"instId": "BTC-USDT", "instType": "SPOT", "last": "50000", "vol24h": "10"}]),
        )
        .respond_ok(
            "/market/tickers?instType=SWAP",
            json!([{"instId": "BTC-USDT-SWAP", "instType": "SWAP", "last": "50010", "vol24h": "1000"}]),
        )
        .respond_ok("/market/tickers?instType=FUTURES", json!([]));
    source
}

fn lines(path: &PathBuf) -> Vec<String> {
    std::fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect()
}

#[tokio::test]
async fn test_export_writes_three_views() {
    let dir = temp_dir();
    let service = ExportService::new(Arc::new(market()), test_config(&dir));

    let summary = service.run().await.unwrap();

    assert_eq!(summary.instruments, 3);
    assert_eq!(summary.rules, 1);
    assert_eq!(summary.tickers, 2);
    assert_eq!(summary.files_written(), 3);

    let all = lines(&summary.all.path);
    assert_eq!(all.len(), 4);
    assert!(all[0].starts_with("instId,instType,baseCcy,quoteCcy,settleCcy"));
    assert!(all[0].ends_with("minOrderSize,maxOrderSize,minOrderValue,maxOrderValue"));
    assert_eq!(all[0].split(',').count(), 40);
    assert!(all[1].starts_with("BTC-USDT,SPOT,BTC,USDT,"));
    assert!(all[2].starts_with("DOGE-USDT,SPOT,DOGE,USDT,"));
    assert!(all[3].starts_with("BTC-USDT-SWAP,SWAP,"));

    let active = lines(&summary.active.path);
    assert_eq!(summary.active.records, 2);
    assert!(active.iter().all(|l| !l.starts_with("DOGE-USDT")));

    let swap = lines(&summary.swap.path);
    assert_eq!(swap.len(), 2);
    assert!(swap[1].starts_with("BTC-USDT-SWAP,SWAP,,,USDT,0.01,"));

    std::fs::remove_dir_all(&dir).ok();
}

#[tokio::test]
async fn test_missing_rule_leaves_order_fields_empty() {
    let dir = temp_dir();
    let service = ExportService::new(Arc::new(market()), test_config(&dir));

    let summary = service.run().await.unwrap();

    let swap = lines(&summary.swap.path);
    assert!(swap[1].contains(",50010,"));
    assert!(swap[1].ends_with(",,,,"));

    let all = lines(&summary.all.path);
    assert!(all[1].ends_with(",0.0001,100,1,1000000"));

    std::fs::remove_dir_all(&dir).ok();
}

#[tokio::test]
async fn test_rerun_is_byte_identical() {
    let first_dir = temp_dir();
    let second_dir = temp_dir();
    let source = Arc::new(market());

    let first = ExportService::new(source.clone(), test_config(&first_dir)).run().await.unwrap();
    let second = ExportService::new(source, test_config(&second_dir)).run().await.unwrap();

    for (a, b) in [
        (&first.all.path, &second.all.path),
        (&first.active.path, &second.active.path),
        (&first.swap.path, &second.swap.path),
    ] {
        assert_eq!(std::fs::read(a).unwrap(), std::fs::read(b).unwrap());
    }

    std::fs::remove_dir_all(&first_dir).ok();
    std::fs::remove_dir_all(&second_dir).ok();
}

#[tokio::test]
async fn test_duplicate_instruments_are_collapsed() {
    let source = market();
    source.respond_ok(
        "/public/instruments?instType=FUTURES",
        json!([{"instId": "BTC-USDT", "instType": "SPOT"}]),
    );
    let service = ExportService::new(Arc::new(source), test_config(&temp_dir()));

    let snapshot = service.collect().await;
    let records = ExportService::merge(&snapshot);

    assert_eq!(snapshot.instruments.len(), 4);
    assert_eq!(records.len(), 3);
    assert_eq!(records[0].base_ccy, "BTC");
}

#[tokio::test]
async fn test_failing_feeds_produce_no_files() {
    let dir = temp_dir();
    let source = InMemoryMarketSource::new();
    source.respond_api_error("/public/trading-rules", "50001", "Service temporarily unavailable");
    let service = ExportService::new(Arc::new(source), test_config(&dir));

    let summary = service.run().await.unwrap();

    assert_eq!(summary.files_written(), 0);
    assert!(!summary.all.written);
    assert!(!summary.all.path.exists());

    std::fs::remove_dir_all(&dir).ok();
}

#[tokio::test]
async fn test_empty_view_is_skipped() {
    let dir = temp_dir();
    let source = market();
    source
        .respond_ok("/public/instruments?instType=SWAP", json!([]))
        .respond_ok("/market/tickers?instType=SWAP", json!([]));
    let service = ExportService::new(Arc::new(source), test_config(&dir));

    let summary = service.run().await.unwrap();

    assert!(summary.all.written);
    assert!(summary.active.written);
    assert!(!summary.swap.written);
    assert_eq!(summary.swap.records, 0);
    assert!(!summary.swap.path.exists());

    std::fs::remove_dir_all(&dir).ok();
}

#[tokio::test]
async fn test_feeds_are_collected_concurrently() {
    let source = market().with_latency(Duration::from_millis(150));
    let source = Arc::new(source);
    let service = ExportService::new(source.clone(), test_config(&temp_dir()));

    let started = std::time::Instant::now();
    let snapshot = service.collect().await;
    let elapsed = started.elapsed();

    assert_eq!(snapshot.instruments.len(), 3);
    assert_eq!(snapshot.rules.len(), 1);
    assert_eq!(snapshot.tickers.len(), 2);
    assert_eq!(source.total_hits(), 8);

    // Instruments take four sequential calls, the longest feed; running the
    // three feeds one after another would need eight (1200ms)
    assert!(elapsed >= Duration::from_millis(600));
    assert!(elapsed < Duration::from_millis(1000), "collect took {:?}", elapsed);
}

#[test]
fn test_csv_quotes_special_characters() {
    let record = MergedRecord {
        inst_id: "ODD,ID".to_string(),
        inst_type: "say \"hi\"".to_string(),
        base_ccy: "line\nbreak".to_string(),
        ..MergedRecord::default()
    };

    let bytes = to_csv_bytes(&[record]).unwrap();
    let text = String::from_utf8(bytes).unwrap();
    let body = text.split_once('\n').unwrap().1;

    assert!(body.starts_with("\"ODD,ID\",\"say \"\"hi\"\"\",\"line\nbreak\","));
    assert!(text.ends_with('\n'));
}

#[tokio::test]
async fn test_write_csv_skips_empty_input() {
    let dir = temp_dir();
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("empty.csv");

    assert!(!write_csv(&path, &[]).await.unwrap());
    assert!(!path.exists());

    std::fs::remove_dir_all(&dir).ok();
}

#[tokio::test]
async fn test_probe_reports_availability() {
    let source = InMemoryMarketSource::new();
    source
        .respond_ok(
            "/public/funding-rate?instId=BTC-USDT-SWAP",
            json!([{"instId": "BTC-USDT-SWAP", "fundingRate": "0.0001", "fundingTime": "1700000000000"}]),
        )
        .respond_ok(
            "/public/open-interest?instType=SWAP",
            json!([{"instId": "BTC-USDT-SWAP", "instType": "SWAP", "oi": "100", "oiCcy": "1"}]),
        )
        .respond_api_error("/public/funding-rate-history?instId=BTC-USDT-SWAP", "51001", "Instrument ID does not exist");
    let source = Arc::new(source);
    let client = OkxClient::new(source.clone());

    let report = probe_market_stats(&client, "BTC-USDT-SWAP").await;

    assert!(report.funding_rate);
    assert!(report.open_interest);
    assert!(!report.funding_rate_history);
    assert!(!report.all_available());
    assert_eq!(source.total_hits(), 3);
}

#[test]
fn test_default_config() {
    let config = ExporterConfig::default();
    assert_eq!(config.instrument_types, InstrumentType::ALL.to_vec());
    assert_eq!(config.ticker_types.len(), 3);
    assert_eq!(config.all_file, "okx_all_pairs.csv");
    assert_eq!(config.swap_file, "okx_swap_pairs.csv");
}
