//! Unit tests for the watchlist

use chrono::{DateTime, Duration, TimeZone, Utc};
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use tradesight::core::clock::{Clock, FixedClock};
use tradesight::db::{InMemoryStore, KeyValueStore};
use tradesight::models::asset::{Asset, AssetType};
use tradesight::services::watchlist::{entry_key, Watchlist};

/// Advances one second on every read.
struct SteppingClock {
    start: DateTime<Utc>,
    ticks: AtomicI64,
}

impl SteppingClock {
    fn new() -> Self {
        Self {
            start: Utc.with_ymd_and_hms(2026, 10, 16, 8, 0, 0).unwrap(),
            ticks: AtomicI64::new(0),
        }
    }
}

impl Clock for SteppingClock {
    fn now(&self) -> DateTime<Utc> {
        self.start + Duration::seconds(self.ticks.fetch_add(1, Ordering::SeqCst))
    }
}

fn watchlist() -> (Watchlist, Arc<InMemoryStore>) {
    let store = Arc::new(InMemoryStore::new());
    let watchlist = Watchlist::new(store.clone(), Arc::new(SteppingClock::new()));
    (watchlist, store)
}

fn asset(symbol: &str, asset_type: AssetType) -> Asset {
    Asset::listing(symbol, format!("{} name", symbol), asset_type)
}

#[test]
fn test_entry_key() {
    assert_eq!(entry_key("aapl", AssetType::Stock), "watchlist:stock:AAPL");
    assert_eq!(entry_key(" bitcoin ", AssetType::Crypto), "watchlist:crypto:BITCOIN");
}

#[tokio::test]
async fn test_add_is_idempotent() {
    let (watchlist, _) = watchlist();

    assert!(watchlist.add(asset("AAPL", AssetType::Stock)).await.unwrap());
    assert!(!watchlist.add(asset("AAPL", AssetType::Stock)).await.unwrap());

    let listed = watchlist.list().await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].name, "AAPL name");
}

#[tokio::test]
async fn test_existing_entry_is_not_overwritten() {
    let (watchlist, _) = watchlist();

    watchlist.add(asset("TSLA", AssetType::Stock)).await.unwrap();
    let before = watchlist.entries().await.unwrap();

    let mut renamed = asset("tsla", AssetType::Stock);
    renamed.name = "Renamed".to_string();
    assert!(!watchlist.add(renamed).await.unwrap());

    assert_eq!(watchlist.entries().await.unwrap(), before);
}

#[tokio::test]
async fn test_same_symbol_different_types_are_distinct() {
    let (watchlist, _) = watchlist();

    assert!(watchlist.add(asset("SOL", AssetType::Stock)).await.unwrap());
    assert!(watchlist.add(asset("SOL", AssetType::Crypto)).await.unwrap());
    assert_eq!(watchlist.list().await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_list_keeps_insertion_order() {
    let (watchlist, _) = watchlist();

    for (symbol, asset_type) in [
        ("TSLA", AssetType::Stock),
        ("BITCOIN", AssetType::Crypto),
        ("AAPL", AssetType::Stock),
    ] {
        watchlist.add(asset(symbol, asset_type)).await.unwrap();
    }

    let symbols: Vec<String> = watchlist
        .list()
        .await
        .unwrap()
        .into_iter()
        .map(|asset| asset.symbol)
        .collect();
    assert_eq!(symbols, vec!["TSLA", "BITCOIN", "AAPL"]);
}

#[tokio::test]
async fn test_remove_and_contains() {
    let (watchlist, _) = watchlist();
    watchlist.add(asset("ETHEREUM", AssetType::Crypto)).await.unwrap();

    assert!(watchlist.contains("ethereum", AssetType::Crypto).await.unwrap());
    assert!(!watchlist.contains("ethereum", AssetType::Stock).await.unwrap());

    assert!(watchlist.remove("Ethereum", AssetType::Crypto).await.unwrap());
    assert!(!watchlist.remove("Ethereum", AssetType::Crypto).await.unwrap());
    assert!(!watchlist.contains("ETHEREUM", AssetType::Crypto).await.unwrap());
    assert!(watchlist.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_unreadable_entries_are_skipped() {
    let (watchlist, store) = watchlist();
    watchlist.add(asset("MSFT", AssetType::Stock)).await.unwrap();
    store
        .put("watchlist:stock:BROKEN", "not json".to_string())
        .await
        .unwrap();

    let listed = watchlist.list().await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].symbol, "MSFT");
}

#[tokio::test]
async fn test_same_instant_adds_keep_insertion_order() {
    let store = Arc::new(InMemoryStore::new());
    let clock = Arc::new(FixedClock::new(
        Utc.with_ymd_and_hms(2026, 10, 16, 12, 0, 0).unwrap(),
    ));
    let watchlist = Watchlist::new(store, clock);

    for (symbol, asset_type) in [
        ("AAPL", AssetType::Stock),
        ("SOLANA", AssetType::Crypto),
        ("MSFT", AssetType::Stock),
        ("BITCOIN", AssetType::Crypto),
    ] {
        watchlist.add(asset(symbol, asset_type)).await.unwrap();
    }

    let symbols: Vec<String> = watchlist
        .list()
        .await
        .unwrap()
        .into_iter()
        .map(|asset| asset.symbol)
        .collect();
    assert_eq!(symbols, vec!["AAPL", "SOLANA", "MSFT", "BITCOIN"]);
}

#[tokio::test]
async fn test_concurrent_adds_store_one_entry() {
    let (watchlist, _) = watchlist();
    let nvda = asset("NVDA", AssetType::Stock);

    let (first, second) = tokio::join!(watchlist.add(nvda.clone()), watchlist.add(nvda));
    let added = [first.unwrap(), second.unwrap()];
    assert_eq!(added.iter().filter(|&&added| added).count(), 1);

    let entries = watchlist.entries().await.unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].sequence, 1);
}

#[tokio::test]
async fn test_entries_without_sequence_still_load() {
    let (watchlist, store) = watchlist();
    let legacy = serde_json::json!({
        "asset": {
            "symbol": "AMZN",
            "name": "AMZN Inc.",
            "type": "stock",
            "price": 151.2,
            "change24h": 0.0,
            "changePercent24h": 0.0
        },
        "added_at": "2026-10-01T00:00:00Z"
    });
    store
        .put("watchlist:stock:AMZN", legacy.to_string())
        .await
        .unwrap();
    watchlist.add(asset("META", AssetType::Stock)).await.unwrap();

    let entries = watchlist.entries().await.unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].asset.symbol, "AMZN");
    assert_eq!(entries[0].sequence, 0);
    assert_eq!(entries[1].sequence, 1);
}
