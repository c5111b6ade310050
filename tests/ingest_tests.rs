use std::fs;
use std::sync::Arc;

use chestworth::cache::{MemoryPriceCache, PriceCache};
use chestworth::calculator::ChestCalculator;
use chestworth::config::SnapshotConfig;
use chestworth::domain::{ItemName, PriceSourceKind, UnpricedReason};
use chestworth::error::SnapshotError;
use chestworth::ingest::{load_auctions, load_bazaar};
use chestworth::pricing::{PriceResolver, StalenessPolicy};
use chestworth::refresh::SnapshotRefresher;
use chestworth::testkit::domain::request;
use chestworth::testkit::payload;
use rust_decimal_macros::dec;
use tempfile::TempDir;

fn snapshot_dir() -> TempDir {
    let dir = tempfile::tempdir().expect("create temp dir");
    fs::write(dir.path().join("bazaar.json"), payload::BAZAAR).expect("write bazaar");
    fs::write(dir.path().join("auctions.json"), payload::AUCTIONS).expect("write auctions");
    dir
}

#[test]
fn bazaar_file_loads_instant_sell_side() {
    let dir = snapshot_dir();
    let snapshot = load_bazaar(&dir.path().join("bazaar.json")).unwrap();

    let coal = snapshot
        .quotes
        .iter()
        .find(|q| q.item == ItemName::new("Enchanted Coal"))
        .unwrap();
    assert_eq!(coal.instant_sell_price, dec!(4.5));
    assert_eq!(coal.instant_buy_price, dec!(5.5));
    assert_eq!(coal.weekly_volume, Some(7000));
}

#[test]
fn auction_file_aggregates_listings() {
    let dir = snapshot_dir();
    let snapshot = load_auctions(&dir.path().join("auctions.json")).unwrap();

    let handle = snapshot
        .quotes
        .iter()
        .find(|q| q.item == ItemName::new("Necron's Handle"))
        .unwrap();
    assert_eq!(handle.lowest_bin_price, dec!(500000000));
    assert_eq!(handle.sample_size, 3);

    let wing = snapshot
        .quotes
        .iter()
        .find(|q| q.item == ItemName::new("Spirit Wing"))
        .unwrap();
    assert_eq!(wing.sample_size, 0);
}

#[test]
fn loaded_snapshots_price_a_chest() {
    let dir = snapshot_dir();
    let cache = Arc::new(MemoryPriceCache::new());
    let refresher = SnapshotRefresher::new(
        Arc::clone(&cache),
        SnapshotConfig {
            bazaar_path: Some(dir.path().join("bazaar.json")),
            auction_path: Some(dir.path().join("auctions.json")),
            ..SnapshotConfig::default()
        },
    );
    let report = refresher.load_once().unwrap();
    assert_eq!(report.bazaar, Some(2));
    assert_eq!(report.auction, Some(3));
    assert!(cache.last_refreshed(PriceSourceKind::Auction).is_some());

    let resolver =
        PriceResolver::new(Arc::clone(&cache) as Arc<dyn PriceCache>).with_staleness(StalenessPolicy::disabled());
    let result = ChestCalculator::new(resolver)
        .calculate_chest_profit(&request(
            &[
                ("Necron's Handle", 1),
                ("Enchanted Coal", 1000),
                ("Spirit Wing", 1),
            ],
            dec!(500000),
        ));

    assert_eq!(result.total_value, dec!(500004500));
    assert_eq!(result.profit, dec!(499504500));
    assert_eq!(result.lines[2].reason, Some(UnpricedReason::NoActiveListings));
    assert_eq!(
        result.freshness.bazaar.map(|t| t.timestamp_millis()),
        Some(1_700_000_000_000)
    );
}

#[test]
fn old_snapshots_are_flagged_stale() {
    let dir = snapshot_dir();
    let cache = Arc::new(MemoryPriceCache::new());
    SnapshotRefresher::new(
        Arc::clone(&cache),
        SnapshotConfig {
            bazaar_path: Some(dir.path().join("bazaar.json")),
            ..SnapshotConfig::default()
        },
    )
    .load_once()
    .unwrap();

    let result = ChestCalculator::new(PriceResolver::new(cache))
        .calculate_chest_profit(&request(&[("Enchanted Coal", 1)], dec!(0)));
    assert!(result.lines[0].stale);
    assert_eq!(result.total_value, dec!(4));
}

#[test]
fn unsuccessful_payload_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bazaar.json");
    fs::write(&path, r#"{"success": false, "cause": "rate limited"}"#).unwrap();

    let err = load_bazaar(&path).unwrap_err();
    assert!(matches!(
        err,
        SnapshotError::Unsuccessful {
            market: PriceSourceKind::Bazaar
        }
    ));
}

#[test]
fn auction_file_carries_tier() {
    let dir = snapshot_dir();
    let snapshot = load_auctions(&dir.path().join("auctions.json")).unwrap();

    let handle = snapshot
        .quotes
        .iter()
        .find(|q| q.item == ItemName::new("Necron's Handle"))
        .unwrap();
    assert_eq!(handle.tier.as_deref(), Some("EPIC"));
    assert_eq!(snapshot.active.len(), 4);
}

#[test]
fn one_bad_row_does_not_fail_the_snapshot() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("auctions.json");
    fs::write(
        &path,
        r#"{"success": true, "auctions": [
            {"uuid": "x", "item_name": "Necron's Handle", "bin": true},
            {"uuid": "y", "item_name": "Necron's Handle", "starting_bid": 500000000, "bin": true}
        ]}"#,
    )
    .unwrap();

    let snapshot = load_auctions(&path).unwrap();
    assert_eq!(snapshot.skipped, 1);
    assert_eq!(snapshot.quotes.len(), 1);
    assert_eq!(snapshot.quotes[0].lowest_bin_price, dec!(500000000));
}

#[test]
fn vanished_listings_feed_auction_sales() {
    let dir = snapshot_dir();
    let auctions = dir.path().join("auctions.json");
    let cache = Arc::new(MemoryPriceCache::new());
    let refresher = SnapshotRefresher::new(
        Arc::clone(&cache),
        SnapshotConfig {
            auction_path: Some(auctions.clone()),
            ..SnapshotConfig::default()
        },
    );
    refresher.load_once().unwrap();

    // h2 sold; lastUpdated moves forward twenty minutes
    let next = payload::AUCTIONS
        .replace("1700000000000", "1700001200000")
        .replace(
            r#"{"uuid": "h2", "item_name": "Necron's Handle", "starting_bid": 500000000, "bin": true, "claimed": false, "tier": "EPIC"},"#,
            "",
        );
    fs::write(&auctions, next).unwrap();
    refresher.cycle();

    let handle = ItemName::new("Necron's Handle");
    assert_eq!(cache.auction_sales_per_day(&handle), Some(dec!(0.14)));
    assert_eq!(cache.auction_sales_per_day(&ItemName::new("Wither Catalyst")), None);

    let appraisal = ChestCalculator::new(PriceResolver::new(cache)).appraise(&handle, 1);
    assert_eq!(appraisal.sales_source, Some(PriceSourceKind::Auction));
    assert_eq!(appraisal.market(), Some(PriceSourceKind::Auction));
}
