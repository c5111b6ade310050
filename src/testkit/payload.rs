//! Canonical snapshot payloads in the public API's shape.
//!
//! Prices line up with [`fixture_cache`](super::cache::fixture_cache).

/// Bazaar payload with Enchanted Coal and Wither Catalyst.
pub const BAZAAR: &str = r#"{
  "success": true,
  "lastUpdated": 1700000000000,
  "products": {
    "ENCHANTED_COAL": {
      "product_id": "ENCHANTED_COAL",
      "quick_status": {
        "productId": "ENCHANTED_COAL",
        "sellPrice": 5.5,
        "buyPrice": 4.5,
        "buyMovingWeek": 7000,
        "sellMovingWeek": 6500
      }
    },
    "WITHER_CATALYST": {
      "product_id": "WITHER_CATALYST",
      "quick_status": {
        "productId": "WITHER_CATALYST",
        "sellPrice": 9500.5,
        "buyPrice": 8500.5,
        "buyMovingWeek": 1400
      }
    }
  }
}"#;

/// Auction page with Necron's Handle, Wither Catalyst and a claimed Spirit Wing.
pub const AUCTIONS: &str = r#"{
  "success": true,
  "page": 0,
  "totalPages": 1,
  "lastUpdated": 1700000000000,
  "auctions": [
    {"uuid": "h1", "item_name": "Necron's Handle", "starting_bid": 520000000, "bin": true, "claimed": false, "tier": "EPIC"},
    {"uuid": "h2", "item_name": "Necron's Handle", "starting_bid": 500000000, "bin": true, "claimed": false, "tier": "EPIC"},
    {"uuid": "h3", "item_name": "Necron's Handle", "starting_bid": 510000000, "bin": true, "claimed": false, "tier": "EPIC"},
    {"uuid": "c1", "item_name": "Wither Catalyst", "starting_bid": 12000, "bin": true, "claimed": false},
    {"uuid": "w1", "item_name": "Spirit Wing", "starting_bid": 900000, "bin": true, "claimed": true}
  ]
}"#;

/// A chest request body.
pub const REQUEST: &str = r#"{
  "items": [
    {"name": "Necron's Handle", "quantity": 1},
    {"name": "Enchanted Coal", "quantity": 1000},
    {"name": "Unknown Item", "quantity": 2}
  ],
  "chest_cost": 500000
}"#;
