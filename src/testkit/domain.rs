//! Builders for quotes and chest entries used across tests.

use chrono::{DateTime, TimeDelta, Utc};
use rust_decimal::Decimal;

use crate::domain::{AuctionQuote, BazaarQuote, ChestEntry, ChestRequest};

/// Bazaar quote observed now. The instant-buy side is one coin above the
/// instant-sell side.
pub fn bazaar(item: &str, instant_sell: Decimal) -> BazaarQuote {
    BazaarQuote::new(item, instant_sell + Decimal::ONE, instant_sell, Utc::now())
}

/// Auction quote observed now.
pub fn auction(item: &str, lowest_bin: Decimal, listings: u32) -> AuctionQuote {
    AuctionQuote::new(item, lowest_bin, listings, Utc::now())
}

/// A point `secs` seconds before now.
pub fn ago(secs: i64) -> DateTime<Utc> {
    Utc::now() - TimeDelta::seconds(secs)
}

/// Chest entry shorthand.
pub fn entry(item: &str, quantity: i64) -> ChestEntry {
    ChestEntry::new(item, quantity)
}

/// A validated request. Panics on invalid input.
pub fn request(entries: &[(&str, i64)], chest_cost: Decimal) -> ChestRequest {
    let entries = entries.iter().map(|(item, qty)| entry(item, *qty)).collect();
    ChestRequest::try_new(entries, chest_cost).expect("fixture request must be valid")
}
