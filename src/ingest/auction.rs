//! Auction house endpoint payloads.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use super::{timestamp_from_millis, AuctionSnapshot};
use crate::cache::ActiveListings;
use crate::domain::{AuctionQuote, Coins, ItemName, PriceSourceKind};
use crate::error::SnapshotError;

/// One page of the active auctions endpoint. Listings stay raw until decoded
/// one by one.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuctionPage {
    pub success: bool,
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub last_updated: Option<i64>,
    #[serde(default)]
    pub auctions: Vec<Value>,
}

#[derive(Debug, Deserialize)]
pub struct AuctionListing {
    #[serde(default)]
    pub uuid: Option<String>,
    pub item_name: String,
    pub starting_bid: u64,
    #[serde(default)]
    pub bin: bool,
    #[serde(default)]
    pub claimed: bool,
    #[serde(default)]
    pub tier: Option<String>,
}

impl AuctionListing {
    /// Buy-it-now and still purchasable.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.bin && !self.claimed
    }
}

#[derive(Default)]
struct Lowest {
    price: Option<Coins>,
    tier: Option<String>,
    listings: u32,
}

impl Lowest {
    fn offer(&mut self, price: Coins, tier: Option<String>) {
        if self.price.map_or(true, |lowest| price < lowest) {
            self.price = Some(price);
            self.tier = tier;
        }
        self.listings = self.listings.saturating_add(1);
    }

    fn into_quote(self, item: ItemName, observed_at: DateTime<Utc>) -> AuctionQuote {
        match self.price {
            Some(price) => {
                let quote = AuctionQuote::new(item, price, self.listings, observed_at);
                match self.tier {
                    Some(tier) => quote.with_tier(tier),
                    None => quote,
                }
            }
            None => AuctionQuote::unlisted(item, observed_at),
        }
    }
}

/// Decode a snapshot holding either one page or an array of pages.
fn decode_pages(json: &str) -> Result<Vec<AuctionPage>, serde_json::Error> {
    match serde_json::from_str(json)? {
        Value::Array(pages) => pages.into_iter().map(serde_json::from_value).collect(),
        page => Ok(vec![serde_json::from_value(page)?]),
    }
}

/// Parse auction pages into per-item lowest BIN quotes.
///
/// The first page must succeed. Later pages reporting failure are skipped,
/// as are listings that fail to decode.
pub fn parse_auctions(
    json: &str,
    fetched_at: DateTime<Utc>,
) -> Result<AuctionSnapshot, SnapshotError> {
    let pages = decode_pages(json).map_err(|source| SnapshotError::Parse {
        market: PriceSourceKind::Auction,
        source,
    })?;

    if !pages.first().is_some_and(|page| page.success) {
        return Err(SnapshotError::Unsuccessful {
            market: PriceSourceKind::Auction,
        });
    }

    let observed_at = pages
        .iter()
        .filter_map(|page| page.last_updated)
        .max()
        .and_then(timestamp_from_millis)
        .unwrap_or(fetched_at);

    let mut seen = HashSet::new();
    let mut active = ActiveListings::new();
    let mut books: HashMap<ItemName, Lowest> = HashMap::new();
    let mut skipped = 0;

    for page in pages {
        if !page.success {
            warn!(page = page.page, "Skipping unsuccessful auction page");
            continue;
        }
        for raw in page.auctions {
            let listing: AuctionListing = match serde_json::from_value(raw) {
                Ok(listing) => listing,
                Err(e) => {
                    warn!(page = page.page, error = %e, "Skipping malformed auction listing");
                    skipped += 1;
                    continue;
                }
            };
            if let Some(uuid) = &listing.uuid {
                if !seen.insert(uuid.clone()) {
                    continue;
                }
            }

            let item = ItemName::new(&listing.item_name);
            if item.is_blank() {
                warn!(uuid = ?listing.uuid, "Skipping auction with blank item name");
                skipped += 1;
                continue;
            }

            if listing.is_active() {
                if let Some(uuid) = &listing.uuid {
                    active.insert(uuid.clone(), item.clone());
                }
                books
                    .entry(item)
                    .or_default()
                    .offer(Coins::from(listing.starting_bid), listing.tier);
            } else {
                books.entry(item).or_default();
            }
        }
    }

    let quotes: Vec<AuctionQuote> = books
        .into_iter()
        .map(|(item, lowest)| lowest.into_quote(item, observed_at))
        .collect();

    debug!(items = quotes.len(), listings = seen.len(), skipped, "Parsed auction snapshot");
    Ok(AuctionSnapshot {
        quotes,
        refreshed_at: observed_at,
        skipped,
        active,
    })
}
