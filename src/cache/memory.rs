//! Thread-safe in-memory quote store.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;

use rust_decimal::Decimal;

use super::{ActiveListings, PriceCache, SalesLedger};
use crate::domain::{AuctionQuote, BazaarQuote, ItemName, PriceSourceKind};

struct Book<Q> {
    quotes: HashMap<ItemName, Q>,
    refreshed_at: Option<DateTime<Utc>>,
}

impl<Q> Default for Book<Q> {
    fn default() -> Self {
        Self {
            quotes: HashMap::new(),
            refreshed_at: None,
        }
    }
}

/// Quote store backing [`PriceCache`].
///
/// Each market is one lock-guarded book. A refresh builds the replacement map
/// off-lock and swaps it in whole, so a reader sees either the previous cycle
/// or the new one, never a mix. Single-quote upserts replace the entire quote.
#[derive(Default)]
pub struct MemoryPriceCache {
    bazaar: RwLock<Book<BazaarQuote>>,
    auction: RwLock<Book<AuctionQuote>>,
    sales: RwLock<SalesLedger>,
}

impl MemoryPriceCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace every bazaar quote with a new refresh cycle.
    pub fn replace_bazaar(
        &self,
        quotes: impl IntoIterator<Item = BazaarQuote>,
        refreshed_at: DateTime<Utc>,
    ) {
        let quotes = index(quotes, |q| &q.item);
        let mut book = self.bazaar.write();
        book.quotes = quotes;
        book.refreshed_at = Some(refreshed_at);
    }

    /// Replace every auction quote with a new refresh cycle.
    pub fn replace_auctions(
        &self,
        quotes: impl IntoIterator<Item = AuctionQuote>,
        refreshed_at: DateTime<Utc>,
    ) {
        let quotes = index(quotes, |q| &q.item);
        let mut book = self.auction.write();
        book.quotes = quotes;
        book.refreshed_at = Some(refreshed_at);
    }

    /// Feed one cycle's active auction listings to the sales ledger.
    ///
    /// Returns the number of listings that vanished since the last cycle.
    pub fn record_auction_listings(&self, active: ActiveListings, at: DateTime<Utc>) -> usize {
        self.sales.write().record_cycle(active, at)
    }

    /// Store or overwrite one bazaar quote.
    pub fn upsert_bazaar(&self, quote: BazaarQuote) {
        self.bazaar.write().quotes.insert(quote.item.clone(), quote);
    }

    /// Store or overwrite one auction quote.
    pub fn upsert_auction(&self, quote: AuctionQuote) {
        self.auction.write().quotes.insert(quote.item.clone(), quote);
    }

    /// Number of bazaar products held.
    #[must_use]
    pub fn bazaar_len(&self) -> usize {
        self.bazaar.read().quotes.len()
    }

    /// Number of auction items held.
    #[must_use]
    pub fn auction_len(&self) -> usize {
        self.auction.read().quotes.len()
    }
}

fn index<Q>(quotes: impl IntoIterator<Item = Q>, item: impl Fn(&Q) -> &ItemName) -> HashMap<ItemName, Q> {
    quotes
        .into_iter()
        .map(|quote| (item(&quote).clone(), quote))
        .collect()
}

impl PriceCache for MemoryPriceCache {
    fn get_bazaar_quote(&self, item: &ItemName) -> Option<BazaarQuote> {
        self.bazaar.read().quotes.get(item).cloned()
    }

    fn get_auction_quote(&self, item: &ItemName) -> Option<AuctionQuote> {
        self.auction.read().quotes.get(item).cloned()
    }

    fn last_refreshed(&self, market: PriceSourceKind) -> Option<DateTime<Utc>> {
        match market {
            PriceSourceKind::Bazaar => self.bazaar.read().refreshed_at,
            PriceSourceKind::Auction => self.auction.read().refreshed_at,
        }
    }

    fn auction_sales_per_day(&self, item: &ItemName) -> Option<Decimal> {
        self.sales.read().daily_sales(item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::sync::Arc;

    #[test]
    fn lookup_is_normalized() {
        let cache = MemoryPriceCache::new();
        let now = Utc::now();
        cache.upsert_bazaar(BazaarQuote::new("ENCHANTED_COAL", dec!(5), dec!(4.5), now));

        let quote = cache.get_bazaar_quote(&ItemName::new("Enchanted Coal"));
        assert_eq!(quote.map(|q| q.instant_sell_price), Some(dec!(4.5)));
        assert!(cache.get_auction_quote(&ItemName::new("Enchanted Coal")).is_none());
    }

    #[test]
    fn replace_drops_previous_cycle() {
        let cache = MemoryPriceCache::new();
        let first = Utc::now();
        cache.replace_auctions(
            vec![
                AuctionQuote::new("Necron's Handle", dec!(500000000), 3, first),
                AuctionQuote::new("Spirit Wing", dec!(2000000), 1, first),
            ],
            first,
        );
        assert_eq!(cache.auction_len(), 2);

        let second = first + chrono::TimeDelta::minutes(20);
        cache.replace_auctions(
            vec![AuctionQuote::new("Necron's Handle", dec!(480000000), 4, second)],
            second,
        );

        assert_eq!(cache.auction_len(), 1);
        assert!(cache.get_auction_quote(&ItemName::new("Spirit Wing")).is_none());
        assert_eq!(cache.last_refreshed(PriceSourceKind::Auction), Some(second));
        assert_eq!(cache.last_refreshed(PriceSourceKind::Bazaar), None);
    }

    #[test]
    fn upsert_replaces_whole_quote() {
        let cache = MemoryPriceCache::new();
        let now = Utc::now();
        cache.upsert_bazaar(BazaarQuote::new("Enchanted Coal", dec!(5), dec!(4.5), now).with_weekly_volume(700));
        cache.upsert_bazaar(BazaarQuote::new("Enchanted Coal", dec!(6), dec!(5.5), now));

        let quote = cache.get_bazaar_quote(&ItemName::new("Enchanted Coal")).unwrap();
        assert_eq!(quote.instant_buy_price, dec!(6));
        assert_eq!(quote.weekly_volume, None);
        assert_eq!(cache.bazaar_len(), 1);
    }

    #[test]
    fn readers_never_see_mixed_cycles() {
        let cache = Arc::new(MemoryPriceCache::new());
        let now = Utc::now();
        let cycle = move |price: u32| {
            (0..50)
                .map(|i| BazaarQuote::new(format!("item {i}"), price.into(), price.into(), now))
                .collect::<Vec<_>>()
        };
        cache.replace_bazaar(cycle(1), now);

        let writer = {
            let cache = Arc::clone(&cache);
            std::thread::spawn(move || {
                for round in 2..200u32 {
                    cache.replace_bazaar(cycle(round), now);
                }
            })
        };

        for _ in 0..200 {
            let book = cache.bazaar.read();
            let first = book.quotes.values().next().map(|q| q.instant_sell_price);
            assert!(book.quotes.values().all(|q| Some(q.instant_sell_price) == first));
        }
        writer.join().unwrap();
    }

    #[test]
    fn sales_are_read_through_the_trait() {
        let cache = MemoryPriceCache::new();
        let start = Utc::now();
        let item = ItemName::new("Necron's Handle");
        let listings = |uuids: &[&str]| {
            uuids
                .iter()
                .map(|uuid| (uuid.to_string(), item.clone()))
                .collect::<ActiveListings>()
        };

        cache.record_auction_listings(listings(&["a", "b"]), start);
        let sold = cache.record_auction_listings(listings(&["b"]), start + chrono::TimeDelta::minutes(20));

        assert_eq!(sold, 1);
        assert_eq!(cache.auction_sales_per_day(&item), Some(dec!(0.14)));
    }
}
