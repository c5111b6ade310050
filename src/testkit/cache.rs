//! Fixture caches.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::domain::{auction, bazaar};
use crate::cache::{MemoryPriceCache, PriceCache};
use crate::domain::{AuctionQuote, BazaarQuote, ItemName, PriceSourceKind};

/// A small catacombs-flavoured market.
///
/// - Necron's Handle: auction only, 500,000,000 over 3 listings
/// - Enchanted Coal: bazaar only, instant sell 4.5
/// - Wither Catalyst: bazaar 8,500.5 and auction 12,000
/// - Spirit Wing: auction with no active listings
pub fn fixture_cache() -> MemoryPriceCache {
    let cache = MemoryPriceCache::new();
    cache.upsert_auction(auction("Necron's Handle", dec!(500000000), 3));
    cache.upsert_bazaar(bazaar("ENCHANTED_COAL", dec!(4.5)));
    cache.upsert_bazaar(bazaar("WITHER_CATALYST", dec!(8500.5)));
    cache.upsert_auction(auction("Wither Catalyst", dec!(12000), 4));
    cache.upsert_auction(AuctionQuote::unlisted("Spirit Wing", Utc::now()));
    cache
}

/// Wraps a cache and counts reads per market.
pub struct CountingCache<C = MemoryPriceCache> {
    inner: C,
    bazaar_reads: AtomicUsize,
    auction_reads: AtomicUsize,
}

impl<C: PriceCache> CountingCache<C> {
    pub fn new(inner: C) -> Arc<Self> {
        Arc::new(Self {
            inner,
            bazaar_reads: AtomicUsize::new(0),
            auction_reads: AtomicUsize::new(0),
        })
    }

    pub fn bazaar_reads(&self) -> usize {
        self.bazaar_reads.load(Ordering::SeqCst)
    }

    pub fn auction_reads(&self) -> usize {
        self.auction_reads.load(Ordering::SeqCst)
    }

    pub fn total_reads(&self) -> usize {
        self.bazaar_reads() + self.auction_reads()
    }
}

impl<C: PriceCache> PriceCache for CountingCache<C> {
    fn get_bazaar_quote(&self, item: &ItemName) -> Option<BazaarQuote> {
        self.bazaar_reads.fetch_add(1, Ordering::SeqCst);
        self.inner.get_bazaar_quote(item)
    }

    fn get_auction_quote(&self, item: &ItemName) -> Option<AuctionQuote> {
        self.auction_reads.fetch_add(1, Ordering::SeqCst);
        self.inner.get_auction_quote(item)
    }

    fn last_refreshed(&self, market: PriceSourceKind) -> Option<DateTime<Utc>> {
        self.inner.last_refreshed(market)
    }

    fn auction_sales_per_day(&self, item: &ItemName) -> Option<Decimal> {
        self.inner.auction_sales_per_day(item)
    }
}
