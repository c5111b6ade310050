//! Source selection and fallback.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::debug;

use super::{default_sources, Candidate, PriceSource, StalenessPolicy};
use crate::cache::{freshness_of, PriceCache};
use crate::domain::{ItemName, PriceQuote, UnpricedReason, UnresolvedPrice};

/// Result of resolving one item.
pub type Resolution = Result<PriceQuote, UnresolvedPrice>;

/// Turns an item name into one authoritative unit price.
///
/// Pure with respect to its inputs: it only reads the injected cache and
/// never writes to it, so one resolver can serve any number of concurrent
/// calculations.
pub struct PriceResolver {
    cache: Arc<dyn PriceCache>,
    sources: Vec<Box<dyn PriceSource>>,
    staleness: StalenessPolicy,
}

impl PriceResolver {
    /// Resolver with the standard bazaar-then-auction chain.
    pub fn new(cache: Arc<dyn PriceCache>) -> Self {
        Self::with_sources(cache, default_sources())
    }

    /// Resolver with a custom chain, consulted in order.
    pub fn with_sources(cache: Arc<dyn PriceCache>, sources: Vec<Box<dyn PriceSource>>) -> Self {
        Self {
            cache,
            sources,
            staleness: StalenessPolicy::default(),
        }
    }

    #[must_use]
    pub fn with_staleness(mut self, staleness: StalenessPolicy) -> Self {
        self.staleness = staleness;
        self
    }

    /// The cache this resolver reads.
    #[must_use]
    pub fn cache(&self) -> &dyn PriceCache {
        self.cache.as_ref()
    }

    #[must_use]
    pub fn staleness(&self) -> StalenessPolicy {
        self.staleness
    }

    /// Resolve the unit price of an item as of now.
    pub fn resolve_unit_price(&self, item: &ItemName) -> Resolution {
        self.resolve_at(item, Utc::now())
    }

    /// Resolve the unit price of an item as of `now`.
    pub fn resolve_at(&self, item: &ItemName, now: DateTime<Utc>) -> Resolution {
        let mut saw_unlisted = false;
        let mut saw_stale = false;

        for source in &self.sources {
            let offer = match source.try_quote(self.cache(), item) {
                Candidate::Offer(offer) => offer,
                Candidate::Unlisted => {
                    saw_unlisted = true;
                    continue;
                }
                Candidate::Missing => continue,
            };

            let age = freshness_of(&offer, now);
            if self.staleness.rejects(age) {
                debug!(
                    item = %item,
                    source = %source.kind(),
                    age_secs = age.as_secs(),
                    "Skipping stale quote"
                );
                saw_stale = true;
                continue;
            }

            let stale = self.staleness.is_stale(age);
            debug!(
                item = %item,
                source = %source.kind(),
                unit_price = %offer.unit_price,
                age_secs = age.as_secs(),
                stale,
                "Resolved unit price"
            );
            return Ok(PriceQuote {
                item: item.clone(),
                unit_price: offer.unit_price,
                source: source.kind(),
                staleness_seconds: age.as_secs(),
                stale,
            });
        }

        let reason = if saw_stale {
            UnpricedReason::Stale
        } else if saw_unlisted {
            UnpricedReason::NoActiveListings
        } else {
            UnpricedReason::NotListed
        };
        debug!(item = %item, %reason, "Item unpriced");
        Err(UnresolvedPrice::new(item.clone(), reason))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::MemoryPriceCache;
    use crate::domain::{AuctionQuote, BazaarQuote, PriceSourceKind};
    use crate::pricing::{AuctionSource, StaleMode};
    use chrono::TimeDelta;
    use rust_decimal_macros::dec;
    use std::time::Duration;

    fn resolver(cache: MemoryPriceCache) -> PriceResolver {
        PriceResolver::new(Arc::new(cache))
    }

    #[test]
    fn bazaar_wins_over_auction() {
        let cache = MemoryPriceCache::new();
        let now = Utc::now();
        cache.upsert_bazaar(BazaarQuote::new("Wither Catalyst", dec!(9000), dec!(8500), now));
        cache.upsert_auction(AuctionQuote::new("Wither Catalyst", dec!(12000), 5, now));

        let quote = resolver(cache)
            .resolve_at(&ItemName::new("Wither Catalyst"), now)
            .unwrap();
        assert_eq!(quote.source, PriceSourceKind::Bazaar);
        assert_eq!(quote.unit_price, dec!(8500));
    }

    #[test]
    fn falls_back_to_auction() {
        let cache = MemoryPriceCache::new();
        let now = Utc::now();
        cache.upsert_auction(AuctionQuote::new("Necron's Handle", dec!(500000000), 3, now));

        let quote = resolver(cache)
            .resolve_at(&ItemName::new("Necron's Handle"), now)
            .unwrap();
        assert_eq!(quote.source, PriceSourceKind::Auction);
        assert_eq!(quote.unit_price, dec!(500000000));
        assert_eq!(quote.staleness_seconds, 0);
    }

    #[test]
    fn empty_auction_is_unpriced_not_zero() {
        let cache = MemoryPriceCache::new();
        let now = Utc::now();
        cache.upsert_auction(AuctionQuote::unlisted("Spirit Wing", now));

        let err = resolver(cache)
            .resolve_at(&ItemName::new("Spirit Wing"), now)
            .unwrap_err();
        assert_eq!(err.reason, UnpricedReason::NoActiveListings);
    }

    #[test]
    fn unknown_item_is_not_listed() {
        let err = resolver(MemoryPriceCache::new())
            .resolve_at(&ItemName::new("Unknown Item"), Utc::now())
            .unwrap_err();
        assert_eq!(err.reason, UnpricedReason::NotListed);
        assert_eq!(err.item, ItemName::new("Unknown Item"));
    }

    #[test]
    fn stale_quote_is_used_and_flagged_by_default() {
        let cache = MemoryPriceCache::new();
        let now = Utc::now();
        cache.upsert_bazaar(BazaarQuote::new(
            "Enchanted Coal",
            dec!(5),
            dec!(4.5),
            now - TimeDelta::hours(2),
        ));

        let quote = resolver(cache)
            .resolve_at(&ItemName::new("Enchanted Coal"), now)
            .unwrap();
        assert!(quote.stale);
        assert_eq!(quote.staleness_seconds, 7200);
    }

    #[test]
    fn skip_mode_falls_through_to_fresher_source() {
        let cache = MemoryPriceCache::new();
        let now = Utc::now();
        cache.upsert_bazaar(BazaarQuote::new(
            "Wither Catalyst",
            dec!(9000),
            dec!(8500),
            now - TimeDelta::hours(3),
        ));
        cache.upsert_auction(AuctionQuote::new("Wither Catalyst", dec!(12000), 2, now));

        let policy = StalenessPolicy::new(Some(Duration::from_secs(600)), StaleMode::Skip);
        let quote = resolver(cache)
            .with_staleness(policy)
            .resolve_at(&ItemName::new("Wither Catalyst"), now)
            .unwrap();
        assert_eq!(quote.source, PriceSourceKind::Auction);
        assert!(!quote.stale);
    }

    #[test]
    fn skip_mode_reports_stale_reason() {
        let cache = MemoryPriceCache::new();
        let now = Utc::now();
        cache.upsert_bazaar(BazaarQuote::new(
            "Enchanted Coal",
            dec!(5),
            dec!(4.5),
            now - TimeDelta::hours(3),
        ));

        let policy = StalenessPolicy::new(Some(Duration::from_secs(600)), StaleMode::Skip);
        let err = resolver(cache)
            .with_staleness(policy)
            .resolve_at(&ItemName::new("Enchanted Coal"), now)
            .unwrap_err();
        assert_eq!(err.reason, UnpricedReason::Stale);
    }

    #[test]
    fn custom_chain_order_is_respected() {
        let cache = MemoryPriceCache::new();
        let now = Utc::now();
        cache.upsert_bazaar(BazaarQuote::new("Wither Catalyst", dec!(9000), dec!(8500), now));

        let auction_only = PriceResolver::with_sources(Arc::new(cache), vec![Box::new(AuctionSource)]);
        let err = auction_only
            .resolve_at(&ItemName::new("Wither Catalyst"), now)
            .unwrap_err();
        assert_eq!(err.reason, UnpricedReason::NotListed);
    }

    #[test]
    fn empty_buy_book_falls_through_to_auction() {
        let cache = MemoryPriceCache::new();
        let now = Utc::now();
        cache.upsert_bazaar(BazaarQuote::new("Wither Catalyst", dec!(9000), dec!(0), now));
        cache.upsert_auction(AuctionQuote::new("Wither Catalyst", dec!(12000), 2, now));

        let quote = resolver(cache)
            .resolve_at(&ItemName::new("Wither Catalyst"), now)
            .unwrap();
        assert_eq!(quote.source, PriceSourceKind::Auction);
        assert_eq!(quote.unit_price, dec!(12000));
    }

    #[test]
    fn empty_buy_book_alone_is_unpriced() {
        let cache = MemoryPriceCache::new();
        let now = Utc::now();
        cache.upsert_bazaar(BazaarQuote::new("Wither Catalyst", dec!(9000), dec!(0), now));

        let err = resolver(cache)
            .resolve_at(&ItemName::new("Wither Catalyst"), now)
            .unwrap_err();
        assert_eq!(err.reason, UnpricedReason::NoActiveListings);
    }
}
