//! Read access to cached market quotes.
//!
//! The valuation core only ever reads through [`PriceCache`]. Whatever fills
//! the cache (a refresh job, a test fixture) is responsible for replacing
//! quotes wholesale; readers observe the latest complete quote or nothing.

mod memory;
mod sales;

pub use memory::MemoryPriceCache;
pub use sales::{ActiveListings, SalesLedger};

use std::time::Duration;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::domain::{AuctionQuote, BazaarQuote, ItemName, Observed, PriceSourceKind};

/// Uniform read interface over the bazaar and auction house caches.
///
/// Lookups never block on network I/O and never trigger a refresh. `None`
/// is a normal answer for items that only trade on one market.
pub trait PriceCache: Send + Sync {
    /// Latest bazaar quote for the item, however old.
    fn get_bazaar_quote(&self, item: &ItemName) -> Option<BazaarQuote>;

    /// Latest auction house quote for the item, however old.
    fn get_auction_quote(&self, item: &ItemName) -> Option<AuctionQuote>;

    /// When the given market was last refreshed as a whole.
    fn last_refreshed(&self, market: PriceSourceKind) -> Option<DateTime<Utc>>;

    /// Auction sales per day over the last week, if any were observed.
    fn auction_sales_per_day(&self, _item: &ItemName) -> Option<Decimal> {
        None
    }
}

/// Time elapsed since a quote was observed, as of `now`.
///
/// Quotes stamped in the future count as brand new.
#[must_use]
pub fn freshness_of(quote: &impl Observed, now: DateTime<Utc>) -> Duration {
    (now - quote.observed_at()).to_std().unwrap_or(Duration::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;
    use rust_decimal_macros::dec;

    #[test]
    fn freshness_is_elapsed_time() {
        let now = Utc::now();
        let quote = BazaarQuote::new("Enchanted Coal", dec!(5), dec!(4.5), now - TimeDelta::seconds(90));
        assert_eq!(freshness_of(&quote, now), Duration::from_secs(90));
    }

    #[test]
    fn future_quotes_are_fresh() {
        let now = Utc::now();
        let quote = AuctionQuote::new("Necron's Handle", dec!(1), 1, now + TimeDelta::seconds(30));
        assert_eq!(freshness_of(&quote, now), Duration::ZERO);
    }
}
