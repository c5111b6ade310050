//! The two markets as price sources.

use chrono::{DateTime, Utc};

use super::PriceSource;
use crate::cache::PriceCache;
use crate::domain::{Coins, ItemName, Observed, PriceSourceKind};

/// A usable price offered by a source, before staleness is judged.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Offer {
    pub unit_price: Coins,
    pub observed_at: DateTime<Utc>,
}

impl Observed for Offer {
    fn observed_at(&self) -> DateTime<Utc> {
        self.observed_at
    }
}

/// What a source knows about an item.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Candidate {
    /// The source has a price.
    Offer(Offer),
    /// The source tracks the item but has nothing for sale.
    Unlisted,
    /// The source has never seen the item.
    Missing,
}

/// Values commodities at the instant-sell level (highest buy order).
#[derive(Debug, Default, Clone, Copy)]
pub struct BazaarSource;

impl PriceSource for BazaarSource {
    fn kind(&self) -> PriceSourceKind {
        PriceSourceKind::Bazaar
    }

    fn try_quote(&self, cache: &dyn PriceCache, item: &ItemName) -> Candidate {
        match cache.get_bazaar_quote(item) {
            Some(quote) if quote.has_buy_orders() => Candidate::Offer(Offer {
                unit_price: quote.instant_sell_price,
                observed_at: quote.observed_at,
            }),
            Some(_) => Candidate::Unlisted,
            None => Candidate::Missing,
        }
    }
}

/// Values unique items at their lowest active buy-it-now listing.
#[derive(Debug, Default, Clone, Copy)]
pub struct AuctionSource;

impl PriceSource for AuctionSource {
    fn kind(&self) -> PriceSourceKind {
        PriceSourceKind::Auction
    }

    fn try_quote(&self, cache: &dyn PriceCache, item: &ItemName) -> Candidate {
        match cache.get_auction_quote(item) {
            Some(quote) if quote.has_listings() => Candidate::Offer(Offer {
                unit_price: quote.lowest_bin_price,
                observed_at: quote.observed_at,
            }),
            // zero listings is "no data", not "worth zero"
            Some(_) => Candidate::Unlisted,
            None => Candidate::Missing,
        }
    }
}
