//! Per-item pricing policy.
//!
//! A [`PriceResolver`] walks a fixed chain of [`PriceSource`]s and takes the
//! first usable offer:
//!
//! 1. **Bazaar** - instant-sell price, if the commodity has a quote.
//! 2. **Auction house** - lowest active BIN, if at least one listing exists.
//!
//! Anything else is unpriced. Staleness is judged by [`StalenessPolicy`].
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use chestworth::cache::MemoryPriceCache;
//! use chestworth::domain::{BazaarQuote, ItemName};
//! use chestworth::pricing::PriceResolver;
//! use rust_decimal_macros::dec;
//!
//! let cache = Arc::new(MemoryPriceCache::new());
//! cache.upsert_bazaar(BazaarQuote::new("ENCHANTED_COAL", dec!(5), dec!(4.5), chrono::Utc::now()));
//!
//! let resolver = PriceResolver::new(cache);
//! let quote = resolver.resolve_unit_price(&ItemName::new("Enchanted Coal")).unwrap();
//! assert_eq!(quote.unit_price, dec!(4.5));
//! ```

mod resolver;
mod source;
mod staleness;

pub use resolver::{PriceResolver, Resolution};
pub use source::{AuctionSource, BazaarSource, Candidate, Offer};
pub use staleness::{StaleMode, StalenessPolicy};

use crate::cache::PriceCache;
use crate::domain::{ItemName, PriceSourceKind};

/// One market consulted by the resolver.
pub trait PriceSource: Send + Sync {
    /// Which market this is; stamped on every quote it produces.
    fn kind(&self) -> PriceSourceKind;

    /// Look the item up. Must not fail: absence is a [`Candidate`] variant.
    fn try_quote(&self, cache: &dyn PriceCache, item: &ItemName) -> Candidate;
}

/// The fixed priority order: bazaar, then auction house.
#[must_use]
pub fn default_sources() -> Vec<Box<dyn PriceSource>> {
    vec![Box::new(BazaarSource), Box::new(AuctionSource)]
}
