//! Raw market quotes and the resolved price derived from them.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::item::ItemName;
use super::money::Coins;

/// Which market a price came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceSourceKind {
    Bazaar,
    Auction,
}

impl fmt::Display for PriceSourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bazaar => write!(f, "bazaar"),
            Self::Auction => write!(f, "auction"),
        }
    }
}

/// Anything stamped with the time it was observed.
pub trait Observed {
    fn observed_at(&self) -> DateTime<Utc>;
}

/// Best bazaar levels for one commodity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BazaarQuote {
    pub item: ItemName,
    /// Price paid when buying instantly from the lowest sell offer.
    pub instant_buy_price: Coins,
    /// Price realized when selling instantly into the highest buy order.
    pub instant_sell_price: Coins,
    /// Weekly traded volume (`buyMovingWeek`), when reported.
    #[serde(default)]
    pub weekly_volume: Option<u64>,
    pub observed_at: DateTime<Utc>,
}

impl BazaarQuote {
    pub fn new(
        item: impl Into<ItemName>,
        instant_buy_price: Coins,
        instant_sell_price: Coins,
        observed_at: DateTime<Utc>,
    ) -> Self {
        Self {
            item: item.into(),
            instant_buy_price,
            instant_sell_price,
            weekly_volume: None,
            observed_at,
        }
    }

    /// Attach weekly traded volume.
    #[must_use]
    pub fn with_weekly_volume(mut self, volume: u64) -> Self {
        self.weekly_volume = Some(volume);
        self
    }

    /// Whether anyone is bidding. An empty buy book reports a zero
    /// instant-sell price, which is no price at all.
    #[must_use]
    pub fn has_buy_orders(&self) -> bool {
        self.instant_sell_price > Coins::ZERO
    }
}

impl Observed for BazaarQuote {
    fn observed_at(&self) -> DateTime<Utc> {
        self.observed_at
    }
}

/// Lowest buy-it-now listing for one auction item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuctionQuote {
    pub item: ItemName,
    pub lowest_bin_price: Coins,
    /// Active BIN listings seen. Zero means nothing is listed.
    pub sample_size: u32,
    /// Rarity of the cheapest listing.
    #[serde(default)]
    pub tier: Option<String>,
    pub observed_at: DateTime<Utc>,
}

impl AuctionQuote {
    pub fn new(
        item: impl Into<ItemName>,
        lowest_bin_price: Coins,
        sample_size: u32,
        observed_at: DateTime<Utc>,
    ) -> Self {
        Self {
            item: item.into(),
            lowest_bin_price,
            sample_size,
            tier: None,
            observed_at,
        }
    }

    #[must_use]
    pub fn with_tier(mut self, tier: impl Into<String>) -> Self {
        self.tier = Some(tier.into());
        self
    }

    /// Quote for an item seen by the refresh cycle with no active listing.
    pub fn unlisted(item: impl Into<ItemName>, observed_at: DateTime<Utc>) -> Self {
        Self::new(item, Coins::ZERO, 0, observed_at)
    }

    #[must_use]
    pub fn has_listings(&self) -> bool {
        self.sample_size > 0
    }
}

impl Observed for AuctionQuote {
    fn observed_at(&self) -> DateTime<Utc> {
        self.observed_at
    }
}

/// Authoritative unit price for an item, derived at request time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceQuote {
    pub item: ItemName,
    pub unit_price: Coins,
    pub source: PriceSourceKind,
    /// Age of the underlying quote when it was resolved.
    pub staleness_seconds: u64,
    /// Older than the configured freshness threshold.
    pub stale: bool,
}
