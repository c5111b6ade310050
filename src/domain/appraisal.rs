//! Single-item valuation with both markets shown side by side.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

use super::item::ItemName;
use super::money::Coins;
use super::quote::{AuctionQuote, BazaarQuote, PriceQuote, PriceSourceKind};
use super::valuation::UnpricedReason;

/// Everything known about one item's market value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemAppraisal {
    pub item: ItemName,
    pub quantity: u64,
    pub bazaar: Option<BazaarQuote>,
    pub auction: Option<AuctionQuote>,
    /// Markets holding usable data for the item.
    pub found_in: Vec<PriceSourceKind>,
    /// The price the resolver settled on.
    pub resolved: Option<PriceQuote>,
    pub unpriced_reason: Option<UnpricedReason>,
    /// Exact `resolved.unit_price × quantity`.
    pub total_value: Option<Coins>,
    /// Units sold per day over the last week.
    pub sales_per_day: Option<Decimal>,
    /// Where `sales_per_day` came from: observed auction sales, else bazaar
    /// weekly volume.
    pub sales_source: Option<PriceSourceKind>,
}

impl ItemAppraisal {
    #[must_use]
    pub fn market(&self) -> Option<PriceSourceKind> {
        self.resolved.as_ref().map(|quote| quote.source)
    }
}

/// Daily sales from a weekly count, to two places.
#[must_use]
pub fn daily_sales(moving_week: u64) -> Decimal {
    (Decimal::from(moving_week) / Decimal::from(7))
        .round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn daily_sales_from_week() {
        assert_eq!(daily_sales(700), dec!(100));
        assert_eq!(daily_sales(10), dec!(1.43));
        assert_eq!(daily_sales(0), dec!(0));
    }
}
