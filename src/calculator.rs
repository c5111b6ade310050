//! Chest profit calculation.
//!
//! The calculator resolves each distinct item once per request, prices every
//! line, and folds the priced lines into a total. Unpriced lines are kept in
//! the breakdown and listed in `unresolved_items`; they never count as zero.

use std::collections::{BTreeSet, HashMap};

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use tracing::{info, warn};

use crate::domain::appraisal::daily_sales;
use crate::domain::money::line_total;
use crate::domain::{
    round_coins, ChestEntry, ChestRequest, ChestResult, Coins, ItemAppraisal, ItemName,
    LineResult, MarketFreshness, PriceSourceKind, UnpricedReason,
};
use crate::error::Result;
use crate::pricing::{PriceResolver, Resolution};

/// Values chests against the resolver's price cache.
pub struct ChestCalculator {
    resolver: PriceResolver,
}

impl ChestCalculator {
    pub fn new(resolver: PriceResolver) -> Self {
        Self { resolver }
    }

    #[must_use]
    pub fn resolver(&self) -> &PriceResolver {
        &self.resolver
    }

    /// Validate raw entries, then value them.
    ///
    /// A malformed request fails before any cache read.
    pub fn evaluate(&self, entries: Vec<ChestEntry>, chest_cost: Decimal) -> Result<ChestResult> {
        let request = ChestRequest::try_new(entries, chest_cost)?;
        Ok(self.calculate_chest_profit(&request))
    }

    /// Value a chest as of now.
    pub fn calculate_chest_profit(&self, request: &ChestRequest) -> ChestResult {
        self.calculate_at(request, Utc::now())
    }

    /// Value a chest as of `now`.
    ///
    /// A line whose value does not fit in [`Coins`] is left unpriced with
    /// reason `overflow`; the rest of the chest is still valued.
    pub fn calculate_at(&self, request: &ChestRequest, now: DateTime<Utc>) -> ChestResult {
        let mut memo: HashMap<ItemName, Resolution> = HashMap::new();
        let mut lines = Vec::with_capacity(request.lines().len());
        let mut unresolved = BTreeSet::new();
        let mut exact_total = Coins::ZERO;

        for line in request.lines() {
            let resolution = memo
                .entry(line.item.clone())
                .or_insert_with(|| self.resolver.resolve_at(&line.item, now));

            let result = match resolution {
                Ok(quote) => {
                    let summed = LineResult::priced(line, quote).ok().and_then(|priced| {
                        let value = priced.line_value?;
                        exact_total.checked_add(value).map(|total| (priced, total))
                    });
                    match summed {
                        Some((priced, total)) => {
                            exact_total = total;
                            priced
                        }
                        None => {
                            warn!(
                                item = %line.item,
                                quantity = line.quantity,
                                unit_price = %quote.unit_price,
                                "Line value overflows, leaving it unpriced"
                            );
                            unresolved.insert(line.item.clone());
                            LineResult::overflowed(line, quote)
                        }
                    }
                }
                Err(unresolved_price) => {
                    unresolved.insert(line.item.clone());
                    LineResult::unpriced(line, unresolved_price)
                }
            };
            lines.push(result);
        }

        let total_value = round_coins(exact_total);
        let chest_cost = request.chest_cost();
        // both sides are non-negative and in range
        let profit = total_value - chest_cost;

        let result = ChestResult {
            total_value,
            chest_cost,
            profit,
            lines,
            unresolved_items: unresolved,
            freshness: self.freshness(),
        };

        info!(
            lines = result.lines.len(),
            distinct_items = memo.len(),
            unresolved = result.unresolved_items.len(),
            total_value = %result.total_value,
            chest_cost = %result.chest_cost,
            profit = %result.profit,
            "Chest valued"
        );

        result
    }

    /// Show both markets' view of one item alongside the resolved price.
    pub fn appraise(&self, item: &ItemName, quantity: u64) -> ItemAppraisal {
        let cache = self.resolver.cache();
        let bazaar = cache.get_bazaar_quote(item);
        let auction = cache.get_auction_quote(item);

        let mut found_in = Vec::new();
        if bazaar.as_ref().is_some_and(|quote| quote.has_buy_orders()) {
            found_in.push(PriceSourceKind::Bazaar);
        }
        if auction.as_ref().is_some_and(|quote| quote.has_listings()) {
            found_in.push(PriceSourceKind::Auction);
        }

        let (sales_per_day, sales_source) = match cache.auction_sales_per_day(item) {
            Some(sales) => (Some(sales), Some(PriceSourceKind::Auction)),
            None => match bazaar.as_ref().and_then(|quote| quote.weekly_volume) {
                Some(volume) => (Some(daily_sales(volume)), Some(PriceSourceKind::Bazaar)),
                None => (None, None),
            },
        };

        let (resolved, unpriced_reason, total_value) = match self.resolver.resolve_unit_price(item) {
            Ok(quote) => match line_total(quote.unit_price, quantity, item.display()) {
                Ok(total) => (Some(quote), None, Some(total)),
                Err(e) => {
                    warn!(item = %item, quantity, error = %e, "Appraisal overflows");
                    (Some(quote), Some(UnpricedReason::Overflow), None)
                }
            },
            Err(unresolved) => (None, Some(unresolved.reason), None),
        };

        ItemAppraisal {
            item: item.clone(),
            quantity,
            bazaar,
            auction,
            found_in,
            resolved,
            unpriced_reason,
            total_value,
            sales_per_day,
            sales_source,
        }
    }

    /// Resolve several items at once, one result per input name.
    ///
    /// Repeated names are resolved once.
    pub fn resolve_batch(&self, items: &[ItemName]) -> Vec<Resolution> {
        let now = Utc::now();
        let mut memo: HashMap<&ItemName, Resolution> = HashMap::new();
        items
            .iter()
            .map(|item| {
                memo.entry(item)
                    .or_insert_with(|| self.resolver.resolve_at(item, now))
                    .clone()
            })
            .collect()
    }

    fn freshness(&self) -> MarketFreshness {
        let cache = self.resolver.cache();
        MarketFreshness {
            bazaar: cache.last_refreshed(PriceSourceKind::Bazaar),
            auction: cache.last_refreshed(PriceSourceKind::Auction),
        }
    }
}
