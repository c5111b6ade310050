//! Auction sales inferred from listings that vanish between refresh cycles.

use std::collections::HashMap;

use chrono::{DateTime, TimeDelta, Utc};
use rust_decimal::Decimal;

use crate::domain::appraisal::daily_sales;
use crate::domain::ItemName;

/// Active listings from one cycle, keyed by auction uuid.
pub type ActiveListings = HashMap<String, ItemName>;

/// Rolling week of inferred auction sales.
///
/// A BIN listing present in one cycle and gone in the next counts as sold at
/// the time of the later cycle. The first cycle only seeds the listing set.
#[derive(Debug, Default)]
pub struct SalesLedger {
    listings: ActiveListings,
    sales: HashMap<ItemName, Vec<DateTime<Utc>>>,
    last_cycle: Option<DateTime<Utc>>,
}

impl SalesLedger {
    /// Sales older than this, relative to the latest cycle, are dropped.
    pub const WINDOW_DAYS: i64 = 7;

    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Diff `active` against the previous cycle. Returns the sales detected.
    pub fn record_cycle(&mut self, active: ActiveListings, at: DateTime<Utc>) -> usize {
        let mut sold = 0;
        if self.last_cycle.is_some() {
            for (uuid, item) in &self.listings {
                if !active.contains_key(uuid) {
                    self.sales.entry(item.clone()).or_default().push(at);
                    sold += 1;
                }
            }
        }
        self.listings = active;
        self.last_cycle = Some(at);

        let cutoff = at - TimeDelta::days(Self::WINDOW_DAYS);
        self.sales.retain(|_, times| {
            times.retain(|sold_at| *sold_at >= cutoff);
            !times.is_empty()
        });
        sold
    }

    /// Average sales per day over the window, to two places.
    ///
    /// `None` until at least one sale of the item has been seen.
    #[must_use]
    pub fn daily_sales(&self, item: &ItemName) -> Option<Decimal> {
        let count = self.sales.get(item)?.len();
        Some(daily_sales(count as u64))
    }
}
