//! Chest valuation requests and results.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use super::error::{PrecisionError, ValidationError};
use super::item::ItemName;
use super::money::{line_total, round_coins, Coins};
use super::quote::{PriceQuote, PriceSourceKind};
use super::valuation::{LineStatus, UnpricedReason, UnresolvedPrice};

fn default_quantity() -> i64 {
    1
}

/// One unvalidated line of a chest request, as a caller submits it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChestEntry {
    #[serde(rename = "name")]
    pub item: ItemName,
    #[serde(default = "default_quantity")]
    pub quantity: i64,
}

impl ChestEntry {
    pub fn new(item: impl Into<ItemName>, quantity: i64) -> Self {
        Self {
            item: item.into(),
            quantity,
        }
    }
}

/// A validated request line.
#[derive(Debug, Clone, PartialEq)]
pub struct ChestLine {
    pub item: ItemName,
    pub quantity: u64,
}

/// Wire shape of a chest request. A missing cost means a free chest.
#[derive(Debug, Clone, Deserialize)]
pub struct ChestRequestBody {
    pub items: Vec<ChestEntry>,
    #[serde(default)]
    pub chest_cost: Decimal,
}

/// A chest to value.
///
/// Only constructible through [`ChestRequest::try_new`], so a request that
/// reaches the calculator is already known to be well formed. Repeated item
/// names stay separate lines.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "ChestRequestBody")]
pub struct ChestRequest {
    lines: Vec<ChestLine>,
    chest_cost: Coins,
}

impl ChestRequest {
    /// Validate entries and cost.
    ///
    /// The cost is normalized to whole coins (half-to-even) so that
    /// `profit = total_value - chest_cost` holds exactly on the rounded figures.
    pub fn try_new(entries: Vec<ChestEntry>, chest_cost: Decimal) -> Result<Self, ValidationError> {
        if entries.is_empty() {
            return Err(ValidationError::EmptyItems);
        }
        if chest_cost.is_sign_negative() && !chest_cost.is_zero() {
            return Err(ValidationError::NegativeChestCost { cost: chest_cost });
        }

        let mut lines = Vec::with_capacity(entries.len());
        for (index, entry) in entries.into_iter().enumerate() {
            if entry.item.is_blank() {
                return Err(ValidationError::BlankItemName { line: index });
            }
            let quantity = u64::try_from(entry.quantity)
                .ok()
                .filter(|q| *q > 0)
                .ok_or_else(|| ValidationError::NonPositiveQuantity {
                    item: entry.item.display().to_string(),
                    quantity: entry.quantity,
                })?;
            lines.push(ChestLine {
                item: entry.item,
                quantity,
            });
        }

        Ok(Self {
            lines,
            chest_cost: round_coins(chest_cost),
        })
    }

    #[must_use]
    pub fn lines(&self) -> &[ChestLine] {
        &self.lines
    }

    #[must_use]
    pub fn chest_cost(&self) -> Coins {
        self.chest_cost
    }
}

impl TryFrom<ChestRequestBody> for ChestRequest {
    type Error = ValidationError;

    fn try_from(raw: ChestRequestBody) -> Result<Self, Self::Error> {
        Self::try_new(raw.items, raw.chest_cost)
    }
}

/// Valuation of one request line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineResult {
    pub item: ItemName,
    pub quantity: u64,
    pub unit_price: Option<Coins>,
    /// Exact `unit_price × quantity`; not rounded.
    pub line_value: Option<Coins>,
    pub source: Option<PriceSourceKind>,
    pub status: LineStatus,
    pub reason: Option<UnpricedReason>,
    pub stale: bool,
}

impl LineResult {
    pub fn priced(line: &ChestLine, quote: &PriceQuote) -> Result<Self, PrecisionError> {
        let value = line_total(
            quote.unit_price,
            line.quantity,
            &format!("valuing {} x{}", line.item, line.quantity),
        )?;
        Ok(Self {
            item: line.item.clone(),
            quantity: line.quantity,
            unit_price: Some(quote.unit_price),
            line_value: Some(value),
            source: Some(quote.source),
            status: LineStatus::Priced,
            reason: None,
            stale: quote.stale,
        })
    }

    pub fn unpriced(line: &ChestLine, unresolved: &UnresolvedPrice) -> Self {
        Self {
            item: line.item.clone(),
            quantity: line.quantity,
            unit_price: None,
            line_value: None,
            source: None,
            status: LineStatus::Unpriced,
            reason: Some(unresolved.reason),
            stale: false,
        }
    }

    /// A line whose price resolved but whose value does not fit in [`Coins`].
    #[must_use]
    pub fn overflowed(line: &ChestLine, quote: &PriceQuote) -> Self {
        Self {
            item: line.item.clone(),
            quantity: line.quantity,
            unit_price: Some(quote.unit_price),
            line_value: None,
            source: Some(quote.source),
            status: LineStatus::Unpriced,
            reason: Some(UnpricedReason::Overflow),
            stale: quote.stale,
        }
    }

    #[must_use]
    pub fn is_priced(&self) -> bool {
        self.status == LineStatus::Priced
    }
}

/// When each market was last refreshed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MarketFreshness {
    pub bazaar: Option<DateTime<Utc>>,
    pub auction: Option<DateTime<Utc>>,
}

/// Profit verdict for a chest.
///
/// `total_value` only counts priced lines. Check [`ChestResult::is_complete`]
/// or `unresolved_items` before trusting it as the whole chest's worth.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChestResult {
    pub total_value: Coins,
    pub chest_cost: Coins,
    pub profit: Coins,
    pub lines: Vec<LineResult>,
    pub unresolved_items: BTreeSet<ItemName>,
    pub freshness: MarketFreshness,
}

impl ChestResult {
    /// Lines that received a price.
    #[must_use]
    pub fn items_found(&self) -> usize {
        self.lines.iter().filter(|l| l.is_priced()).count()
    }

    /// Lines left unpriced.
    #[must_use]
    pub fn items_not_found(&self) -> usize {
        self.lines.len() - self.items_found()
    }

    /// Every line was priced.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.unresolved_items.is_empty()
    }

    #[must_use]
    pub fn is_profitable(&self) -> bool {
        self.profit > Decimal::ZERO
    }

    /// Profit as a percentage of the chest cost, to two places.
    ///
    /// `None` for a free chest.
    #[must_use]
    pub fn roi_percent(&self) -> Option<Decimal> {
        if self.chest_cost.is_zero() {
            return None;
        }
        self.profit
            .checked_mul(Decimal::ONE_HUNDRED)?
            .checked_div(self.chest_cost)
            .map(|roi| roi.round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven))
    }
}
