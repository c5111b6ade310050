//! Market-agnostic valuation types.

pub mod appraisal;
pub mod chest;
pub mod error;
pub mod item;
pub mod money;
pub mod quote;
pub mod valuation;

pub use appraisal::ItemAppraisal;
pub use chest::{
    ChestEntry, ChestLine, ChestRequest, ChestRequestBody, ChestResult, LineResult,
    MarketFreshness,
};
pub use error::{PrecisionError, ValidationError};
pub use item::ItemName;
pub use money::{Coins, round_coins};
pub use quote::{AuctionQuote, BazaarQuote, Observed, PriceQuote, PriceSourceKind};
pub use valuation::{LineStatus, UnpricedReason, UnresolvedPrice};
