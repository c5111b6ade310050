//! Why a line has, or does not have, a price.
//!
//! Both states are terminal within one calculation. A later calculation picks
//! up whatever the refresh cycle has stored since.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

use super::item::ItemName;

/// Outcome of pricing one line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LineStatus {
    Priced,
    Unpriced,
}

impl fmt::Display for LineStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Priced => write!(f, "PRICED"),
            Self::Unpriced => write!(f, "UNPRICED"),
        }
    }
}

/// Detail for an unpriced item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UnpricedReason {
    /// Neither market has ever reported the item.
    NotListed,
    /// The auction house knows the item but nothing is listed right now.
    NoActiveListings,
    /// Quotes exist but all were older than the freshness threshold.
    Stale,
    /// Priced, but the line value does not fit in the coin range.
    Overflow,
}

impl fmt::Display for UnpricedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotListed => write!(f, "not listed on any market"),
            Self::NoActiveListings => write!(f, "no active listings or buy orders"),
            Self::Stale => write!(f, "only stale quotes available"),
            Self::Overflow => write!(f, "line value exceeds the coin range"),
        }
    }
}

/// No source had a usable quote. Recorded per line, never fatal.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[error("no market price for {item}: {reason}")]
pub struct UnresolvedPrice {
    pub item: ItemName,
    pub reason: UnpricedReason,
}

impl UnresolvedPrice {
    pub fn new(item: ItemName, reason: UnpricedReason) -> Self {
        Self { item, reason }
    }
}
