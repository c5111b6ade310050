//! Market snapshot ingestion.
//!
//! Reads the public bazaar and auction endpoint payloads from disk and turns
//! them into quotes for the price cache. Rows are decoded one at a time; a
//! malformed row is logged and counted, never fatal to the snapshot.

pub mod auction;
pub mod bazaar;

use std::path::Path;

use chrono::{DateTime, Utc};

use crate::cache::ActiveListings;
use crate::domain::{AuctionQuote, BazaarQuote, PriceSourceKind};
use crate::error::SnapshotError;

pub use auction::{parse_auctions, AuctionListing, AuctionPage};
pub use bazaar::{parse_bazaar, BazaarPayload, BazaarProduct, QuickStatus};

/// Quotes parsed from one bazaar payload.
#[derive(Debug, Clone)]
pub struct BazaarSnapshot {
    pub quotes: Vec<BazaarQuote>,
    /// Payload timestamp, or the read time if the payload has none.
    pub refreshed_at: DateTime<Utc>,
    /// Rows dropped as unusable.
    pub skipped: usize,
}

/// Quotes parsed from one or more auction pages.
#[derive(Debug, Clone)]
pub struct AuctionSnapshot {
    pub quotes: Vec<AuctionQuote>,
    pub refreshed_at: DateTime<Utc>,
    pub skipped: usize,
    /// Active BIN listings by uuid, for sales tracking.
    pub active: ActiveListings,
}

/// Read and parse a bazaar snapshot file.
pub fn load_bazaar(path: &Path) -> Result<BazaarSnapshot, SnapshotError> {
    let json = read(PriceSourceKind::Bazaar, path)?;
    parse_bazaar(&json, Utc::now())
}

/// Read and parse an auction snapshot file.
pub fn load_auctions(path: &Path) -> Result<AuctionSnapshot, SnapshotError> {
    let json = read(PriceSourceKind::Auction, path)?;
    parse_auctions(&json, Utc::now())
}

fn read(market: PriceSourceKind, path: &Path) -> Result<String, SnapshotError> {
    std::fs::read_to_string(path).map_err(|source| SnapshotError::Read {
        market,
        path: path.to_path_buf(),
        source,
    })
}

pub(crate) fn timestamp_from_millis(millis: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp_millis(millis)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_a_read_error() {
        let err = load_bazaar(Path::new("/nonexistent/bazaar.json")).unwrap_err();
        assert!(matches!(
            err,
            SnapshotError::Read {
                market: PriceSourceKind::Bazaar,
                ..
            }
        ));
    }
}
