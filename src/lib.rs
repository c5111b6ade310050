//! Chestworth - dungeon chest profit calculation.
//!
//! Values the contents of a reward chest against cached bazaar and auction
//! house prices and reports the profit over the chest's opening cost.
//!
//! # Architecture
//!
//! - **`cache`** - Read-only [`PriceCache`](cache::PriceCache) gateway plus
//!   the in-memory store behind it
//! - **`pricing`** - Ordered chain of [`PriceSource`](pricing::PriceSource)s
//!   (bazaar first, then auction house) and staleness policy
//! - **`calculator`** - Per-request memoization, line pricing and totals
//! - **`ingest`** / **`refresh`** - Snapshot parsing and periodic reload
//!
//! # Modules
//!
//! - [`config`] - Configuration loading from TOML files
//! - [`domain`] - Item names, quotes, chest requests and results
//! - [`error`] - Error types for the crate
//! - [`cli`] - Command-line front end
//!
//! # Features
//!
//! - `testkit` - Expose fixture caches and payloads to integration tests
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use chestworth::cache::MemoryPriceCache;
//! use chestworth::calculator::ChestCalculator;
//! use chestworth::domain::{AuctionQuote, ChestEntry};
//! use chestworth::pricing::PriceResolver;
//! use rust_decimal_macros::dec;
//!
//! let cache = Arc::new(MemoryPriceCache::new());
//! cache.upsert_auction(AuctionQuote::new("Necron's Handle", dec!(500000000), 3, chrono::Utc::now()));
//!
//! let calculator = ChestCalculator::new(PriceResolver::new(cache));
//! let result = calculator
//!     .evaluate(vec![ChestEntry::new("Necron's Handle", 1)], dec!(0))
//!     .unwrap();
//! assert_eq!(result.profit, dec!(500000000));
//! ```

pub mod cache;
pub mod calculator;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod ingest;
pub mod pricing;
pub mod refresh;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
