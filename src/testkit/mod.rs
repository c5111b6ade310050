//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`domain`] - Builders for quotes and chest entries.
//! - [`cache`] - Fixture caches and a read-counting [`PriceCache`](crate::cache::PriceCache).
//! - [`payload`] - Canonical bazaar and auction snapshot payloads.

pub mod cache;
pub mod domain;
pub mod payload;
