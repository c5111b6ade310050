//! Domain errors for chest requests and monetary arithmetic.
//!
//! [`ValidationError`] is returned when a chest request is malformed and is
//! terminal for that request. [`PrecisionError`] guards the conversion of
//! external prices into exact coin amounts and the checked arithmetic done on
//! them.
//!
//! # Examples
//!
//! ```
//! use chestworth::domain::error::ValidationError;
//! use chestworth::domain::{ChestEntry, ChestRequest};
//! use rust_decimal_macros::dec;
//!
//! let result = ChestRequest::try_new(vec![], dec!(100));
//! assert!(matches!(result, Err(ValidationError::EmptyItems)));
//!
//! let result = ChestRequest::try_new(vec![ChestEntry::new("Spirit Bone", 0)], dec!(100));
//! assert!(matches!(result, Err(ValidationError::NonPositiveQuantity { .. })));
//! ```

use thiserror::Error;

/// A chest request that cannot be valued at all.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// A chest must contain at least one item.
    #[error("item list cannot be empty")]
    EmptyItems,

    /// Every line must name an item.
    #[error("item name at line {line} is blank")]
    BlankItemName {
        /// Zero-based position in the request.
        line: usize,
    },

    /// Quantities are positive integers.
    #[error("quantity for {item} must be positive, got {quantity}")]
    NonPositiveQuantity {
        /// Item on the offending line.
        item: String,
        /// The quantity that was provided.
        quantity: i64,
    },

    /// Chest cost cannot be negative.
    #[error("chest cost must be non-negative, got {cost}")]
    NegativeChestCost {
        /// The cost that was provided.
        cost: rust_decimal::Decimal,
    },
}

/// Money could not be represented exactly.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PrecisionError {
    /// NaN or infinity in an external payload.
    #[error("price {value} is not a finite number")]
    NonFinite {
        /// The rejected value.
        value: f64,
    },

    /// A float too large or too small for a decimal coin amount.
    #[error("price {value} is out of decimal range")]
    OutOfRange {
        /// The rejected value.
        value: f64,
    },

    /// Checked decimal arithmetic overflowed.
    #[error("coin arithmetic overflowed while {context}")]
    Overflow {
        /// What was being computed.
        context: String,
    },
}
