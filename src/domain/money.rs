//! Coin amounts.
//!
//! The in-game currency has no fractional subunit, but bazaar quotes do carry
//! fractions (`4.5` coins per unit). Amounts are exact decimals throughout and
//! are rounded to whole coins, half-to-even, only when a user-visible total
//! is produced.

use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};

use super::error::PrecisionError;

/// A coin amount.
pub type Coins = Decimal;

/// Round to whole coins (banker's rounding).
#[must_use]
pub fn round_coins(amount: Coins) -> Coins {
    amount.round_dp_with_strategy(0, RoundingStrategy::MidpointNearestEven)
}

/// Convert a float from an external payload into an exact coin amount.
///
/// Goes through the shortest decimal representation of the float, so `4.5`
/// becomes exactly `4.5` and `0.1` becomes exactly `0.1`.
pub fn coins_from_f64(value: f64) -> Result<Coins, PrecisionError> {
    if !value.is_finite() {
        return Err(PrecisionError::NonFinite { value });
    }
    Decimal::from_str(&value.to_string()).map_err(|_| PrecisionError::OutOfRange { value })
}

/// `unit × quantity`, failing on overflow.
pub fn line_total(unit: Coins, quantity: u64, context: &str) -> Result<Coins, PrecisionError> {
    unit.checked_mul(Decimal::from(quantity))
        .ok_or_else(|| PrecisionError::Overflow {
            context: context.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn float_conversion_is_exact() {
        assert_eq!(coins_from_f64(4.5).unwrap(), dec!(4.5));
        assert_eq!(coins_from_f64(0.1).unwrap(), dec!(0.1));
        assert_eq!(coins_from_f64(500000000.0).unwrap(), dec!(500000000));
    }

    #[test]
    fn rejects_non_finite_and_huge() {
        assert!(matches!(
            coins_from_f64(f64::NAN),
            Err(PrecisionError::NonFinite { .. })
        ));
        assert!(matches!(
            coins_from_f64(f64::INFINITY),
            Err(PrecisionError::NonFinite { .. })
        ));
        assert!(matches!(
            coins_from_f64(1e300),
            Err(PrecisionError::OutOfRange { .. })
        ));
    }

    #[test]
    fn rounds_half_to_even() {
        assert_eq!(round_coins(dec!(2.5)), dec!(2));
        assert_eq!(round_coins(dec!(3.5)), dec!(4));
        assert_eq!(round_coins(dec!(4499.51)), dec!(4500));
    }

    #[test]
    fn line_total_is_exact() {
        assert_eq!(line_total(dec!(4.5), 1000, "test").unwrap(), dec!(4500.0));
        assert_eq!(line_total(dec!(4.5), 1000, "test").unwrap(), dec!(4500));
    }

    #[test]
    fn line_total_overflow() {
        let result = line_total(Decimal::MAX, 2, "coal");
        assert!(matches!(result, Err(PrecisionError::Overflow { .. })));
    }
}
