//! Arbitrary-precision amount helpers.
//!
//! `Order.fills` and `Asset.value` are stored as decimal strings so they can
//! round-trip through JSON/SQL without ever touching a native float. This
//! module is the only place that parses those strings into [`BigInt`] or
//! [`BigDecimal`], formats a [`BigInt`] back into a string, or compares two
//! [`BigInt`]s with the predicates the rest of the engine reads against.

use bigdecimal::BigDecimal;
use num_bigint::BigInt;
use num_traits::Zero;
use std::str::FromStr;

use crate::errors::EngineError;

/// Parses a decimal-string amount into a non-negative [`BigInt`].
///
/// An empty string parses to zero - callers that need to reject a missing
/// amount do so before calling this, at intake validation time (see
/// [`crate::intake::validate_order`]).
pub fn parse_amount(value: &str) -> Result<BigInt, EngineError> {
    if value.is_empty() {
        return Ok(BigInt::zero());
    }
    value
        .parse::<BigInt>()
        .map_err(|_| EngineError::InvalidOrder(format!("invalid integer amount: {value}")))
}

/// Formats an amount back into its canonical decimal-string form.
pub fn format_amount(value: &BigInt) -> String {
    value.to_string()
}

/// Parses a decimal-string amount as an arbitrary-precision decimal, used by
/// [`crate::intake::calculate_price`] so neither operand is narrowed to a
/// native float before the divide. An empty string parses to zero.
pub fn parse_decimal(value: &str) -> Result<BigDecimal, EngineError> {
    if value.is_empty() {
        return Ok(BigDecimal::from(0));
    }
    BigDecimal::from_str(value).map_err(|_| EngineError::InvalidOrder(format!("invalid decimal amount: {value}")))
}

pub fn greater_than(x: &BigInt, y: &BigInt) -> bool {
    x > y
}

pub fn less_than(x: &BigInt, y: &BigInt) -> bool {
    x < y
}

pub fn less_than_or_equal(x: &BigInt, y: &BigInt) -> bool {
    x <= y
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_string_parses_to_zero() {
        assert_eq!(parse_amount("").unwrap(), BigInt::zero());
        assert_eq!(parse_decimal("").unwrap(), BigDecimal::from(0));
    }

    #[test]
    fn parses_large_integers_exactly() {
        let v = parse_amount("123456789012345678901234567890").unwrap();
        assert_eq!(format_amount(&v), "123456789012345678901234567890");
    }

    #[test]
    fn rejects_non_numeric_amount() {
        assert!(parse_amount("not-a-number").is_err());
        assert!(parse_decimal("not-a-number").is_err());
    }

    #[test]
    fn parses_decimals_beyond_f64_precision() {
        // 20 significant digits - would lose precision through an f64 parse.
        let v = parse_decimal("123456789012345678.9").unwrap();
        assert_eq!(v, BigDecimal::from_str("123456789012345678.9").unwrap());
    }

    #[test]
    fn comparison_predicates() {
        let a = BigInt::from(5);
        let b = BigInt::from(10);
        assert!(less_than(&a, &b));
        assert!(greater_than(&b, &a));
        assert!(less_than_or_equal(&a, &a));
    }
}
