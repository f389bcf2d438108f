//! Validation helpers
//!
//! Custom rules used by the request DTOs through `#[validate(...)]`.

use lazy_static::lazy_static;
use num_traits::Zero;
use regex::Regex;
use rust_decimal::Decimal;
use validator::ValidationError;

lazy_static! {
    /// Optional leading `+`, then up to 16 digits with no leading zero.
    pub static ref PHONE_REGEX: Regex = Regex::new(r"^[+]?[1-9]\d{0,15}$").unwrap();
}

pub const PHONE_MESSAGE: &str = "Phone number must be a valid format";

/// Strictly greater than zero.
pub fn validate_positive<T: PartialOrd + Zero>(value: &T) -> Result<(), ValidationError> {
    if *value <= T::zero() {
        return Err(ValidationError::new("positive"));
    }
    Ok(())
}

pub fn validate_non_negative<T: PartialOrd + Zero>(value: &T) -> Result<(), ValidationError> {
    if *value < T::zero() {
        return Err(ValidationError::new("non_negative"));
    }
    Ok(())
}

/// Largest value a `NUMERIC(12, 2)` column holds.
fn max_money() -> Decimal {
    Decimal::new(999_999_999_999, 2)
}

/// Non-negative amount that fits the money columns: at most two decimal
/// places and at most 9_999_999_999.99.
pub fn validate_money(value: &Decimal) -> Result<(), ValidationError> {
    validate_non_negative(value)?;
    if value.normalize().scale() > 2 {
        return Err(ValidationError::new("money_precision"));
    }
    if *value > max_money() {
        return Err(ValidationError::new("money_range"));
    }
    Ok(())
}

pub fn validate_positive_money(value: &Decimal) -> Result<(), ValidationError> {
    validate_positive(value)?;
    validate_money(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn accepts_international_and_local_numbers() {
        assert!(PHONE_REGEX.is_match("+14155550123"));
        assert!(PHONE_REGEX.is_match("9876543210"));
        assert!(PHONE_REGEX.is_match("7"));
    }

    #[test]
    fn rejects_malformed_numbers() {
        assert!(!PHONE_REGEX.is_match("0123456789"));
        assert!(!PHONE_REGEX.is_match("+1 415 555 0123"));
        assert!(!PHONE_REGEX.is_match("12345678901234567"));
        assert!(!PHONE_REGEX.is_match("++123"));
        assert!(!PHONE_REGEX.is_match(""));
    }

    #[test]
    fn test_validate_positive() {
        assert!(validate_positive(&Decimal::from_str("0.01").unwrap()).is_ok());
        assert!(validate_positive(&Decimal::ZERO).is_err());
        assert!(validate_positive(&Decimal::from(-5)).is_err());
    }

    #[test]
    fn test_validate_non_negative() {
        assert!(validate_non_negative(&Decimal::ZERO).is_ok());
        assert!(validate_non_negative(&Decimal::from_str("-0.5").unwrap()).is_err());
    }

    #[test]
    fn money_keeps_to_cents() {
        assert!(validate_money(&Decimal::from_str("12.50").unwrap()).is_ok());
        assert!(validate_money(&Decimal::from_str("12.500").unwrap()).is_ok());
        assert!(validate_money(&Decimal::ZERO).is_ok());

        let err = validate_money(&Decimal::from_str("0.001").unwrap()).unwrap_err();
        assert_eq!(err.code, "money_precision");
    }

    #[test]
    fn money_fits_the_column() {
        assert!(validate_money(&Decimal::from_str("9999999999.99").unwrap()).is_ok());

        let err = validate_money(&Decimal::from(10_000_000_000i64)).unwrap_err();
        assert_eq!(err.code, "money_range");
    }

    #[test]
    fn positive_money_rejects_zero_and_sub_cent() {
        assert!(validate_positive_money(&Decimal::from_str("0.01").unwrap()).is_ok());
        assert_eq!(
            validate_positive_money(&Decimal::ZERO).unwrap_err().code,
            "positive"
        );
        assert_eq!(
            validate_positive_money(&Decimal::from_str("0.004").unwrap())
                .unwrap_err()
                .code,
            "money_precision"
        );
    }
}
