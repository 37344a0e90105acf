//! Non-negative decimal price type.

use core::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Price`].
#[derive(thiserror::Error, Debug, Clone)]
pub enum PriceError {
    /// The price is below zero.
    #[error("price cannot be negative")]
    Negative,
}

/// A product price.
///
/// Wraps a [`Decimal`] and guarantees the amount is non-negative. The value
/// serializes as a plain JSON number so browser clients can consume it
/// directly.
///
/// ## Examples
///
/// ```
/// use rust_decimal::Decimal;
/// use stockline_core::Price;
///
/// assert!(Price::parse(Decimal::new(999, 2)).is_ok());   // 9.99
/// assert!(Price::parse(Decimal::ZERO).is_ok());          // free is allowed
/// assert!(Price::parse(Decimal::new(-1, 0)).is_err());   // negative
/// ```
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    /// Parse a `Price` from a decimal amount.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::Negative`] if the amount is below zero.
    pub fn parse(amount: Decimal) -> Result<Self, PriceError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(PriceError::Negative);
        }
        Ok(Self(amount))
    }

    /// Returns the underlying decimal amount.
    #[must_use]
    pub const fn as_decimal(&self) -> Decimal {
        self.0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let amount = <Decimal as Deserialize>::deserialize(deserializer)?;
        Self::parse(amount).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rejects_negative() {
        let result = Price::parse(Decimal::new(-999, 2));
        assert!(matches!(result, Err(PriceError::Negative)));
    }

    #[test]
    fn test_parse_accepts_zero() {
        assert!(Price::parse(Decimal::ZERO).is_ok());
    }

    #[test]
    fn test_display_two_decimal_places() {
        let price = Price::parse(Decimal::new(95, 1)).expect("valid price"); // 9.5
        assert_eq!(price.to_string(), "9.50");
    }

    #[test]
    fn test_serialize_as_number() {
        let price = Price::parse(Decimal::new(999, 2)).expect("valid price");
        let json = serde_json::to_string(&price).expect("serialize");
        assert_eq!(json, "9.99");
    }

    #[test]
    fn test_deserialize_rejects_negative() {
        let result: Result<Price, _> = serde_json::from_str("-1.5");
        assert!(result.is_err());
    }
}
