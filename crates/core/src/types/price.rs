//! Non-negative price representation using decimal arithmetic.

use core::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Errors that can occur when constructing a [`Price`].
#[derive(thiserror::Error, Debug, Clone)]
pub enum PriceError {
    /// The amount is below zero.
    #[error("price cannot be negative (got {0})")]
    Negative(Decimal),
    /// The input string is not a decimal number.
    #[error("price is not a valid decimal: {0}")]
    Unparseable(String),
}

/// A non-negative monetary amount in the store currency (USD).
///
/// Prices use [`Decimal`] arithmetic so that `19.99 * 3` is exact. The
/// catalog never stores a currency dimension; display formatting prepends a
/// dollar sign.
///
/// ## Examples
///
/// ```
/// use resonant_harmony_core::Price;
///
/// let price = Price::parse("99.99").expect("valid price");
/// assert_eq!(price.to_string(), "$99.99");
/// assert!(Price::parse("-5").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    /// A zero price.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a price from a decimal amount.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::Negative`] if the amount is below zero.
    pub fn new(amount: Decimal) -> Result<Self, PriceError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(PriceError::Negative(amount));
        }
        Ok(Self(amount))
    }

    /// Parse a price from a decimal string such as `"99.99"`.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not a decimal or is negative.
    pub fn parse(s: &str) -> Result<Self, PriceError> {
        let amount: Decimal = s
            .trim()
            .parse()
            .map_err(|_| PriceError::Unparseable(s.to_owned()))?;
        Self::new(amount)
    }

    /// The underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// The line total for `quantity` units at this price.
    #[must_use]
    pub fn line_total(&self, quantity: u32) -> Decimal {
        self.0 * Decimal::from(quantity)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${:.2}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid() {
        let price = Price::parse("129.99").expect("valid");
        assert_eq!(price.amount(), Decimal::new(12999, 2));
    }

    #[test]
    fn test_parse_rejects_negative() {
        assert!(matches!(Price::parse("-1.00"), Err(PriceError::Negative(_))));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(matches!(
            Price::parse("ninety-nine"),
            Err(PriceError::Unparseable(_))
        ));
    }

    #[test]
    fn test_line_total_is_exact() {
        let price = Price::parse("19.99").expect("valid");
        assert_eq!(price.line_total(3), Decimal::new(5997, 2));
    }

    #[test]
    fn test_display_two_decimal_places() {
        let price = Price::parse("5").expect("valid");
        assert_eq!(price.to_string(), "$5.00");
    }
}
