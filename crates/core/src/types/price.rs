//! Type-safe, non-negative price representation using decimal arithmetic.
//!
//! Every amount in the marketplace (list prices, order amounts, revenue
//! totals) is a [`Price`]. Construction rejects negative values, and the
//! arithmetic offered here (addition, summing, averaging) cannot produce one.

use core::fmt;
use std::iter::Sum;
use std::ops::Add;
use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Price`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    /// The input string is empty.
    #[error("price cannot be empty")]
    Empty,
    /// The input is not a decimal number.
    #[error("price must be a number, got '{0}'")]
    Invalid(String),
    /// The amount is below zero.
    #[error("price cannot be negative")]
    Negative,
}

/// A non-negative amount in the store currency (USD).
///
/// ```
/// use kitzz_core::Price;
///
/// let price = Price::parse("4.99").unwrap();
/// assert_eq!(price.to_string(), "$4.99");
/// assert!(Price::parse("free").is_err());
/// assert!(Price::parse("-1").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Price(Decimal);

impl Price {
    /// A price of zero.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a price from a decimal amount.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::Negative`] if `amount` is below zero.
    pub fn new(amount: Decimal) -> Result<Self, PriceError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(PriceError::Negative);
        }
        Ok(Self(amount))
    }

    /// Create a price from a whole number of cents.
    #[must_use]
    pub fn from_cents(cents: u32) -> Self {
        Self(Decimal::new(i64::from(cents), 2))
    }

    /// Parse user input such as `"4.99"` or `" 19 "`.
    ///
    /// # Errors
    ///
    /// Returns a [`PriceError`] if the input is blank, not a decimal number,
    /// or negative.
    pub fn parse(input: &str) -> Result<Self, PriceError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(PriceError::Empty);
        }
        let amount =
            Decimal::from_str(trimmed).map_err(|_| PriceError::Invalid(trimmed.to_owned()))?;
        Self::new(amount)
    }

    /// The amount rounded half away from zero to cents.
    #[must_use]
    fn to_cents_decimal(&self) -> Decimal {
        self.0
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    }

    /// The amount as a bare two-decimal string (`"4.99"`), without a symbol.
    #[must_use]
    pub fn plain(&self) -> String {
        format!("{:.2}", self.to_cents_decimal())
    }

    /// Split this amount evenly into `parts`; zero parts yields zero.
    #[must_use]
    pub fn average_over(self, parts: usize) -> Self {
        if parts == 0 {
            return Self::ZERO;
        }
        Self(self.0 / Decimal::from(parts))
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${}", self.plain())
    }
}

impl FromStr for Price {
    type Err = PriceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<Decimal> for Price {
    type Error = PriceError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Price> for Decimal {
    fn from(price: Price) -> Self {
        price.0
    }
}

impl Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Self> for Price {
    fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_accepts_decimal_input() {
        assert_eq!(Price::parse("4.99").unwrap(), Price::from_cents(499));
        assert_eq!(Price::parse("  19.99 ").unwrap(), Price::from_cents(1999));
        assert_eq!(Price::parse("0").unwrap(), Price::ZERO);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(Price::parse(""), Err(PriceError::Empty));
        assert_eq!(Price::parse("   "), Err(PriceError::Empty));
        assert_eq!(
            Price::parse("abc"),
            Err(PriceError::Invalid("abc".to_string()))
        );
        assert_eq!(Price::parse("-0.01"), Err(PriceError::Negative));
    }

    #[test]
    fn test_sum_of_order_amounts() {
        let amounts = [
            Price::from_cents(499),
            Price::from_cents(199),
            Price::from_cents(1999),
        ];
        let total: Price = amounts.iter().sum();
        assert_eq!(total, Price::from_cents(2697));
        assert_eq!(total.to_string(), "$26.97");
    }

    #[test]
    fn test_display_rounds_to_cents() {
        let price = Price::parse("3.333").unwrap();
        assert_eq!(price.plain(), "3.33");
        let price = Price::parse("2.005").unwrap();
        assert_eq!(price.plain(), "2.01");
        assert_eq!(Price::from_cents(500).plain(), "5.00");
    }

    #[test]
    fn test_average_over() {
        let total = Price::from_cents(1000);
        assert_eq!(total.average_over(4), Price::parse("2.5").unwrap());
        assert_eq!(total.average_over(0), Price::ZERO);
    }

    #[test]
    fn test_deserialize_rejects_negative() {
        assert!(serde_json::from_str::<Price>("\"4.99\"").is_ok());
        assert!(serde_json::from_str::<Price>("\"-4.99\"").is_err());
    }
}
