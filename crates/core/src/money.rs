//! Money as an integer amount of minor currency units.
//!
//! Prices and order totals are stored in the smallest currency unit (e.g.
//! cents / tiyn) to keep arithmetic exact. There is no currency dimension;
//! a shop trades in one implicit currency.

use serde::{Deserialize, Serialize};

/// A non-negative monetary amount in minor units.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct Money(u64);

impl Money {
    pub const ZERO: Money = Money(0);

    pub fn from_minor(minor: u64) -> Self {
        Self(minor)
    }

    pub fn as_minor(&self) -> u64 {
        self.0
    }

    /// Multiply a unit price by an order quantity.
    ///
    /// Returns `None` on overflow; callers treat that as a validation failure.
    pub fn checked_mul(&self, quantity: u32) -> Option<Money> {
        self.0.checked_mul(u64::from(quantity)).map(Money)
    }
}

impl core::fmt::Display for Money {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn multiplies_price_by_quantity() {
        let price = Money::from_minor(1000);
        assert_eq!(price.checked_mul(2), Some(Money::from_minor(2000)));
    }

    #[test]
    fn overflow_is_none() {
        let price = Money::from_minor(u64::MAX);
        assert_eq!(price.checked_mul(2), None);
    }

    #[test]
    fn displays_major_and_minor_units() {
        assert_eq!(Money::from_minor(1050).to_string(), "10.50");
        assert_eq!(Money::from_minor(7).to_string(), "0.07");
    }
}
