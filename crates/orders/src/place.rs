use serde::{Deserialize, Serialize};

use lavka_catalog::Item;
use lavka_core::{DomainError, DomainResult, ItemId, Money};

/// An anonymous customer's purchase intent.
///
/// Validation order is fixed, first failure wins:
/// 1. customer name and phone are non-empty;
/// 2. quantity is at least 1.
///
/// Stock and item-existence checks need store state and happen in the
/// placement service, after this deterministic part passes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaceOrder {
    pub item_id: ItemId,
    pub customer_name: String,
    pub customer_phone: String,
    pub quantity: u32,
}

impl PlaceOrder {
    pub fn validate(&self) -> DomainResult<()> {
        if self.customer_name.trim().is_empty() {
            return Err(DomainError::validation("customer name cannot be empty"));
        }
        if self.customer_phone.trim().is_empty() {
            return Err(DomainError::validation("customer phone cannot be empty"));
        }
        if self.quantity < 1 {
            return Err(DomainError::validation("quantity must be at least 1"));
        }
        Ok(())
    }

    /// Total price at the given item's current price.
    ///
    /// Overflow is a validation failure, not a panic.
    pub fn total_for(&self, item: &Item) -> DomainResult<Money> {
        item.price
            .checked_mul(self.quantity)
            .ok_or_else(|| DomainError::validation("total price overflows"))
    }
}
