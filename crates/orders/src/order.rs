use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use lavka_catalog::Item;
use lavka_core::{ItemId, Money, OrderId, ShopId};

use crate::place::PlaceOrder;
use crate::status::OrderStatus;

/// A customer's purchase request against one item.
///
/// Created by an anonymous customer through the placement flow; the status is
/// transitioned only by the owning shop; every other field is immutable once
/// written. References to shop and item are weak: the order survives even if
/// the item is later deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub shop_id: ShopId,
    pub item_id: ItemId,
    pub customer_name: String,
    pub customer_phone: String,
    pub quantity: u32,
    /// `item.price * quantity`, captured at validation time. Later price
    /// edits never change an existing order.
    pub total_price: Money,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}

impl Order {
    /// Build a pending order from a validated request and the item state
    /// read during validation.
    ///
    /// Callers must have run [`PlaceOrder::validate`] first; this computes
    /// the total from the price snapshot it is handed, never from a re-read.
    pub fn from_placement(
        id: OrderId,
        item: &Item,
        request: &PlaceOrder,
        total_price: Money,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            shop_id: item.shop_id,
            item_id: item.id,
            customer_name: request.customer_name.trim().to_string(),
            customer_phone: request.customer_phone.trim().to_string(),
            quantity: request.quantity,
            total_price,
            status: OrderStatus::Pending,
            created_at: now,
        }
    }
}
