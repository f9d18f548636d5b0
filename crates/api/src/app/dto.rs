//! Request payloads that are not already domain types.
//!
//! Catalog creation/update payloads (`NewShop`, `NewItem`, `ItemUpdate`, …)
//! and the purchase request (`PlaceOrder`) deserialize straight from the
//! wire; only the handful of API-specific envelopes live here.

use serde::Deserialize;

use lavka_core::CategoryId;
use lavka_orders::OrderStatus;

#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: OrderStatus,
}

#[derive(Debug, Deserialize)]
pub struct DisableRequest {
    pub disabled: bool,
}

#[derive(Debug, Deserialize)]
pub struct OrdersQuery {
    pub status: Option<OrderStatus>,
}

#[derive(Debug, Deserialize)]
pub struct PublicItemsQuery {
    pub category_id: Option<CategoryId>,
}
