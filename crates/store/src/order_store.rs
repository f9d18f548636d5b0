use std::sync::Arc;

use async_trait::async_trait;

use lavka_core::{OrderId, ShopId};
use lavka_orders::{Order, OrderStatus};

use crate::error::StoreError;

/// Order persistence.
///
/// Reads are shop-scoped (row-level scoping): an order of another shop is
/// indistinguishable from a missing one. `delete_order` exists solely as
/// the compensating action of the placement flow and is not exposed to
/// owners or customers.
#[async_trait]
pub trait OrderStore: Send + Sync {
    async fn insert_order(&self, order: &Order) -> Result<(), StoreError>;

    /// Compensation for a failed stock decrement. Deleting an already
    /// deleted order is not an error.
    async fn delete_order(&self, order_id: OrderId) -> Result<(), StoreError>;

    async fn get_order(
        &self,
        shop_id: ShopId,
        order_id: OrderId,
    ) -> Result<Option<Order>, StoreError>;

    /// Newest first, optionally filtered by status.
    async fn list_orders(
        &self,
        shop_id: ShopId,
        status: Option<OrderStatus>,
    ) -> Result<Vec<Order>, StoreError>;

    /// Returns `false` when nothing matched (wrong shop or unknown id).
    async fn update_order_status(
        &self,
        shop_id: ShopId,
        order_id: OrderId,
        status: OrderStatus,
    ) -> Result<bool, StoreError>;
}

#[async_trait]
impl<S> OrderStore for Arc<S>
where
    S: OrderStore + ?Sized,
{
    async fn insert_order(&self, order: &Order) -> Result<(), StoreError> {
        (**self).insert_order(order).await
    }

    async fn delete_order(&self, order_id: OrderId) -> Result<(), StoreError> {
        (**self).delete_order(order_id).await
    }

    async fn get_order(
        &self,
        shop_id: ShopId,
        order_id: OrderId,
    ) -> Result<Option<Order>, StoreError> {
        (**self).get_order(shop_id, order_id).await
    }

    async fn list_orders(
        &self,
        shop_id: ShopId,
        status: Option<OrderStatus>,
    ) -> Result<Vec<Order>, StoreError> {
        (**self).list_orders(shop_id, status).await
    }

    async fn update_order_status(
        &self,
        shop_id: ShopId,
        order_id: OrderId,
        status: OrderStatus,
    ) -> Result<bool, StoreError> {
        (**self).update_order_status(shop_id, order_id, status).await
    }
}
