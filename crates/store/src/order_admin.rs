//! Owner-side order administration: listing and status transitions.

use std::sync::Arc;

use thiserror::Error;
use tracing::info;

use lavka_core::{OrderId, ShopId};
use lavka_orders::{InvalidTransition, Order, OrderStatus};

use crate::error::StoreError;
use crate::order_store::OrderStore;

/// Typed failure of [`OrderAdmin::update_status`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StatusUpdateError {
    /// Unknown order, or an order belonging to a different shop. The two
    /// are deliberately indistinguishable.
    #[error("order not found")]
    NotFound,

    /// The lifecycle does not permit this step.
    #[error(transparent)]
    InvalidTransition(#[from] InvalidTransition),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Owner-facing order operations. The caller's shop id is an explicit
/// parameter on every call; there is no ambient identity.
#[derive(Clone)]
pub struct OrderAdmin {
    orders: Arc<dyn OrderStore>,
}

impl OrderAdmin {
    pub fn new(orders: Arc<dyn OrderStore>) -> Self {
        Self { orders }
    }

    pub async fn list_orders(
        &self,
        shop_id: ShopId,
        status: Option<OrderStatus>,
    ) -> Result<Vec<Order>, StoreError> {
        self.orders.list_orders(shop_id, status).await
    }

    /// Transition an order's status on behalf of the owning shop.
    ///
    /// The ownership check is re-validated here even though the store scopes
    /// rows as well: a mismatched shop id returns `NotFound` before any
    /// transition logic runs.
    pub async fn update_status(
        &self,
        shop_id: ShopId,
        order_id: OrderId,
        new_status: OrderStatus,
    ) -> Result<Order, StatusUpdateError> {
        let mut order = self
            .orders
            .get_order(shop_id, order_id)
            .await?
            .ok_or(StatusUpdateError::NotFound)?;

        order.status.validate_transition(new_status)?;

        let updated = self
            .orders
            .update_order_status(shop_id, order_id, new_status)
            .await?;
        if !updated {
            // Deleted between read and write.
            return Err(StatusUpdateError::NotFound);
        }

        info!(%order_id, from = order.status.as_str(), to = new_status.as_str(), "order status updated");
        order.status = new_status;
        Ok(order)
    }
}
