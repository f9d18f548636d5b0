//! Order placement: the one flow that must keep two tables consistent.
//!
//! The original backend inserted the order and decremented the stock as two
//! independent client calls with no rollback. Here the decrement is a
//! conditional store operation and the order insert is compensated: an order
//! row never survives a decrement that did not happen.

use std::sync::Arc;

use thiserror::Error;
use tracing::{info, warn};

use lavka_core::{DomainError, OrderId, ShopId};
use lavka_orders::{Order, PlaceOrder};

use crate::catalog_store::{CatalogStore, DecrementOutcome};
use crate::error::StoreError;
use crate::order_store::OrderStore;

/// Typed failure of [`OrderPlacement::place_order`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PlaceOrderError {
    /// Malformed input (blank customer fields, zero quantity, overflow).
    #[error("validation failed: {0}")]
    Validation(String),

    /// Item or shop does not exist, item is disabled, or item belongs to a
    /// different shop. Deliberately indistinct: no existence leak.
    #[error("item not found")]
    NotFound,

    /// Quantity exceeds available stock; carries the count so the caller
    /// can re-prompt.
    #[error("insufficient stock: {available} available")]
    InsufficientStock { available: u32 },

    /// The underlying store failed after validation passed. Retryable; the
    /// service itself never retries.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The order row was inserted, the stock decrement failed, and the
    /// compensating delete failed too. The named order needs manual
    /// reconciliation; this is never reported as success.
    #[error("order {order_id} requires manual reconciliation")]
    ReconciliationRequired { order_id: OrderId },
}

impl From<DomainError> for PlaceOrderError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::NotFound => PlaceOrderError::NotFound,
            other => PlaceOrderError::Validation(other.to_string()),
        }
    }
}

/// The order placement service.
///
/// Stateless; every call reads fresh store state (no stock caching across
/// requests). Safe to share and call concurrently: the only shared mutable
/// resource is the item count, serialized by the store's conditional
/// decrement.
#[derive(Clone)]
pub struct OrderPlacement {
    catalog: Arc<dyn CatalogStore>,
    orders: Arc<dyn OrderStore>,
}

impl OrderPlacement {
    pub fn new(catalog: Arc<dyn CatalogStore>, orders: Arc<dyn OrderStore>) -> Self {
        Self { catalog, orders }
    }

    /// Validate a purchase request and commit it as one logical unit:
    /// insert the order, then decrement the stock, compensating the insert
    /// if the decrement does not apply.
    pub async fn place_order(
        &self,
        shop_id: ShopId,
        request: PlaceOrder,
    ) -> Result<Order, PlaceOrderError> {
        // 1-2. Deterministic input validation; no side effects on failure.
        request.validate()?;

        // 3. The item must exist, belong to this shop, and be sellable.
        let item = self
            .catalog
            .get_item_for_sale(shop_id, request.item_id)
            .await?
            .ok_or(PlaceOrderError::NotFound)?;

        // 4. Advisory stock check against the freshly read count. The
        // authoritative check is the conditional decrement below; this one
        // exists to reject hopeless requests before writing anything.
        if request.quantity > item.count {
            return Err(PlaceOrderError::InsufficientStock {
                available: item.count,
            });
        }

        // Price captured at validation time; never re-read.
        let total_price = request.total_for(&item)?;

        let order = Order::from_placement(
            OrderId::new(),
            &item,
            &request,
            total_price,
            chrono::Utc::now(),
        );

        self.orders.insert_order(&order).await?;

        match self
            .catalog
            .decrement_item_count(item.id, request.quantity)
            .await
        {
            Ok(DecrementOutcome::Applied { remaining }) => {
                info!(
                    order_id = %order.id,
                    item_id = %item.id,
                    quantity = request.quantity,
                    remaining,
                    "order placed"
                );
                Ok(order)
            }
            Ok(DecrementOutcome::Insufficient { available }) => {
                // Lost the race for the last units; undo the insert.
                self.compensate(order.id).await?;
                Err(PlaceOrderError::InsufficientStock { available })
            }
            Ok(DecrementOutcome::NotFound) => {
                // Item deleted between validation and decrement.
                self.compensate(order.id).await?;
                Err(PlaceOrderError::NotFound)
            }
            Err(store_err) => {
                self.compensate(order.id).await?;
                Err(PlaceOrderError::Store(store_err))
            }
        }
    }

    /// Delete the inserted order after a failed decrement. If the delete
    /// itself fails, surface the orphaned order instead of the original
    /// error: that row is the state an operator must fix.
    async fn compensate(&self, order_id: OrderId) -> Result<(), PlaceOrderError> {
        if let Err(err) = self.orders.delete_order(order_id).await {
            warn!(%order_id, %err, "compensating delete failed; order left for reconciliation");
            return Err(PlaceOrderError::ReconciliationRequired { order_id });
        }
        Ok(())
    }
}
