//! In-memory store implementations for tests/dev.
//!
//! Not optimized for performance. The stock decrement is a check-and-set
//! under the write lock, giving the same "at most one winner for the last
//! unit" guarantee the Postgres conditional UPDATE provides.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use lavka_catalog::{Category, Item, Shop};
use lavka_core::{CategoryId, ItemId, OrderId, ShopId, UserId};
use lavka_orders::{Order, OrderStatus};

use crate::catalog_store::{CatalogStore, DecrementOutcome};
use crate::error::StoreError;
use crate::order_store::OrderStore;

fn poisoned() -> StoreError {
    StoreError::unavailable("lock poisoned")
}

/// In-memory catalog store.
#[derive(Debug, Default)]
pub struct InMemoryCatalogStore {
    shops: RwLock<HashMap<ShopId, Shop>>,
    categories: RwLock<HashMap<CategoryId, Category>>,
    items: RwLock<HashMap<ItemId, Item>>,
}

impl InMemoryCatalogStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CatalogStore for InMemoryCatalogStore {
    async fn insert_shop(&self, shop: &Shop) -> Result<(), StoreError> {
        let mut shops = self.shops.write().map_err(|_| poisoned())?;
        if shops.values().any(|s| s.user_id == shop.user_id) {
            return Err(StoreError::conflict("user already owns a shop"));
        }
        if shops.contains_key(&shop.id) {
            return Err(StoreError::conflict("shop id already exists"));
        }
        shops.insert(shop.id, shop.clone());
        Ok(())
    }

    async fn get_shop(&self, shop_id: ShopId) -> Result<Option<Shop>, StoreError> {
        let shops = self.shops.read().map_err(|_| poisoned())?;
        Ok(shops.get(&shop_id).cloned())
    }

    async fn shop_for_owner(&self, user_id: UserId) -> Result<Option<Shop>, StoreError> {
        let shops = self.shops.read().map_err(|_| poisoned())?;
        Ok(shops.values().find(|s| s.user_id == user_id).cloned())
    }

    async fn update_shop(&self, shop: &Shop) -> Result<(), StoreError> {
        let mut shops = self.shops.write().map_err(|_| poisoned())?;
        match shops.get_mut(&shop.id) {
            Some(existing) if existing.user_id == shop.user_id => {
                *existing = shop.clone();
                Ok(())
            }
            _ => Err(StoreError::query("shop not found for owner")),
        }
    }

    async fn list_shops(&self) -> Result<Vec<Shop>, StoreError> {
        let shops = self.shops.read().map_err(|_| poisoned())?;
        let mut all: Vec<Shop> = shops.values().cloned().collect();
        all.sort_by_key(|s| s.created_at);
        Ok(all)
    }

    async fn insert_category(&self, category: &Category) -> Result<(), StoreError> {
        let mut categories = self.categories.write().map_err(|_| poisoned())?;
        categories.insert(category.id, category.clone());
        Ok(())
    }

    async fn list_categories(&self, shop_id: ShopId) -> Result<Vec<Category>, StoreError> {
        let categories = self.categories.read().map_err(|_| poisoned())?;
        let mut out: Vec<Category> = categories
            .values()
            .filter(|c| c.shop_id == shop_id)
            .cloned()
            .collect();
        out.sort_by_key(|c| c.created_at);
        Ok(out)
    }

    async fn get_category(
        &self,
        shop_id: ShopId,
        category_id: CategoryId,
    ) -> Result<Option<Category>, StoreError> {
        let categories = self.categories.read().map_err(|_| poisoned())?;
        Ok(categories
            .get(&category_id)
            .filter(|c| c.shop_id == shop_id)
            .cloned())
    }

    async fn update_category(&self, category: &Category) -> Result<bool, StoreError> {
        let mut categories = self.categories.write().map_err(|_| poisoned())?;
        match categories.get_mut(&category.id) {
            Some(existing) if existing.shop_id == category.shop_id => {
                *existing = category.clone();
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn delete_category(
        &self,
        shop_id: ShopId,
        category_id: CategoryId,
    ) -> Result<bool, StoreError> {
        let mut categories = self.categories.write().map_err(|_| poisoned())?;
        match categories.get(&category_id) {
            Some(c) if c.shop_id == shop_id => {
                categories.remove(&category_id);
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn insert_item(&self, item: &Item) -> Result<(), StoreError> {
        let mut items = self.items.write().map_err(|_| poisoned())?;
        items.insert(item.id, item.clone());
        Ok(())
    }

    async fn list_items(&self, shop_id: ShopId) -> Result<Vec<Item>, StoreError> {
        let items = self.items.read().map_err(|_| poisoned())?;
        let mut out: Vec<Item> = items
            .values()
            .filter(|i| i.shop_id == shop_id)
            .cloned()
            .collect();
        out.sort_by_key(|i| i.created_at);
        Ok(out)
    }

    async fn get_item(
        &self,
        shop_id: ShopId,
        item_id: ItemId,
    ) -> Result<Option<Item>, StoreError> {
        let items = self.items.read().map_err(|_| poisoned())?;
        Ok(items
            .get(&item_id)
            .filter(|i| i.shop_id == shop_id)
            .cloned())
    }

    async fn get_item_for_sale(
        &self,
        shop_id: ShopId,
        item_id: ItemId,
    ) -> Result<Option<Item>, StoreError> {
        let items = self.items.read().map_err(|_| poisoned())?;
        Ok(items
            .get(&item_id)
            .filter(|i| i.shop_id == shop_id && i.is_sellable())
            .cloned())
    }

    async fn list_items_for_sale(
        &self,
        shop_id: ShopId,
        category_id: Option<CategoryId>,
    ) -> Result<Vec<Item>, StoreError> {
        let items = self.items.read().map_err(|_| poisoned())?;
        let mut out: Vec<Item> = items
            .values()
            .filter(|i| i.shop_id == shop_id && i.is_sellable())
            .filter(|i| category_id.is_none() || i.category_id == category_id)
            .cloned()
            .collect();
        out.sort_by_key(|i| i.created_at);
        Ok(out)
    }

    async fn update_item(&self, item: &Item) -> Result<bool, StoreError> {
        let mut items = self.items.write().map_err(|_| poisoned())?;
        match items.get_mut(&item.id) {
            Some(existing) if existing.shop_id == item.shop_id => {
                *existing = item.clone();
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn delete_item(&self, shop_id: ShopId, item_id: ItemId) -> Result<bool, StoreError> {
        let mut items = self.items.write().map_err(|_| poisoned())?;
        match items.get(&item_id) {
            Some(i) if i.shop_id == shop_id => {
                items.remove(&item_id);
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn decrement_item_count(
        &self,
        item_id: ItemId,
        amount: u32,
    ) -> Result<DecrementOutcome, StoreError> {
        // Check-and-set under the write lock; no reader can interleave.
        let mut items = self.items.write().map_err(|_| poisoned())?;
        let Some(item) = items.get_mut(&item_id) else {
            return Ok(DecrementOutcome::NotFound);
        };

        if item.count < amount {
            return Ok(DecrementOutcome::Insufficient {
                available: item.count,
            });
        }

        item.count -= amount;
        Ok(DecrementOutcome::Applied {
            remaining: item.count,
        })
    }
}

/// In-memory order store.
#[derive(Debug, Default)]
pub struct InMemoryOrderStore {
    orders: RwLock<HashMap<OrderId, Order>>,
}

impl InMemoryOrderStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl OrderStore for InMemoryOrderStore {
    async fn insert_order(&self, order: &Order) -> Result<(), StoreError> {
        let mut orders = self.orders.write().map_err(|_| poisoned())?;
        if orders.contains_key(&order.id) {
            return Err(StoreError::conflict("order id already exists"));
        }
        orders.insert(order.id, order.clone());
        Ok(())
    }

    async fn delete_order(&self, order_id: OrderId) -> Result<(), StoreError> {
        let mut orders = self.orders.write().map_err(|_| poisoned())?;
        orders.remove(&order_id);
        Ok(())
    }

    async fn get_order(
        &self,
        shop_id: ShopId,
        order_id: OrderId,
    ) -> Result<Option<Order>, StoreError> {
        let orders = self.orders.read().map_err(|_| poisoned())?;
        Ok(orders
            .get(&order_id)
            .filter(|o| o.shop_id == shop_id)
            .cloned())
    }

    async fn list_orders(
        &self,
        shop_id: ShopId,
        status: Option<OrderStatus>,
    ) -> Result<Vec<Order>, StoreError> {
        let orders = self.orders.read().map_err(|_| poisoned())?;
        let mut out: Vec<Order> = orders
            .values()
            .filter(|o| o.shop_id == shop_id)
            .filter(|o| status.is_none_or(|s| o.status == s))
            .cloned()
            .collect();
        out.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(out)
    }

    async fn update_order_status(
        &self,
        shop_id: ShopId,
        order_id: OrderId,
        status: OrderStatus,
    ) -> Result<bool, StoreError> {
        let mut orders = self.orders.write().map_err(|_| poisoned())?;
        match orders.get_mut(&order_id) {
            Some(order) if order.shop_id == shop_id => {
                order.status = status;
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}
