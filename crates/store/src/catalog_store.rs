use std::sync::Arc;

use async_trait::async_trait;

use lavka_catalog::{Category, Item, Shop};
use lavka_core::{CategoryId, ItemId, ShopId, UserId};

use crate::error::StoreError;

/// Result of a conditional stock decrement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecrementOutcome {
    /// Stock was reduced; `remaining` is the count after the decrement.
    Applied { remaining: u32 },
    /// Stock was left untouched because fewer than `amount` units remain.
    Insufficient { available: u32 },
    /// No such item.
    NotFound,
}

/// Catalog persistence: shops, categories, items.
///
/// Every owner-facing operation carries the owning `ShopId` and
/// implementations must scope reads and writes to it, mirroring the
/// backend's row-level security. A mutation against a row of another shop
/// reports `NotFound` rather than leaking existence.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    // Shops -------------------------------------------------------------

    /// Insert a shop. Fails with `Conflict` if the owning user already has
    /// one (exactly one shop per user).
    async fn insert_shop(&self, shop: &Shop) -> Result<(), StoreError>;

    async fn get_shop(&self, shop_id: ShopId) -> Result<Option<Shop>, StoreError>;

    async fn shop_for_owner(&self, user_id: UserId) -> Result<Option<Shop>, StoreError>;

    async fn update_shop(&self, shop: &Shop) -> Result<(), StoreError>;

    /// Public store directory.
    async fn list_shops(&self) -> Result<Vec<Shop>, StoreError>;

    // Categories --------------------------------------------------------

    async fn insert_category(&self, category: &Category) -> Result<(), StoreError>;

    async fn list_categories(&self, shop_id: ShopId) -> Result<Vec<Category>, StoreError>;

    async fn get_category(
        &self,
        shop_id: ShopId,
        category_id: CategoryId,
    ) -> Result<Option<Category>, StoreError>;

    async fn update_category(&self, category: &Category) -> Result<bool, StoreError>;

    /// Returns `false` when nothing matched (wrong shop or unknown id).
    async fn delete_category(
        &self,
        shop_id: ShopId,
        category_id: CategoryId,
    ) -> Result<bool, StoreError>;

    // Items -------------------------------------------------------------

    async fn insert_item(&self, item: &Item) -> Result<(), StoreError>;

    /// Owner view: includes disabled items.
    async fn list_items(&self, shop_id: ShopId) -> Result<Vec<Item>, StoreError>;

    async fn get_item(&self, shop_id: ShopId, item_id: ItemId)
    -> Result<Option<Item>, StoreError>;

    /// Anonymous view: only a non-disabled item of the given shop.
    async fn get_item_for_sale(
        &self,
        shop_id: ShopId,
        item_id: ItemId,
    ) -> Result<Option<Item>, StoreError>;

    /// Anonymous view: the shop's non-disabled items, optionally filtered by
    /// category.
    async fn list_items_for_sale(
        &self,
        shop_id: ShopId,
        category_id: Option<CategoryId>,
    ) -> Result<Vec<Item>, StoreError>;

    async fn update_item(&self, item: &Item) -> Result<bool, StoreError>;

    async fn delete_item(&self, shop_id: ShopId, item_id: ItemId) -> Result<bool, StoreError>;

    /// Atomically decrement an item's stock: "decrement count where
    /// count >= amount". This is the serialization point for concurrent
    /// orders; implementations must not read-then-write.
    async fn decrement_item_count(
        &self,
        item_id: ItemId,
        amount: u32,
    ) -> Result<DecrementOutcome, StoreError>;
}

#[async_trait]
impl<S> CatalogStore for Arc<S>
where
    S: CatalogStore + ?Sized,
{
    async fn insert_shop(&self, shop: &Shop) -> Result<(), StoreError> {
        (**self).insert_shop(shop).await
    }

    async fn get_shop(&self, shop_id: ShopId) -> Result<Option<Shop>, StoreError> {
        (**self).get_shop(shop_id).await
    }

    async fn shop_for_owner(&self, user_id: UserId) -> Result<Option<Shop>, StoreError> {
        (**self).shop_for_owner(user_id).await
    }

    async fn update_shop(&self, shop: &Shop) -> Result<(), StoreError> {
        (**self).update_shop(shop).await
    }

    async fn list_shops(&self) -> Result<Vec<Shop>, StoreError> {
        (**self).list_shops().await
    }

    async fn insert_category(&self, category: &Category) -> Result<(), StoreError> {
        (**self).insert_category(category).await
    }

    async fn list_categories(&self, shop_id: ShopId) -> Result<Vec<Category>, StoreError> {
        (**self).list_categories(shop_id).await
    }

    async fn get_category(
        &self,
        shop_id: ShopId,
        category_id: CategoryId,
    ) -> Result<Option<Category>, StoreError> {
        (**self).get_category(shop_id, category_id).await
    }

    async fn update_category(&self, category: &Category) -> Result<bool, StoreError> {
        (**self).update_category(category).await
    }

    async fn delete_category(
        &self,
        shop_id: ShopId,
        category_id: CategoryId,
    ) -> Result<bool, StoreError> {
        (**self).delete_category(shop_id, category_id).await
    }

    async fn insert_item(&self, item: &Item) -> Result<(), StoreError> {
        (**self).insert_item(item).await
    }

    async fn list_items(&self, shop_id: ShopId) -> Result<Vec<Item>, StoreError> {
        (**self).list_items(shop_id).await
    }

    async fn get_item(
        &self,
        shop_id: ShopId,
        item_id: ItemId,
    ) -> Result<Option<Item>, StoreError> {
        (**self).get_item(shop_id, item_id).await
    }

    async fn get_item_for_sale(
        &self,
        shop_id: ShopId,
        item_id: ItemId,
    ) -> Result<Option<Item>, StoreError> {
        (**self).get_item_for_sale(shop_id, item_id).await
    }

    async fn list_items_for_sale(
        &self,
        shop_id: ShopId,
        category_id: Option<CategoryId>,
    ) -> Result<Vec<Item>, StoreError> {
        (**self).list_items_for_sale(shop_id, category_id).await
    }

    async fn update_item(&self, item: &Item) -> Result<bool, StoreError> {
        (**self).update_item(item).await
    }

    async fn delete_item(&self, shop_id: ShopId, item_id: ItemId) -> Result<bool, StoreError> {
        (**self).delete_item(shop_id, item_id).await
    }

    async fn decrement_item_count(
        &self,
        item_id: ItemId,
        amount: u32,
    ) -> Result<DecrementOutcome, StoreError> {
        (**self).decrement_item_count(item_id, amount).await
    }
}
