//! Service-level tests against the in-memory stores: the placement flow,
//! its compensation path, and owner-side status administration.

mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};

    use async_trait::async_trait;
    use chrono::Utc;

    use lavka_catalog::{Item, NewItem, NewShop, Shop};
    use lavka_core::{CategoryId, ItemId, Money, OrderId, ShopId, UserId};
    use lavka_orders::{Order, OrderStatus, PlaceOrder};

    use crate::catalog_store::{CatalogStore, DecrementOutcome};
    use crate::error::StoreError;
    use crate::memory::{InMemoryCatalogStore, InMemoryOrderStore};
    use crate::order_admin::{OrderAdmin, StatusUpdateError};
    use crate::order_store::OrderStore;
    use crate::placement::{OrderPlacement, PlaceOrderError};

    async fn seed_shop_with_item(
        catalog: &InMemoryCatalogStore,
        price_minor: u64,
        count: u32,
    ) -> (ShopId, ItemId) {
        let now = Utc::now();
        let shop = Shop::create(
            ShopId::new(),
            UserId::new(),
            NewShop {
                name: "Corner Store".to_string(),
                description: None,
            },
            now,
        )
        .unwrap();
        catalog.insert_shop(&shop).await.unwrap();

        let item = Item::create(
            ItemId::new(),
            shop.id,
            NewItem {
                name: "Milk".to_string(),
                description: None,
                category_id: None,
                price: Money::from_minor(price_minor),
                count,
                image_path: None,
            },
            now,
        )
        .unwrap();
        catalog.insert_item(&item).await.unwrap();

        (shop.id, item.id)
    }

    fn request(item_id: ItemId, quantity: u32) -> PlaceOrder {
        PlaceOrder {
            item_id,
            customer_name: "Alice".to_string(),
            customer_phone: "555-1234".to_string(),
            quantity,
        }
    }

    fn services(
        catalog: Arc<InMemoryCatalogStore>,
        orders: Arc<InMemoryOrderStore>,
    ) -> (OrderPlacement, OrderAdmin) {
        (
            OrderPlacement::new(catalog, orders.clone()),
            OrderAdmin::new(orders),
        )
    }

    #[tokio::test]
    async fn placement_creates_pending_order_and_decrements_stock() {
        let catalog = Arc::new(InMemoryCatalogStore::new());
        let orders = Arc::new(InMemoryOrderStore::new());
        let (shop_id, item_id) = seed_shop_with_item(&catalog, 1000, 3).await;
        let (placement, _) = services(catalog.clone(), orders.clone());

        let order = placement
            .place_order(shop_id, request(item_id, 2))
            .await
            .unwrap();

        assert_eq!(order.total_price, Money::from_minor(2000));
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.quantity, 2);

        let item = catalog.get_item(shop_id, item_id).await.unwrap().unwrap();
        assert_eq!(item.count, 1);

        let listed = orders.list_orders(shop_id, None).await.unwrap();
        assert_eq!(listed, vec![order]);
    }

    #[tokio::test]
    async fn insufficient_stock_leaves_everything_untouched() {
        let catalog = Arc::new(InMemoryCatalogStore::new());
        let orders = Arc::new(InMemoryOrderStore::new());
        let (shop_id, item_id) = seed_shop_with_item(&catalog, 1000, 3).await;
        let (placement, _) = services(catalog.clone(), orders.clone());

        let err = placement
            .place_order(shop_id, request(item_id, 4))
            .await
            .unwrap_err();

        assert_eq!(err, PlaceOrderError::InsufficientStock { available: 3 });
        let item = catalog.get_item(shop_id, item_id).await.unwrap().unwrap();
        assert_eq!(item.count, 3);
        assert!(orders.list_orders(shop_id, None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn validation_failures_have_no_side_effects() {
        let catalog = Arc::new(InMemoryCatalogStore::new());
        let orders = Arc::new(InMemoryOrderStore::new());
        let (shop_id, item_id) = seed_shop_with_item(&catalog, 1000, 3).await;
        let (placement, _) = services(catalog.clone(), orders.clone());

        let mut bad = request(item_id, 1);
        bad.customer_name = "  ".to_string();
        let err = placement.place_order(shop_id, bad).await.unwrap_err();
        assert!(matches!(err, PlaceOrderError::Validation(_)));

        let err = placement
            .place_order(shop_id, request(item_id, 0))
            .await
            .unwrap_err();
        assert!(matches!(err, PlaceOrderError::Validation(_)));

        let item = catalog.get_item(shop_id, item_id).await.unwrap().unwrap();
        assert_eq!(item.count, 3);
        assert!(orders.list_orders(shop_id, None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn disabled_and_cross_shop_items_are_not_found() {
        let catalog = Arc::new(InMemoryCatalogStore::new());
        let orders = Arc::new(InMemoryOrderStore::new());
        let (shop_id, item_id) = seed_shop_with_item(&catalog, 1000, 3).await;
        let (placement, _) = services(catalog.clone(), orders.clone());

        // Another shop's id never sees this item.
        let other_shop = ShopId::new();
        let err = placement
            .place_order(other_shop, request(item_id, 1))
            .await
            .unwrap_err();
        assert_eq!(err, PlaceOrderError::NotFound);

        // Disabling hides it from its own shop's storefront too.
        let mut item = catalog.get_item(shop_id, item_id).await.unwrap().unwrap();
        item.set_disabled(true, Utc::now());
        catalog.update_item(&item).await.unwrap();

        let err = placement
            .place_order(shop_id, request(item_id, 1))
            .await
            .unwrap_err();
        assert_eq!(err, PlaceOrderError::NotFound);
    }

    #[tokio::test]
    async fn total_price_is_immune_to_later_price_edits() {
        let catalog = Arc::new(InMemoryCatalogStore::new());
        let orders = Arc::new(InMemoryOrderStore::new());
        let (shop_id, item_id) = seed_shop_with_item(&catalog, 1000, 3).await;
        let (placement, _) = services(catalog.clone(), orders.clone());

        let order = placement
            .place_order(shop_id, request(item_id, 2))
            .await
            .unwrap();

        let mut item = catalog.get_item(shop_id, item_id).await.unwrap().unwrap();
        item.price = Money::from_minor(9999);
        catalog.update_item(&item).await.unwrap();

        let stored = orders
            .get_order(shop_id, order.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.total_price, Money::from_minor(2000));
    }

    #[tokio::test]
    async fn concurrent_orders_for_last_unit_have_one_winner() {
        let catalog = Arc::new(InMemoryCatalogStore::new());
        let orders = Arc::new(InMemoryOrderStore::new());
        let (shop_id, item_id) = seed_shop_with_item(&catalog, 1000, 1).await;
        let (placement, _) = services(catalog.clone(), orders.clone());

        let a = placement.place_order(shop_id, request(item_id, 1));
        let b = placement.place_order(shop_id, request(item_id, 1));
        let (ra, rb) = tokio::join!(a, b);

        let successes = [&ra, &rb].iter().filter(|r| r.is_ok()).count();
        assert_eq!(successes, 1);

        let loser = if ra.is_ok() { rb } else { ra };
        assert_eq!(
            loser.unwrap_err(),
            PlaceOrderError::InsufficientStock { available: 0 }
        );

        let item = catalog.get_item(shop_id, item_id).await.unwrap().unwrap();
        assert_eq!(item.count, 0);
        assert_eq!(orders.list_orders(shop_id, None).await.unwrap().len(), 1);
    }

    // Fault-injection wrappers. Only the methods the placement flow touches
    // are wired; the rest are unreachable in these tests.

    struct DecrementFailsCatalog {
        inner: Arc<InMemoryCatalogStore>,
    }

    #[async_trait]
    impl CatalogStore for DecrementFailsCatalog {
        async fn insert_shop(&self, shop: &Shop) -> Result<(), StoreError> {
            self.inner.insert_shop(shop).await
        }
        async fn get_shop(&self, shop_id: ShopId) -> Result<Option<Shop>, StoreError> {
            self.inner.get_shop(shop_id).await
        }
        async fn shop_for_owner(&self, user_id: UserId) -> Result<Option<Shop>, StoreError> {
            self.inner.shop_for_owner(user_id).await
        }
        async fn update_shop(&self, shop: &Shop) -> Result<(), StoreError> {
            self.inner.update_shop(shop).await
        }
        async fn list_shops(&self) -> Result<Vec<Shop>, StoreError> {
            self.inner.list_shops().await
        }
        async fn insert_category(
            &self,
            category: &lavka_catalog::Category,
        ) -> Result<(), StoreError> {
            self.inner.insert_category(category).await
        }
        async fn list_categories(
            &self,
            shop_id: ShopId,
        ) -> Result<Vec<lavka_catalog::Category>, StoreError> {
            self.inner.list_categories(shop_id).await
        }
        async fn get_category(
            &self,
            shop_id: ShopId,
            category_id: CategoryId,
        ) -> Result<Option<lavka_catalog::Category>, StoreError> {
            self.inner.get_category(shop_id, category_id).await
        }
        async fn update_category(
            &self,
            category: &lavka_catalog::Category,
        ) -> Result<bool, StoreError> {
            self.inner.update_category(category).await
        }
        async fn delete_category(
            &self,
            shop_id: ShopId,
            category_id: CategoryId,
        ) -> Result<bool, StoreError> {
            self.inner.delete_category(shop_id, category_id).await
        }
        async fn insert_item(&self, item: &Item) -> Result<(), StoreError> {
            self.inner.insert_item(item).await
        }
        async fn list_items(&self, shop_id: ShopId) -> Result<Vec<Item>, StoreError> {
            self.inner.list_items(shop_id).await
        }
        async fn get_item(
            &self,
            shop_id: ShopId,
            item_id: ItemId,
        ) -> Result<Option<Item>, StoreError> {
            self.inner.get_item(shop_id, item_id).await
        }
        async fn get_item_for_sale(
            &self,
            shop_id: ShopId,
            item_id: ItemId,
        ) -> Result<Option<Item>, StoreError> {
            self.inner.get_item_for_sale(shop_id, item_id).await
        }
        async fn list_items_for_sale(
            &self,
            shop_id: ShopId,
            category_id: Option<CategoryId>,
        ) -> Result<Vec<Item>, StoreError> {
            self.inner.list_items_for_sale(shop_id, category_id).await
        }
        async fn update_item(&self, item: &Item) -> Result<bool, StoreError> {
            self.inner.update_item(item).await
        }
        async fn delete_item(&self, shop_id: ShopId, item_id: ItemId) -> Result<bool, StoreError> {
            self.inner.delete_item(shop_id, item_id).await
        }
        async fn decrement_item_count(
            &self,
            _item_id: ItemId,
            _amount: u32,
        ) -> Result<DecrementOutcome, StoreError> {
            Err(StoreError::unavailable("injected decrement failure"))
        }
    }

    struct DeleteFailsOrders {
        inner: Arc<InMemoryOrderStore>,
        fail_delete: AtomicBool,
    }

    #[async_trait]
    impl OrderStore for DeleteFailsOrders {
        async fn insert_order(&self, order: &Order) -> Result<(), StoreError> {
            self.inner.insert_order(order).await
        }
        async fn delete_order(&self, order_id: OrderId) -> Result<(), StoreError> {
            if self.fail_delete.load(Ordering::SeqCst) {
                return Err(StoreError::unavailable("injected delete failure"));
            }
            self.inner.delete_order(order_id).await
        }
        async fn get_order(
            &self,
            shop_id: ShopId,
            order_id: OrderId,
        ) -> Result<Option<Order>, StoreError> {
            self.inner.get_order(shop_id, order_id).await
        }
        async fn list_orders(
            &self,
            shop_id: ShopId,
            status: Option<OrderStatus>,
        ) -> Result<Vec<Order>, StoreError> {
            self.inner.list_orders(shop_id, status).await
        }
        async fn update_order_status(
            &self,
            shop_id: ShopId,
            order_id: OrderId,
            status: OrderStatus,
        ) -> Result<bool, StoreError> {
            self.inner.update_order_status(shop_id, order_id, status).await
        }
    }

    #[tokio::test]
    async fn failed_decrement_rolls_back_the_inserted_order() {
        let inner_catalog = Arc::new(InMemoryCatalogStore::new());
        let orders = Arc::new(InMemoryOrderStore::new());
        let (shop_id, item_id) = seed_shop_with_item(&inner_catalog, 1000, 3).await;

        let catalog: Arc<dyn CatalogStore> = Arc::new(DecrementFailsCatalog {
            inner: inner_catalog.clone(),
        });
        let placement = OrderPlacement::new(catalog, orders.clone());

        let err = placement
            .place_order(shop_id, request(item_id, 1))
            .await
            .unwrap_err();

        assert!(matches!(err, PlaceOrderError::Store(_)));
        // The compensating delete removed the inserted order.
        assert!(orders.list_orders(shop_id, None).await.unwrap().is_empty());
        let item = inner_catalog
            .get_item(shop_id, item_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(item.count, 3);
    }

    #[tokio::test]
    async fn failed_compensation_surfaces_reconciliation() {
        let inner_catalog = Arc::new(InMemoryCatalogStore::new());
        let inner_orders = Arc::new(InMemoryOrderStore::new());
        let (shop_id, item_id) = seed_shop_with_item(&inner_catalog, 1000, 3).await;

        let catalog: Arc<dyn CatalogStore> = Arc::new(DecrementFailsCatalog {
            inner: inner_catalog,
        });
        let orders: Arc<dyn OrderStore> = Arc::new(DeleteFailsOrders {
            inner: inner_orders.clone(),
            fail_delete: AtomicBool::new(true),
        });
        let placement = OrderPlacement::new(catalog, orders);

        let err = placement
            .place_order(shop_id, request(item_id, 1))
            .await
            .unwrap_err();

        let PlaceOrderError::ReconciliationRequired { order_id } = err else {
            panic!("expected reconciliation error, got {err:?}");
        };
        // The orphaned order is still there, named by the error.
        let orphan = inner_orders
            .get_order(shop_id, order_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(orphan.status, OrderStatus::Pending);
    }

    #[tokio::test]
    async fn status_lifecycle_happy_path_and_rejections() {
        let catalog = Arc::new(InMemoryCatalogStore::new());
        let orders = Arc::new(InMemoryOrderStore::new());
        let (shop_id, item_id) = seed_shop_with_item(&catalog, 1000, 3).await;
        let (placement, admin) = services(catalog, orders);

        let order = placement
            .place_order(shop_id, request(item_id, 1))
            .await
            .unwrap();

        let order = admin
            .update_status(shop_id, order.id, OrderStatus::Accept)
            .await
            .unwrap();
        assert_eq!(order.status, OrderStatus::Accept);

        let order = admin
            .update_status(shop_id, order.id, OrderStatus::Delivered)
            .await
            .unwrap();
        assert_eq!(order.status, OrderStatus::Delivered);

        let err = admin
            .update_status(shop_id, order.id, OrderStatus::Pending)
            .await
            .unwrap_err();
        assert!(matches!(err, StatusUpdateError::InvalidTransition(t)
            if t.from == OrderStatus::Delivered && t.to == OrderStatus::Pending));
    }

    #[tokio::test]
    async fn cross_shop_status_update_is_not_found() {
        let catalog = Arc::new(InMemoryCatalogStore::new());
        let orders = Arc::new(InMemoryOrderStore::new());
        let (shop_id, item_id) = seed_shop_with_item(&catalog, 1000, 3).await;
        let (placement, admin) = services(catalog, orders);

        let order = placement
            .place_order(shop_id, request(item_id, 1))
            .await
            .unwrap();

        let err = admin
            .update_status(ShopId::new(), order.id, OrderStatus::Accept)
            .await
            .unwrap_err();
        assert_eq!(err, StatusUpdateError::NotFound);
    }

    #[tokio::test]
    async fn list_orders_filters_by_status_newest_first() {
        let catalog = Arc::new(InMemoryCatalogStore::new());
        let orders = Arc::new(InMemoryOrderStore::new());
        let (shop_id, item_id) = seed_shop_with_item(&catalog, 1000, 10).await;
        let (placement, admin) = services(catalog, orders);

        let first = placement
            .place_order(shop_id, request(item_id, 1))
            .await
            .unwrap();
        let second = placement
            .place_order(shop_id, request(item_id, 1))
            .await
            .unwrap();

        admin
            .update_status(shop_id, first.id, OrderStatus::Accept)
            .await
            .unwrap();

        let pending = admin
            .list_orders(shop_id, Some(OrderStatus::Pending))
            .await
            .unwrap();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].id, second.id);

        let all = admin.list_orders(shop_id, None).await.unwrap();
        assert_eq!(all.len(), 2);
        assert!(all[0].created_at >= all[1].created_at);
    }
}
