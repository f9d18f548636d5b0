//! Postgres-backed stores (sqlx).
//!
//! Every query carries the scoping ids in its WHERE clause, mirroring the
//! managed backend's row-level security: a row of another shop is invisible,
//! not forbidden. The stock decrement is a single conditional UPDATE, which
//! is the serialization point for concurrent orders.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Row, postgres::PgRow};
use uuid::Uuid;

use lavka_catalog::{Category, Item, Shop};
use lavka_core::{CategoryId, ItemId, Money, OrderId, ShopId, UserId};
use lavka_orders::{Order, OrderStatus};

use crate::catalog_store::{CatalogStore, DecrementOutcome};
use crate::error::StoreError;
use crate::order_store::OrderStore;

/// Create the Lavka tables if they do not exist yet.
///
/// Kept as plain DDL rather than a migration framework; the schema is four
/// tables and changes with the code.
pub async fn ensure_schema(pool: &PgPool) -> Result<(), StoreError> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS shops (
            id          UUID PRIMARY KEY,
            user_id     UUID NOT NULL UNIQUE,
            name        TEXT NOT NULL,
            description TEXT,
            created_at  TIMESTAMPTZ NOT NULL,
            updated_at  TIMESTAMPTZ NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS categories (
            id          UUID PRIMARY KEY,
            shop_id     UUID NOT NULL REFERENCES shops(id),
            name        TEXT NOT NULL,
            description TEXT,
            created_at  TIMESTAMPTZ NOT NULL,
            updated_at  TIMESTAMPTZ NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS items (
            id          UUID PRIMARY KEY,
            shop_id     UUID NOT NULL REFERENCES shops(id),
            category_id UUID,
            name        TEXT NOT NULL,
            description TEXT,
            price       BIGINT NOT NULL CHECK (price >= 0),
            count       BIGINT NOT NULL CHECK (count >= 0),
            image_path  TEXT,
            is_disabled BOOLEAN NOT NULL DEFAULT FALSE,
            created_at  TIMESTAMPTZ NOT NULL,
            updated_at  TIMESTAMPTZ NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS orders (
            id             UUID PRIMARY KEY,
            shop_id        UUID NOT NULL,
            item_id        UUID NOT NULL,
            customer_name  TEXT NOT NULL,
            customer_phone TEXT NOT NULL,
            quantity       BIGINT NOT NULL CHECK (quantity >= 1),
            total_price    BIGINT NOT NULL,
            status         TEXT NOT NULL,
            created_at     TIMESTAMPTZ NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

fn decode_count(raw: i64) -> Result<u32, StoreError> {
    u32::try_from(raw).map_err(|_| StoreError::query(format!("count out of range: {raw}")))
}

fn decode_money(raw: i64) -> Result<Money, StoreError> {
    u64::try_from(raw)
        .map(Money::from_minor)
        .map_err(|_| StoreError::query(format!("price out of range: {raw}")))
}

fn encode_money(money: Money) -> Result<i64, StoreError> {
    i64::try_from(money.as_minor())
        .map_err(|_| StoreError::query("price exceeds storable range"))
}

fn shop_from_row(row: &PgRow) -> Result<Shop, StoreError> {
    Ok(Shop {
        id: ShopId::from_uuid(row.try_get::<Uuid, _>("id")?),
        user_id: UserId::from_uuid(row.try_get::<Uuid, _>("user_id")?),
        name: row.try_get("name")?,
        description: row.try_get("description")?,
        created_at: row.try_get::<DateTime<Utc>, _>("created_at")?,
        updated_at: row.try_get::<DateTime<Utc>, _>("updated_at")?,
    })
}

fn category_from_row(row: &PgRow) -> Result<Category, StoreError> {
    Ok(Category {
        id: CategoryId::from_uuid(row.try_get::<Uuid, _>("id")?),
        shop_id: ShopId::from_uuid(row.try_get::<Uuid, _>("shop_id")?),
        name: row.try_get("name")?,
        description: row.try_get("description")?,
        created_at: row.try_get::<DateTime<Utc>, _>("created_at")?,
        updated_at: row.try_get::<DateTime<Utc>, _>("updated_at")?,
    })
}

fn item_from_row(row: &PgRow) -> Result<Item, StoreError> {
    Ok(Item {
        id: ItemId::from_uuid(row.try_get::<Uuid, _>("id")?),
        shop_id: ShopId::from_uuid(row.try_get::<Uuid, _>("shop_id")?),
        category_id: row
            .try_get::<Option<Uuid>, _>("category_id")?
            .map(CategoryId::from_uuid),
        name: row.try_get("name")?,
        description: row.try_get("description")?,
        price: decode_money(row.try_get::<i64, _>("price")?)?,
        count: decode_count(row.try_get::<i64, _>("count")?)?,
        image_path: row.try_get("image_path")?,
        is_disabled: row.try_get("is_disabled")?,
        created_at: row.try_get::<DateTime<Utc>, _>("created_at")?,
        updated_at: row.try_get::<DateTime<Utc>, _>("updated_at")?,
    })
}

fn order_from_row(row: &PgRow) -> Result<Order, StoreError> {
    let status: String = row.try_get("status")?;
    Ok(Order {
        id: OrderId::from_uuid(row.try_get::<Uuid, _>("id")?),
        shop_id: ShopId::from_uuid(row.try_get::<Uuid, _>("shop_id")?),
        item_id: ItemId::from_uuid(row.try_get::<Uuid, _>("item_id")?),
        customer_name: row.try_get("customer_name")?,
        customer_phone: row.try_get("customer_phone")?,
        quantity: decode_count(row.try_get::<i64, _>("quantity")?)?,
        total_price: decode_money(row.try_get::<i64, _>("total_price")?)?,
        status: status
            .parse::<OrderStatus>()
            .map_err(|e| StoreError::query(e.to_string()))?,
        created_at: row.try_get::<DateTime<Utc>, _>("created_at")?,
    })
}

/// Postgres-backed catalog store.
pub struct PostgresCatalogStore {
    pool: Arc<PgPool>,
}

impl PostgresCatalogStore {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool: Arc::new(pool),
        }
    }
}

#[async_trait]
impl CatalogStore for PostgresCatalogStore {
    async fn insert_shop(&self, shop: &Shop) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO shops (id, user_id, name, description, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(shop.id.as_uuid())
        .bind(shop.user_id.as_uuid())
        .bind(&shop.name)
        .bind(&shop.description)
        .bind(shop.created_at)
        .bind(shop.updated_at)
        .execute(&*self.pool)
        .await?;
        Ok(())
    }

    async fn get_shop(&self, shop_id: ShopId) -> Result<Option<Shop>, StoreError> {
        let row = sqlx::query("SELECT * FROM shops WHERE id = $1")
            .bind(shop_id.as_uuid())
            .fetch_optional(&*self.pool)
            .await?;
        row.as_ref().map(shop_from_row).transpose()
    }

    async fn shop_for_owner(&self, user_id: UserId) -> Result<Option<Shop>, StoreError> {
        let row = sqlx::query("SELECT * FROM shops WHERE user_id = $1")
            .bind(user_id.as_uuid())
            .fetch_optional(&*self.pool)
            .await?;
        row.as_ref().map(shop_from_row).transpose()
    }

    async fn update_shop(&self, shop: &Shop) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            UPDATE shops SET name = $3, description = $4, updated_at = $5
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(shop.id.as_uuid())
        .bind(shop.user_id.as_uuid())
        .bind(&shop.name)
        .bind(&shop.description)
        .bind(shop.updated_at)
        .execute(&*self.pool)
        .await?;
        Ok(())
    }

    async fn list_shops(&self) -> Result<Vec<Shop>, StoreError> {
        let rows = sqlx::query("SELECT * FROM shops ORDER BY created_at")
            .fetch_all(&*self.pool)
            .await?;
        rows.iter().map(shop_from_row).collect()
    }

    async fn insert_category(&self, category: &Category) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO categories (id, shop_id, name, description, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(category.id.as_uuid())
        .bind(category.shop_id.as_uuid())
        .bind(&category.name)
        .bind(&category.description)
        .bind(category.created_at)
        .bind(category.updated_at)
        .execute(&*self.pool)
        .await?;
        Ok(())
    }

    async fn list_categories(&self, shop_id: ShopId) -> Result<Vec<Category>, StoreError> {
        let rows = sqlx::query("SELECT * FROM categories WHERE shop_id = $1 ORDER BY created_at")
            .bind(shop_id.as_uuid())
            .fetch_all(&*self.pool)
            .await?;
        rows.iter().map(category_from_row).collect()
    }

    async fn get_category(
        &self,
        shop_id: ShopId,
        category_id: CategoryId,
    ) -> Result<Option<Category>, StoreError> {
        let row = sqlx::query("SELECT * FROM categories WHERE id = $1 AND shop_id = $2")
            .bind(category_id.as_uuid())
            .bind(shop_id.as_uuid())
            .fetch_optional(&*self.pool)
            .await?;
        row.as_ref().map(category_from_row).transpose()
    }

    async fn update_category(&self, category: &Category) -> Result<bool, StoreError> {
        let result = sqlx::query(
            r#"
            UPDATE categories SET name = $3, description = $4, updated_at = $5
            WHERE id = $1 AND shop_id = $2
            "#,
        )
        .bind(category.id.as_uuid())
        .bind(category.shop_id.as_uuid())
        .bind(&category.name)
        .bind(&category.description)
        .bind(category.updated_at)
        .execute(&*self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_category(
        &self,
        shop_id: ShopId,
        category_id: CategoryId,
    ) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM categories WHERE id = $1 AND shop_id = $2")
            .bind(category_id.as_uuid())
            .bind(shop_id.as_uuid())
            .execute(&*self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn insert_item(&self, item: &Item) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO items
                (id, shop_id, category_id, name, description, price, count,
                 image_path, is_disabled, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(item.id.as_uuid())
        .bind(item.shop_id.as_uuid())
        .bind(item.category_id.map(|c| *c.as_uuid()))
        .bind(&item.name)
        .bind(&item.description)
        .bind(encode_money(item.price)?)
        .bind(i64::from(item.count))
        .bind(&item.image_path)
        .bind(item.is_disabled)
        .bind(item.created_at)
        .bind(item.updated_at)
        .execute(&*self.pool)
        .await?;
        Ok(())
    }

    async fn list_items(&self, shop_id: ShopId) -> Result<Vec<Item>, StoreError> {
        let rows = sqlx::query("SELECT * FROM items WHERE shop_id = $1 ORDER BY created_at")
            .bind(shop_id.as_uuid())
            .fetch_all(&*self.pool)
            .await?;
        rows.iter().map(item_from_row).collect()
    }

    async fn get_item(
        &self,
        shop_id: ShopId,
        item_id: ItemId,
    ) -> Result<Option<Item>, StoreError> {
        let row = sqlx::query("SELECT * FROM items WHERE id = $1 AND shop_id = $2")
            .bind(item_id.as_uuid())
            .bind(shop_id.as_uuid())
            .fetch_optional(&*self.pool)
            .await?;
        row.as_ref().map(item_from_row).transpose()
    }

    async fn get_item_for_sale(
        &self,
        shop_id: ShopId,
        item_id: ItemId,
    ) -> Result<Option<Item>, StoreError> {
        let row = sqlx::query(
            "SELECT * FROM items WHERE id = $1 AND shop_id = $2 AND is_disabled = FALSE",
        )
        .bind(item_id.as_uuid())
        .bind(shop_id.as_uuid())
        .fetch_optional(&*self.pool)
        .await?;
        row.as_ref().map(item_from_row).transpose()
    }

    async fn list_items_for_sale(
        &self,
        shop_id: ShopId,
        category_id: Option<CategoryId>,
    ) -> Result<Vec<Item>, StoreError> {
        let rows = sqlx::query(
            r#"
            SELECT * FROM items
            WHERE shop_id = $1
              AND is_disabled = FALSE
              AND ($2::uuid IS NULL OR category_id = $2)
            ORDER BY created_at
            "#,
        )
        .bind(shop_id.as_uuid())
        .bind(category_id.map(|c| *c.as_uuid()))
        .fetch_all(&*self.pool)
        .await?;
        rows.iter().map(item_from_row).collect()
    }

    async fn update_item(&self, item: &Item) -> Result<bool, StoreError> {
        let result = sqlx::query(
            r#"
            UPDATE items SET
                category_id = $3, name = $4, description = $5, price = $6,
                count = $7, image_path = $8, is_disabled = $9, updated_at = $10
            WHERE id = $1 AND shop_id = $2
            "#,
        )
        .bind(item.id.as_uuid())
        .bind(item.shop_id.as_uuid())
        .bind(item.category_id.map(|c| *c.as_uuid()))
        .bind(&item.name)
        .bind(&item.description)
        .bind(encode_money(item.price)?)
        .bind(i64::from(item.count))
        .bind(&item.image_path)
        .bind(item.is_disabled)
        .bind(item.updated_at)
        .execute(&*self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_item(&self, shop_id: ShopId, item_id: ItemId) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM items WHERE id = $1 AND shop_id = $2")
            .bind(item_id.as_uuid())
            .bind(shop_id.as_uuid())
            .execute(&*self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn decrement_item_count(
        &self,
        item_id: ItemId,
        amount: u32,
    ) -> Result<DecrementOutcome, StoreError> {
        // Single conditional UPDATE: the database serializes concurrent
        // decrements, so at most one caller wins the last unit.
        let row = sqlx::query(
            r#"
            UPDATE items SET count = count - $2, updated_at = NOW()
            WHERE id = $1 AND count >= $2
            RETURNING count
            "#,
        )
        .bind(item_id.as_uuid())
        .bind(i64::from(amount))
        .fetch_optional(&*self.pool)
        .await?;

        if let Some(row) = row {
            let remaining = decode_count(row.try_get::<i64, _>("count")?)?;
            return Ok(DecrementOutcome::Applied { remaining });
        }

        // Distinguish "gone" from "not enough left".
        let available = sqlx::query("SELECT count FROM items WHERE id = $1")
            .bind(item_id.as_uuid())
            .fetch_optional(&*self.pool)
            .await?;

        match available {
            Some(row) => Ok(DecrementOutcome::Insufficient {
                available: decode_count(row.try_get::<i64, _>("count")?)?,
            }),
            None => Ok(DecrementOutcome::NotFound),
        }
    }
}

/// Postgres-backed order store.
pub struct PostgresOrderStore {
    pool: Arc<PgPool>,
}

impl PostgresOrderStore {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool: Arc::new(pool),
        }
    }
}

#[async_trait]
impl OrderStore for PostgresOrderStore {
    async fn insert_order(&self, order: &Order) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO orders
                (id, shop_id, item_id, customer_name, customer_phone,
                 quantity, total_price, status, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(order.id.as_uuid())
        .bind(order.shop_id.as_uuid())
        .bind(order.item_id.as_uuid())
        .bind(&order.customer_name)
        .bind(&order.customer_phone)
        .bind(i64::from(order.quantity))
        .bind(encode_money(order.total_price)?)
        .bind(order.status.as_str())
        .bind(order.created_at)
        .execute(&*self.pool)
        .await?;
        Ok(())
    }

    async fn delete_order(&self, order_id: OrderId) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM orders WHERE id = $1")
            .bind(order_id.as_uuid())
            .execute(&*self.pool)
            .await?;
        Ok(())
    }

    async fn get_order(
        &self,
        shop_id: ShopId,
        order_id: OrderId,
    ) -> Result<Option<Order>, StoreError> {
        let row = sqlx::query("SELECT * FROM orders WHERE id = $1 AND shop_id = $2")
            .bind(order_id.as_uuid())
            .bind(shop_id.as_uuid())
            .fetch_optional(&*self.pool)
            .await?;
        row.as_ref().map(order_from_row).transpose()
    }

    async fn list_orders(
        &self,
        shop_id: ShopId,
        status: Option<OrderStatus>,
    ) -> Result<Vec<Order>, StoreError> {
        let rows = sqlx::query(
            r#"
            SELECT * FROM orders
            WHERE shop_id = $1 AND ($2::text IS NULL OR status = $2)
            ORDER BY created_at DESC
            "#,
        )
        .bind(shop_id.as_uuid())
        .bind(status.map(|s| s.as_str()))
        .fetch_all(&*self.pool)
        .await?;
        rows.iter().map(order_from_row).collect()
    }

    async fn update_order_status(
        &self,
        shop_id: ShopId,
        order_id: OrderId,
        status: OrderStatus,
    ) -> Result<bool, StoreError> {
        let result = sqlx::query("UPDATE orders SET status = $3 WHERE id = $1 AND shop_id = $2")
            .bind(order_id.as_uuid())
            .bind(shop_id.as_uuid())
            .bind(status.as_str())
            .execute(&*self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
