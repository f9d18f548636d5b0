use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use lavka_core::{CategoryId, DomainResult, ItemId, Money, ShopId};

use crate::shop::{clean_description, clean_name};

/// A sellable catalog entry with price and stock count.
///
/// `count` is the only field mutated by two writers: the owner (manual edits)
/// and the order placement flow (stock decrement). The decrement itself is a
/// conditional store operation; this type never goes negative by
/// construction (`count` is unsigned).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub shop_id: ShopId,
    pub category_id: Option<CategoryId>,
    pub name: String,
    pub description: Option<String>,
    /// Unit price in minor currency units.
    pub price: Money,
    /// Units in stock.
    pub count: u32,
    /// Object-storage path of the item image, if one was uploaded.
    pub image_path: Option<String>,
    /// Disabled items are hidden from the public storefront and cannot be
    /// ordered.
    pub is_disabled: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Creation payload for an item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewItem {
    pub name: String,
    pub description: Option<String>,
    pub category_id: Option<CategoryId>,
    pub price: Money,
    pub count: u32,
    pub image_path: Option<String>,
}

/// Owner-editable item fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemUpdate {
    pub name: String,
    pub description: Option<String>,
    pub category_id: Option<CategoryId>,
    pub price: Money,
    pub count: u32,
    /// `None` keeps the current image.
    pub image_path: Option<String>,
}

impl Item {
    pub fn create(
        id: ItemId,
        shop_id: ShopId,
        new: NewItem,
        now: DateTime<Utc>,
    ) -> DomainResult<Self> {
        Ok(Self {
            id,
            shop_id,
            category_id: new.category_id,
            name: clean_name(&new.name)?,
            description: clean_description(new.description),
            price: new.price,
            count: new.count,
            image_path: new.image_path,
            is_disabled: false,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn apply_update(&mut self, update: ItemUpdate, now: DateTime<Utc>) -> DomainResult<()> {
        self.name = clean_name(&update.name)?;
        self.description = clean_description(update.description);
        self.category_id = update.category_id;
        self.price = update.price;
        self.count = update.count;
        if let Some(path) = update.image_path {
            self.image_path = Some(path);
        }
        self.updated_at = now;
        Ok(())
    }

    pub fn set_image_path(&mut self, path: String, now: DateTime<Utc>) {
        self.image_path = Some(path);
        self.updated_at = now;
    }

    pub fn set_disabled(&mut self, disabled: bool, now: DateTime<Utc>) {
        self.is_disabled = disabled;
        self.updated_at = now;
    }

    /// Whether an anonymous customer may see and order this item.
    pub fn is_sellable(&self) -> bool {
        !self.is_disabled
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lavka_core::DomainError;

    fn test_time() -> DateTime<Utc> {
        "2024-01-01T00:00:00Z".parse().unwrap()
    }

    fn new_item(name: &str) -> NewItem {
        NewItem {
            name: name.to_string(),
            description: None,
            category_id: None,
            price: Money::from_minor(1000),
            count: 3,
            image_path: None,
        }
    }

    #[test]
    fn created_item_is_sellable() {
        let item = Item::create(ItemId::new(), ShopId::new(), new_item("Milk"), test_time()).unwrap();
        assert!(item.is_sellable());
        assert_eq!(item.count, 3);
    }

    #[test]
    fn rejects_blank_name() {
        let err =
            Item::create(ItemId::new(), ShopId::new(), new_item("  "), test_time()).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn disabled_item_is_not_sellable() {
        let mut item =
            Item::create(ItemId::new(), ShopId::new(), new_item("Milk"), test_time()).unwrap();
        item.set_disabled(true, test_time());
        assert!(!item.is_sellable());
    }

    #[test]
    fn update_keeps_image_when_none_given() {
        let mut item = Item::create(
            ItemId::new(),
            ShopId::new(),
            NewItem {
                image_path: Some("shops/s1/milk.png".to_string()),
                ..new_item("Milk")
            },
            test_time(),
        )
        .unwrap();

        item.apply_update(
            ItemUpdate {
                name: "Milk 3.2%".to_string(),
                description: None,
                category_id: None,
                price: Money::from_minor(1200),
                count: 5,
                image_path: None,
            },
            test_time(),
        )
        .unwrap();

        assert_eq!(item.image_path.as_deref(), Some("shops/s1/milk.png"));
        assert_eq!(item.price, Money::from_minor(1200));
        assert_eq!(item.count, 5);
    }

    #[cfg(test)]
    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: creation never stores untrimmed names and never
            /// accepts whitespace-only ones.
            #[test]
            fn name_validation_is_total(name in "\\PC{0,40}") {
                let result = Item::create(
                    ItemId::new(),
                    ShopId::new(),
                    NewItem { name: name.clone(), ..new_item("x") },
                    test_time(),
                );

                if name.trim().is_empty() {
                    prop_assert!(result.is_err());
                } else {
                    let item = result.unwrap();
                    prop_assert_eq!(item.name, name.trim().to_string());
                }
            }
        }
    }
}
