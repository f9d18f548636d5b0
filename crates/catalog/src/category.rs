use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use lavka_core::{CategoryId, DomainResult, ShopId};

use crate::shop::{clean_description, clean_name};

/// Grouping label for items within one shop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub shop_id: ShopId,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCategory {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryUpdate {
    pub name: String,
    pub description: Option<String>,
}

impl Category {
    pub fn create(
        id: CategoryId,
        shop_id: ShopId,
        new: NewCategory,
        now: DateTime<Utc>,
    ) -> DomainResult<Self> {
        Ok(Self {
            id,
            shop_id,
            name: clean_name(&new.name)?,
            description: clean_description(new.description),
            created_at: now,
            updated_at: now,
        })
    }

    pub fn apply_update(&mut self, update: CategoryUpdate, now: DateTime<Utc>) -> DomainResult<()> {
        self.name = clean_name(&update.name)?;
        self.description = clean_description(update.description);
        self.updated_at = now;
        Ok(())
    }
}
