use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use lavka_core::{DomainError, DomainResult, ShopId, UserId};

/// A seller's storefront and catalog owner.
///
/// Exactly one shop exists per owning user; the store layer rejects a second
/// creation with a conflict. Shops are never deleted in-app.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shop {
    pub id: ShopId,
    pub user_id: UserId,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Creation payload for a shop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewShop {
    pub name: String,
    pub description: Option<String>,
}

/// Owner-editable shop fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShopUpdate {
    pub name: String,
    pub description: Option<String>,
}

impl Shop {
    pub fn create(
        id: ShopId,
        user_id: UserId,
        new: NewShop,
        now: DateTime<Utc>,
    ) -> DomainResult<Self> {
        let name = clean_name(&new.name)?;
        Ok(Self {
            id,
            user_id,
            name,
            description: clean_description(new.description),
            created_at: now,
            updated_at: now,
        })
    }

    pub fn apply_update(&mut self, update: ShopUpdate, now: DateTime<Utc>) -> DomainResult<()> {
        self.name = clean_name(&update.name)?;
        self.description = clean_description(update.description);
        self.updated_at = now;
        Ok(())
    }
}

pub(crate) fn clean_name(name: &str) -> DomainResult<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(DomainError::validation("name cannot be empty"));
    }
    Ok(trimmed.to_string())
}

pub(crate) fn clean_description(description: Option<String>) -> Option<String> {
    description
        .map(|d| d.trim().to_string())
        .filter(|d| !d.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_time() -> DateTime<Utc> {
        "2024-01-01T00:00:00Z".parse().unwrap()
    }

    #[test]
    fn create_trims_fields() {
        let shop = Shop::create(
            ShopId::new(),
            UserId::new(),
            NewShop {
                name: "  Corner Store ".to_string(),
                description: Some("   ".to_string()),
            },
            test_time(),
        )
        .unwrap();

        assert_eq!(shop.name, "Corner Store");
        assert_eq!(shop.description, None);
    }

    #[test]
    fn create_rejects_blank_name() {
        let err = Shop::create(
            ShopId::new(),
            UserId::new(),
            NewShop {
                name: "   ".to_string(),
                description: None,
            },
            test_time(),
        )
        .unwrap_err();

        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn update_bumps_updated_at() {
        let created = test_time();
        let mut shop = Shop::create(
            ShopId::new(),
            UserId::new(),
            NewShop {
                name: "Corner Store".to_string(),
                description: None,
            },
            created,
        )
        .unwrap();

        let later = created + chrono::Duration::hours(1);
        shop.apply_update(
            ShopUpdate {
                name: "Corner Store 2".to_string(),
                description: Some("now with bread".to_string()),
            },
            later,
        )
        .unwrap();

        assert_eq!(shop.name, "Corner Store 2");
        assert_eq!(shop.updated_at, later);
        assert_eq!(shop.created_at, created);
    }
}
