use serde::{Deserialize, Serialize};

use lavka_core::{ShopId, UserId};

use crate::claims::OwnerClaims;

/// Request-scoped identity of an authenticated shop owner.
///
/// Every owner-facing operation takes this (or its `shop_id`) explicitly.
/// There is deliberately no ambient "current user" anywhere in the system;
/// identity flows as a parameter from the transport layer downwards.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnerIdentity {
    pub user_id: UserId,
    pub shop_id: ShopId,
}

impl OwnerIdentity {
    pub fn new(user_id: UserId, shop_id: ShopId) -> Self {
        Self { user_id, shop_id }
    }
}

impl From<&OwnerClaims> for OwnerIdentity {
    fn from(claims: &OwnerClaims) -> Self {
        Self {
            user_id: claims.sub,
            shop_id: claims.shop_id,
        }
    }
}
