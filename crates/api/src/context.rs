use lavka_auth::OwnerIdentity;
use lavka_core::{ShopId, UserId};

/// Authenticated owner context for a request.
///
/// Immutable, inserted by the auth middleware, required by all owner routes.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct OwnerContext {
    identity: OwnerIdentity,
}

impl OwnerContext {
    pub fn new(identity: OwnerIdentity) -> Self {
        Self { identity }
    }

    pub fn shop_id(&self) -> ShopId {
        self.identity.shop_id
    }

    pub fn user_id(&self) -> UserId {
        self.identity.user_id
    }
}
