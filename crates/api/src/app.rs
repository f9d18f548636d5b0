use std::sync::Arc;

use axum::{Extension, Router};
use sqlx::PgPool;
use tower::ServiceBuilder;

use lavka_store::{
    CatalogStore, InMemoryCatalogStore, InMemoryMediaStore, InMemoryOrderStore, MediaStore,
    OrderAdmin, OrderPlacement, OrderStore, PostgresCatalogStore, PostgresOrderStore,
};

use crate::jwt::HsTokenDecoder;
use crate::middleware::AuthState;

pub mod dto;
pub mod errors;
pub mod routes;

/// Shared service wiring handed to every route via an extension.
#[derive(Clone)]
pub struct AppServices {
    pub catalog: Arc<dyn CatalogStore>,
    pub orders: Arc<dyn OrderStore>,
    pub media: Arc<dyn MediaStore>,
    pub placement: OrderPlacement,
    pub admin: OrderAdmin,
}

impl AppServices {
    fn assemble(
        catalog: Arc<dyn CatalogStore>,
        orders: Arc<dyn OrderStore>,
        media: Arc<dyn MediaStore>,
    ) -> Self {
        let placement = OrderPlacement::new(catalog.clone(), orders.clone());
        let admin = OrderAdmin::new(orders.clone());
        Self {
            catalog,
            orders,
            media,
            placement,
            admin,
        }
    }

    /// In-memory wiring for dev/test.
    pub fn in_memory() -> Self {
        Self::assemble(
            Arc::new(InMemoryCatalogStore::new()),
            Arc::new(InMemoryOrderStore::new()),
            Arc::new(InMemoryMediaStore::new()),
        )
    }

    /// Postgres-backed wiring. Media still lives in memory; the real
    /// deployment points image paths at the external bucket.
    pub fn postgres(pool: PgPool) -> Self {
        Self::assemble(
            Arc::new(PostgresCatalogStore::new(pool.clone())),
            Arc::new(PostgresOrderStore::new(pool)),
            Arc::new(InMemoryMediaStore::new()),
        )
    }
}

/// Build the full application router.
pub fn build_app(services: AppServices, jwt_secret: &str) -> Router {
    let auth_state = AuthState {
        decoder: Arc::new(HsTokenDecoder::new(jwt_secret)),
    };

    let owner = Router::new()
        .nest("/shop", routes::shop::router())
        .nest("/categories", routes::categories::router())
        .nest("/items", routes::items::router())
        .nest("/orders", routes::orders::router())
        .layer(axum::middleware::from_fn_with_state(
            auth_state,
            crate::middleware::auth_middleware,
        ));

    Router::new()
        .nest("/api/public", routes::public::router())
        .nest("/api", owner)
        .layer(ServiceBuilder::new().layer(Extension(Arc::new(services))))
}
