//! Anonymous storefront: directory, item browsing, order placement.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};

use lavka_core::{ItemId, ShopId};
use lavka_orders::PlaceOrder;

use crate::app::AppServices;
use crate::app::dto::PublicItemsQuery;
use crate::app::errors;

pub fn router() -> Router {
    Router::new()
        .route("/shops", get(list_shops))
        .route("/shops/:shop_id/items", get(list_items))
        .route("/shops/:shop_id/items/:item_id", get(get_item))
        .route("/shops/:shop_id/orders", post(place_order))
}

async fn list_shops(Extension(services): Extension<Arc<AppServices>>) -> axum::response::Response {
    match services.catalog.list_shops().await {
        Ok(shops) => Json(shops).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

async fn list_items(
    Extension(services): Extension<Arc<AppServices>>,
    Path(shop_id): Path<ShopId>,
    Query(query): Query<PublicItemsQuery>,
) -> axum::response::Response {
    match services
        .catalog
        .list_items_for_sale(shop_id, query.category_id)
        .await
    {
        Ok(items) => Json(items).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

async fn get_item(
    Extension(services): Extension<Arc<AppServices>>,
    Path((shop_id, item_id)): Path<(ShopId, ItemId)>,
) -> axum::response::Response {
    match services.catalog.get_item_for_sale(shop_id, item_id).await {
        Ok(Some(item)) => Json(item).into_response(),
        Ok(None) => errors::json_error(StatusCode::NOT_FOUND, "not_found", "item not found"),
        Err(e) => errors::store_error_to_response(e),
    }
}

async fn place_order(
    Extension(services): Extension<Arc<AppServices>>,
    Path(shop_id): Path<ShopId>,
    Json(request): Json<PlaceOrder>,
) -> axum::response::Response {
    match services.placement.place_order(shop_id, request).await {
        Ok(order) => (StatusCode::CREATED, Json(order)).into_response(),
        Err(e) => errors::place_order_error_to_response(e),
    }
}
