//! Owner order administration: listing and status transitions.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path, Query},
    response::IntoResponse,
    routing::{get, post},
};

use lavka_core::OrderId;

use crate::app::AppServices;
use crate::app::dto::{OrdersQuery, UpdateStatusRequest};
use crate::app::errors;
use crate::context::OwnerContext;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_orders))
        .route("/:id/status", post(update_status))
}

async fn list_orders(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(owner): Extension<OwnerContext>,
    Query(query): Query<OrdersQuery>,
) -> axum::response::Response {
    match services
        .admin
        .list_orders(owner.shop_id(), query.status)
        .await
    {
        Ok(orders) => Json(orders).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

async fn update_status(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(owner): Extension<OwnerContext>,
    Path(id): Path<OrderId>,
    Json(body): Json<UpdateStatusRequest>,
) -> axum::response::Response {
    match services
        .admin
        .update_status(owner.shop_id(), id, body.status)
        .await
    {
        Ok(order) => Json(order).into_response(),
        Err(e) => errors::status_update_error_to_response(e),
    }
}
