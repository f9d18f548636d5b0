//! Owner category CRUD.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post, put},
};
use chrono::Utc;

use lavka_catalog::{Category, CategoryUpdate, NewCategory};
use lavka_core::CategoryId;

use crate::app::AppServices;
use crate::app::errors;
use crate::context::OwnerContext;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_categories))
        .route("/", post(create_category))
        .route("/:id", put(update_category))
        .route("/:id", delete(delete_category))
}

async fn list_categories(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(owner): Extension<OwnerContext>,
) -> axum::response::Response {
    match services.catalog.list_categories(owner.shop_id()).await {
        Ok(categories) => Json(categories).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

async fn create_category(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(owner): Extension<OwnerContext>,
    Json(body): Json<NewCategory>,
) -> axum::response::Response {
    let category = match Category::create(CategoryId::new(), owner.shop_id(), body, Utc::now()) {
        Ok(category) => category,
        Err(e) => return errors::domain_error_to_response(e),
    };

    match services.catalog.insert_category(&category).await {
        Ok(()) => (StatusCode::CREATED, Json(category)).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

async fn update_category(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(owner): Extension<OwnerContext>,
    Path(id): Path<CategoryId>,
    Json(body): Json<CategoryUpdate>,
) -> axum::response::Response {
    let mut category = match services.catalog.get_category(owner.shop_id(), id).await {
        Ok(Some(category)) => category,
        Ok(None) => {
            return errors::json_error(StatusCode::NOT_FOUND, "not_found", "category not found");
        }
        Err(e) => return errors::store_error_to_response(e),
    };

    if let Err(e) = category.apply_update(body, Utc::now()) {
        return errors::domain_error_to_response(e);
    }

    match services.catalog.update_category(&category).await {
        Ok(true) => Json(category).into_response(),
        Ok(false) => errors::json_error(StatusCode::NOT_FOUND, "not_found", "category not found"),
        Err(e) => errors::store_error_to_response(e),
    }
}

async fn delete_category(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(owner): Extension<OwnerContext>,
    Path(id): Path<CategoryId>,
) -> axum::response::Response {
    match services.catalog.delete_category(owner.shop_id(), id).await {
        Ok(true) => StatusCode::NO_CONTENT.into_response(),
        Ok(false) => errors::json_error(StatusCode::NOT_FOUND, "not_found", "category not found"),
        Err(e) => errors::store_error_to_response(e),
    }
}
