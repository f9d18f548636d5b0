//! Owner shop settings.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::Extension,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post, put},
};
use chrono::Utc;

use lavka_catalog::{NewShop, Shop, ShopUpdate};

use crate::app::AppServices;
use crate::app::errors;
use crate::context::OwnerContext;

pub fn router() -> Router {
    Router::new()
        .route("/", get(get_shop))
        .route("/", post(create_shop))
        .route("/", put(update_shop))
}

async fn get_shop(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(owner): Extension<OwnerContext>,
) -> axum::response::Response {
    match services.catalog.get_shop(owner.shop_id()).await {
        Ok(Some(shop)) => Json(shop).into_response(),
        Ok(None) => errors::json_error(StatusCode::NOT_FOUND, "not_found", "shop not created yet"),
        Err(e) => errors::store_error_to_response(e),
    }
}

async fn create_shop(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(owner): Extension<OwnerContext>,
    Json(body): Json<NewShop>,
) -> axum::response::Response {
    // Friendly duplicate check; the store's uniqueness constraint still
    // backstops concurrent creates.
    match services.catalog.shop_for_owner(owner.user_id()).await {
        Ok(None) => {}
        Ok(Some(_)) => {
            return errors::json_error(
                StatusCode::CONFLICT,
                "conflict",
                "this user already has a shop",
            );
        }
        Err(e) => return errors::store_error_to_response(e),
    }

    let shop = match Shop::create(owner.shop_id(), owner.user_id(), body, Utc::now()) {
        Ok(shop) => shop,
        Err(e) => return errors::domain_error_to_response(e),
    };

    match services.catalog.insert_shop(&shop).await {
        Ok(()) => (StatusCode::CREATED, Json(shop)).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

async fn update_shop(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(owner): Extension<OwnerContext>,
    Json(body): Json<ShopUpdate>,
) -> axum::response::Response {
    let mut shop = match services.catalog.get_shop(owner.shop_id()).await {
        Ok(Some(shop)) => shop,
        Ok(None) => {
            return errors::json_error(StatusCode::NOT_FOUND, "not_found", "shop not created yet");
        }
        Err(e) => return errors::store_error_to_response(e),
    };

    if let Err(e) = shop.apply_update(body, Utc::now()) {
        return errors::domain_error_to_response(e);
    }

    match services.catalog.update_shop(&shop).await {
        Ok(()) => Json(shop).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}
