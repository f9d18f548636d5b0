//! Owner item CRUD, including the disabled toggle and image cleanup.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post, put},
};
use chrono::Utc;
use tracing::warn;

use lavka_catalog::{Item, ItemUpdate, NewItem};
use lavka_core::ItemId;

use crate::app::AppServices;
use crate::app::dto::DisableRequest;
use crate::app::errors;
use crate::context::OwnerContext;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_items))
        .route("/", post(create_item))
        .route("/:id", put(update_item))
        .route("/:id", delete(delete_item))
        .route("/:id/disable", post(set_disabled))
        .route("/:id/image", post(upload_image))
}

async fn list_items(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(owner): Extension<OwnerContext>,
) -> axum::response::Response {
    match services.catalog.list_items(owner.shop_id()).await {
        Ok(items) => Json(items).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

async fn create_item(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(owner): Extension<OwnerContext>,
    Json(body): Json<NewItem>,
) -> axum::response::Response {
    let item = match Item::create(ItemId::new(), owner.shop_id(), body, Utc::now()) {
        Ok(item) => item,
        Err(e) => return errors::domain_error_to_response(e),
    };

    match services.catalog.insert_item(&item).await {
        Ok(()) => (StatusCode::CREATED, Json(item)).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

async fn update_item(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(owner): Extension<OwnerContext>,
    Path(id): Path<ItemId>,
    Json(body): Json<ItemUpdate>,
) -> axum::response::Response {
    let mut item = match services.catalog.get_item(owner.shop_id(), id).await {
        Ok(Some(item)) => item,
        Ok(None) => return errors::json_error(StatusCode::NOT_FOUND, "not_found", "item not found"),
        Err(e) => return errors::store_error_to_response(e),
    };

    if let Err(e) = item.apply_update(body, Utc::now()) {
        return errors::domain_error_to_response(e);
    }

    match services.catalog.update_item(&item).await {
        Ok(true) => Json(item).into_response(),
        Ok(false) => errors::json_error(StatusCode::NOT_FOUND, "not_found", "item not found"),
        Err(e) => errors::store_error_to_response(e),
    }
}

async fn delete_item(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(owner): Extension<OwnerContext>,
    Path(id): Path<ItemId>,
) -> axum::response::Response {
    // Read first so the image path survives the row delete.
    let item = match services.catalog.get_item(owner.shop_id(), id).await {
        Ok(Some(item)) => item,
        Ok(None) => return errors::json_error(StatusCode::NOT_FOUND, "not_found", "item not found"),
        Err(e) => return errors::store_error_to_response(e),
    };

    match services.catalog.delete_item(owner.shop_id(), id).await {
        Ok(true) => {}
        Ok(false) => {
            return errors::json_error(StatusCode::NOT_FOUND, "not_found", "item not found");
        }
        Err(e) => return errors::store_error_to_response(e),
    }

    // Best-effort bucket cleanup; a dangling object is not worth failing
    // the delete over.
    if let Some(path) = &item.image_path {
        if let Err(e) = services.media.delete_object(path).await {
            warn!(item_id = %id, path, %e, "failed to delete item image");
        }
    }

    StatusCode::NO_CONTENT.into_response()
}

async fn upload_image(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(owner): Extension<OwnerContext>,
    Path(id): Path<ItemId>,
    body: axum::body::Bytes,
) -> axum::response::Response {
    if body.is_empty() {
        return errors::json_error(
            StatusCode::BAD_REQUEST,
            "validation_error",
            "image body is empty",
        );
    }

    let mut item = match services.catalog.get_item(owner.shop_id(), id).await {
        Ok(Some(item)) => item,
        Ok(None) => return errors::json_error(StatusCode::NOT_FOUND, "not_found", "item not found"),
        Err(e) => return errors::store_error_to_response(e),
    };

    // One object per item; re-uploads overwrite in place.
    let path = format!("shops/{}/{}", owner.shop_id(), id);
    if let Err(e) = services.media.put_object(&path, body.to_vec()).await {
        return errors::store_error_to_response(e);
    }

    item.set_image_path(path, Utc::now());

    match services.catalog.update_item(&item).await {
        Ok(true) => Json(item).into_response(),
        Ok(false) => errors::json_error(StatusCode::NOT_FOUND, "not_found", "item not found"),
        Err(e) => errors::store_error_to_response(e),
    }
}

async fn set_disabled(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(owner): Extension<OwnerContext>,
    Path(id): Path<ItemId>,
    Json(body): Json<DisableRequest>,
) -> axum::response::Response {
    let mut item = match services.catalog.get_item(owner.shop_id(), id).await {
        Ok(Some(item)) => item,
        Ok(None) => return errors::json_error(StatusCode::NOT_FOUND, "not_found", "item not found"),
        Err(e) => return errors::store_error_to_response(e),
    };

    item.set_disabled(body.disabled, Utc::now());

    match services.catalog.update_item(&item).await {
        Ok(true) => Json(item).into_response(),
        Ok(false) => errors::json_error(StatusCode::NOT_FOUND, "not_found", "item not found"),
        Err(e) => errors::store_error_to_response(e),
    }
}
