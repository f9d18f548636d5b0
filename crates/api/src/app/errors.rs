use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use lavka_core::DomainError;
use lavka_store::{PlaceOrderError, StatusUpdateError, StoreError};

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}

pub fn domain_error_to_response(err: DomainError) -> axum::response::Response {
    match err {
        DomainError::Validation(msg) => json_error(StatusCode::BAD_REQUEST, "validation_error", msg),
        DomainError::InvalidId(msg) => json_error(StatusCode::BAD_REQUEST, "invalid_id", msg),
        DomainError::NotFound => json_error(StatusCode::NOT_FOUND, "not_found", "not found"),
        DomainError::Conflict(msg) => json_error(StatusCode::CONFLICT, "conflict", msg),
    }
}

pub fn store_error_to_response(err: StoreError) -> axum::response::Response {
    match err {
        StoreError::Conflict(msg) => json_error(StatusCode::CONFLICT, "conflict", msg),
        // Retryable by the caller; the API never retries.
        StoreError::Unavailable(msg) | StoreError::Query(msg) => {
            json_error(StatusCode::SERVICE_UNAVAILABLE, "store_error", msg)
        }
    }
}

pub fn place_order_error_to_response(err: PlaceOrderError) -> axum::response::Response {
    match err {
        PlaceOrderError::Validation(msg) => {
            json_error(StatusCode::BAD_REQUEST, "validation_error", msg)
        }
        PlaceOrderError::NotFound => {
            json_error(StatusCode::NOT_FOUND, "not_found", "item not found")
        }
        PlaceOrderError::InsufficientStock { available } => (
            StatusCode::CONFLICT,
            axum::Json(json!({
                "error": "insufficient_stock",
                "message": format!("only {available} left in stock"),
                "available": available,
            })),
        )
            .into_response(),
        PlaceOrderError::Store(e) => store_error_to_response(e),
        PlaceOrderError::ReconciliationRequired { order_id } => (
            StatusCode::INTERNAL_SERVER_ERROR,
            axum::Json(json!({
                "error": "reconciliation_required",
                "message": "order was recorded but stock was not adjusted",
                "order_id": order_id.to_string(),
            })),
        )
            .into_response(),
    }
}

pub fn status_update_error_to_response(err: StatusUpdateError) -> axum::response::Response {
    match err {
        StatusUpdateError::NotFound => {
            json_error(StatusCode::NOT_FOUND, "not_found", "order not found")
        }
        StatusUpdateError::InvalidTransition(t) => json_error(
            StatusCode::UNPROCESSABLE_ENTITY,
            "invalid_transition",
            t.to_string(),
        ),
        StatusUpdateError::Store(e) => store_error_to_response(e),
    }
}
