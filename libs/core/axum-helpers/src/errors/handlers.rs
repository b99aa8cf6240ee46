use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use super::ErrorResponse;

/// Fallback handler for unmatched routes.
///
/// Keeps 404s inside the JSON error contract instead of axum's default
/// empty body.
pub async fn not_found() -> Response {
    let body = Json(ErrorResponse {
        error: "The requested resource was not found".to_string(),
    });

    (StatusCode::NOT_FOUND, body).into_response()
}

/// Handler for 405 Method Not Allowed errors.
pub async fn method_not_allowed() -> Response {
    let body = Json(ErrorResponse {
        error: "The HTTP method is not allowed for this resource".to_string(),
    });

    (StatusCode::METHOD_NOT_ALLOWED, body).into_response()
}
