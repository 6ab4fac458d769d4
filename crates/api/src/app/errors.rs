use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use crate::app::services::ServiceError;

pub fn service_error_to_response(err: ServiceError) -> axum::response::Response {
    match err {
        ServiceError::NotFound => json_error(StatusCode::NOT_FOUND, "not_found", "not found"),
        ServiceError::Store(e) => {
            tracing::error!(error = %e, "store operation failed");
            json_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "store_error",
                "storage operation failed",
            )
        }
        ServiceError::Render(e) => {
            tracing::error!(error = %e, "pdf rendering failed");
            json_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "render_error",
                "document rendering failed",
            )
        }
    }
}

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
