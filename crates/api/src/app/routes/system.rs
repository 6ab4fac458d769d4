use std::sync::Arc;

use axum::{extract::Extension, http::StatusCode, response::IntoResponse, Json};

use crate::app::{dto, errors};
use crate::app::services::AppServices;

pub async fn health() -> StatusCode {
    StatusCode::OK
}

pub async fn root() -> impl IntoResponse {
    Json(serde_json::json!({ "message": "Invoice Generator API" }))
}

pub async fn create_status_check(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::CreateStatusCheckRequest>,
) -> axum::response::Response {
    match services.create_status_check(body.client_name).await {
        Ok(check) => (StatusCode::OK, Json(check)).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn list_status_checks(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.list_status_checks().await {
        Ok(checks) => (StatusCode::OK, Json(checks)).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}
