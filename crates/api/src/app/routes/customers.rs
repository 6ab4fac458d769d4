use std::sync::Arc;

use axum::{
    extract::Extension, http::StatusCode, response::IntoResponse, routing::get, Json, Router,
};

use crate::app::errors;
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new().route("/", get(list_customers))
}

/// Per-customer rollup across all invoices with a customer block.
pub async fn list_customers(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.customer_rollup().await {
        Ok(customers) => (StatusCode::OK, Json(customers)).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}
