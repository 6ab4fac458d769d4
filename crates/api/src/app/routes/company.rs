use std::sync::Arc;

use axum::{
    extract::Extension, http::StatusCode, response::IntoResponse, routing::get, Json, Router,
};

use billfold_core::NewCompanyProfile;

use crate::app::errors;
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new().route("/", get(get_company_profile).post(upsert_company_profile))
}

/// Create the profile, or update the single existing one.
pub async fn upsert_company_profile(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<NewCompanyProfile>,
) -> axum::response::Response {
    match services.upsert_company_profile(body).await {
        Ok(profile) => (StatusCode::OK, Json(profile)).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

/// The stored profile, or a non-persisted default when none exists.
pub async fn get_company_profile(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.company_profile().await {
        Ok(profile) => (StatusCode::OK, Json(profile)).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}
