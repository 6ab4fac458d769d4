//! HTTP application wiring (Axum router + service wiring).
//!
//! Layout:
//! - `services.rs`: the service layer between routes and the record store
//! - `routes/`: HTTP routes + handlers (one file per area)
//! - `dto.rs`: request DTOs
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{routing::get, Extension, Router};

use billfold_store::RecordStore;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

/// Build the full HTTP router (public entrypoint used by `main.rs` and the
/// black-box tests). All business endpoints live under the `/api` prefix.
pub fn build_app(store: Arc<dyn RecordStore>) -> Router {
    let services = Arc::new(services::AppServices::new(store));

    Router::new()
        .route("/health", get(routes::system::health))
        // `nest` matches `/api` but not `/api/` for the inner `/` route, so
        // register the root handler at the trailing-slash path explicitly.
        .route("/api/", get(routes::system::root))
        .nest("/api", routes::router())
        .layer(Extension(services))
}
