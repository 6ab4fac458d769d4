use axum::{
    routing::{get, post},
    Router,
};

pub mod company;
pub mod customers;
pub mod invoices;
pub mod reports;
pub mod system;

/// Router for everything under the `/api` prefix.
pub fn router() -> Router {
    Router::new()
        .route("/", get(system::root))
        .route("/status", post(system::create_status_check).get(system::list_status_checks))
        .nest("/invoices", invoices::router())
        .nest("/company-profile", company::router())
        .nest("/customers", customers::router())
        .nest("/reports", reports::router())
}
