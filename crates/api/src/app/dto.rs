use serde::Deserialize;

// Invoice and company-profile request bodies deserialize straight into
// `billfold_core::NewInvoice` / `NewCompanyProfile`; responses serialize the
// core records directly.

#[derive(Debug, Deserialize)]
pub struct CreateStatusCheckRequest {
    pub client_name: String,
}
