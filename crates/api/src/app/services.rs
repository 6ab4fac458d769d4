use std::sync::Arc;

use chrono::Utc;
use thiserror::Error;

use billfold_core::{
    numbering, reports, CompanyProfile, Invoice, NewCompanyProfile, NewInvoice, RecordId,
    StatusCheck,
};
use billfold_pdf::RenderError;
use billfold_store::{RecordStore, StoreError};

/// Failure at the service layer, mapped to HTTP responses in `errors.rs`.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("not found")]
    NotFound,

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Render(#[from] RenderError),
}

/// Service layer: orchestrates numbering, derivation, aggregation, and
/// rendering over the record store. One instance shared across requests.
pub struct AppServices {
    store: Arc<dyn RecordStore>,
}

impl AppServices {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    pub async fn create_status_check(&self, client_name: String) -> Result<StatusCheck, ServiceError> {
        let check = StatusCheck::new(client_name, Utc::now());
        self.store.insert_status_check(&check).await?;
        Ok(check)
    }

    pub async fn list_status_checks(&self) -> Result<Vec<StatusCheck>, ServiceError> {
        Ok(self.store.list_status_checks().await?)
    }

    /// Mint a number, stamp the invoice, persist, return the full record.
    pub async fn create_invoice(&self, new: NewInvoice) -> Result<Invoice, ServiceError> {
        let now = Utc::now();
        let (year, month) = numbering::month_bucket(now);
        let sequence = self.store.next_invoice_sequence(year, month).await?;
        let number = numbering::invoice_number(year, month, sequence);

        let invoice = Invoice::issue(new, number, now);
        self.store.insert_invoice(&invoice).await?;

        tracing::info!(invoice_number = %invoice.invoice_number, "invoice created");
        Ok(invoice)
    }

    pub async fn list_invoices(&self) -> Result<Vec<Invoice>, ServiceError> {
        Ok(self.store.list_invoices().await?)
    }

    pub async fn get_invoice(&self, id: RecordId) -> Result<Invoice, ServiceError> {
        self.store
            .get_invoice(id)
            .await?
            .ok_or(ServiceError::NotFound)
    }

    /// Render the invoice PDF. Creates and persists a default company
    /// profile when none exists yet.
    pub async fn invoice_pdf(&self, id: RecordId) -> Result<(Invoice, Vec<u8>), ServiceError> {
        let invoice = self.get_invoice(id).await?;

        let company = match self.store.company_profile().await? {
            Some(profile) => profile,
            None => {
                let placeholder = CompanyProfile::placeholder(Utc::now());
                self.store.put_company_profile(&placeholder).await?;
                tracing::info!("no company profile found; created default");
                placeholder
            }
        };

        let bytes = billfold_pdf::render_invoice(&invoice, &company)?;
        Ok((invoice, bytes))
    }

    /// Create the singleton profile, or apply the submitted fields onto the
    /// existing one (keeping its id, refreshing `updated_at`).
    pub async fn upsert_company_profile(
        &self,
        new: NewCompanyProfile,
    ) -> Result<CompanyProfile, ServiceError> {
        let now = Utc::now();
        let profile = match self.store.company_profile().await? {
            Some(mut existing) => {
                existing.apply(new, now);
                existing
            }
            None => CompanyProfile::create(new, now),
        };
        self.store.put_company_profile(&profile).await?;
        Ok(profile)
    }

    /// The stored profile, or a non-persisted default when none exists.
    pub async fn company_profile(&self) -> Result<CompanyProfile, ServiceError> {
        Ok(self
            .store
            .company_profile()
            .await?
            .unwrap_or_else(|| CompanyProfile::placeholder(Utc::now())))
    }

    pub async fn customer_rollup(&self) -> Result<Vec<reports::CustomerSummary>, ServiceError> {
        let invoices = self.store.list_invoices().await?;
        Ok(reports::customer_rollup(&invoices))
    }

    pub async fn sales_summary(&self) -> Result<reports::SalesSummary, ServiceError> {
        let invoices = self.store.list_invoices().await?;
        Ok(reports::sales_summary(&invoices, Utc::now()))
    }
}
