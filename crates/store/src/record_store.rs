use async_trait::async_trait;
use thiserror::Error;

use billfold_core::{CompanyProfile, Invoice, RecordId, StatusCheck};

/// Record store operation error.
///
/// These are infrastructure failures; the service layer surfaces them as
/// generic 500s without detail leakage.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage backend failure: {0}")]
    Backend(String),

    #[error("stored record could not be decoded: {0}")]
    Serialization(String),
}

/// Persistence boundary for the invoicing API.
///
/// ## Design
///
/// - Invoices are write-once: there is no update or delete operation.
/// - `next_invoice_sequence` is the single cross-request ordering point. It
///   must be **atomic**: two concurrent calls for the same (year, month) must
///   return distinct, consecutive values. This closes the duplicate-number
///   window a count-then-insert scheme would have.
/// - The company profile is a singleton. `put_company_profile` replaces
///   whatever is stored; implementations keep a single slot/row so a second
///   profile cannot exist structurally.
/// - `list_invoices` and `list_status_checks` return insertion order.
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn insert_invoice(&self, invoice: &Invoice) -> Result<(), StoreError>;

    async fn list_invoices(&self) -> Result<Vec<Invoice>, StoreError>;

    async fn get_invoice(&self, id: RecordId) -> Result<Option<Invoice>, StoreError>;

    /// Atomically mint the next sequence number for the (year, month) bucket.
    /// The first call for a new bucket returns 1.
    async fn next_invoice_sequence(&self, year: i32, month: u32) -> Result<u32, StoreError>;

    async fn company_profile(&self) -> Result<Option<CompanyProfile>, StoreError>;

    async fn put_company_profile(&self, profile: &CompanyProfile) -> Result<(), StoreError>;

    async fn insert_status_check(&self, check: &StatusCheck) -> Result<(), StoreError>;

    async fn list_status_checks(&self) -> Result<Vec<StatusCheck>, StoreError>;
}
