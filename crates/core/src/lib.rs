//! `billfold-core` — invoicing domain building blocks.
//!
//! This crate contains **pure domain** logic (no I/O, no HTTP, no storage):
//! record types, invoice numbering, creation-time derivation, and the
//! cross-invoice aggregations behind the customer and sales reports.

pub mod error;
pub mod id;
pub mod invoice;
pub mod numbering;
pub mod profile;
pub mod reports;
pub mod status;

pub use error::{DomainError, DomainResult};
pub use id::RecordId;
pub use invoice::{Customer, Invoice, InvoiceItem, InvoiceStatus, NewInvoice, PaymentType};
pub use profile::{CompanyProfile, NewCompanyProfile};
pub use status::StatusCheck;
