//! `billfold-store` — persistence for invoices, the company profile, and
//! status checks.
//!
//! The [`RecordStore`] trait is the seam between the HTTP/service layer and
//! storage. Two implementations: [`InMemoryRecordStore`] (tests/dev) and
//! [`PostgresRecordStore`] (production).

pub mod memory;
pub mod postgres;
pub mod record_store;

pub use memory::InMemoryRecordStore;
pub use postgres::PostgresRecordStore;
pub use record_store::{RecordStore, StoreError};
