use std::collections::HashMap;
use std::sync::{Mutex, RwLock};

use async_trait::async_trait;

use billfold_core::{CompanyProfile, Invoice, RecordId, StatusCheck};

use crate::record_store::{RecordStore, StoreError};

/// In-memory record store.
///
/// Intended for tests/dev. Not optimized for performance.
#[derive(Debug, Default)]
pub struct InMemoryRecordStore {
    invoices: RwLock<Vec<Invoice>>,
    counters: Mutex<HashMap<(i32, u32), u32>>,
    profile: RwLock<Option<CompanyProfile>>,
    status_checks: RwLock<Vec<StatusCheck>>,
}

impl InMemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned(_e: impl std::fmt::Display) -> StoreError {
    StoreError::Backend("lock poisoned".to_string())
}

#[async_trait]
impl RecordStore for InMemoryRecordStore {
    async fn insert_invoice(&self, invoice: &Invoice) -> Result<(), StoreError> {
        self.invoices.write().map_err(poisoned)?.push(invoice.clone());
        Ok(())
    }

    async fn list_invoices(&self) -> Result<Vec<Invoice>, StoreError> {
        Ok(self.invoices.read().map_err(poisoned)?.clone())
    }

    async fn get_invoice(&self, id: RecordId) -> Result<Option<Invoice>, StoreError> {
        Ok(self
            .invoices
            .read()
            .map_err(poisoned)?
            .iter()
            .find(|inv| inv.id == id)
            .cloned())
    }

    async fn next_invoice_sequence(&self, year: i32, month: u32) -> Result<u32, StoreError> {
        let mut counters = self.counters.lock().map_err(poisoned)?;
        let seq = counters.entry((year, month)).or_insert(0);
        *seq += 1;
        Ok(*seq)
    }

    async fn company_profile(&self) -> Result<Option<CompanyProfile>, StoreError> {
        Ok(self.profile.read().map_err(poisoned)?.clone())
    }

    async fn put_company_profile(&self, profile: &CompanyProfile) -> Result<(), StoreError> {
        // Single slot: a second profile replaces, never coexists.
        *self.profile.write().map_err(poisoned)? = Some(profile.clone());
        Ok(())
    }

    async fn insert_status_check(&self, check: &StatusCheck) -> Result<(), StoreError> {
        self.status_checks.write().map_err(poisoned)?.push(check.clone());
        Ok(())
    }

    async fn list_status_checks(&self) -> Result<Vec<StatusCheck>, StoreError> {
        Ok(self.status_checks.read().map_err(poisoned)?.clone())
    }
}
