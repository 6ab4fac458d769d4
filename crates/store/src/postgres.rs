//! Postgres-backed record store.
//!
//! Records are persisted as a JSONB `data` column plus the key columns the
//! store queries on. Calendar dates inside `data` are ISO-8601 strings
//! (serde's `NaiveDate` form); decoding a row parses them back into typed
//! dates before the record crosses the service layer.

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use billfold_core::{CompanyProfile, Invoice, RecordId, StatusCheck};

use crate::record_store::{RecordStore, StoreError};

/// Record store on a PostgreSQL pool.
///
/// The pool is cheap to clone and safe to share across request handlers.
/// Sequence minting uses a per-month counter row updated with an atomic
/// upsert, so concurrent creations cannot read the same value.
#[derive(Debug, Clone)]
pub struct PostgresRecordStore {
    pool: PgPool,
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        StoreError::Backend(e.to_string())
    }
}

fn decode<T: serde::de::DeserializeOwned>(data: serde_json::Value) -> Result<T, StoreError> {
    serde_json::from_value(data).map_err(|e| StoreError::Serialization(e.to_string()))
}

fn encode<T: serde::Serialize>(record: &T) -> Result<serde_json::Value, StoreError> {
    serde_json::to_value(record).map_err(|e| StoreError::Serialization(e.to_string()))
}

impl PostgresRecordStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create the schema if it does not exist yet.
    ///
    /// The company profile table keys on a CHECKed constant, so it can never
    /// hold more than one row.
    pub async fn migrate(&self) -> Result<(), StoreError> {
        let statements = [
            r#"CREATE TABLE IF NOT EXISTS invoices (
                id UUID PRIMARY KEY,
                invoice_number TEXT NOT NULL UNIQUE,
                created_at TIMESTAMPTZ NOT NULL,
                data JSONB NOT NULL
            )"#,
            r#"CREATE TABLE IF NOT EXISTS invoice_counters (
                year INT NOT NULL,
                month INT NOT NULL,
                seq INT NOT NULL,
                PRIMARY KEY (year, month)
            )"#,
            r#"CREATE TABLE IF NOT EXISTS company_profile (
                slot BOOLEAN PRIMARY KEY DEFAULT TRUE CHECK (slot),
                data JSONB NOT NULL
            )"#,
            r#"CREATE TABLE IF NOT EXISTS status_checks (
                position BIGSERIAL PRIMARY KEY,
                id UUID NOT NULL,
                data JSONB NOT NULL
            )"#,
        ];

        for stmt in statements {
            sqlx::query(stmt).execute(&self.pool).await?;
        }
        tracing::info!("record store schema ensured");
        Ok(())
    }
}

#[async_trait]
impl RecordStore for PostgresRecordStore {
    async fn insert_invoice(&self, invoice: &Invoice) -> Result<(), StoreError> {
        sqlx::query(
            "INSERT INTO invoices (id, invoice_number, created_at, data) VALUES ($1, $2, $3, $4)",
        )
        .bind(invoice.id.as_uuid())
        .bind(&invoice.invoice_number)
        .bind(invoice.created_at)
        .bind(encode(invoice)?)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn list_invoices(&self) -> Result<Vec<Invoice>, StoreError> {
        let rows = sqlx::query("SELECT data FROM invoices ORDER BY created_at, id")
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter()
            .map(|row| decode(row.get::<serde_json::Value, _>("data")))
            .collect()
    }

    async fn get_invoice(&self, id: RecordId) -> Result<Option<Invoice>, StoreError> {
        let row = sqlx::query("SELECT data FROM invoices WHERE id = $1")
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await?;

        row.map(|r| decode(r.get::<serde_json::Value, _>("data")))
            .transpose()
    }

    async fn next_invoice_sequence(&self, year: i32, month: u32) -> Result<u32, StoreError> {
        // Atomic upsert-and-increment; concurrent callers serialize on the
        // counter row and each observe a distinct value.
        let row = sqlx::query(
            "INSERT INTO invoice_counters (year, month, seq) VALUES ($1, $2, 1)
             ON CONFLICT (year, month) DO UPDATE SET seq = invoice_counters.seq + 1
             RETURNING seq",
        )
        .bind(year)
        .bind(month as i32)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.get::<i32, _>("seq") as u32)
    }

    async fn company_profile(&self) -> Result<Option<CompanyProfile>, StoreError> {
        let row = sqlx::query("SELECT data FROM company_profile WHERE slot = TRUE")
            .fetch_optional(&self.pool)
            .await?;

        row.map(|r| decode(r.get::<serde_json::Value, _>("data")))
            .transpose()
    }

    async fn put_company_profile(&self, profile: &CompanyProfile) -> Result<(), StoreError> {
        sqlx::query(
            "INSERT INTO company_profile (slot, data) VALUES (TRUE, $1)
             ON CONFLICT (slot) DO UPDATE SET data = EXCLUDED.data",
        )
        .bind(encode(profile)?)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn insert_status_check(&self, check: &StatusCheck) -> Result<(), StoreError> {
        sqlx::query("INSERT INTO status_checks (id, data) VALUES ($1, $2)")
            .bind(check.id.as_uuid())
            .bind(encode(check)?)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn list_status_checks(&self) -> Result<Vec<StatusCheck>, StoreError> {
        let rows = sqlx::query("SELECT data FROM status_checks ORDER BY position")
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter()
            .map(|row| decode(row.get::<serde_json::Value, _>("data")))
            .collect()
    }
}
