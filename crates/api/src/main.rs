use std::sync::Arc;

use billfold_store::{InMemoryRecordStore, PostgresRecordStore, RecordStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    billfold_observability::init();

    let store: Arc<dyn RecordStore> = match std::env::var("DATABASE_URL") {
        Ok(url) => {
            let pool = sqlx::PgPool::connect(&url).await?;
            let store = PostgresRecordStore::new(pool);
            store.migrate().await?;
            Arc::new(store)
        }
        Err(_) => {
            tracing::warn!("DATABASE_URL not set; using in-memory store (data is not persisted)");
            Arc::new(InMemoryRecordStore::new())
        }
    };

    let app = billfold_api::app::build_app(store);

    let bind = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());
    let listener = tokio::net::TcpListener::bind(&bind).await?;
    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
