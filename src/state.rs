use std::sync::Arc;

use crate::config::AppConfig;
use crate::db;
use crate::store::{MemoryStore, PgStore, Store};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
}

impl AppState {
    /// Connects to Postgres and applies migrations.
    pub async fn init(config: &AppConfig) -> anyhow::Result<Self> {
        let pool = db::connect(&config.database).await?;
        db::migrate(&pool).await;
        let store = Arc::new(PgStore::new(pool)) as Arc<dyn Store>;
        Ok(Self::from_store(store))
    }

    pub fn from_store(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    pub fn in_memory() -> Self {
        Self::from_store(Arc::new(MemoryStore::new()))
    }
}
