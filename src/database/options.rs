use std::{fmt, sync::Arc, time::Duration};

use super::{
    database::Database,
    postgres::PgStore,
    repository::{PersonRepository, StoreResult},
};

#[derive(Debug, Clone, PartialEq)]
pub enum StorageEngine {
    /// Rows live in memory on a dedicated database thread, lost on shutdown
    Memory,
    /// tokio-postgres connection string, e.g. `host=localhost user=postgres`
    Postgres(String),
}

impl fmt::Display for StorageEngine {
    // Never print the connection string, it may carry a password
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageEngine::Memory => write!(f, "memory"),
            StorageEngine::Postgres(_) => write!(f, "postgres"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct DatabaseOptions {
    pub storage_engine: StorageEngine,
    pub request_timeout: Duration,
}

// Implements: https://rust-unofficial.github.io/patterns/patterns/creational/builder.html
impl DatabaseOptions {
    pub fn set_storage_engine(mut self, storage_engine: StorageEngine) -> Self {
        self.storage_engine = storage_engine;
        self
    }

    /// How long a caller waits for the in-memory database thread before giving up
    pub fn set_request_timeout(mut self, request_timeout: Duration) -> Self {
        self.request_timeout = request_timeout;
        self
    }

    /// Starts (or connects to) the configured store
    pub async fn open(self) -> StoreResult<Arc<dyn PersonRepository>> {
        match self.storage_engine.clone() {
            StorageEngine::Memory => Ok(Arc::new(Database::new(self).run())),
            StorageEngine::Postgres(config) => Ok(Arc::new(PgStore::connect(&config).await?)),
        }
    }
}

impl Default for DatabaseOptions {
    fn default() -> Self {
        Self {
            storage_engine: StorageEngine::Memory,
            request_timeout: Duration::from_secs(2),
        }
    }
}

#[cfg(test)]
impl DatabaseOptions {
    pub fn new_test() -> Self {
        DatabaseOptions::default()
            .set_storage_engine(StorageEngine::Memory)
            .set_request_timeout(Duration::from_millis(500))
    }
}
