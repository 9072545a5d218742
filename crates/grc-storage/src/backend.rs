//! Backend selection from configuration.

use std::path::Path;
use std::sync::Arc;

use grc_core::config::{StorageBackend, StorageConfig};
use grc_core::errors::GrcResult;
use grc_core::traits::IRegisterStorage;

use crate::{InMemoryStorage, StorageEngine};

/// SQLite path that selects a private in-memory database.
pub const SQLITE_MEMORY_PATH: &str = ":memory:";

/// Open the configured backend.
pub fn open_backend(config: &StorageConfig) -> GrcResult<Arc<dyn IRegisterStorage>> {
    let storage: Arc<dyn IRegisterStorage> = match config.effective_backend() {
        StorageBackend::Sqlite => {
            let path = config.effective_db_path();
            if path == SQLITE_MEMORY_PATH {
                Arc::new(StorageEngine::open_in_memory()?)
            } else {
                Arc::new(StorageEngine::open(
                    Path::new(path),
                    config.effective_read_pool_size(),
                )?)
            }
        }
        StorageBackend::Memory => Arc::new(InMemoryStorage::new()),
    };
    tracing::info!(backend = storage.backend_name(), "storage backend ready");
    Ok(storage)
}
