use std::sync::Arc;

use crate::config::ApiConfig;
use crate::store::{MemoryStore, TreeStore};

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn TreeStore>,
    pub config: Arc<ApiConfig>,
}

impl AppState {
    pub fn new(store: Arc<dyn TreeStore>, config: ApiConfig) -> Self {
        Self {
            store,
            config: Arc::new(config),
        }
    }

    /// In-memory store with the given config.
    pub fn in_memory(config: ApiConfig) -> Self {
        Self::new(Arc::new(MemoryStore::new()), config)
    }
}
