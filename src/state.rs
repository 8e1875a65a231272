//! Shared application state for request handlers.

use std::sync::Arc;

use crate::config::AppConfig;
use crate::store::Store;

/// Shared application state, cloneable across handlers.
///
/// Holds the configuration and the store handle. The store holds no open
/// connection, so cloning is cheap and there is no cross-request resource
/// to synchronize.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub store: Store,
}

impl AppState {
    /// Creates application state from the given configuration.
    pub fn new(config: AppConfig) -> Self {
        let store = Store::new(
            config.database.path.clone(),
            config.database.table.clone(),
        );
        Self {
            config: Arc::new(config),
            store,
        }
    }
}
