//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::StorefrontConfig;
use crate::db::Repository;

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`; holds the configuration and the table
/// storage every handler reads from.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    repository: Arc<dyn Repository>,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(config: StorefrontConfig, repository: Arc<dyn Repository>) -> Self {
        Self {
            inner: Arc::new(AppStateInner { config, repository }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the table storage.
    #[must_use]
    pub fn repository(&self) -> &dyn Repository {
        self.inner.repository.as_ref()
    }
}
