//! Integration tests for the kitzz storefront.
//!
//! Tests drive the full router in-process with `axum-test`; no server or
//! external services are needed.
//!
//! ```bash
//! cargo test -p kitzz-integration-tests
//! ```
//!
//! # Test Files
//!
//! - `storefront` - Landing, signup, profile and product pages, health checks
//! - `dashboard` - Seller dashboard, ownership checks, edits and deletes
//! - `auth` - Auth stub endpoints and session-bound seller identity

use std::sync::Arc;

use axum_test::TestServer;
use chrono::Utc;

use kitzz_storefront::config::StorefrontConfig;
use kitzz_storefront::db::{MemoryRepository, Tables, seed};
use kitzz_storefront::state::AppState;

pub type ContextError = Box<dyn std::error::Error>;

/// An in-process storefront plus direct access to its tables.
pub struct TestContext {
    pub server: TestServer,
    pub repository: Arc<MemoryRepository>,
}

impl TestContext {
    /// Storefront over the demo dataset, with `dev_seller` as the fallback
    /// seller identity.
    ///
    /// # Errors
    ///
    /// Fails if the demo seed, configuration or test server cannot be built.
    pub fn demo(dev_seller: Option<&str>) -> Result<Self, ContextError> {
        let tables = seed::demo_tables(Utc::now())?;
        Self::with_tables(tables, dev_seller)
    }

    /// Storefront over `tables`.
    ///
    /// # Errors
    ///
    /// Fails if the configuration or test server cannot be built.
    pub fn with_tables(tables: Tables, dev_seller: Option<&str>) -> Result<Self, ContextError> {
        let dev_seller = dev_seller.map(str::to_string);
        let config = StorefrontConfig::from_lookup(|key| match key {
            "KITZZ_DEV_SELLER" => dev_seller.clone(),
            "KITZZ_SEED_DEMO_DATA" => Some("false".to_string()),
            _ => None,
        })?;

        let repository = Arc::new(MemoryRepository::with_tables(tables));
        let state = AppState::new(config, repository.clone());
        let server = TestServer::new(kitzz_storefront::app(state))
            .map_err(|e| e.to_string())?;

        Ok(Self { server, repository })
    }
}
