//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::ServerConfig;
use crate::db::{AdminStore, ProductStore};
use crate::services::AuthService;

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`. The stores are created empty; call
/// [`crate::bootstrap`] to seed the default admin and catalog.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ServerConfig,
    products: ProductStore,
    admins: AdminStore,
}

impl AppState {
    /// Create a new application state with empty stores.
    #[must_use]
    pub fn new(config: ServerConfig) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                products: ProductStore::new(),
                admins: AdminStore::new(),
            }),
        }
    }

    /// Get a reference to the server configuration.
    #[must_use]
    pub fn config(&self) -> &ServerConfig {
        &self.inner.config
    }

    /// Get a reference to the product catalog.
    #[must_use]
    pub fn products(&self) -> &ProductStore {
        &self.inner.products
    }

    /// Get a reference to the admin account store.
    #[must_use]
    pub fn admins(&self) -> &AdminStore {
        &self.inner.admins
    }

    /// Authentication service over the admin store.
    #[must_use]
    pub fn auth(&self) -> AuthService<'_> {
        AuthService::new(&self.inner.admins)
    }
}
