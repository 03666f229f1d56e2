use chrono::Duration;

use crate::application::auth_service::AuthService;
use crate::application::catalog_service::CatalogService;
use crate::application::order_service::OrderService;
use crate::config::AppConfig;
use crate::domain::errors::DomainError;
use crate::infrastructure::memory_store::{
    MemoryOrderRepository, MemoryProductRepository, MemoryStore, MemoryUserRepository,
};
use crate::infrastructure::seed::seed_products;
use crate::infrastructure::sessions::SessionStore;

/// Services shared by every request handler.
pub struct AppState {
    pub catalog: CatalogService<MemoryProductRepository>,
    pub orders: OrderService<MemoryOrderRepository>,
    pub auth: AuthService<MemoryUserRepository>,
}

impl AppState {
    /// Wires the services over a fresh in-memory store and seeds it.
    pub fn in_memory(config: &AppConfig) -> Result<Self, DomainError> {
        let ttl = Duration::try_seconds(config.session_ttl_secs).ok_or_else(|| {
            DomainError::InvalidInput(format!(
                "session TTL of {} seconds is out of range",
                config.session_ttl_secs
            ))
        })?;
        let store = MemoryStore::new();
        let state = Self {
            catalog: CatalogService::new(store.products),
            orders: OrderService::new(store.orders),
            auth: AuthService::new(
                store.users,
                SessionStore::new(ttl),
            ),
        };

        if config.seed_products {
            seed_products(state.catalog.repository())?;
        }
        state.auth.ensure_admin(&config.admin_password)?;

        Ok(state)
    }
}
