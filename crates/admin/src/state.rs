//! Application state shared across handlers.

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use sqlx::PgPool;

use crate::config::AdminConfig;
use crate::models::{Customer, Order, seed_customers, seed_orders};

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`. The customer and order lists are mock data:
/// seeded at boot, mutated in memory, never persisted.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: AdminConfig,
    pool: PgPool,
    customers: RwLock<Vec<Customer>>,
    orders: RwLock<Vec<Order>>,
}

impl AppState {
    /// Create a new application state with seeded mock lists.
    #[must_use]
    pub fn new(config: AdminConfig, pool: PgPool) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                customers: RwLock::new(seed_customers()),
                orders: RwLock::new(seed_orders()),
            }),
        }
    }

    /// Get a reference to the admin configuration.
    #[must_use]
    pub fn config(&self) -> &AdminConfig {
        &self.inner.config
    }

    /// Get a reference to the database connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    /// Read access to the mock customer list.
    #[must_use]
    pub fn customers(&self) -> RwLockReadGuard<'_, Vec<Customer>> {
        self.inner
            .customers
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    /// Write access to the mock customer list.
    #[must_use]
    pub fn customers_mut(&self) -> RwLockWriteGuard<'_, Vec<Customer>> {
        self.inner
            .customers
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    /// Read access to the mock order list.
    #[must_use]
    pub fn orders(&self) -> RwLockReadGuard<'_, Vec<Order>> {
        self.inner
            .orders
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}
