//! Application state shared across handlers.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use sqlx::PgPool;

use resonant_harmony_core::Product;

use crate::config::StorefrontConfig;
use crate::services::PlaybackCoordinator;

/// How long a product lookup stays cached before the catalog is re-read.
const PRODUCT_CACHE_TTL: Duration = Duration::from_secs(60);
const PRODUCT_CACHE_CAPACITY: u64 = 1024;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources like database connections and configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    pool: PgPool,
    playback: PlaybackCoordinator,
    product_cache: Cache<String, Product>,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Arguments
    ///
    /// * `config` - Storefront configuration
    /// * `pool` - `PostgreSQL` connection pool
    #[must_use]
    pub fn new(config: StorefrontConfig, pool: PgPool) -> Self {
        let product_cache = Cache::builder()
            .max_capacity(PRODUCT_CACHE_CAPACITY)
            .time_to_live(PRODUCT_CACHE_TTL)
            .build();

        Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                playback: PlaybackCoordinator::default(),
                product_cache,
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the database connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    /// Get a reference to the audio playback coordinator.
    #[must_use]
    pub fn playback(&self) -> &PlaybackCoordinator {
        &self.inner.playback
    }

    /// Get a reference to the product lookup cache (keyed by identifier).
    #[must_use]
    pub fn product_cache(&self) -> &Cache<String, Product> {
        &self.inner.product_cache
    }
}
