//! Database connection and store lifecycle
//!
//! `open` builds the `Stores` handle once at startup; `Stores::close` releases
//! it after shutdown. Every storage call made by the repositories goes through
//! `with_timeout`.

use crate::config::{AppConfig, DatabaseConfig, StoreBackend};
use crate::repositories::{
    MemoryStore, PgStore, RepoResult, RepositoryError, TaskStore, TokenStore, UserStore,
};
use anyhow::Result;
use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions};
use std::future::Future;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// Database configuration for pool creation
pub struct DbConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout_secs: u64,
    pub idle_timeout_secs: u64,
    pub max_lifetime_secs: u64,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            max_connections: 10,
            min_connections: 2,
            acquire_timeout_secs: 30,
            idle_timeout_secs: 600,      // 10 minutes
            max_lifetime_secs: 1800,     // 30 minutes
        }
    }
}

/// Store handles shared by every repository
#[derive(Clone)]
pub struct Stores {
    pub users: Arc<dyn UserStore>,
    pub tasks: Arc<dyn TaskStore>,
    pub tokens: Arc<dyn TokenStore>,
    backend: Backend,
}

#[derive(Clone)]
enum Backend {
    Postgres(PgPool),
    Memory,
}

impl Stores {
    /// Stores backed by a PostgreSQL pool
    pub fn postgres(pool: PgPool) -> Self {
        let store = Arc::new(PgStore::new(pool.clone()));
        Self {
            users: store.clone(),
            tasks: store.clone(),
            tokens: store,
            backend: Backend::Postgres(pool),
        }
    }

    /// Stores kept in process memory
    pub fn memory() -> Self {
        let store = Arc::new(MemoryStore::new());
        Self {
            users: store.clone(),
            tasks: store.clone(),
            tokens: store,
            backend: Backend::Memory,
        }
    }

    pub fn backend(&self) -> StoreBackend {
        match self.backend {
            Backend::Postgres(_) => StoreBackend::Postgres,
            Backend::Memory => StoreBackend::Memory,
        }
    }

    /// Check the store is reachable
    pub async fn ping(&self) -> Result<()> {
        match &self.backend {
            Backend::Postgres(pool) => health_check(pool).await,
            Backend::Memory => Ok(()),
        }
    }

    /// Release connections; called once after the server has stopped
    pub async fn close(&self) {
        if let Backend::Postgres(pool) = &self.backend {
            pool.close().await;
            info!("Database pool closed");
        }
    }
}

/// Open the configured store, running migrations outside production
pub async fn open(config: &DatabaseConfig) -> Result<Stores> {
    match config.backend {
        StoreBackend::Memory => {
            warn!("Using in-memory store; data will not survive a restart");
            Ok(Stores::memory())
        }
        StoreBackend::Postgres => {
            info!("Connecting to database...");
            let pool = create_pool(&config.url, config.max_connections).await?;

            // Skip in production if using separate migration job
            if !AppConfig::is_production() {
                run_migrations(&pool).await?;
            }

            Ok(Stores::postgres(pool))
        }
    }
}

/// Create a PostgreSQL connection pool with production-ready settings
pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<PgPool> {
    let config = DbConfig {
        url: database_url.to_string(),
        max_connections,
        ..Default::default()
    };
    create_pool_with_config(&config).await
}

/// Create a PostgreSQL connection pool with custom configuration
pub async fn create_pool_with_config(config: &DbConfig) -> Result<PgPool> {
    let connect_options = PgConnectOptions::from_str(&config.url)?.application_name("tasklist");

    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
        .idle_timeout(Duration::from_secs(config.idle_timeout_secs))
        .max_lifetime(Duration::from_secs(config.max_lifetime_secs))
        .test_before_acquire(true)
        .connect_with(connect_options)
        .await?;

    info!(
        "Database pool created: max={}, min={}",
        config.max_connections, config.min_connections
    );

    Ok(pool)
}

/// Run database migrations
pub async fn run_migrations(pool: &PgPool) -> Result<()> {
    info!("Running database migrations...");
    sqlx::migrate!("./migrations").run(pool).await?;
    info!("Database migrations completed successfully");
    Ok(())
}

/// Check database health
pub async fn health_check(pool: &PgPool) -> Result<()> {
    sqlx::query("SELECT 1")
        .execute(pool)
        .await
        .map(|_| ())
        .map_err(|e| {
            warn!("Database health check failed: {}", e);
            e.into()
        })
}

/// Bound a storage operation by `limit`; expiry fails only this operation
pub async fn with_timeout<T, F>(limit: Duration, operation: F) -> RepoResult<T>
where
    F: Future<Output = RepoResult<T>>,
{
    tokio::time::timeout(limit, operation)
        .await
        .map_err(|_| RepositoryError::Timeout(limit))?
}
