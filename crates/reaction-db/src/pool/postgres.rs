//! PostgreSQL connection pool management
//!
//! A store is handed a `DatabaseHandles` at construction: one pool for the
//! writable primary and one for a read replica. There is no global state.

use async_trait::async_trait;
use sqlx::pool::PoolConnection;
use sqlx::postgres::{PgPool, PgPoolOptions};
use sqlx::{Postgres, Transaction};
use tracing::{info, instrument};

use reaction_common::DatabaseConfig;

/// Where a store gets its connections from
///
/// Writes always run in a transaction on the primary; lagging reads take a
/// connection from the replica.
#[async_trait]
pub trait ConnectionSource: Send + Sync {
    /// Begin a transaction on the primary
    async fn begin(&self) -> Result<Transaction<'static, Postgres>, sqlx::Error>;

    /// Acquire a connection to the read replica
    async fn acquire_replica(&self) -> Result<PoolConnection<Postgres>, sqlx::Error>;
}

/// Primary and replica pool handles
#[derive(Debug, Clone)]
pub struct DatabaseHandles {
    primary: PgPool,
    replica: PgPool,
}

impl DatabaseHandles {
    /// Wrap existing pools
    pub fn new(primary: PgPool, replica: PgPool) -> Self {
        Self { primary, replica }
    }

    /// Serve reads and writes from the same pool
    pub fn single(pool: PgPool) -> Self {
        Self {
            replica: pool.clone(),
            primary: pool,
        }
    }

    /// Connect both pools described by `config`
    ///
    /// When the replica URL is unset or equals the primary URL, the replica
    /// handle shares the primary pool.
    #[instrument(skip(config))]
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, sqlx::Error> {
        let primary = create_pool(&config.url, config).await?;

        let dedicated_replica = config.replica_url() != config.url;
        let replica = if dedicated_replica {
            create_pool(config.replica_url(), config).await?
        } else {
            primary.clone()
        };

        info!(
            max_connections = config.max_connections,
            dedicated_replica,
            "Database pools connected"
        );

        Ok(Self { primary, replica })
    }

    /// Writable primary pool
    pub fn primary(&self) -> &PgPool {
        &self.primary
    }

    /// Read replica pool (may lag the primary)
    pub fn replica(&self) -> &PgPool {
        &self.replica
    }
}

#[async_trait]
impl ConnectionSource for DatabaseHandles {
    async fn begin(&self) -> Result<Transaction<'static, Postgres>, sqlx::Error> {
        self.primary.begin().await
    }

    async fn acquire_replica(&self) -> Result<PoolConnection<Postgres>, sqlx::Error> {
        self.replica.acquire().await
    }
}

/// Pool options derived from configuration
pub fn pool_options(config: &DatabaseConfig) -> PgPoolOptions {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(config.acquire_timeout())
        .idle_timeout(config.idle_timeout())
        .max_lifetime(config.max_lifetime())
}

/// Create a new PostgreSQL connection pool for `url`
pub async fn create_pool(url: &str, config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    pool_options(config).connect(url).await
}
