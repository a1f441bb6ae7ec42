//! Database connection pool management

mod postgres;

pub use postgres::{create_pool, pool_options, ConnectionSource, DatabaseHandles};

// Re-export PgPool for convenience
pub use sqlx::postgres::PgPool;
