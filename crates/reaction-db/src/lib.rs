//! # reaction-db
//!
//! Database layer implementing the reaction store with PostgreSQL via SQLx.
//!
//! ## Overview
//!
//! This crate provides the PostgreSQL implementation of `ReactionStore`
//! defined in `reaction-core`. It handles:
//!
//! - Primary/replica connection pool management
//! - Database models with SQLx `FromRow` derives
//! - Model → entity mappers
//! - Schema bootstrap
//! - The reaction store and the post update path it writes through
//! - Background dispatch with a one-shot result channel
//!
//! ## Usage
//!
//! ```rust,ignore
//! use reaction_common::AppConfig;
//! use reaction_core::{Reaction, ReactionStore};
//! use reaction_db::{DatabaseHandles, PgReactionStore};
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = AppConfig::from_env()?;
//!     let handles = DatabaseHandles::connect(&config.database).await?;
//!     let store = PgReactionStore::new(handles);
//!
//!     store.save(Reaction::new(user_id, post_id, "thumbsup")).await?;
//!     Ok(())
//! }
//! ```

pub mod dispatch;
pub mod mappers;
pub mod models;
pub mod pool;
pub mod repositories;
pub mod schema;

// Re-export commonly used types
pub use dispatch::{dispatch, dispatch_delete, dispatch_list, dispatch_save, StoreChannel};
pub use pool::{create_pool, ConnectionSource, DatabaseHandles, PgPool};
pub use repositories::{PgPostRepository, PgReactionStore};
pub use schema::ensure_schema;
