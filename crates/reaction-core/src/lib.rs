//! # reaction-core
//!
//! Domain layer containing entities, value objects, the store error type and
//! the reaction store trait.
//! This crate has zero dependencies on infrastructure (database, runtime, etc.).

pub mod entities;
pub mod error;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{Post, Reaction, EMOJI_NAME_MAX_LENGTH};
pub use error::StoreError;
pub use traits::{ReactionStore, StoreResult};
pub use value_objects::{get_millis, is_valid_id, new_id, ID_LENGTH};
