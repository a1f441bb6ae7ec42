//! Store traits

mod repositories;

pub use repositories::{ReactionStore, StoreResult};
