//! Store implementations
//!
//! PostgreSQL implementations of the store traits defined in reaction-core,
//! plus the post storage the reaction store writes through.

mod error;
mod post;
mod reaction;

pub use post::PgPostRepository;
pub use reaction::PgReactionStore;
