//! Store traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation.

use async_trait::async_trait;

use crate::entities::Reaction;
use crate::error::StoreError;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

// ============================================================================
// Reaction Store
// ============================================================================

#[async_trait]
pub trait ReactionStore: Send + Sync {
    /// Persist a reaction and mark its post as having reactions
    ///
    /// Saving an existing (user, post, emoji) triple is a no-op. The
    /// reaction is handed back unchanged on success.
    async fn save(&self, reaction: Reaction) -> StoreResult<Reaction>;

    /// Remove a reaction and recompute its post's reaction flag
    ///
    /// Deleting a reaction that does not exist is not an error.
    async fn delete(&self, reaction: Reaction) -> StoreResult<Reaction>;

    /// All reactions on a post, read from a replica
    async fn list(&self, post_id: &str) -> StoreResult<Vec<Reaction>>;
}
