//! Post entity - the parent message reactions attach to

use serde::{Deserialize, Serialize};

use crate::value_objects::{get_millis, new_id};

/// Post entity
///
/// Only the columns the reaction store reads or writes are modelled here.
/// `has_reactions` is derived from the reactions table and kept in sync by
/// the reaction store; `update_at` moves only when that flag flips.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: String,
    pub user_id: String,
    pub message: String,
    pub create_at: i64,
    pub update_at: i64,
    pub has_reactions: bool,
}

impl Post {
    /// Create a new Post with a fresh ID
    pub fn new(user_id: impl Into<String>, message: impl Into<String>) -> Self {
        let now = get_millis();
        Self {
            id: new_id(),
            user_id: user_id.into(),
            message: message.into(),
            create_at: now,
            update_at: now,
            has_reactions: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value_objects::is_valid_id;

    #[test]
    fn test_post_creation() {
        let user_id = new_id();
        let post = Post::new(user_id.clone(), "hello");
        assert!(is_valid_id(&post.id));
        assert_eq!(post.user_id, user_id);
        assert_eq!(post.message, "hello");
        assert_eq!(post.create_at, post.update_at);
        assert!(!post.has_reactions);
    }
}
