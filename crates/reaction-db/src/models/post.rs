//! Post database model

use sqlx::FromRow;

/// Database model for posts table
#[derive(Debug, Clone, FromRow)]
pub struct PostModel {
    pub id: String,
    pub user_id: String,
    pub message: String,
    pub create_at: i64,
    pub update_at: i64,
    pub has_reactions: bool,
}
