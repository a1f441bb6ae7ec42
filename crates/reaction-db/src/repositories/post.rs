//! PostgreSQL post storage
//!
//! The reaction store only needs two things from posts: a row lock while it
//! mutates reactions, and the `has_reactions` / `update_at` write path.
//! Both run on the caller's connection so they share its transaction.

use sqlx::{PgConnection, PgPool};
use tracing::instrument;

use reaction_core::entities::Post;
use reaction_core::error::StoreError;
use reaction_core::traits::StoreResult;

use crate::models::PostModel;

use super::error::{
    read_error, GET_POST_LOCATION, GET_POST_REASON, SAVE_POST_LOCATION, SAVE_POST_REASON,
};

/// PostgreSQL post repository
#[derive(Clone)]
pub struct PgPostRepository {
    pool: PgPool,
}

impl PgPostRepository {
    /// Create a new PgPostRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a post
    #[instrument(skip(self))]
    pub async fn create(&self, post: &Post) -> StoreResult<()> {
        sqlx::query(
            r#"
            INSERT INTO posts (id, user_id, message, create_at, update_at, has_reactions)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(&post.id)
        .bind(&post.user_id)
        .bind(&post.message)
        .bind(post.create_at)
        .bind(post.update_at)
        .bind(post.has_reactions)
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::Mutation {
            location: SAVE_POST_LOCATION,
            reason: SAVE_POST_REASON,
            detail: e.to_string(),
        })?;

        Ok(())
    }

    /// Find post by ID
    #[instrument(skip(self))]
    pub async fn find_by_id(&self, id: &str) -> StoreResult<Option<Post>> {
        let result = sqlx::query_as::<_, PostModel>(
            r#"
            SELECT id, user_id, message, create_at, update_at, has_reactions
            FROM posts
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|_| read_error(GET_POST_LOCATION, GET_POST_REASON))?;

        Ok(result.map(Post::from))
    }
}

/// Lock the post row until the surrounding transaction ends
///
/// Serializes reaction mutations on the same post so the flag recomputed by
/// [`update_post_for_reactions`] sees every earlier committed change.
/// A missing post locks nothing.
pub(crate) async fn lock_post(conn: &mut PgConnection, post_id: &str) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        SELECT id FROM posts WHERE id = $1 FOR UPDATE
        "#,
    )
    .bind(post_id)
    .fetch_optional(&mut *conn)
    .await?;

    Ok(())
}

/// Recompute `has_reactions` for a post
///
/// `has_reactions` becomes `count(reactions) > 0`. `update_at` is moved to
/// `now` only when that flag actually flips; adding or removing one of
/// several reactions leaves it alone.
pub(crate) async fn update_post_for_reactions(
    conn: &mut PgConnection,
    post_id: &str,
    now: i64,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        UPDATE posts
        SET update_at = CASE
                WHEN has_reactions != (SELECT COUNT(*) > 0 FROM reactions WHERE post_id = $1) THEN $2
                ELSE update_at
            END,
            has_reactions = (SELECT COUNT(*) > 0 FROM reactions WHERE post_id = $1)
        WHERE id = $1
        "#,
    )
    .bind(post_id)
    .bind(now)
    .execute(&mut *conn)
    .await?;

    Ok(())
}
