//! Schema bootstrap
//!
//! Idempotent DDL for the tables the reaction store touches. Safe to run on
//! every start-up.

use sqlx::PgPool;
use tracing::{info, instrument};

/// Index backing per-post list and count queries
pub const REACTIONS_POST_ID_INDEX: &str = "idx_reactions_post_id";

const CREATE_POSTS: &str = r#"
    CREATE TABLE IF NOT EXISTS posts (
        id VARCHAR(26) PRIMARY KEY,
        user_id VARCHAR(26) NOT NULL,
        message TEXT NOT NULL DEFAULT '',
        create_at BIGINT NOT NULL,
        update_at BIGINT NOT NULL,
        has_reactions BOOLEAN NOT NULL DEFAULT FALSE
    )
"#;

const CREATE_REACTIONS: &str = r#"
    CREATE TABLE IF NOT EXISTS reactions (
        user_id VARCHAR(26) NOT NULL,
        post_id VARCHAR(26) NOT NULL,
        emoji_name VARCHAR(64) NOT NULL,
        create_at BIGINT NOT NULL,
        PRIMARY KEY (user_id, post_id, emoji_name)
    )
"#;

const CREATE_REACTIONS_POST_ID_INDEX: &str = r#"
    CREATE INDEX IF NOT EXISTS idx_reactions_post_id ON reactions (post_id)
"#;

/// Create `posts` and `reactions` if they are missing
#[instrument(skip(pool))]
pub async fn create_tables_if_not_exists(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query(CREATE_POSTS).execute(pool).await?;
    sqlx::query(CREATE_REACTIONS).execute(pool).await?;
    Ok(())
}

/// Create secondary indexes if they are missing
#[instrument(skip(pool))]
pub async fn create_indexes_if_not_exists(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query(CREATE_REACTIONS_POST_ID_INDEX)
        .execute(pool)
        .await?;
    Ok(())
}

/// Column migrations for existing deployments; the reactions table has none yet
pub async fn upgrade_schema_if_needed(_pool: &PgPool) -> Result<(), sqlx::Error> {
    Ok(())
}

/// Bring the schema up to date
pub async fn ensure_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    create_tables_if_not_exists(pool).await?;
    upgrade_schema_if_needed(pool).await?;
    create_indexes_if_not_exists(pool).await?;

    info!("Reaction schema ready");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reactions_table_shape() {
        assert!(CREATE_REACTIONS.contains("user_id VARCHAR(26)"));
        assert!(CREATE_REACTIONS.contains("post_id VARCHAR(26)"));
        assert!(CREATE_REACTIONS.contains("emoji_name VARCHAR(64)"));
        assert!(CREATE_REACTIONS.contains("PRIMARY KEY (user_id, post_id, emoji_name)"));
    }

    #[test]
    fn test_index_name_matches_ddl() {
        assert!(CREATE_REACTIONS_POST_ID_INDEX.contains(REACTIONS_POST_ID_INDEX));
    }
}
