//! PostgreSQL implementation of ReactionStore

use async_trait::async_trait;
use sqlx::PgConnection;
use tracing::{debug, instrument};

use reaction_core::entities::Reaction;
use reaction_core::traits::{ReactionStore, StoreResult};
use reaction_core::value_objects::get_millis;

use crate::models::ReactionModel;
use crate::pool::{ConnectionSource, DatabaseHandles};

use super::error::{
    begin_error, commit_error, mutation_error, read_error, TxReasons, DELETE_REACTION,
    LIST_REACTIONS_LOCATION, LIST_REACTIONS_REASON, SAVE_REACTION,
};
use super::post::{lock_post, update_post_for_reactions};

/// Row mutation applied inside a reaction transaction
#[derive(Debug, Clone, Copy)]
enum Mutation {
    Save,
    Delete,
}

impl Mutation {
    fn reasons(self) -> TxReasons {
        match self {
            Self::Save => SAVE_REACTION,
            Self::Delete => DELETE_REACTION,
        }
    }
}

/// PostgreSQL implementation of ReactionStore
///
/// Holds no state besides its connection source; all coordination between
/// concurrent callers happens in the database.
#[derive(Clone)]
pub struct PgReactionStore<S = DatabaseHandles> {
    source: S,
}

impl<S: ConnectionSource> PgReactionStore<S> {
    /// Create a new PgReactionStore
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Run one mutation and the post flag update as a single transaction
    async fn apply(&self, mutation: Mutation, reaction: &Reaction) -> StoreResult<()> {
        let reasons = mutation.reasons();

        let mut tx = self
            .source
            .begin()
            .await
            .map_err(|_| begin_error(reasons))?;

        let applied = match mutation {
            Mutation::Save => save_reaction_and_update_post(&mut tx, reaction).await,
            Mutation::Delete => delete_reaction_and_update_post(&mut tx, reaction).await,
        };

        if let Err(e) = applied {
            tx.rollback().await.ok();
            return Err(mutation_error(reasons, &e));
        }

        // A failed COMMIT already ends the transaction; nothing to roll back.
        tx.commit().await.map_err(|e| commit_error(reasons, &e))
    }
}

#[async_trait]
impl<S: ConnectionSource> ReactionStore for PgReactionStore<S> {
    #[instrument(skip(self))]
    async fn save(&self, reaction: Reaction) -> StoreResult<Reaction> {
        reaction.is_valid()?;

        self.apply(Mutation::Save, &reaction).await?;

        Ok(reaction)
    }

    #[instrument(skip(self))]
    async fn delete(&self, reaction: Reaction) -> StoreResult<Reaction> {
        reaction.is_valid()?;

        self.apply(Mutation::Delete, &reaction).await?;

        Ok(reaction)
    }

    #[instrument(skip(self))]
    async fn list(&self, post_id: &str) -> StoreResult<Vec<Reaction>> {
        let mut conn = self
            .source
            .acquire_replica()
            .await
            .map_err(|_| read_error(LIST_REACTIONS_LOCATION, LIST_REACTIONS_REASON))?;

        let results = sqlx::query_as::<_, ReactionModel>(
            r#"
            SELECT user_id, post_id, emoji_name, create_at
            FROM reactions
            WHERE post_id = $1
            "#,
        )
        .bind(post_id)
        .fetch_all(&mut *conn)
        .await
        .map_err(|_| read_error(LIST_REACTIONS_LOCATION, LIST_REACTIONS_REASON))?;

        Ok(results.into_iter().map(Reaction::from).collect())
    }
}

async fn save_reaction_and_update_post(
    conn: &mut PgConnection,
    reaction: &Reaction,
) -> Result<(), sqlx::Error> {
    lock_post(conn, &reaction.post_id).await?;

    let inserted = sqlx::query(
        r#"
        INSERT INTO reactions (user_id, post_id, emoji_name, create_at)
        VALUES ($1, $2, $3, $4)
        ON CONFLICT (user_id, post_id, emoji_name) DO NOTHING
        "#,
    )
    .bind(&reaction.user_id)
    .bind(&reaction.post_id)
    .bind(&reaction.emoji_name)
    .bind(reaction.create_at)
    .execute(&mut *conn)
    .await?;

    if inserted.rows_affected() == 0 {
        debug!("Reaction already exists");
    }

    update_post_for_reactions(conn, &reaction.post_id, get_millis()).await
}

async fn delete_reaction_and_update_post(
    conn: &mut PgConnection,
    reaction: &Reaction,
) -> Result<(), sqlx::Error> {
    lock_post(conn, &reaction.post_id).await?;

    let deleted = sqlx::query(
        r#"
        DELETE FROM reactions WHERE user_id = $1 AND post_id = $2 AND emoji_name = $3
        "#,
    )
    .bind(&reaction.user_id)
    .bind(&reaction.post_id)
    .bind(&reaction.emoji_name)
    .execute(&mut *conn)
    .await?;

    if deleted.rows_affected() == 0 {
        debug!("No reaction to delete");
    }

    update_post_for_reactions(conn, &reaction.post_id, get_millis()).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use reaction_core::value_objects::new_id;
    use sqlx::pool::PoolConnection;
    use sqlx::{Postgres, Transaction};

    /// Connection source that counts calls and never reaches a database
    #[derive(Default)]
    struct CountingSource {
        begins: AtomicUsize,
        replica_reads: AtomicUsize,
    }

    #[async_trait]
    impl ConnectionSource for CountingSource {
        async fn begin(&self) -> Result<Transaction<'static, Postgres>, sqlx::Error> {
            self.begins.fetch_add(1, Ordering::SeqCst);
            Err(sqlx::Error::PoolTimedOut)
        }

        async fn acquire_replica(&self) -> Result<PoolConnection<Postgres>, sqlx::Error> {
            self.replica_reads.fetch_add(1, Ordering::SeqCst);
            Err(sqlx::Error::PoolClosed)
        }
    }

    fn counting_store() -> PgReactionStore<CountingSource> {
        PgReactionStore::new(CountingSource::default())
    }

    fn begins(store: &PgReactionStore<CountingSource>) -> usize {
        store.source.begins.load(Ordering::SeqCst)
    }

    #[test]
    fn test_store_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PgReactionStore>();
    }

    #[tokio::test]
    async fn test_save_rejects_long_user_id_without_db_access() {
        let store = counting_store();
        let mut reaction = Reaction::new(new_id(), new_id(), "smile");
        reaction.user_id.push('x');

        let err = store.save(reaction).await.unwrap_err();

        assert!(err.is_validation());
        assert_eq!(err.reason(), "model.reaction.is_valid.user_id.app_error");
        assert_eq!(begins(&store), 0);
    }

    #[tokio::test]
    async fn test_save_rejects_missing_fields_without_db_access() {
        let store = counting_store();

        let err = store
            .save(Reaction::new(new_id(), "", "smile"))
            .await
            .unwrap_err();
        assert_eq!(err.reason(), "model.reaction.is_valid.post_id.app_error");

        let err = store
            .save(Reaction::new(new_id(), new_id(), ""))
            .await
            .unwrap_err();
        assert_eq!(err.reason(), "model.reaction.is_valid.emoji_name.app_error");

        assert_eq!(begins(&store), 0);
    }

    #[tokio::test]
    async fn test_delete_rejects_invalid_reaction_without_db_access() {
        let store = counting_store();
        let reaction = Reaction::new(new_id(), new_id(), "e".repeat(65));

        let err = store.delete(reaction).await.unwrap_err();

        assert!(err.is_validation());
        assert_eq!(begins(&store), 0);
    }

    #[tokio::test]
    async fn test_save_reports_begin_failure() {
        let store = counting_store();

        let err = store
            .save(Reaction::new(new_id(), new_id(), "smile"))
            .await
            .unwrap_err();

        assert_eq!(begins(&store), 1);
        assert_eq!(err.location(), "SqlReactionStore.Save");
        assert_eq!(err.reason(), "store.sql_reaction.save.begin.app_error");
        assert_eq!(err.detail(), None);
    }

    #[tokio::test]
    async fn test_delete_reports_begin_failure() {
        let store = counting_store();

        let err = store
            .delete(Reaction::new(new_id(), new_id(), "smile"))
            .await
            .unwrap_err();

        assert_eq!(begins(&store), 1);
        assert_eq!(err.location(), "SqlReactionStore.Delete");
        assert_eq!(err.reason(), "store.sql_reaction.delete.begin.app_error");
    }

    #[tokio::test]
    async fn test_unset_timestamp_rejected_without_db_access() {
        let store = counting_store();
        let mut reaction = Reaction::new(new_id(), new_id(), "smile");
        reaction.create_at = 0;

        let err = store.save(reaction.clone()).await.unwrap_err();
        assert!(err.is_validation());
        assert_eq!(err.reason(), "model.reaction.is_valid.create_at.app_error");

        let err = store.delete(reaction).await.unwrap_err();
        assert_eq!(err.reason(), "model.reaction.is_valid.create_at.app_error");

        assert_eq!(begins(&store), 0);
    }

    #[tokio::test]
    async fn test_list_hides_read_failure_detail() {
        let store = counting_store();

        // No validation on the post id; the replica is always consulted.
        let err = store.list("not-an-id").await.unwrap_err();

        assert_eq!(store.source.replica_reads.load(Ordering::SeqCst), 1);
        assert_eq!(begins(&store), 0);
        assert_eq!(err.reason(), "store.sql_reaction.list.app_error");
        assert_eq!(err.detail(), None);
        assert!(!err.to_string().contains("pool"));
    }

    #[tokio::test]
    async fn test_usable_as_trait_object() {
        let store: Arc<dyn ReactionStore> = Arc::new(counting_store());
        let err = store
            .save(Reaction::new("bad", new_id(), "smile"))
            .await
            .unwrap_err();
        assert!(err.is_validation());
    }
}
