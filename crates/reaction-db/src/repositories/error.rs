//! Error handling utilities for stores
//!
//! Every failure path maps to a `StoreError` carrying the operation's
//! location and a reason key from the tables below.

use reaction_core::error::StoreError;
use sqlx::Error as SqlxError;

/// Location and reason keys for a transactional operation
#[derive(Debug, Clone, Copy)]
pub(crate) struct TxReasons {
    pub location: &'static str,
    pub begin: &'static str,
    pub mutation: &'static str,
    pub commit: &'static str,
}

pub(crate) const SAVE_REACTION: TxReasons = TxReasons {
    location: "SqlReactionStore.Save",
    begin: "store.sql_reaction.save.begin.app_error",
    mutation: "store.sql_reaction.save.save.app_error",
    commit: "store.sql_reaction.save.commit.app_error",
};

pub(crate) const DELETE_REACTION: TxReasons = TxReasons {
    location: "SqlReactionStore.Delete",
    begin: "store.sql_reaction.delete.begin.app_error",
    mutation: "store.sql_reaction.delete.app_error",
    commit: "store.sql_reaction.delete.commit.app_error",
};

pub(crate) const LIST_REACTIONS_LOCATION: &str = "SqlReactionStore.List";
pub(crate) const LIST_REACTIONS_REASON: &str = "store.sql_reaction.list.app_error";

pub(crate) const SAVE_POST_LOCATION: &str = "SqlPostStore.Save";
pub(crate) const SAVE_POST_REASON: &str = "store.sql_post.save.app_error";
pub(crate) const GET_POST_LOCATION: &str = "SqlPostStore.Get";
pub(crate) const GET_POST_REASON: &str = "store.sql_post.get.app_error";

/// The transaction could not be started; driver detail is dropped
pub(crate) fn begin_error(reasons: TxReasons) -> StoreError {
    StoreError::BeginTransaction {
        location: reasons.location,
        reason: reasons.begin,
    }
}

/// A statement inside the transaction failed
pub(crate) fn mutation_error(reasons: TxReasons, e: &SqlxError) -> StoreError {
    StoreError::Mutation {
        location: reasons.location,
        reason: reasons.mutation,
        detail: e.to_string(),
    }
}

/// COMMIT failed; the transaction is already closed
pub(crate) fn commit_error(reasons: TxReasons, e: &SqlxError) -> StoreError {
    StoreError::Commit {
        location: reasons.location,
        reason: reasons.commit,
        detail: e.to_string(),
    }
}

/// Generic read failure that does not leak driver detail
pub(crate) fn read_error(location: &'static str, reason: &'static str) -> StoreError {
    StoreError::Read { location, reason }
}
