//! Store errors - the single error type returned by store operations
//!
//! Every variant carries a `location` (which operation failed) and a
//! `reason` (a stable, localizable message key). Database detail is only
//! attached where it is safe to surface.

use thiserror::Error;

/// Store layer errors
#[derive(Debug, Error)]
pub enum StoreError {
    // =========================================================================
    // Input Errors (raised before any I/O)
    // =========================================================================
    #[error("{location}: {reason} (field: {field})")]
    Validation {
        location: &'static str,
        reason: &'static str,
        field: &'static str,
    },

    // =========================================================================
    // Persistence Errors
    // =========================================================================
    #[error("{location}: {reason}")]
    BeginTransaction {
        location: &'static str,
        reason: &'static str,
    },

    #[error("{location}: {reason}, {detail}")]
    Mutation {
        location: &'static str,
        reason: &'static str,
        detail: String,
    },

    #[error("{location}: {reason}, {detail}")]
    Commit {
        location: &'static str,
        reason: &'static str,
        detail: String,
    },

    #[error("{location}: {reason}")]
    Read {
        location: &'static str,
        reason: &'static str,
    },

    // =========================================================================
    // Dispatch Errors
    // =========================================================================
    #[error("{location}: {reason}")]
    Cancelled {
        location: &'static str,
        reason: &'static str,
    },
}

impl StoreError {
    /// Where the error was raised, e.g. `SqlReactionStore.Save`
    pub fn location(&self) -> &'static str {
        match self {
            Self::Validation { location, .. }
            | Self::BeginTransaction { location, .. }
            | Self::Mutation { location, .. }
            | Self::Commit { location, .. }
            | Self::Read { location, .. }
            | Self::Cancelled { location, .. } => location,
        }
    }

    /// Localizable reason key, e.g. `store.sql_reaction.save.begin.app_error`
    pub fn reason(&self) -> &'static str {
        match self {
            Self::Validation { reason, .. }
            | Self::BeginTransaction { reason, .. }
            | Self::Mutation { reason, .. }
            | Self::Commit { reason, .. }
            | Self::Read { reason, .. }
            | Self::Cancelled { reason, .. } => reason,
        }
    }

    /// Underlying database detail, if any was attached
    pub fn detail(&self) -> Option<&str> {
        match self {
            Self::Mutation { detail, .. } | Self::Commit { detail, .. } => Some(detail),
            _ => None,
        }
    }

    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation { .. } => "VALIDATION_ERROR",
            Self::BeginTransaction { .. } => "TRANSACTION_BEGIN_ERROR",
            Self::Mutation { .. } => "DATABASE_ERROR",
            Self::Commit { .. } => "TRANSACTION_COMMIT_ERROR",
            Self::Read { .. } => "DATABASE_READ_ERROR",
            Self::Cancelled { .. } => "OPERATION_CANCELLED",
        }
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }

    /// Check if this error came from the database
    pub fn is_persistence(&self) -> bool {
        matches!(
            self,
            Self::BeginTransaction { .. }
                | Self::Mutation { .. }
                | Self::Commit { .. }
                | Self::Read { .. }
        )
    }
}
