//! Reaction entity - represents a user's emoji response to a post

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::error::StoreError;
use crate::value_objects::{get_millis, is_valid_id};

/// Maximum length of an emoji name
pub const EMOJI_NAME_MAX_LENGTH: usize = 64;

/// `EMOJI_NAME_MAX_LENGTH` as `u64`, the type required by the `validator` length attribute.
const EMOJI_NAME_MAX_LENGTH_U64: u64 = EMOJI_NAME_MAX_LENGTH as u64;

const IS_VALID_LOCATION: &str = "Reaction.IsValid";

/// Fields in the order they are reported, with their reason keys
const VALIDATED_FIELDS: [(&str, &str); 4] = [
    ("user_id", "model.reaction.is_valid.user_id.app_error"),
    ("post_id", "model.reaction.is_valid.post_id.app_error"),
    ("emoji_name", "model.reaction.is_valid.emoji_name.app_error"),
    ("create_at", "model.reaction.is_valid.create_at.app_error"),
];

/// Reaction entity
///
/// Identified by the (user, post, emoji) triple; there is no surrogate key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct Reaction {
    #[validate(custom(function = "validate_id"))]
    pub user_id: String,
    #[validate(custom(function = "validate_id"))]
    pub post_id: String,
    #[validate(
        length(min = 1, max = EMOJI_NAME_MAX_LENGTH_U64),
        custom(function = "validate_emoji_name")
    )]
    pub emoji_name: String,
    #[validate(range(min = 1))]
    pub create_at: i64,
}

impl Reaction {
    /// Create a new Reaction stamped with the current time
    pub fn new(
        user_id: impl Into<String>,
        post_id: impl Into<String>,
        emoji_name: impl Into<String>,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            post_id: post_id.into(),
            emoji_name: emoji_name.into(),
            create_at: get_millis(),
        }
    }

    /// Structural validity check, run before any database access
    ///
    /// Reports the first offending field in declaration order.
    pub fn is_valid(&self) -> Result<(), StoreError> {
        let Err(errors) = self.validate() else {
            return Ok(());
        };

        let failed = errors.field_errors();
        let (field, reason) = VALIDATED_FIELDS
            .iter()
            .copied()
            .find(|(field, _)| failed.contains_key(*field))
            .unwrap_or(("reaction", "model.reaction.is_valid.app_error"));

        Err(StoreError::Validation {
            location: IS_VALID_LOCATION,
            reason,
            field,
        })
    }
}

fn validate_id(value: &str) -> Result<(), ValidationError> {
    if is_valid_id(value) {
        Ok(())
    } else {
        Err(ValidationError::new("invalid_id"))
    }
}

fn validate_emoji_name(value: &str) -> Result<(), ValidationError> {
    let valid = value
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '+'));

    if valid {
        Ok(())
    } else {
        Err(ValidationError::new("invalid_emoji_name"))
    }
}
