//! Reaction entity <-> model mapper

use reaction_core::entities::Reaction;

use crate::models::ReactionModel;

/// Convert ReactionModel to Reaction entity
impl From<ReactionModel> for Reaction {
    fn from(model: ReactionModel) -> Self {
        Reaction {
            user_id: model.user_id,
            post_id: model.post_id,
            emoji_name: model.emoji_name,
            create_at: model.create_at,
        }
    }
}
