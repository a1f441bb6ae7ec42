//! Post entity <-> model mapper

use reaction_core::entities::Post;

use crate::models::PostModel;

impl From<PostModel> for Post {
    fn from(model: PostModel) -> Self {
        Post {
            id: model.id,
            user_id: model.user_id,
            message: model.message,
            create_at: model.create_at,
            update_at: model.update_at,
            has_reactions: model.has_reactions,
        }
    }
}
