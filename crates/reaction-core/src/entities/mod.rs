//! Domain entities - core business objects

mod post;
mod reaction;

pub use post::Post;
pub use reaction::{Reaction, EMOJI_NAME_MAX_LENGTH};
