//! Value objects - identifiers and timestamps shared by every entity

mod id;
mod millis;

pub use id::{is_valid_id, new_id, ID_LENGTH};
pub use millis::get_millis;
