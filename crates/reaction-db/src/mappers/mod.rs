//! Entity to model mappers
//!
//! `From<Model> for Entity` conversions turning database rows into domain objects.

mod post;
mod reaction;
