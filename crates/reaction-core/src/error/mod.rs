//! Error types for the domain layer

mod store_error;

pub use store_error::StoreError;
