//! # Store Errors
//!
//! Errors raised by the store plumbing itself. Domain errors (validation, business rules) never
//! travel through this type; services map these variants into their own error enums.

/// Errors that can occur while talking to a `StoreActor`.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StoreError {
    #[error("Store closed")]
    StoreClosed,
    #[error("Store dropped response channel")]
    StoreDropped,
    #[error("Record not found: {0}")]
    NotFound(String),
}
