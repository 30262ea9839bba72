//! Error types for record-store operations.

use thiserror::Error;

/// Errors surfaced by the record store and session service.
///
/// Every store round-trip resolves to one of these; the engine never
/// retries, it surfaces the failure to the calling UI action.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    /// No valid session; the excluded presentation layer redirects to login.
    #[error("not authenticated")]
    Unauthenticated,

    /// The referenced list or task does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// The entity exists but is not owned by the caller.
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// The store rejected an empty or invalid name.
    #[error("validation failed: {0}")]
    Validation(String),

    /// Transport or server failure.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = StoreError::NotFound("list".into());
        assert_eq!(err.to_string(), "not found: list");
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<StoreError>();
    }
}
