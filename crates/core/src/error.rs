//! Error taxonomy shared by every catalog crate.

use thiserror::Error;

/// Result type used across the list-entry core.
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Failure reported by an external collaborator (store, index, authorization
/// evaluator, direct search backend).
///
/// The core never retries or rewrites these; they are propagated to the caller
/// as-is and abort the rest of the operation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AdapterError {
    #[error("entry store failure: {0}")]
    Store(String),

    #[error("indexed search failure: {0}")]
    Index(String),

    #[error("list entry search failure: {0}")]
    Search(String),

    #[error("authorization gate failure: {0}")]
    Authorization(String),
}

/// Error returned by list-entry operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// The request was malformed (missing target, virtual destination, ...).
    /// Raised before anything is loaded or mutated.
    #[error("validation failed: {0}")]
    Validation(String),

    /// The authorization gate denied the permission for the evaluated subject.
    #[error("authorization denied: missing permission '{0}'")]
    AuthorizationDenied(String),

    /// A named entity could not be resolved.
    #[error("{kind} '{id}' not found")]
    NotFound { kind: String, id: String },

    /// An identifier was invalid (e.g. blank).
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    #[error(transparent)]
    Adapter(#[from] AdapterError),
}

impl CatalogError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn denied(permission: impl Into<String>) -> Self {
        Self::AuthorizationDenied(permission.into())
    }

    pub fn not_found(kind: impl core::fmt::Display, id: impl core::fmt::Display) -> Self {
        Self::NotFound {
            kind: kind.to_string(),
            id: id.to_string(),
        }
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn is_authorization_denied(&self) -> bool {
        matches!(self, Self::AuthorizationDenied(_))
    }
}
