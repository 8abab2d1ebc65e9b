//! Error types for the Supple document store
//!
//! This module defines all error types used throughout the system.
//! We use `thiserror` for automatic `Display` and `Error` trait
//! implementations.
//!
//! # Taxonomy
//!
//! | Variant | Meaning | Detected |
//! |---------|---------|----------|
//! | `Schema` | malformed or unsupported schema shape | before storage access |
//! | `InvalidRequest` | bad action or missing action argument | before storage access |
//! | `NotFound` | merge targeting a non-existent key | at the store |
//! | `StorageUnavailable` | the storage primitive failed | at the partition |
//! | `Serialization` | record encode/decode fault | at the partition boundary |
//! | `Internal` | bug or invariant violation | anywhere |
//!
//! `Schema` and `InvalidRequest` are caller mistakes and are never retried.
//! `StorageUnavailable` is not retried internally either; retry policy
//! belongs to the transport.

use serde::{Deserialize, Serialize};

/// Result type alias for Supple operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the Supple document store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, thiserror::Error)]
pub enum Error {
    /// Malformed or unsupported schema shape
    #[error("schema error: {reason}")]
    Schema {
        /// What was wrong with the schema
        reason: String,
    },

    /// Action outside the enumeration, or an action-specific required
    /// argument was missing or malformed
    #[error("invalid request: {reason}")]
    InvalidRequest {
        /// What was wrong with the request
        reason: String,
    },

    /// Record not found (merge targeting a non-existent key)
    #[error("record not found: key '{key}' in namespace '{namespace}'")]
    NotFound {
        /// Namespace the lookup ran against
        namespace: String,
        /// Key that was not present
        key: String,
    },

    /// The underlying storage primitive failed to read, write or iterate
    #[error("storage unavailable: {reason}")]
    StorageUnavailable {
        /// Failure description from the primitive
        reason: String,
    },

    /// Record encode/decode fault at the partition boundary
    #[error("serialization error: {reason}")]
    Serialization {
        /// Failure description from the codec
        reason: String,
    },

    /// Internal error (bug or invariant violation)
    #[error("internal error: {reason}")]
    Internal {
        /// Invariant that was violated
        reason: String,
    },
}

impl Error {
    /// Create a schema error
    pub fn schema(reason: impl Into<String>) -> Self {
        Error::Schema {
            reason: reason.into(),
        }
    }

    /// Create an invalid-request error
    pub fn invalid_request(reason: impl Into<String>) -> Self {
        Error::InvalidRequest {
            reason: reason.into(),
        }
    }

    /// Create a not-found error for a key in a namespace
    pub fn not_found(namespace: impl Into<String>, key: impl Into<String>) -> Self {
        Error::NotFound {
            namespace: namespace.into(),
            key: key.into(),
        }
    }

    /// Create a storage-unavailable error
    pub fn storage(reason: impl Into<String>) -> Self {
        Error::StorageUnavailable {
            reason: reason.into(),
        }
    }

    /// Create a serialization error
    pub fn serialization(reason: impl Into<String>) -> Self {
        Error::Serialization {
            reason: reason.into(),
        }
    }

    /// Create an internal error
    pub fn internal(reason: impl Into<String>) -> Self {
        Error::Internal {
            reason: reason.into(),
        }
    }

    /// True for errors that are caller mistakes, detected before any
    /// storage access.
    pub fn is_caller_error(&self) -> bool {
        matches!(self, Error::Schema { .. } | Error::InvalidRequest { .. })
    }
}
