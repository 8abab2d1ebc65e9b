//! Core types for the Supple document store
//!
//! This module defines the foundational types:
//! - Namespace: isolation boundary corresponding to one record type
//! - Record: a stored document (key + field values)
//! - Status: uniform response envelope for mutating operations

use crate::error::{Error, Result};
use crate::value::Value;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use uuid::Uuid;

/// Isolation boundary corresponding to one record type / schema family
///
/// A namespace maps 1:1 to a partition in the storage primitive, so two
/// record types never collide on key space. Namespaces are plain
/// non-empty strings; the record engine never interprets their content.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Namespace(String);

impl Namespace {
    /// Create a namespace, rejecting the empty string.
    pub fn parse(s: impl Into<String>) -> Result<Self> {
        let s = s.into();
        if s.is_empty() {
            return Err(Error::invalid_request("namespace must not be empty"));
        }
        Ok(Self(s))
    }

    /// Get the namespace as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A stored document: a key plus field values conforming to a descriptor
///
/// The key is globally unique within its namespace and lives outside
/// `values`; the storage primitive indexes by it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Record key (UUID v4 when server-assigned)
    pub key: String,
    /// Field name → value, each conforming to its field descriptor
    pub values: HashMap<String, Value>,
}

impl Record {
    /// Create a record with the given key and values
    pub fn new(key: impl Into<String>, values: HashMap<String, Value>) -> Self {
        Self {
            key: key.into(),
            values,
        }
    }

    /// Generate a fresh record key (UUID v4)
    pub fn generate_key() -> String {
        Uuid::new_v4().to_string()
    }
}

/// Uniform response envelope for mutating operations
///
/// The code mirrors HTTP conventions: 201 for `put` (returned on the
/// merge path as well, so callers must not infer creation vs. update
/// from the code alone), 200 for `merge`, 204 for `delete`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Status {
    /// Outcome code (201 created, 200 updated, 204 deleted)
    pub code: u16,
    /// Human-readable outcome description
    pub message: String,
    /// Key the operation applied to, when one exists
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
}

impl Status {
    /// Status for a `put` (created or upsert-merged), code 201
    pub fn created(key: impl Into<String>) -> Self {
        Self {
            code: 201,
            message: "Document created".to_string(),
            key: Some(key.into()),
        }
    }

    /// Status for a `merge`, code 200
    pub fn updated(key: impl Into<String>) -> Self {
        Self {
            code: 200,
            message: "Document updated".to_string(),
            key: Some(key.into()),
        }
    }

    /// Status for a `delete`, code 204
    pub fn deleted(key: impl Into<String>) -> Self {
        Self {
            code: 204,
            message: "Document deleted".to_string(),
            key: Some(key.into()),
        }
    }
}
