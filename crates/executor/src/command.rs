//! The action protocol
//!
//! Every operation on the record engine arrives as a [`DocRequest`]:
//! a namespace, one of eight actions, and the action's arguments.
//! Requests are:
//! - **Self-contained**: schema and payload travel with every request
//! - **Serializable**: the transport hands them over as JSON
//! - **Closed**: `Action` is a closed enumeration; unknown action
//!   strings fail deserialization and are never routed

use serde::{Deserialize, Serialize};

/// The eight record-engine actions, with their wire names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    /// Create a record, or upsert-merge onto an existing key.
    /// Returns: `Output::Status` (code 201)
    #[serde(rename = "putDoc")]
    PutDoc,
    /// Fetch one record by key.
    /// Returns: `Output::Maybe`
    #[serde(rename = "getDoc")]
    GetDoc,
    /// Deep-merge a partial payload into an existing record.
    /// Returns: `Output::Status` (code 200)
    #[serde(rename = "mergeDoc")]
    MergeDoc,
    /// Remove a record; idempotent.
    /// Returns: `Output::Status` (code 204)
    #[serde(rename = "deleteDoc")]
    DeleteDoc,
    /// Exact-match filter with pagination.
    /// Returns: `Output::Records`
    #[serde(rename = "findDocs")]
    FindDocs,
    /// Page through the namespace in key order.
    /// Returns: `Output::Records`
    #[serde(rename = "scanDocs")]
    ScanDocs,
    /// Count records in the namespace.
    /// Returns: `Output::Count`
    #[serde(rename = "countDocs")]
    CountDocs,
    /// Presence check by key.
    /// Returns: `Output::Bool`
    #[serde(rename = "existsDoc")]
    ExistsDoc,
}

impl Action {
    /// All actions, in protocol order
    pub const ALL: [Action; 8] = [
        Action::PutDoc,
        Action::GetDoc,
        Action::MergeDoc,
        Action::DeleteDoc,
        Action::FindDocs,
        Action::ScanDocs,
        Action::CountDocs,
        Action::ExistsDoc,
    ];

    /// The camelCase wire name
    pub fn name(&self) -> &'static str {
        match self {
            Action::PutDoc => "putDoc",
            Action::GetDoc => "getDoc",
            Action::MergeDoc => "mergeDoc",
            Action::DeleteDoc => "deleteDoc",
            Action::FindDocs => "findDocs",
            Action::ScanDocs => "scanDocs",
            Action::CountDocs => "countDocs",
            Action::ExistsDoc => "existsDoc",
        }
    }

    /// Actions that require a non-absent `data` payload.
    ///
    /// For `findDocs` the payload doubles as the filter.
    pub fn requires_data(&self) -> bool {
        matches!(self, Action::PutDoc | Action::MergeDoc | Action::FindDocs)
    }

    /// Actions that require a non-absent `key`
    pub fn requires_key(&self) -> bool {
        matches!(self, Action::GetDoc | Action::DeleteDoc | Action::ExistsDoc)
    }

    /// Actions whose payload compiles against the partial (all-optional)
    /// record shape
    pub fn uses_partial_shape(&self) -> bool {
        matches!(self, Action::MergeDoc | Action::FindDocs)
    }
}

/// One request against the record engine
///
/// The schema rides along on every request; the engine compiles it (or
/// reuses the cached descriptor) before touching the namespace.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DocRequest {
    /// Target namespace (one record type / schema family)
    pub namespace: String,
    /// The action to perform
    pub action: Action,
    /// Record key, for key-addressed actions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    /// Page size for `scanDocs`/`findDocs` (default 1000)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,
    /// Records to skip for `scanDocs`/`findDocs` (default 0)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<u64>,
    /// JSON-Schema-like definition of the record shape
    pub schema: serde_json::Value,
    /// Payload for `putDoc`/`mergeDoc`; filter for `findDocs`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}
