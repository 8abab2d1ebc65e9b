//! High-level typed wrapper for the Executor.
//!
//! The [`Supple`] struct wraps the [`Executor`] and the
//! [`DocRequest`]/[`Output`] protocol with typed method calls, one per
//! action. Each method builds the request, executes it, and extracts
//! the typed result; an output variant that does not match the action
//! is an internal error, never a silent coercion.
//!
//! # Example
//!
//! ```ignore
//! use supple_executor::Supple;
//! use serde_json::json;
//!
//! let db = Supple::ephemeral();
//! let schema = json!({ "properties": { "name": { "type": "string" } } });
//!
//! let status = db.put_doc("users", &schema, json!({ "name": "Ada" }), None)?;
//! let record = db.get_doc("users", &schema, &status.key.unwrap())?;
//! ```

use std::sync::Arc;

use supple_core::types::{Record, Status};
use supple_core::{Error, Result, StorageEngine};
use supple_storage::MemoryEngine;

use crate::{Action, DocRequest, Executor, Output};

/// High-level typed wrapper for record-engine operations.
pub struct Supple {
    executor: Executor,
}

impl Supple {
    /// Create an instance over the given storage engine.
    pub fn with_engine(engine: Arc<dyn StorageEngine>) -> Self {
        Self {
            executor: Executor::new(engine),
        }
    }

    /// Create an ephemeral in-memory instance.
    pub fn ephemeral() -> Self {
        Self::with_engine(Arc::new(MemoryEngine::new()))
    }

    /// Get the underlying executor.
    pub fn executor(&self) -> &Executor {
        &self.executor
    }

    /// Execute a raw request.
    pub fn execute(&self, request: DocRequest) -> Result<Output> {
        self.executor.execute(request)
    }

    // =========================================================================
    // Document Operations (8)
    // =========================================================================

    /// Create a document, or upsert-merge onto an existing key.
    pub fn put_doc(
        &self,
        namespace: &str,
        schema: &serde_json::Value,
        data: serde_json::Value,
        key: Option<&str>,
    ) -> Result<Status> {
        match self.executor.execute(DocRequest {
            namespace: namespace.to_string(),
            action: Action::PutDoc,
            key: key.map(str::to_string),
            limit: None,
            offset: None,
            schema: schema.clone(),
            data: Some(data),
        })? {
            Output::Status(status) => Ok(status),
            _ => Err(Error::internal("Unexpected output for putDoc")),
        }
    }

    /// Fetch one document by key.
    pub fn get_doc(
        &self,
        namespace: &str,
        schema: &serde_json::Value,
        key: &str,
    ) -> Result<Option<Record>> {
        match self.executor.execute(DocRequest {
            namespace: namespace.to_string(),
            action: Action::GetDoc,
            key: Some(key.to_string()),
            limit: None,
            offset: None,
            schema: schema.clone(),
            data: None,
        })? {
            Output::Maybe(record) => Ok(record),
            _ => Err(Error::internal("Unexpected output for getDoc")),
        }
    }

    /// Deep-merge a partial payload into an existing document.
    pub fn merge_doc(
        &self,
        namespace: &str,
        schema: &serde_json::Value,
        key: &str,
        data: serde_json::Value,
    ) -> Result<Status> {
        match self.executor.execute(DocRequest {
            namespace: namespace.to_string(),
            action: Action::MergeDoc,
            key: Some(key.to_string()),
            limit: None,
            offset: None,
            schema: schema.clone(),
            data: Some(data),
        })? {
            Output::Status(status) => Ok(status),
            _ => Err(Error::internal("Unexpected output for mergeDoc")),
        }
    }

    /// Delete a document; idempotent.
    pub fn delete_doc(
        &self,
        namespace: &str,
        schema: &serde_json::Value,
        key: &str,
    ) -> Result<Status> {
        match self.executor.execute(DocRequest {
            namespace: namespace.to_string(),
            action: Action::DeleteDoc,
            key: Some(key.to_string()),
            limit: None,
            offset: None,
            schema: schema.clone(),
            data: None,
        })? {
            Output::Status(status) => Ok(status),
            _ => Err(Error::internal("Unexpected output for deleteDoc")),
        }
    }

    /// Page through a namespace in key order.
    pub fn scan_docs(
        &self,
        namespace: &str,
        schema: &serde_json::Value,
        limit: Option<u64>,
        offset: Option<u64>,
    ) -> Result<Vec<Record>> {
        match self.executor.execute(DocRequest {
            namespace: namespace.to_string(),
            action: Action::ScanDocs,
            key: None,
            limit,
            offset,
            schema: schema.clone(),
            data: None,
        })? {
            Output::Records(records) => Ok(records),
            _ => Err(Error::internal("Unexpected output for scanDocs")),
        }
    }

    /// Filter documents by exact field equality, with pagination.
    pub fn find_docs(
        &self,
        namespace: &str,
        schema: &serde_json::Value,
        filter: serde_json::Value,
        limit: Option<u64>,
        offset: Option<u64>,
    ) -> Result<Vec<Record>> {
        match self.executor.execute(DocRequest {
            namespace: namespace.to_string(),
            action: Action::FindDocs,
            key: None,
            limit,
            offset,
            schema: schema.clone(),
            data: Some(filter),
        })? {
            Output::Records(records) => Ok(records),
            _ => Err(Error::internal("Unexpected output for findDocs")),
        }
    }

    /// Count documents in a namespace.
    pub fn count_docs(&self, namespace: &str, schema: &serde_json::Value) -> Result<u64> {
        match self.executor.execute(DocRequest {
            namespace: namespace.to_string(),
            action: Action::CountDocs,
            key: None,
            limit: None,
            offset: None,
            schema: schema.clone(),
            data: None,
        })? {
            Output::Count(count) => Ok(count),
            _ => Err(Error::internal("Unexpected output for countDocs")),
        }
    }

    /// Check whether a key is present in a namespace.
    pub fn exists_doc(
        &self,
        namespace: &str,
        schema: &serde_json::Value,
        key: &str,
    ) -> Result<bool> {
        match self.executor.execute(DocRequest {
            namespace: namespace.to_string(),
            action: Action::ExistsDoc,
            key: Some(key.to_string()),
            limit: None,
            offset: None,
            schema: schema.clone(),
            data: None,
        })? {
            Output::Bool(present) => Ok(present),
            _ => Err(Error::internal("Unexpected output for existsDoc")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use supple_core::Value;

    fn schema() -> serde_json::Value {
        json!({
            "title": "Contact",
            "properties": {
                "name": { "type": "string" },
                "age": { "type": "integer" }
            },
            "required": ["name"]
        })
    }

    #[test]
    fn test_typed_round_trip() {
        let db = Supple::ephemeral();
        let schema = schema();

        let status = db
            .put_doc("contacts", &schema, json!({ "name": "Ada", "age": 36 }), None)
            .unwrap();
        assert_eq!(status.code, 201);
        let key = status.key.unwrap();

        let record = db.get_doc("contacts", &schema, &key).unwrap().unwrap();
        assert_eq!(record.values.get("name"), Some(&Value::String("Ada".into())));
        assert_eq!(record.values.get("age"), Some(&Value::Int(36)));

        assert!(db.exists_doc("contacts", &schema, &key).unwrap());
        assert_eq!(db.count_docs("contacts", &schema).unwrap(), 1);
    }

    #[test]
    fn test_typed_merge_delete() {
        let db = Supple::ephemeral();
        let schema = schema();

        let status = db
            .put_doc("contacts", &schema, json!({ "name": "Ada" }), Some("ada"))
            .unwrap();
        assert_eq!(status.key.as_deref(), Some("ada"));

        let status = db
            .merge_doc("contacts", &schema, "ada", json!({ "age": 37 }))
            .unwrap();
        assert_eq!(status.code, 200);

        let record = db.get_doc("contacts", &schema, "ada").unwrap().unwrap();
        assert_eq!(record.values.get("age"), Some(&Value::Int(37)));

        assert_eq!(db.delete_doc("contacts", &schema, "ada").unwrap().code, 204);
        assert!(db.get_doc("contacts", &schema, "ada").unwrap().is_none());
        // Idempotent second delete
        assert_eq!(db.delete_doc("contacts", &schema, "ada").unwrap().code, 204);
    }

    #[test]
    fn test_typed_find_and_scan() {
        let db = Supple::ephemeral();
        let schema = schema();

        for (key, age) in [("a", 30), ("b", 40), ("c", 30)] {
            db.put_doc(
                "contacts",
                &schema,
                json!({ "name": "n", "age": age }),
                Some(key),
            )
            .unwrap();
        }

        let all = db.scan_docs("contacts", &schema, None, None).unwrap();
        assert_eq!(all.len(), 3);
        // Scans come back in key order
        let keys: Vec<&str> = all.iter().map(|r| r.key.as_str()).collect();
        assert_eq!(keys, vec!["a", "b", "c"]);

        let thirty = db
            .find_docs("contacts", &schema, json!({ "age": 30 }), None, None)
            .unwrap();
        let mut keys: Vec<&str> = thirty.iter().map(|r| r.key.as_str()).collect();
        keys.sort();
        assert_eq!(keys, vec!["a", "c"]);
    }
}
