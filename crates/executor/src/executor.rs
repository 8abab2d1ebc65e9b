//! The Executor - single entry point to the record engine.
//!
//! The Executor is a stateless dispatcher: it validates a request's
//! action-specific arguments, compiles (or reuses) the record
//! descriptor, and routes to the namespace's record store. It holds the
//! compiler cache and store registry but no per-request state.
//!
//! Pre-validation is strict: every `Schema` or `InvalidRequest` error
//! is raised before the namespace's partition is touched, so a failed
//! precondition can never leave a partial mutation behind.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use crate::{Action, DocRequest, Output};
use supple_core::descriptor::RecordDescriptor;
use supple_core::error::{Error, Result};
use supple_core::traits::StorageEngine;
use supple_core::types::{Namespace, Record};
use supple_core::value::Value;
use supple_engine::{validate_record, SchemaCompiler, StoreRegistry};

/// Stateless action dispatcher over the record engine
///
/// # Thread safety
///
/// Executor is `Send + Sync`; concurrent requests targeting different
/// namespaces proceed independently, and same-key mutations serialize
/// inside the record store.
pub struct Executor {
    registry: StoreRegistry,
    compiler: SchemaCompiler,
}

impl Executor {
    /// Create an executor over a storage engine
    pub fn new(engine: Arc<dyn StorageEngine>) -> Self {
        Self {
            registry: StoreRegistry::new(engine),
            compiler: SchemaCompiler::new(),
        }
    }

    /// Execute a single request.
    ///
    /// Validation order: namespace, action arguments, schema
    /// compilation, payload validation; only then is the store touched.
    pub fn execute(&self, request: DocRequest) -> Result<Output> {
        let namespace = Namespace::parse(request.namespace)?;
        debug!(namespace = %namespace, action = request.action.name(), "execute");

        if request.action.requires_data() && request.data.is_none() {
            return Err(Error::invalid_request(format!(
                "{} requires a data payload",
                request.action.name()
            )));
        }
        if request.action.requires_key() && request.key.is_none() {
            return Err(Error::invalid_request(format!(
                "{} requires a key",
                request.action.name()
            )));
        }

        let descriptor = self.compiler.compile(
            &namespace,
            &request.schema,
            request.action.uses_partial_shape(),
        )?;

        // Saturate rather than truncate on targets where usize < u64
        let limit = request.limit.map(|v| usize::try_from(v).unwrap_or(usize::MAX));
        let offset = request.offset.map(|v| usize::try_from(v).unwrap_or(usize::MAX));

        match request.action {
            Action::PutDoc => {
                let (key, values) = payload(&descriptor, request.key, request.data)?;
                let store = self.registry.store(&namespace)?;
                Ok(Output::Status(store.put(values, key)?))
            }
            Action::MergeDoc => {
                let (key, values) = payload(&descriptor, request.key, request.data)?;
                // A merge without any key targets a fresh one and fails
                // with NotFound at the store, exactly like any other
                // merge against an absent record
                let key = key.unwrap_or_else(Record::generate_key);
                let store = self.registry.store(&namespace)?;
                Ok(Output::Status(store.merge(&key, values)?))
            }
            Action::DeleteDoc => {
                let key = required_key(request.key)?;
                let store = self.registry.store(&namespace)?;
                Ok(Output::Status(store.delete(&key)?))
            }
            Action::GetDoc => {
                let key = required_key(request.key)?;
                let store = self.registry.store(&namespace)?;
                Ok(Output::Maybe(store.get(&key)?))
            }
            Action::FindDocs => {
                let (_, filter) = payload(&descriptor, None, request.data)?;
                let store = self.registry.store(&namespace)?;
                Ok(Output::Records(store.find(limit, offset, &filter)?))
            }
            Action::ScanDocs => {
                let store = self.registry.store(&namespace)?;
                Ok(Output::Records(store.scan(limit, offset)?))
            }
            Action::CountDocs => {
                let store = self.registry.store(&namespace)?;
                Ok(Output::Count(store.count()?))
            }
            Action::ExistsDoc => {
                let key = required_key(request.key)?;
                let store = self.registry.store(&namespace)?;
                Ok(Output::Bool(store.exists(&key)?))
            }
        }
    }

    /// Execute multiple requests sequentially.
    ///
    /// Returns all results in input order; execution continues past
    /// failures.
    pub fn execute_many(&self, requests: Vec<DocRequest>) -> Vec<Result<Output>> {
        requests.into_iter().map(|r| self.execute(r)).collect()
    }

    /// The store registry (escape hatch for embedding callers)
    pub fn registry(&self) -> &StoreRegistry {
        &self.registry
    }

    /// The schema compiler and its descriptor cache
    pub fn compiler(&self) -> &SchemaCompiler {
        &self.compiler
    }
}

fn required_key(key: Option<String>) -> Result<String> {
    key.ok_or_else(|| Error::internal("key presence was pre-validated"))
}

/// Convert and validate a request payload against the descriptor.
///
/// The server-managed `key` field may travel inside the payload; it is
/// split off before validation so schemas never have to declare it. An
/// explicit request-level key wins over a payload key.
fn payload(
    descriptor: &RecordDescriptor,
    explicit_key: Option<String>,
    data: Option<serde_json::Value>,
) -> Result<(Option<String>, HashMap<String, Value>)> {
    let data = data.ok_or_else(|| Error::internal("data presence was pre-validated"))?;
    let mut values = match Value::from(data) {
        Value::Object(map) => map,
        other => {
            return Err(Error::invalid_request(format!(
                "data must be an object, got {}",
                other.type_name()
            )))
        }
    };

    let payload_key = match values.remove("key") {
        Some(Value::String(key)) => Some(key),
        Some(other) => {
            return Err(Error::invalid_request(format!(
                "data field 'key' must be a string, got {}",
                other.type_name()
            )))
        }
        None => None,
    };

    validate_record(descriptor, &values)?;
    Ok((explicit_key.or(payload_key), values))
}
