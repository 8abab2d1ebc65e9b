//! Supple - schema-flexible embedded document store
//!
//! Supple stores JSON-shaped documents in schema-scoped namespaces. A
//! JSON-Schema-like definition travels with every request; the engine
//! compiles it into a record descriptor (cached per structural shape),
//! validates the payload, and routes one of eight actions to the
//! namespace's record store.
//!
//! # Quick Start
//!
//! ```ignore
//! use suppledb::Supple;
//! use serde_json::json;
//!
//! // Create an in-memory store
//! let db = Supple::ephemeral();
//! let schema = json!({ "properties": { "name": { "type": "string" } } });
//!
//! // Store a document (key is server-assigned when omitted)
//! let status = db.put_doc("users", &schema, json!({ "name": "Alice" }), None)?;
//!
//! // Retrieve it
//! let record = db.get_doc("users", &schema, &status.key.unwrap())?;
//! ```
//!
//! # Architecture
//!
//! All operations go through the [`Executor`], which speaks the
//! [`DocRequest`]/[`Output`] action protocol. The [`Supple`] struct
//! provides a convenient typed interface over it.
//!
//! Internal implementation details (storage engine, record stores, the
//! schema compiler cache) are not exposed - only the executor API is
//! public.

// Re-export the public API from supple-executor
pub use supple_executor::*;
