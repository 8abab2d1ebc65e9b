//! # Supple Executor
//!
//! The public API for Supple - a schema-flexible embedded document store.
//!
//! This is the only crate users need to import. It provides:
//! - [`Supple`] - The main database interface with typed per-action methods
//! - [`DocRequest`]/[`Output`] - Low-level action protocol (for transports)
//! - [`Executor`] - The stateless dispatcher behind both
//!
//! ## Quick Start
//!
//! ```ignore
//! use supple_executor::Supple;
//! use serde_json::json;
//!
//! // Create an in-memory store
//! let db = Supple::ephemeral();
//! let schema = json!({ "properties": { "name": { "type": "string" } } });
//!
//! // Store a document
//! let status = db.put_doc("users", &schema, json!({ "name": "Alice" }), None)?;
//!
//! // Retrieve it
//! let record = db.get_doc("users", &schema, &status.key.unwrap())?;
//! ```
//!
//! ## Actions
//!
//! | Action | Output |
//! |--------|--------|
//! | **putDoc** | `Status` (201) |
//! | **getDoc** | `Option<Record>` |
//! | **mergeDoc** | `Status` (200) |
//! | **deleteDoc** | `Status` (204) |
//! | **findDocs** | `Vec<Record>` |
//! | **scanDocs** | `Vec<Record>` |
//! | **countDocs** | `u64` |
//! | **existsDoc** | `bool` |
//!
//! The schema travels with every request; descriptors are compiled once
//! per structural shape and cached.

#![warn(missing_docs)]

mod command;
mod executor;
mod output;
mod supple;

pub use command::{Action, DocRequest};
pub use executor::Executor;
pub use output::Output;
pub use supple::Supple;

// Re-export core types so callers need only this crate
pub use supple_core::{
    Error, FieldDescriptor, FieldKind, Namespace, PrimitiveType, Record, RecordDescriptor,
    Result, StorageEngine, Status, Value,
};
pub use supple_storage::MemoryEngine;
