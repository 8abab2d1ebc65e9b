//! Schema compiler and record store for Supple
//!
//! This crate holds the engine between the core types and the executor:
//! - [`compiler::SchemaCompiler`]: JSON-Schema-like definition →
//!   cached [`supple_core::RecordDescriptor`]
//! - [`validate`]: one generic routine interpreting a descriptor
//!   against payload values
//! - [`merge`]: the deep-merge used by upsert and merge operations
//! - [`store::RecordStore`]: per-namespace operations over a partition
//! - [`registry::StoreRegistry`]: explicit namespace → store mapping
//!   with single-flight first access

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod compiler;
pub mod merge;
pub mod registry;
pub mod store;
pub mod validate;

pub use compiler::SchemaCompiler;
pub use merge::deep_merge;
pub use registry::StoreRegistry;
pub use store::{RecordStore, DEFAULT_SCAN_LIMIT};
pub use validate::validate_record;
