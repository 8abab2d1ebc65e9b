//! Core types and traits for Supple
//!
//! This crate defines the foundational types used throughout the system:
//! - Namespace: isolation boundary for one record type / schema family
//! - Value: unified value enum for all document data
//! - FieldDescriptor / RecordDescriptor: compiled schema shapes
//! - Record / Status: the stored unit and the mutation response envelope
//! - Error: error type hierarchy
//! - Traits: storage primitive seams (Partition, StorageEngine)

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod descriptor;
pub mod error;
pub mod traits;
pub mod types;
pub mod value;

// Re-export commonly used types and traits
pub use descriptor::{FieldDescriptor, FieldKind, PrimitiveType, RecordDescriptor};
pub use error::{Error, Result};
pub use traits::{Partition, StorageEngine};
pub use types::{Namespace, Record, Status};
pub use value::Value;
