//! Storage engines for Supple
//!
//! The record engine talks to storage only through the `Partition` and
//! `StorageEngine` traits from `supple-core`. This crate ships the
//! in-memory implementation used for embedded and test workloads; a
//! durable engine plugs in behind the same seams.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod memory;

pub use memory::{MemoryEngine, MemoryPartition};
