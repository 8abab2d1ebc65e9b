//! Storage primitive seams
//!
//! This module defines the traits that separate the record engine from
//! the durable key-value engine underneath it:
//!
//! - [`Partition`]: one namespace's slice of the storage primitive,
//!   offering durable point operations and key-ordered range reads
//! - [`StorageEngine`]: hands out partitions, creating each on first
//!   access and never implicitly destroying it
//!
//! The record engine serializes record values to bytes before they cross
//! this boundary, so implementations never interpret the payload.
//!
//! Thread safety: all methods must be safe to call concurrently from
//! multiple threads (both traits require Send + Sync).

use crate::error::Result;
use crate::types::Namespace;
use std::sync::Arc;

/// One namespace's partition of the storage primitive
///
/// Guarantees required of implementations:
/// - `put` and `delete` are durable before the call returns
/// - `scan_from` yields entries in key order, starting strictly after
///   `start_after` when one is given
/// - point operations are bounded-latency; no method blocks indefinitely
pub trait Partition: Send + Sync {
    /// Get the stored bytes for a key, or None if absent
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Durably store bytes under a key, replacing any previous bytes
    fn put(&self, key: &str, bytes: Vec<u8>) -> Result<()>;

    /// Durably remove a key. Removing an absent key is not an error.
    fn delete(&self, key: &str) -> Result<()>;

    /// Indexed presence check
    fn contains(&self, key: &str) -> Result<bool>;

    /// Number of keys currently stored
    fn len(&self) -> Result<u64>;

    /// Whether the partition holds no keys
    fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }

    /// Read up to `limit` entries in key order, starting strictly after
    /// `start_after` (or from the first key when None).
    fn scan_from(&self, start_after: Option<&str>, limit: usize) -> Result<Vec<(String, Vec<u8>)>>;
}

/// Hands out per-namespace partitions
///
/// A partition is created on the first access to its namespace and
/// retained afterwards; repeated calls for the same namespace must
/// return handles onto the same underlying partition.
pub trait StorageEngine: Send + Sync {
    /// Get or create the partition for a namespace
    fn partition(&self, namespace: &Namespace) -> Result<Arc<dyn Partition>>;
}
