//! In-memory storage engine
//!
//! ## Design
//!
//! - `MemoryEngine`: DashMap of namespace → partition; a partition is
//!   created on first access and never implicitly destroyed
//! - `MemoryPartition`: `parking_lot::RwLock<BTreeMap<String, Vec<u8>>>`;
//!   the BTreeMap gives key-ordered iteration for `scan_from`
//!
//! Writes are "durable" for the lifetime of the process, which is the
//! strongest guarantee an in-memory engine can offer; the trait's
//! durability contract is meaningful only for disk-backed engines.
//!
//! The engine also counts every partition operation. Tests use the
//! counter to prove that rejected requests never touch storage.

use dashmap::DashMap;
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::ops::Bound;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::debug;

use supple_core::traits::{Partition, StorageEngine};
use supple_core::types::Namespace;
use supple_core::Result;

/// In-memory storage engine: one ordered partition per namespace
pub struct MemoryEngine {
    partitions: DashMap<Namespace, Arc<MemoryPartition>>,
    ops: Arc<AtomicU64>,
}

impl MemoryEngine {
    /// Create an empty engine
    pub fn new() -> Self {
        Self {
            partitions: DashMap::new(),
            ops: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Number of partitions created so far
    pub fn partition_count(&self) -> usize {
        self.partitions.len()
    }

    /// Total partition operations executed across all namespaces
    pub fn total_ops(&self) -> u64 {
        self.ops.load(Ordering::Relaxed)
    }
}

impl Default for MemoryEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl StorageEngine for MemoryEngine {
    fn partition(&self, namespace: &Namespace) -> Result<Arc<dyn Partition>> {
        // entry() gives single-flight creation: concurrent first access
        // for the same namespace resolves to one partition
        let partition = self
            .partitions
            .entry(namespace.clone())
            .or_insert_with(|| {
                debug!(namespace = %namespace, "creating partition");
                Arc::new(MemoryPartition::new(Arc::clone(&self.ops)))
            })
            .clone();
        Ok(partition)
    }
}

/// One namespace's ordered in-memory partition
pub struct MemoryPartition {
    entries: RwLock<BTreeMap<String, Vec<u8>>>,
    ops: Arc<AtomicU64>,
}

impl MemoryPartition {
    fn new(ops: Arc<AtomicU64>) -> Self {
        Self {
            entries: RwLock::new(BTreeMap::new()),
            ops,
        }
    }

    fn record_op(&self) {
        self.ops.fetch_add(1, Ordering::Relaxed);
    }
}

impl Partition for MemoryPartition {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        self.record_op();
        Ok(self.entries.read().get(key).cloned())
    }

    fn put(&self, key: &str, bytes: Vec<u8>) -> Result<()> {
        self.record_op();
        self.entries.write().insert(key.to_string(), bytes);
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<()> {
        self.record_op();
        self.entries.write().remove(key);
        Ok(())
    }

    fn contains(&self, key: &str) -> Result<bool> {
        self.record_op();
        Ok(self.entries.read().contains_key(key))
    }

    fn len(&self) -> Result<u64> {
        self.record_op();
        Ok(self.entries.read().len() as u64)
    }

    fn scan_from(&self, start_after: Option<&str>, limit: usize) -> Result<Vec<(String, Vec<u8>)>> {
        self.record_op();
        let entries = self.entries.read();
        let lower = match start_after {
            Some(key) => Bound::Excluded(key.to_string()),
            None => Bound::Unbounded,
        };
        Ok(entries
            .range((lower, Bound::Unbounded))
            .take(limit)
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect())
    }
}
