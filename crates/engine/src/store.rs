//! Per-namespace record store
//!
//! One `RecordStore` per namespace, created by the registry on first
//! reference and retained for the process lifetime. The store owns an
//! exclusive handle to the namespace's partition and never reaches into
//! any other namespace.
//!
//! ## Concurrency
//!
//! Mutations on the same key serialize through a striped per-key lock
//! so the exists-then-merge-else-create upsert cannot race with itself.
//! Reads go straight to the partition and proceed concurrently; a scan
//! is snapshot-at-call per batch, not transactional across the whole
//! pagination window.
//!
//! ## Encoding
//!
//! Record values cross the partition boundary as MessagePack bytes; the
//! byte format is internal, not a compatibility surface.

use parking_lot::{Mutex, MutexGuard};
use rustc_hash::FxHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use std::sync::Arc;
use tracing::debug;

use crate::merge::deep_merge;
use supple_core::error::{Error, Result};
use supple_core::traits::Partition;
use supple_core::types::{Namespace, Record, Status};
use supple_core::value::Value;

/// Records returned by `scan`/`find` when no limit is given
pub const DEFAULT_SCAN_LIMIT: usize = 1000;

/// Range-read batch size for scan and find
const SCAN_BATCH: usize = 256;

const LOCK_STRIPES: usize = 64;

/// Striped key locks: same key always maps to the same stripe, so two
/// mutations of one record serialize while unrelated keys rarely contend
struct KeyLocks {
    stripes: Vec<Mutex<()>>,
}

impl KeyLocks {
    fn new() -> Self {
        Self {
            stripes: (0..LOCK_STRIPES).map(|_| Mutex::new(())).collect(),
        }
    }

    fn lock(&self, key: &str) -> MutexGuard<'_, ()> {
        let mut hasher = FxHasher::default();
        key.hash(&mut hasher);
        let idx = (hasher.finish() as usize) % self.stripes.len();
        self.stripes[idx].lock()
    }
}

/// Record operations for one namespace
pub struct RecordStore {
    namespace: Namespace,
    partition: Arc<dyn Partition>,
    key_locks: KeyLocks,
}

impl std::fmt::Debug for RecordStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordStore")
            .field("namespace", &self.namespace)
            .finish_non_exhaustive()
    }
}

impl RecordStore {
    /// Create a store over a namespace's partition
    pub fn new(namespace: Namespace, partition: Arc<dyn Partition>) -> Self {
        Self {
            namespace,
            partition,
            key_locks: KeyLocks::new(),
        }
    }

    /// The namespace this store serves
    pub fn namespace(&self) -> &Namespace {
        &self.namespace
    }

    fn encode(values: &HashMap<String, Value>) -> Result<Vec<u8>> {
        rmp_serde::to_vec(values).map_err(|e| Error::serialization(e.to_string()))
    }

    fn decode(bytes: &[u8]) -> Result<HashMap<String, Value>> {
        rmp_serde::from_slice(bytes).map_err(|e| Error::serialization(e.to_string()))
    }

    /// Store a record, assigning a key when none is supplied.
    ///
    /// Upsert-merge: when the key already exists the new non-absent
    /// values overlay the stored record instead of replacing it, so a
    /// partial payload never silently discards fields. Returns code 201
    /// on both paths; callers must not infer created-vs-updated from it.
    pub fn put(&self, values: HashMap<String, Value>, key: Option<String>) -> Result<Status> {
        let key = key.unwrap_or_else(Record::generate_key);
        let _guard = self.key_locks.lock(&key);

        let merged = match self.partition.get(&key)? {
            Some(bytes) => {
                let mut existing = Self::decode(&bytes)?;
                deep_merge(&mut existing, values);
                existing
            }
            None => values,
        };
        self.partition.put(&key, Self::encode(&merged)?)?;
        debug!(namespace = %self.namespace, key = %key, "put record");
        Ok(Status::created(key))
    }

    /// Fetch a record by key; absence is an empty result, not an error
    pub fn get(&self, key: &str) -> Result<Option<Record>> {
        match self.partition.get(key)? {
            Some(bytes) => Ok(Some(Record::new(key, Self::decode(&bytes)?))),
            None => Ok(None),
        }
    }

    /// Deep-merge partial values into an existing record.
    ///
    /// Fails with `NotFound` when the key does not exist.
    pub fn merge(&self, key: &str, partial: HashMap<String, Value>) -> Result<Status> {
        let _guard = self.key_locks.lock(key);

        let bytes = self
            .partition
            .get(key)?
            .ok_or_else(|| Error::not_found(self.namespace.as_str(), key))?;
        let mut values = Self::decode(&bytes)?;
        deep_merge(&mut values, partial);
        self.partition.put(key, Self::encode(&values)?)?;
        debug!(namespace = %self.namespace, key = %key, "merged record");
        Ok(Status::updated(key))
    }

    /// Remove a record. Idempotent: deleting an absent key still
    /// returns code 204.
    pub fn delete(&self, key: &str) -> Result<Status> {
        let _guard = self.key_locks.lock(key);
        self.partition.delete(key)?;
        debug!(namespace = %self.namespace, key = %key, "deleted record");
        Ok(Status::deleted(key))
    }

    /// Page through records in persisted key order
    pub fn scan(&self, limit: Option<usize>, offset: Option<usize>) -> Result<Vec<Record>> {
        self.find(limit, offset, &HashMap::new())
    }

    /// Like `scan`, but keeps only records whose stored fields exactly
    /// equal every non-absent filter field (a conjunction). Filtering
    /// applies before pagination; an empty filter behaves like `scan`.
    pub fn find(
        &self,
        limit: Option<usize>,
        offset: Option<usize>,
        filter: &HashMap<String, Value>,
    ) -> Result<Vec<Record>> {
        let limit = limit.unwrap_or(DEFAULT_SCAN_LIMIT);
        let offset = offset.unwrap_or(0);

        let mut records = Vec::new();
        if limit == 0 {
            return Ok(records);
        }

        let mut skipped = 0usize;
        let mut cursor: Option<String> = None;
        loop {
            let batch = self.partition.scan_from(cursor.as_deref(), SCAN_BATCH)?;
            let last_key = match batch.last() {
                Some((key, _)) => key.clone(),
                None => break,
            };
            for (key, bytes) in batch {
                let values = Self::decode(&bytes)?;
                if !matches_filter(&values, filter) {
                    continue;
                }
                if skipped < offset {
                    skipped += 1;
                    continue;
                }
                records.push(Record::new(key, values));
                if records.len() == limit {
                    return Ok(records);
                }
            }
            cursor = Some(last_key);
        }
        Ok(records)
    }

    /// Total records currently stored in the namespace
    pub fn count(&self) -> Result<u64> {
        self.partition.len()
    }

    /// Indexed presence check
    pub fn exists(&self, key: &str) -> Result<bool> {
        self.partition.contains(key)
    }
}

/// A record matches when every non-absent filter field equals the
/// stored field exactly; types are never coerced for comparison
fn matches_filter(values: &HashMap<String, Value>, filter: &HashMap<String, Value>) -> bool {
    filter
        .iter()
        .filter(|(_, expected)| !expected.is_null())
        .all(|(name, expected)| values.get(name) == Some(expected))
}
