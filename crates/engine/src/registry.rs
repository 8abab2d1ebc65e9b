//! Namespace → store registry
//!
//! An explicit mapping from namespace to `RecordStore`, owned by one
//! process-wide context. Stores are constructed lazily on first access
//! and retained until process exit; there is no teardown. Concurrent
//! first access is idempotent: the entry API keeps exactly one store
//! per namespace, and every caller receives that one.

use dashmap::DashMap;
use std::sync::Arc;
use tracing::debug;

use crate::store::RecordStore;
use supple_core::error::Result;
use supple_core::traits::StorageEngine;
use supple_core::types::Namespace;

/// Process-wide registry of per-namespace record stores
pub struct StoreRegistry {
    engine: Arc<dyn StorageEngine>,
    stores: DashMap<Namespace, Arc<RecordStore>>,
}

impl StoreRegistry {
    /// Create a registry over a storage engine
    pub fn new(engine: Arc<dyn StorageEngine>) -> Self {
        Self {
            engine,
            stores: DashMap::new(),
        }
    }

    /// Get the store for a namespace, constructing it on first access
    pub fn store(&self, namespace: &Namespace) -> Result<Arc<RecordStore>> {
        if let Some(store) = self.stores.get(namespace) {
            return Ok(store.clone());
        }

        let partition = self.engine.partition(namespace)?;
        let store = Arc::new(RecordStore::new(namespace.clone(), partition));
        debug!(namespace = %namespace, "registered record store");
        // A racing construction for the same namespace resolves here:
        // whichever store lands first is kept and returned to everyone
        Ok(self.stores.entry(namespace.clone()).or_insert(store).clone())
    }

    /// Number of namespaces with a constructed store
    pub fn store_count(&self) -> usize {
        self.stores.len()
    }
}
