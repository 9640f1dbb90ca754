use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::core::collection::Collection;
use crate::core::error::{Error, Result};
use crate::schema::schema::Schema;

/// Thread-safe registry of named collections.
///
/// This is the engine's concurrency boundary: each collection sits behind
/// a reader/writer lock, so filters on one collection proceed in parallel
/// while insert/delete/edit take the write lock and run exclusively. That
/// also makes record-id assignment atomic across threads. A `Store` is an
/// explicitly constructed value; there is no process-wide instance.
pub struct Store {
    collections: RwLock<HashMap<String, Arc<RwLock<Collection>>>>,
}

pub type CollectionHandle = Arc<RwLock<Collection>>;

impl Store {
    pub fn new() -> Self {
        Store {
            collections: RwLock::new(HashMap::new()),
        }
    }

    /// Create a collection from `schema`, keyed by the schema's name.
    /// Fails with `SchemaError` on an invalid schema or a duplicate name.
    pub fn create(&self, schema: Schema) -> Result<CollectionHandle> {
        let name = schema.name.clone();
        let collection = Arc::new(RwLock::new(Collection::new(schema)?));

        let mut collections = self.collections.write();
        if collections.contains_key(&name) {
            return Err(Error::SchemaError {
                reason: format!("collection '{name}' already exists"),
            });
        }
        collections.insert(name, collection.clone());
        Ok(collection)
    }

    pub fn get(&self, name: &str) -> Option<CollectionHandle> {
        self.collections.read().get(name).cloned()
    }

    /// Drop a collection and its indexes entirely.
    pub fn remove(&self, name: &str) -> Result<()> {
        match self.collections.write().remove(name) {
            Some(_) => Ok(()),
            None => Err(Error::NotFound {
                what: format!("collection '{name}'"),
            }),
        }
    }

    pub fn names(&self) -> Vec<String> {
        self.collections.read().keys().cloned().collect()
    }
}

impl Default for Store {
    fn default() -> Self {
        Store::new()
    }
}
