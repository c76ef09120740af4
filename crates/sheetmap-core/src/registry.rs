//! Compute-once schema cache.

use std::any::{Any, TypeId};
use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::binding::{RowModel, RowSchema};
use crate::error::SchemaError;

/// Process-wide cache of published [`RowSchema`]s, keyed by type identity.
///
/// An explicit component rather than ambient global state: callers (or the
/// facade) construct one and pass it to the writer and mapper. Discovery
/// runs once per type; afterwards `describe` is a shared-lock map hit
/// returning the same published `Arc` to every caller. Concurrent first
/// access for the same type may race on discovery — discovery is pure, so
/// whichever computation publishes first wins and the others adopt its
/// entry.
#[derive(Default)]
pub struct SchemaRegistry {
    cache: RwLock<FxHashMap<TypeId, Arc<dyn Any + Send + Sync>>>,
}

impl SchemaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The ordered binding set of `T`, published on first use.
    pub fn describe<T: RowModel>(&self) -> Result<Arc<RowSchema<T>>, SchemaError> {
        let key = TypeId::of::<T>();

        if let Some(entry) = self.cache.read().get(&key) {
            return Ok(Arc::clone(entry)
                .downcast::<RowSchema<T>>()
                .expect("cache entry matches its TypeId key"));
        }

        // Discovery happens outside the write lock so cached types never
        // wait behind it.
        let schema: Arc<RowSchema<T>> = Arc::new(RowSchema::build()?);

        let mut cache = self.cache.write();
        let entry = cache
            .entry(key)
            .or_insert_with(|| schema as Arc<dyn Any + Send + Sync>);
        Ok(Arc::clone(entry)
            .downcast::<RowSchema<T>>()
            .expect("cache entry matches its TypeId key"))
    }
}

impl std::fmt::Debug for SchemaRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SchemaRegistry")
            .field("cached_types", &self.cache.read().len())
            .finish()
    }
}
