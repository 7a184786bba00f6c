//! Typed heterogeneous value store carried by each rule state.
//!
//! Semantic actions stash results here so they survive rule boundaries.
//! Keys are typed; a lookup never coerces a value to a different type.

use std::any::{Any, type_name};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::sync::Arc;

use rustc_hash::{FxHashMap, FxHasher};
use thiserror::Error;

/// Keys reserved by the parser.
pub mod keys {
    use smol_str::SmolStr;

    use super::ValueKey;

    /// The type a completion layer should suggest next.
    pub const NEXT_TYPE: ValueKey<SmolStr> = ValueKey::new(0, "next_type");
}

/// Typed key into a [`ValueStore`].
///
/// Identity is the numeric id alone: two keys with the same id but different
/// value types address the same slot, and reading through the wrong one
/// reports [`ValueStoreError::TypeMismatch`].
pub struct ValueKey<T> {
    id: u32,
    name: &'static str,
    _marker: PhantomData<fn() -> T>,
}

impl<T> ValueKey<T> {
    pub const fn new(id: u32, name: &'static str) -> Self {
        Self {
            id,
            name,
            _marker: PhantomData,
        }
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl<T> Clone for ValueKey<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for ValueKey<T> {}

impl<T> fmt::Debug for ValueKey<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValueKey")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("type", &type_name::<T>())
            .finish()
    }
}

/// Errors from typed lookups.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueStoreError {
    /// No value is stored under the key.
    #[error("no value stored for key `{key}`")]
    Missing { key: &'static str },

    /// A value is stored, but with a different type.
    #[error("value for key `{key}` has type `{found}`, expected `{expected}`")]
    TypeMismatch {
        key: &'static str,
        expected: &'static str,
        found: &'static str,
    },
}

#[derive(Clone)]
struct Entry {
    value: Arc<dyn Any + Send + Sync>,
    type_name: &'static str,
}

/// Mapping from typed keys to values.
///
/// Cloning is cheap and yields an independent key set that shares value
/// references with the original; the map itself is copied on first write.
#[derive(Clone, Default)]
pub struct ValueStore {
    entries: Arc<FxHashMap<u32, Entry>>,
}

impl ValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Store `value` under `key`, replacing any previous value.
    pub fn insert<T: Any + Send + Sync>(&mut self, key: ValueKey<T>, value: T) {
        Arc::make_mut(&mut self.entries).insert(
            key.id,
            Entry {
                value: Arc::new(value),
                type_name: type_name::<T>(),
            },
        );
    }

    /// Read the value stored under `key`.
    pub fn get<T: Any>(&self, key: ValueKey<T>) -> Result<&T, ValueStoreError> {
        let entry = self
            .entries
            .get(&key.id)
            .ok_or(ValueStoreError::Missing { key: key.name })?;

        entry
            .value
            .downcast_ref::<T>()
            .ok_or(ValueStoreError::TypeMismatch {
                key: key.name,
                expected: type_name::<T>(),
                found: entry.type_name,
            })
    }

    /// Read the value under `key` if present and of type `T`.
    pub fn try_get<T: Any>(&self, key: ValueKey<T>) -> Option<&T> {
        self.get(key).ok()
    }

    pub fn contains_key<T>(&self, key: ValueKey<T>) -> bool {
        self.entries.contains_key(&key.id)
    }

    /// Remove the value under `key`. Returns true if one was stored.
    pub fn remove<T>(&mut self, key: ValueKey<T>) -> bool {
        if !self.entries.contains_key(&key.id) {
            return false;
        }
        Arc::make_mut(&mut self.entries).remove(&key.id).is_some()
    }

    pub fn clear(&mut self) {
        if !self.entries.is_empty() {
            self.entries = Arc::default();
        }
    }

    /// Check whether both stores hold the same keys bound to the very same
    /// value allocations.
    pub fn same_contents(&self, other: &ValueStore) -> bool {
        if Arc::ptr_eq(&self.entries, &other.entries) {
            return true;
        }
        self.entries.len() == other.entries.len()
            && self.entries.iter().all(|(id, entry)| {
                other
                    .entries
                    .get(id)
                    .is_some_and(|theirs| Arc::ptr_eq(&entry.value, &theirs.value))
            })
    }

    /// Order-independent hash of keys and value identities, consistent with
    /// [`ValueStore::same_contents`].
    pub fn identity_hash(&self) -> u64 {
        self.entries.iter().fold(0, |acc: u64, (id, entry)| {
            let mut hasher = FxHasher::default();
            id.hash(&mut hasher);
            (Arc::as_ptr(&entry.value) as *const () as usize).hash(&mut hasher);
            acc.wrapping_add(hasher.finish())
        })
    }
}

impl fmt::Debug for ValueStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.entries.iter().map(|(id, entry)| (id, entry.type_name)))
            .finish()
    }
}
