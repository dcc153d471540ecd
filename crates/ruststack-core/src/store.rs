//! Keyed resource collections shared by service backends.
//!
//! Provides [`ResourceStore`], a plain map-of-maps that backends use to hold
//! their resources: `collection name -> resource id -> resource`. Entries are
//! type-erased, so one store holds every resource family of a service. The
//! store has no knowledge of the resources it holds and performs no validation.
//!
//! The store carries no locking and no versioning. A service exposed to
//! concurrent callers must serialize mutations itself (for example by wrapping
//! the store in a mutex or routing every mutating call through one task).
//! Offset-based pagination over a collection is not stable across writes made
//! between two page requests.

use std::any::Any;
use std::fmt;

use indexmap::IndexMap;

type Entry = Box<dyn Any + Send + Sync>;

/// An explicit, caller-owned store of resource collections.
///
/// Collections and the entries inside them iterate in insertion order. Replacing
/// an existing id keeps its original position; deleting an id closes the gap.
///
/// Typed accessors only see entries of the requested type: reading an entry as
/// the wrong type behaves as if it were absent.
///
/// # Examples
///
/// ```
/// use ruststack_core::ResourceStore;
///
/// let mut store = ResourceStore::new();
/// store.put("subnets", "subnet-1", "10.0.0.0/24".to_owned());
/// store.put("subnets", "subnet-2", "10.0.1.0/24".to_owned());
/// store.put("vpcs", "vpc-1", 16_u8);
///
/// assert_eq!(
///     store.get::<String>("subnets", "subnet-1").map(String::as_str),
///     Some("10.0.0.0/24")
/// );
/// assert_eq!(store.list::<String>("subnets").len(), 2);
/// assert_eq!(store.get::<u8>("vpcs", "vpc-1"), Some(&16));
/// ```
#[derive(Default)]
pub struct ResourceStore {
    collections: IndexMap<String, IndexMap<String, Entry>>,
}

impl fmt::Debug for ResourceStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(
                self.collections
                    .iter()
                    .map(|(name, entries)| (name, entries.len())),
            )
            .finish()
    }
}

impl ResourceStore {
    /// Create a new empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a resource of type `R` by collection and id.
    #[must_use]
    pub fn get<R: Any>(&self, collection: &str, id: &str) -> Option<&R> {
        self.collections.get(collection)?.get(id)?.downcast_ref::<R>()
    }

    /// Get a mutable reference to a resource of type `R`.
    pub fn get_mut<R: Any>(&mut self, collection: &str, id: &str) -> Option<&mut R> {
        self.collections
            .get_mut(collection)?
            .get_mut(id)?
            .downcast_mut::<R>()
    }

    /// Insert or replace a resource.
    ///
    /// Returns the previous value when it had the same type; a previous entry
    /// of another type is dropped.
    pub fn put<R: Any + Send + Sync>(
        &mut self,
        collection: impl Into<String>,
        id: impl Into<String>,
        value: R,
    ) -> Option<R> {
        let previous = self
            .collections
            .entry(collection.into())
            .or_default()
            .insert(id.into(), Box::new(value))?;
        previous.downcast::<R>().ok().map(|boxed| *boxed)
    }

    /// Remove a resource of type `R`. Returns the removed value.
    ///
    /// An entry of another type is left in place.
    pub fn delete<R: Any>(&mut self, collection: &str, id: &str) -> Option<R> {
        let entries = self.collections.get_mut(collection)?;
        if !entries.get(id)?.is::<R>() {
            return None;
        }
        let removed = entries.shift_remove(id)?;
        removed.downcast::<R>().ok().map(|boxed| *boxed)
    }

    /// Remove an entry whatever its type. Returns whether it existed.
    pub fn remove(&mut self, collection: &str, id: &str) -> bool {
        self.collections
            .get_mut(collection)
            .is_some_and(|entries| entries.shift_remove(id).is_some())
    }

    /// All resources of type `R` in a collection, in insertion order.
    ///
    /// An unknown collection is treated as empty.
    #[must_use]
    pub fn list<R: Any>(&self, collection: &str) -> Vec<&R> {
        self.collections
            .get(collection)
            .map(|entries| {
                entries
                    .values()
                    .filter_map(|entry| entry.downcast_ref::<R>())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// All ids of a collection in insertion order.
    #[must_use]
    pub fn ids(&self, collection: &str) -> Vec<&str> {
        self.collections
            .get(collection)
            .map(|entries| entries.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// Whether an entry with the given id exists.
    #[must_use]
    pub fn contains(&self, collection: &str, id: &str) -> bool {
        self.collections
            .get(collection)
            .is_some_and(|entries| entries.contains_key(id))
    }

    /// Number of entries in a collection.
    #[must_use]
    pub fn len(&self, collection: &str) -> usize {
        self.collections.get(collection).map_or(0, IndexMap::len)
    }

    /// Whether a collection holds no entries.
    #[must_use]
    pub fn is_empty(&self, collection: &str) -> bool {
        self.len(collection) == 0
    }

    /// Names of every collection that has been written to.
    #[must_use]
    pub fn collections(&self) -> Vec<&str> {
        self.collections.keys().map(String::as_str).collect()
    }

    /// Remove every collection.
    pub fn clear(&mut self) {
        self.collections.clear();
    }
}
