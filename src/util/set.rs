use core::{
    borrow::Borrow,
    fmt,
    hash::{BuildHasher, Hash},
};

use crate::util::{arena::Arena, fnv, map::Map};

/// A Robin Hood hash set.
///
/// This is a [`Map`] with unit values, so it shares the map's probing,
/// growth and arena accounting.
#[derive(Clone)]
pub struct Set<T, S = fnv::BuildHasher> {
    map: Map<T, (), S>,
}

impl<T, S: Default> Default for Set<T, S> {
    fn default() -> Set<T, S> {
        Set { map: Map::default() }
    }
}

impl<T> Set<T> {
    /// Create an empty set. No arena space is used until the first insert.
    pub fn new() -> Set<T> {
        Set::default()
    }
}

impl<T, S> Set<T, S> {
    /// Create an empty set that hashes values with the given builder.
    pub fn with_hasher(hasher: S) -> Set<T, S> {
        Set { map: Map::with_hasher(hasher) }
    }

    /// Returns the number of values in this set.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns true if and only if this set is empty.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Returns the number of slots in the table.
    pub fn capacity(&self) -> usize {
        self.map.capacity()
    }

    /// Remove every value. The table keeps its capacity.
    pub fn clear(&mut self) {
        self.map.clear();
    }

    /// Iterate over the values in slot order.
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        self.map.iter().map(|(k, _)| k)
    }
}

impl<T: Hash + Eq, S: BuildHasher> Set<T, S> {
    /// Add `value` to this set.
    ///
    /// If an equal value is already present, the set is left untouched and
    /// the existing value is returned. Otherwise `None` is returned.
    pub fn insert(&mut self, arena: &mut Arena, value: T) -> Option<&T> {
        let index = self.map.insert_index(arena, value, ())?;
        self.map.key_at(index)
    }

    /// Returns true if and only if `value` is in this set.
    pub fn contains<Q>(&self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.map.contains_key(value)
    }
}

impl<T: fmt::Debug, S> fmt::Debug for Set<T, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}
