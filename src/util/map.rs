/*!
An open addressing hash map using Robin Hood hashing.

Every occupied slot records its probe distance: one more than how far it sits
from its key's home slot. Zero marks an empty slot. Insertion walks forward
from the home slot and, whenever the item being placed has travelled further
than the slot's occupant, swaps the two and carries on placing the evicted
occupant. This keeps probe sequences short and lets lookups stop after
`max_distance` steps, the largest distance ever recorded.

There is no removal. The table only ever grows: before an insertion would
push the load factor over one half, the capacity doubles (starting at 8) and
every entry is reinserted. Each table is charged against an
[`Arena`](crate::util::arena::Arena) and never handed back.
*/

use alloc::vec::Vec;
use core::{
    borrow::Borrow,
    cmp, fmt,
    hash::{BuildHasher, Hash, Hasher},
    mem,
};

use crate::util::{arena::Arena, fnv};

const INITIAL_CAPACITY: usize = 8;

#[derive(Clone)]
struct Slot<K, V> {
    entry: Option<(K, V)>,
    // 0 means empty. Otherwise 1 + displacement from the home slot.
    distance: u32,
}

impl<K, V> Slot<K, V> {
    const fn empty() -> Slot<K, V> {
        Slot { entry: None, distance: 0 }
    }
}

/// A Robin Hood hash map from `K` to `V`.
#[derive(Clone)]
pub struct Map<K, V, S = fnv::BuildHasher> {
    table: Vec<Slot<K, V>>,
    len: usize,
    max_distance: u32,
    hasher: S,
}

impl<K, V, S: Default> Default for Map<K, V, S> {
    fn default() -> Map<K, V, S> {
        Map::with_hasher(S::default())
    }
}

impl<K, V> Map<K, V> {
    /// Create an empty map. No arena space is used until the first insert.
    pub fn new() -> Map<K, V> {
        Map::default()
    }
}

impl<K, V, S> Map<K, V, S> {
    /// Create an empty map that hashes keys with the given builder.
    pub fn with_hasher(hasher: S) -> Map<K, V, S> {
        Map { table: Vec::new(), len: 0, max_distance: 0, hasher }
    }

    /// Returns the number of entries in this map.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if and only if this map has no entries.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of slots in the table.
    pub fn capacity(&self) -> usize {
        self.table.len()
    }

    /// The longest probe distance recorded since the table was last rebuilt.
    ///
    /// Lookups never probe more than this many slots.
    pub fn max_distance(&self) -> u32 {
        self.max_distance
    }

    /// Remove every entry. The table keeps its capacity.
    pub fn clear(&mut self) {
        for slot in self.table.iter_mut() {
            *slot = Slot::empty();
        }
        self.len = 0;
        self.max_distance = 0;
    }

    /// Iterate over the entries in slot order.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter { slots: self.table.iter() }
    }

    pub(crate) fn key_at(&self, index: usize) -> Option<&K> {
        self.table[index].entry.as_ref().map(|(k, _)| k)
    }
}

impl<K: Hash + Eq, V, S: BuildHasher> Map<K, V, S> {
    /// Insert `value` under `key`.
    ///
    /// If `key` is already present, the map is left untouched and the
    /// existing value is returned. Otherwise the entry is added and `None`
    /// is returned.
    pub fn insert(
        &mut self,
        arena: &mut Arena,
        key: K,
        value: V,
    ) -> Option<&mut V> {
        match self.insert_index(arena, key, value) {
            None => None,
            Some(index) => self.table[index].entry.as_mut().map(|(_, v)| v),
        }
    }

    /// Returns the value stored under `key`.
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let index = self.find(key)?;
        self.table[index].entry.as_ref().map(|(_, v)| v)
    }

    /// Returns the value stored under `key` mutably.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let index = self.find(key)?;
        self.table[index].entry.as_mut().map(|(_, v)| v)
    }

    /// Returns true if and only if `key` is present.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.find(key).is_some()
    }

    /// Insert an entry, returning the slot index of the existing entry with
    /// the same key if there is one.
    pub(crate) fn insert_index(
        &mut self,
        arena: &mut Arena,
        key: K,
        value: V,
    ) -> Option<usize> {
        if self.len + 1 > self.capacity() >> 1 {
            self.grow(arena);
        }
        self.place(key, value)
    }

    fn place(&mut self, key: K, value: V) -> Option<usize> {
        let mask = self.capacity() - 1;
        let mut index = self.home(&key);
        let mut distance = 1;
        let mut current = (key, value);
        for _ in 0..self.capacity() {
            let slot = &mut self.table[index];
            let occupant = match slot.entry {
                None => {
                    slot.entry = Some(current);
                    slot.distance = distance;
                    self.max_distance = cmp::max(self.max_distance, distance);
                    self.len += 1;
                    return None;
                }
                Some(ref mut occupant) => occupant,
            };
            if occupant.0 == current.0 {
                return Some(index);
            }
            if slot.distance < distance {
                mem::swap(occupant, &mut current);
                mem::swap(&mut slot.distance, &mut distance);
                self.max_distance = cmp::max(self.max_distance, slot.distance);
            }
            index = (index + 1) & mask;
            distance += 1;
        }
        panic!("map is unexpectedly full")
    }

    fn find<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        if self.table.is_empty() {
            return None;
        }
        let mask = self.capacity() - 1;
        let mut index = self.home(key);
        for _ in 0..self.max_distance {
            if let Some((ref k, _)) = self.table[index].entry {
                if k.borrow() == key {
                    return Some(index);
                }
            }
            index = (index + 1) & mask;
        }
        None
    }

    fn grow(&mut self, arena: &mut Arena) {
        let capacity = match self.capacity() {
            0 => INITIAL_CAPACITY,
            n => n << 1,
        };
        arena.alloc::<Slot<K, V>>(capacity);
        let mut table = Vec::with_capacity(capacity);
        table.resize_with(capacity, Slot::empty);
        let old = mem::replace(&mut self.table, table);
        self.len = 0;
        self.max_distance = 0;
        for slot in old {
            if let Some((key, value)) = slot.entry {
                self.place(key, value);
            }
        }
    }

    fn home<Q: Hash + ?Sized>(&self, key: &Q) -> usize {
        let mut state = self.hasher.build_hasher();
        key.hash(&mut state);
        (state.finish() as usize) & (self.capacity() - 1)
    }
}

impl<K: fmt::Debug, V: fmt::Debug, S> fmt::Debug for Map<K, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// An iterator over the entries of a [`Map`], in slot order.
#[derive(Debug)]
pub struct Iter<'a, K, V> {
    slots: core::slice::Iter<'a, Slot<K, V>>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<(&'a K, &'a V)> {
        self.slots.by_ref().find_map(|slot| {
            slot.entry.as_ref().map(|&(ref k, ref v)| (k, v))
        })
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for Slot<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.entry {
            None => write!(f, "empty"),
            Some((ref k, ref v)) => {
                write!(f, "{:?} => {:?} ({})", k, v, self.distance)
            }
        }
    }
}
