use alloc::vec::Vec;
use core::{ops, slice};

use crate::util::{arena::Arena, id::NodeId};

/// A growable sequence whose buffers are charged against an [`Arena`].
///
/// Growth follows `capacity' = capacity * 1.5 + 8`, applied until the
/// requested size is covered. Each growth reserves a fresh arena block for
/// the whole new buffer and moves the existing elements over. The old block
/// is never reused.
#[derive(Clone)]
pub struct Seq<T> {
    data: Vec<T>,
    capacity: usize,
}

impl<T> Default for Seq<T> {
    fn default() -> Seq<T> {
        Seq::new()
    }
}

impl<T> Seq<T> {
    /// Create an empty sequence. No arena space is used until the first
    /// element is added.
    pub const fn new() -> Seq<T> {
        Seq { data: Vec::new(), capacity: 0 }
    }

    /// Returns the number of elements in this sequence.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if and only if this sequence has no elements.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the number of elements this sequence can hold before it must
    /// grow again.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Ensure room for at least `new_capacity` elements.
    ///
    /// This is a no-op if the current capacity already suffices.
    pub fn reserve(&mut self, arena: &mut Arena, new_capacity: usize) {
        if self.capacity >= new_capacity {
            return;
        }
        let mut capacity = self.capacity;
        while capacity < new_capacity {
            capacity = grow(capacity);
        }
        arena.alloc::<T>(capacity);
        let mut data = Vec::with_capacity(capacity);
        data.extend(self.data.drain(..));
        self.data = data;
        self.capacity = capacity;
    }

    /// Append a value to the end of this sequence.
    pub fn push_back(&mut self, arena: &mut Arena, value: T) {
        self.reserve(arena, self.len() + 1);
        self.data.push(value);
    }

    /// Remove and return the last value, if one exists.
    pub fn pop_back(&mut self) -> Option<T> {
        self.data.pop()
    }

    /// Remove the value at `index` by moving the last value into its place.
    ///
    /// This does not preserve order, but is O(1).
    ///
    /// # Panics
    ///
    /// When `index` is out of bounds.
    pub fn swap_remove(&mut self, index: usize) -> T {
        self.data.swap_remove(index)
    }

    /// Drop every element. The capacity is retained.
    pub fn clear(&mut self) {
        self.data.clear();
    }

    /// Keep only the elements for which the predicate returns true. Order is
    /// preserved and the capacity is retained.
    pub fn retain(&mut self, predicate: impl FnMut(&T) -> bool) {
        self.data.retain(predicate);
    }

    /// Returns the value at `index`, or `None` if `index >= len`.
    pub fn get(&self, index: usize) -> Option<&T> {
        self.data.get(index)
    }

    /// Returns the value at `index` mutably, or `None` if `index >= len`.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.data.get_mut(index)
    }

    /// The first element, if any.
    pub fn front(&self) -> Option<&T> {
        self.data.first()
    }

    /// The last element, if any.
    pub fn back(&self) -> Option<&T> {
        self.data.last()
    }

    /// The last element mutably, if any.
    pub fn back_mut(&mut self) -> Option<&mut T> {
        self.data.last_mut()
    }

    /// Returns all elements as a slice.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Returns all elements as a mutable slice.
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Iterate over the elements in order.
    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.data.iter()
    }

    /// Iterate mutably over the elements in order.
    pub fn iter_mut(&mut self) -> slice::IterMut<'_, T> {
        self.data.iter_mut()
    }
}

// cap = cap * 1.5 + 8
fn grow(capacity: usize) -> usize {
    (capacity << 1) - (capacity >> 1) + 8
}

impl<T: core::fmt::Debug> core::fmt::Debug for Seq<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_list().entries(self.data.iter()).finish()
    }
}

impl<T> ops::Index<usize> for Seq<T> {
    type Output = T;

    #[inline]
    fn index(&self, index: usize) -> &T {
        &self.data[index]
    }
}

impl<T> ops::IndexMut<usize> for Seq<T> {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut T {
        &mut self.data[index]
    }
}

impl<T> ops::Index<NodeId> for Seq<T> {
    type Output = T;

    #[inline]
    fn index(&self, index: NodeId) -> &T {
        &self.data[index.as_usize()]
    }
}

impl<T> ops::IndexMut<NodeId> for Seq<T> {
    #[inline]
    fn index_mut(&mut self, index: NodeId) -> &mut T {
        &mut self.data[index.as_usize()]
    }
}

impl<T> IntoIterator for Seq<T> {
    type Item = T;
    type IntoIter = alloc::vec::IntoIter<T>;

    fn into_iter(self) -> alloc::vec::IntoIter<T> {
        self.data.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Seq<T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> slice::Iter<'a, T> {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck::quickcheck;

    #[test]
    fn capacity_follows_recurrence() {
        let mut arena = Arena::default();
        let mut seq: Seq<u32> = Seq::new();
        assert_eq!(0, seq.capacity());

        seq.reserve(&mut arena, 1);
        assert_eq!(8, seq.capacity());
        seq.reserve(&mut arena, 9);
        assert_eq!(20, seq.capacity());
        seq.reserve(&mut arena, 20);
        assert_eq!(20, seq.capacity());
        // 20 -> 38 -> 65
        seq.reserve(&mut arena, 39);
        assert_eq!(65, seq.capacity());
    }

    #[test]
    fn growth_charges_the_arena() {
        let mut arena = Arena::default();
        let mut seq: Seq<u64> = Seq::new();
        seq.push_back(&mut arena, 1);
        assert_eq!(8 * 8, arena.used());
        for i in 0..8 {
            seq.push_back(&mut arena, i);
        }
        // The old 8 element block stays behind.
        assert_eq!(8 * 8 + 20 * 8, arena.used());
    }

    #[test]
    fn front_back_and_pop() {
        let mut arena = Arena::default();
        let mut seq = Seq::new();
        assert_eq!(None, seq.front());
        assert_eq!(None, seq.back());
        assert_eq!(None, seq.pop_back());

        seq.push_back(&mut arena, 'a');
        seq.push_back(&mut arena, 'b');
        seq.push_back(&mut arena, 'c');
        assert_eq!(Some(&'a'), seq.front());
        assert_eq!(Some(&'c'), seq.back());
        assert_eq!(Some('c'), seq.pop_back());
        assert_eq!(2, seq.len());
        assert_eq!(None, seq.get(2));
    }

    #[test]
    fn swap_remove_moves_last() {
        let mut arena = Arena::default();
        let mut seq = Seq::new();
        for i in 0..5 {
            seq.push_back(&mut arena, i);
        }
        assert_eq!(1, seq.swap_remove(1));
        assert_eq!(&[0, 4, 2, 3], seq.as_slice());
    }

    quickcheck! {
        fn prop_push_then_get(values: Vec<i64>) -> bool {
            let mut arena = Arena::default();
            let mut seq = Seq::new();
            for &v in &values {
                seq.push_back(&mut arena, v);
            }
            seq.len() == values.len()
                && values
                    .iter()
                    .enumerate()
                    .all(|(i, v)| seq.get(i) == Some(v))
                && seq.capacity() >= seq.len()
        }
    }
}
