/*!
Type definitions for identifier types.

A [`NodeId`] is a handle to a node owned by a [`Graph`](crate::graph::Graph).
Nodes are never referenced by address. Every edge, every traversal output and
every caller holds a `NodeId` instead, which stays valid for as long as the
graph that issued it. Node identifiers are assigned in insertion order,
starting at `0`.

The identifier type clamps the range of permissible values to something that
always fits in a `u32`, an `i32` and a `usize` on all supported targets. Users
may rely on this to avoid panics or other logic bugs, but not for memory
safety.
*/

use core::{convert::TryFrom, mem, ops};

/// An identifier for a node in a graph.
///
/// A node ID is guaranteed to be representable by a `usize`. Similarly, the
/// number of nodes in any graph in this crate is guaranteed to be
/// representable by a `usize`.
///
/// # Representation
///
/// This type is always represented internally by a `u32` and is marked as
/// `repr(transparent)`. Thus, this type always has the same representation as
/// a `u32`.
///
/// # Indexing
///
/// For convenience, callers may use a `NodeId` to index slices.
#[repr(transparent)]
#[derive(
    Clone, Copy, Debug, Default, Eq, Hash, PartialEq, PartialOrd, Ord,
)]
pub struct NodeId(u32);

impl NodeId {
    /// The maximum node ID value.
    pub const MAX: NodeId =
        NodeId::new_unchecked(core::i32::MAX as usize - 1);

    /// The total number of nodes that are allowed in any single graph.
    pub const LIMIT: usize = NodeId::MAX.as_usize() + 1;

    /// The zero node ID value.
    pub const ZERO: NodeId = NodeId::new_unchecked(0);

    /// The number of bytes that a single `NodeId` uses in memory.
    pub const SIZE: usize = mem::size_of::<NodeId>();

    /// Create a new node ID.
    ///
    /// If the given identifier exceeds [`NodeId::MAX`], then this returns
    /// an error.
    #[inline]
    pub fn new(id: usize) -> Result<NodeId, NodeIdError> {
        NodeId::try_from(id)
    }

    /// Create a new node ID without checking whether the given value
    /// exceeds [`NodeId::MAX`].
    ///
    /// While this is unchecked, providing an incorrect value must never
    /// sacrifice memory safety.
    #[inline]
    pub const fn new_unchecked(id: usize) -> NodeId {
        NodeId(id as u32)
    }

    /// Like [`NodeId::new`], but panics if the given ID is not valid.
    #[inline]
    pub fn must(id: usize) -> NodeId {
        match NodeId::new(id) {
            Ok(id) => id,
            Err(err) => panic!("{}", err),
        }
    }

    /// Return this node ID as a `usize`.
    #[inline]
    pub const fn as_usize(&self) -> usize {
        self.0 as usize
    }

    /// Return the internal u32 of this node ID.
    #[inline]
    pub const fn as_u32(&self) -> u32 {
        self.0
    }

    /// Returns an iterator over all node IDs from 0 up to and not including
    /// the given length.
    ///
    /// If the given length exceeds [`NodeId::LIMIT`], then this panics.
    pub(crate) fn iter(len: usize) -> NodeIdIter {
        NodeIdIter::new(len)
    }
}

/// This error occurs when a node ID could not be constructed.
///
/// This occurs when given an integer exceeding the maximum node ID value.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct NodeIdError {
    attempted: u64,
}

impl NodeIdError {
    /// Returns the value that failed to constructed a node ID.
    pub fn attempted(&self) -> u64 {
        self.attempted
    }
}

#[cfg(feature = "std")]
impl std::error::Error for NodeIdError {}

impl core::fmt::Display for NodeIdError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "failed to create NodeId from {:?}, which exceeds {:?}",
            self.attempted(),
            NodeId::MAX,
        )
    }
}

impl TryFrom<usize> for NodeId {
    type Error = NodeIdError;

    fn try_from(id: usize) -> Result<NodeId, NodeIdError> {
        if id > NodeId::MAX.as_usize() {
            return Err(NodeIdError { attempted: id as u64 });
        }
        Ok(NodeId::new_unchecked(id))
    }
}

#[derive(Clone, Debug)]
pub(crate) struct NodeIdIter {
    rng: ops::Range<usize>,
}

impl NodeIdIter {
    fn new(len: usize) -> NodeIdIter {
        assert!(
            len <= NodeId::LIMIT,
            "cannot create iterator with IDs when number of \
             elements exceed {:?}",
            NodeId::LIMIT,
        );
        NodeIdIter { rng: 0..len }
    }
}

impl Iterator for NodeIdIter {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        if self.rng.start >= self.rng.end {
            return None;
        }
        let next_id = self.rng.start + 1;
        let id = mem::replace(&mut self.rng.start, next_id);
        // new_unchecked is OK since we asserted that the number of
        // elements in this iterator will fit in an ID at construction.
        Some(NodeId::new_unchecked(id))
    }
}

impl<T> ops::Index<NodeId> for [T] {
    type Output = T;

    #[inline]
    fn index(&self, index: NodeId) -> &T {
        &self[index.as_usize()]
    }
}

impl<T> ops::IndexMut<NodeId> for [T] {
    #[inline]
    fn index_mut(&mut self, index: NodeId) -> &mut T {
        &mut self[index.as_usize()]
    }
}

#[cfg(test)]
impl quickcheck::Arbitrary for NodeId {
    fn arbitrary(gen: &mut quickcheck::Gen) -> NodeId {
        use core::cmp::max;
        use quickcheck::Arbitrary;

        let id = max(i32::MIN + 1, i32::arbitrary(gen)).abs();
        if id > NodeId::MAX.as_u32() as i32 {
            NodeId::MAX
        } else {
            NodeId::new(usize::try_from(id).unwrap()).unwrap()
        }
    }
}
