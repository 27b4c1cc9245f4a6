/*!
A linear arena with a fixed ceiling.

Every container in this crate charges its buffers against an [`Arena`].
Allocation only moves a monotonically increasing offset forward, each block is
rounded up to pointer alignment, and nothing is ever handed back: a grown
buffer leaves its old block behind. The whole arena, and everything charged
against it, is reclaimed at once when it is dropped.

Running out of arena space is not an input error. The ceiling is fixed when
the arena is created and is never raised, so exceeding it means the caller
configured the arena too small for the work it asked for. This panics.
*/

use core::{fmt, mem};

/// The default arena capacity, in bytes.
pub const DEFAULT_CAPACITY: usize = 1024 * 1024;

const POINTER_SIZE: usize = mem::size_of::<usize>();

/// A bump-pointer region with a fixed capacity.
#[derive(Clone, Debug)]
pub struct Arena {
    capacity: usize,
    offset: usize,
    bytes_requested: usize,
}

/// A block handed out by [`Arena::alloc`].
///
/// Blocks never overlap. `offset` is always a multiple of the pointer size.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Block {
    offset: usize,
    len: usize,
}

impl Block {
    /// The byte offset of this block within its arena.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// The number of bytes reserved for this block, after alignment.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if this block reserved no bytes.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// One past the last byte of this block.
    pub fn end(&self) -> usize {
        self.offset + self.len
    }
}

/// Allocation statistics for a single arena.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct ArenaStats {
    /// The fixed ceiling of the arena, in bytes.
    pub capacity: usize,
    /// The sum of all unaligned request sizes.
    pub bytes_requested: usize,
    /// The number of bytes consumed, including alignment padding.
    pub bytes_used: usize,
}

impl fmt::Display for ArenaStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "arena: {} bytes requested, {} bytes used, {} bytes capacity",
            self.bytes_requested, self.bytes_used, self.capacity,
        )
    }
}

impl Default for Arena {
    fn default() -> Arena {
        Arena::new(DEFAULT_CAPACITY)
    }
}

impl Arena {
    /// Create a new arena that can hand out at most `capacity` bytes.
    pub fn new(capacity: usize) -> Arena {
        Arena { capacity, offset: 0, bytes_requested: 0 }
    }

    /// Reserve space for `count` values of type `T`.
    ///
    /// The block is rounded up to a multiple of the pointer size, so
    /// consecutive blocks are always pointer aligned.
    ///
    /// # Panics
    ///
    /// When the aligned request does not fit in the remaining capacity.
    pub fn alloc<T>(&mut self, count: usize) -> Block {
        let requested = mem::size_of::<T>()
            .checked_mul(count)
            .unwrap_or_else(|| self.exhausted());
        let aligned = requested
            .checked_add(POINTER_SIZE - 1)
            .map(|n| n & !(POINTER_SIZE - 1))
            .unwrap_or_else(|| self.exhausted());
        if aligned > self.remaining() {
            self.exhausted();
        }
        let block = Block { offset: self.offset, len: aligned };
        self.offset += aligned;
        self.bytes_requested += requested;
        block
    }

    /// The fixed ceiling of this arena, in bytes.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// The number of bytes handed out so far, including alignment padding.
    pub fn used(&self) -> usize {
        self.offset
    }

    /// The number of bytes still available.
    pub fn remaining(&self) -> usize {
        self.capacity - self.offset
    }

    /// Returns a snapshot of this arena's allocation statistics.
    pub fn stats(&self) -> ArenaStats {
        ArenaStats {
            capacity: self.capacity,
            bytes_requested: self.bytes_requested,
            bytes_used: self.offset,
        }
    }

    #[cold]
    fn exhausted(&self) -> ! {
        panic!("arena cannot exceed total of {} bytes", self.capacity)
    }
}
