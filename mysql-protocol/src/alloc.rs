/*!
Buffer acquisition for encoders.

Encoders never allocate result buffers on their own, they ask the
[`Allocator`] passed by the caller. The lifetime of a buffer is controlled by
the caller (usually one packet or one row), so implementations need no
synchronization.
*/
use bytes::BytesMut;

const DEFAULT_BLOCK_SIZE: usize = 16 * 1024;

pub trait Allocator {
    /// Returns an empty buffer with at least `capacity` bytes reserved.
    fn alloc(&mut self, capacity: usize) -> BytesMut;
    /// Makes memory of previously returned buffers available again.
    ///
    /// Memory is only reclaimed once those buffers have been dropped.
    fn reset(&mut self);
}

/// Allocates every buffer on the heap.
#[derive(Debug, Default)]
pub struct StdAllocator;

/// Hands out consecutive pieces of one block.
///
/// When a request doesn't fit in the remainder of the block a new block is
/// started. [`reset`](Allocator::reset) reuses the current block from the
/// start if nothing handed out from it is still alive.
#[derive(Debug)]
pub struct ArenaAllocator {
    block: BytesMut,
    block_size: usize,
}

impl Allocator for StdAllocator {
    fn alloc(&mut self, capacity: usize) -> BytesMut {
        BytesMut::with_capacity(capacity)
    }
    fn reset(&mut self) {}
}

impl ArenaAllocator {
    pub fn new() -> ArenaAllocator {
        ArenaAllocator::with_block_size(DEFAULT_BLOCK_SIZE)
    }
    pub fn with_block_size(block_size: usize) -> ArenaAllocator {
        ArenaAllocator {
            block: BytesMut::with_capacity(block_size),
            block_size,
        }
    }
    /// Bytes left in the current block.
    pub fn remaining(&self) -> usize {
        self.block.capacity()
    }
}

impl Default for ArenaAllocator {
    fn default() -> ArenaAllocator {
        ArenaAllocator::new()
    }
}

impl Allocator for ArenaAllocator {
    fn alloc(&mut self, capacity: usize) -> BytesMut {
        if capacity > self.block_size {
            return BytesMut::with_capacity(capacity);
        }
        if self.block.capacity() < capacity {
            self.block = BytesMut::with_capacity(self.block_size);
        }
        let rest = self.block.split_off(capacity);
        std::mem::replace(&mut self.block, rest)
    }
    fn reset(&mut self) {
        self.block.clear();
        // reclaims the whole allocation when all pieces are dropped
        self.block.reserve(self.block_size);
    }
}
