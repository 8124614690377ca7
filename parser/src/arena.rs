//! The arena owning every value byte of a parsed data set.
//!
//! Value payloads are copied out of the pipe into pooled blocks held here.
//! Elements refer to their bytes through [`RawSlice`] handles, resolved
//! against the arena on access, so no value view can outlive the data set
//! that owns the arena.

use crate::pool::PoolBlock;

/// A handle to a byte range inside an arena block.
///
/// A slice with `len == 0` is empty regardless of its block field and is
/// never resolved against a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RawSlice {
    pub block: u32,
    pub start: u32,
    pub len: u32,
}

impl RawSlice {
    pub(crate) const EMPTY: RawSlice = RawSlice {
        block: 0,
        start: 0,
        len: 0,
    };
}

/// An ordered collection of pooled byte blocks.
/// Dropping the arena hands every block back to its origin pool.
#[derive(Debug, Default)]
pub(crate) struct Arena {
    blocks: Vec<PoolBlock>,
}

impl Arena {
    pub(crate) fn new() -> Self {
        Arena { blocks: Vec::new() }
    }

    /// Take ownership of a rented block, returning its index.
    pub(crate) fn add_block(&mut self, block: PoolBlock) -> u32 {
        let index = self.blocks.len() as u32;
        self.blocks.push(block);
        index
    }

    /// Mutable access to a block's full capacity, for the copy cursor.
    pub(crate) fn block_mut(&mut self, index: u32) -> &mut [u8] {
        &mut self.blocks[index as usize]
    }

    /// The capacity of a block in bytes.
    pub(crate) fn block_capacity(&self, index: u32) -> usize {
        self.blocks[index as usize].len()
    }

    /// Resolve a raw slice handle into its bytes.
    pub(crate) fn slice(&self, raw: RawSlice) -> &[u8] {
        if raw.len == 0 {
            return &[];
        }
        let block = &self.blocks[raw.block as usize];
        &block[raw.start as usize..(raw.start + raw.len) as usize]
    }

    /// The number of blocks owned by this arena.
    #[cfg(test)]
    pub(crate) fn block_count(&self) -> usize {
        self.blocks.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::Pools;

    #[test]
    fn slices_resolve_into_blocks() {
        let pools = Pools::new();
        let mut arena = Arena::new();
        let block = pools.small.rent(64);
        let index = arena.add_block(block);
        arena.block_mut(index)[4..8].copy_from_slice(b"DICM");

        let raw = RawSlice {
            block: index,
            start: 4,
            len: 4,
        };
        assert_eq!(arena.slice(raw), b"DICM");
        assert_eq!(arena.slice(RawSlice::EMPTY), b"");
    }

    #[test]
    fn dropping_the_arena_returns_blocks() {
        let pools = Pools::new();
        let mut arena = Arena::new();
        for len in [100, 200, 2 * 1024 * 1024] {
            let pool = if len >= 1024 * 1024 {
                &pools.large
            } else {
                &pools.small
            };
            arena.add_block(pool.rent(len));
        }
        assert_eq!(pools.outstanding_blocks(), 3);
        assert_eq!(arena.block_count(), 3);
        drop(arena);
        assert_eq!(pools.outstanding_blocks(), 0);
    }
}
