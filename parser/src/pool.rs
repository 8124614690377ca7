//! Process-scoped pools for the byte blocks and data set tables
//! that back parsed values.
//!
//! Pools are shared by independent parse invocations and must tolerate
//! concurrent rent/return traffic, so each free list is a bounded lock-free
//! FIFO. Returns beyond a pool's retention cap are dropped to the allocator
//! rather than retained. Byte blocks are opaque while on the free list;
//! table containers are cleared before they are stashed.

use crossbeam_channel::{bounded, Receiver, Sender};
use once_cell::sync::Lazy;
use part10_core::Tag;
use std::collections::HashMap;
use std::ops::{Deref, DerefMut};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::dataset::{DataElement, Table, TableKind};

const KIB: usize = 1024;
const MIB: usize = 1024 * 1024;

/// Size classes of the small block pool, which backs bump blocks,
/// sub-megabyte dedicated value blocks, and pipe segments.
const SMALL_CLASSES: &[usize] = &[
    16 * KIB,
    32 * KIB,
    64 * KIB,
    128 * KIB,
    256 * KIB,
    512 * KIB,
    MIB,
];
const SMALL_RETAIN_PER_CLASS: usize = 128;

/// Size classes of the large block pool, which backs dedicated blocks for
/// values of one megabyte and more. Blocks above the top class are
/// allocated exactly and never retained.
const LARGE_CLASSES: &[usize] = &[MIB, 2 * MIB, 4 * MIB, 8 * MIB, 16 * MIB, 25 * MIB];
const LARGE_RETAIN_PER_CLASS: usize = 5;

const ROOT_TABLE_CAPACITY_HINT: usize = 256;
const ROOT_TABLES_RETAINED: usize = 64;
const ITEM_TABLE_CAPACITY_HINT: usize = 16;
const ITEM_TABLES_RETAINED: usize = 256;

/// A pool of fixed-capacity byte buffers, bucketed by size class.
#[derive(Debug)]
pub(crate) struct BytePool {
    name: &'static str,
    classes: Vec<SizeClass>,
    /// blocks rented and not yet returned (pooled or not)
    outstanding: AtomicUsize,
}

#[derive(Debug)]
struct SizeClass {
    size: usize,
    tx: Sender<Box<[u8]>>,
    rx: Receiver<Box<[u8]>>,
}

impl BytePool {
    fn new(name: &'static str, sizes: &[usize], retain_per_class: usize) -> Self {
        let classes = sizes
            .iter()
            .map(|&size| {
                let (tx, rx) = bounded(retain_per_class);
                SizeClass { size, tx, rx }
            })
            .collect();
        BytePool {
            name,
            classes,
            outstanding: AtomicUsize::new(0),
        }
    }

    /// Rent a block with capacity for at least `len` bytes.
    ///
    /// Requests above the top size class are served with an exact,
    /// unpooled allocation.
    pub(crate) fn rent(self: &Arc<Self>, len: usize) -> PoolBlock {
        self.outstanding.fetch_add(1, Ordering::Relaxed);
        let buf = match self.classes.iter().find(|c| c.size >= len) {
            Some(class) => match class.rx.try_recv() {
                Ok(buf) => buf,
                Err(_) => {
                    tracing::trace!(pool = self.name, size = class.size, "allocating pool block");
                    vec![0u8; class.size].into_boxed_slice()
                }
            },
            None => vec![0u8; len].into_boxed_slice(),
        };
        PoolBlock {
            buf: Some(buf),
            pool: Some(Arc::clone(self)),
        }
    }

    /// The number of rented blocks not yet returned or dropped.
    pub(crate) fn outstanding(&self) -> usize {
        self.outstanding.load(Ordering::Relaxed)
    }

    fn give_back(&self, buf: Box<[u8]>) {
        self.outstanding.fetch_sub(1, Ordering::Relaxed);
        if let Some(class) = self.classes.iter().find(|c| c.size == buf.len()) {
            // a full stash drops the block to the allocator
            let _ = class.tx.try_send(buf);
        }
    }
}

/// An owned byte buffer rented from a [`BytePool`].
/// Dropping the block hands it back to its origin pool.
#[derive(Debug)]
pub(crate) struct PoolBlock {
    buf: Option<Box<[u8]>>,
    pool: Option<Arc<BytePool>>,
}

impl Deref for PoolBlock {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        self.buf.as_deref().unwrap_or(&[])
    }
}

impl DerefMut for PoolBlock {
    fn deref_mut(&mut self) -> &mut [u8] {
        self.buf.as_deref_mut().unwrap_or(&mut [])
    }
}

impl Drop for PoolBlock {
    fn drop(&mut self) {
        if let (Some(buf), Some(pool)) = (self.buf.take(), self.pool.take()) {
            pool.give_back(buf);
        }
    }
}

/// A pool of cleared data set table containers.
#[derive(Debug)]
pub(crate) struct TablePool {
    kind: TableKind,
    capacity_hint: usize,
    tx: Sender<(Vec<DataElement>, HashMap<Tag, usize>)>,
    rx: Receiver<(Vec<DataElement>, HashMap<Tag, usize>)>,
}

impl TablePool {
    fn new(kind: TableKind, capacity_hint: usize, retained: usize) -> Self {
        let (tx, rx) = bounded(retained);
        TablePool {
            kind,
            capacity_hint,
            tx,
            rx,
        }
    }

    pub(crate) fn rent(&self) -> Table {
        let (entries, index) = self.rx.try_recv().unwrap_or_else(|_| {
            (
                Vec::with_capacity(self.capacity_hint),
                HashMap::with_capacity(self.capacity_hint),
            )
        });
        Table::new(self.kind, entries, index)
    }

    pub(crate) fn give_back(&self, mut entries: Vec<DataElement>, mut index: HashMap<Tag, usize>) {
        entries.clear();
        index.clear();
        let _ = self.tx.try_send((entries, index));
    }
}

/// The set of pools used by one or more parse invocations.
///
/// The default instance, obtained through [`Pools::shared`], is
/// process-scoped; independent instances can be created for tests or for
/// workloads that must not share block stashes.
#[derive(Debug)]
pub struct Pools {
    pub(crate) small: Arc<BytePool>,
    pub(crate) large: Arc<BytePool>,
    pub(crate) root_tables: TablePool,
    pub(crate) item_tables: TablePool,
}

static SHARED: Lazy<Arc<Pools>> = Lazy::new(|| Arc::new(Pools::new()));

impl Pools {
    /// Create an independent set of pools with the default size classes
    /// and retention caps.
    pub fn new() -> Self {
        Pools {
            small: Arc::new(BytePool::new("small", SMALL_CLASSES, SMALL_RETAIN_PER_CLASS)),
            large: Arc::new(BytePool::new("large", LARGE_CLASSES, LARGE_RETAIN_PER_CLASS)),
            root_tables: TablePool::new(
                TableKind::Root,
                ROOT_TABLE_CAPACITY_HINT,
                ROOT_TABLES_RETAINED,
            ),
            item_tables: TablePool::new(
                TableKind::Item,
                ITEM_TABLE_CAPACITY_HINT,
                ITEM_TABLES_RETAINED,
            ),
        }
    }

    /// Retrieve the process-scoped pool set.
    pub fn shared() -> Arc<Pools> {
        Arc::clone(&SHARED)
    }

    /// The total number of byte blocks currently rented out of the small
    /// and large pools.
    pub fn outstanding_blocks(&self) -> usize {
        self.small.outstanding() + self.large.outstanding()
    }

    pub(crate) fn table_pool(&self, kind: TableKind) -> &TablePool {
        match kind {
            TableKind::Root => &self.root_tables,
            TableKind::Item => &self.item_tables,
        }
    }
}

impl Default for Pools {
    fn default() -> Self {
        Pools::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rent_rounds_up_to_size_class() {
        let pools = Pools::new();
        let block = pools.small.rent(10);
        assert_eq!(block.len(), 16 * KIB);
        let block = pools.small.rent(16 * KIB + 1);
        assert_eq!(block.len(), 32 * KIB);
    }

    #[test]
    fn oversized_rent_is_exact_and_unpooled() {
        let pools = Pools::new();
        let big = 30 * MIB;
        {
            let block = pools.large.rent(big);
            assert_eq!(block.len(), big);
            assert_eq!(pools.large.outstanding(), 1);
        }
        assert_eq!(pools.large.outstanding(), 0);
        // nothing of that size is stashed for reuse
        assert!(pools.large.classes.iter().all(|c| c.rx.is_empty()));
    }

    #[test]
    fn blocks_return_on_drop() {
        let pools = Pools::new();
        {
            let _a = pools.small.rent(100);
            let _b = pools.large.rent(2 * MIB);
            assert_eq!(pools.outstanding_blocks(), 2);
        }
        assert_eq!(pools.outstanding_blocks(), 0);
        // the returned block is reused
        let _c = pools.small.rent(100);
        assert_eq!(pools.small.outstanding(), 1);
    }

    #[test]
    fn over_cap_returns_are_dropped() {
        let pool = Arc::new(BytePool::new("tiny", &[16], 2));
        let blocks: Vec<_> = (0..5).map(|_| pool.rent(16)).collect();
        assert_eq!(pool.outstanding(), 5);
        drop(blocks);
        assert_eq!(pool.outstanding(), 0);
        assert_eq!(pool.classes[0].rx.len(), 2);
    }

    #[test]
    fn table_pool_clears_before_reuse() {
        let pools = Pools::new();
        let mut table = pools.item_tables.rent();
        table
            .insert(DataElement::raw(
                part10_core::Tag(0x0008, 0x0018),
                part10_core::VR::UI,
                crate::arena::RawSlice::EMPTY,
            ))
            .unwrap();
        let (entries, index) = table.into_parts();
        pools.item_tables.give_back(entries, index);

        let table = pools.item_tables.rent();
        assert_eq!(table.len(), 0);
    }
}
