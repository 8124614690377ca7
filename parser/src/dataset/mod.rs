//! The in-memory data set tree produced by a parse.
//!
//! A [`DataSet`] owns the arena holding every value byte, the root element
//! table, and, transitively, the tables of all nested sequence items. Value
//! access hands out byte slices borrowed from the data set, so no view can
//! outlive it. Dropping the data set returns all arena blocks and tables to
//! their pools.

use part10_core::{Tag, VR};
use smallvec::SmallVec;
use std::collections::HashMap;
use std::fmt;
use std::mem;
use std::sync::Arc;

use crate::arena::{Arena, RawSlice};
use crate::pool::Pools;

/// Which table pool a data set table belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TableKind {
    /// the root data set of a file
    Root,
    /// a sequence item data set
    Item,
}

/// The content of a data element: exactly one of a raw byte value,
/// a fragment list, or a list of sequence items.
#[derive(Debug)]
pub(crate) enum ElementContent {
    Value(RawSlice),
    Fragments(SmallVec<[RawSlice; 2]>),
    Sequence(Vec<Table>),
}

/// One stored data element.
#[derive(Debug)]
pub(crate) struct DataElement {
    pub(crate) tag: Tag,
    pub(crate) vr: VR,
    pub(crate) content: ElementContent,
}

impl DataElement {
    pub(crate) fn raw(tag: Tag, vr: VR, value: RawSlice) -> Self {
        DataElement {
            tag,
            vr,
            content: ElementContent::Value(value),
        }
    }

    pub(crate) fn fragments(tag: Tag, vr: VR, fragments: SmallVec<[RawSlice; 2]>) -> Self {
        DataElement {
            tag,
            vr,
            content: ElementContent::Fragments(fragments),
        }
    }

    pub(crate) fn sequence(tag: Tag, items: Vec<Table>) -> Self {
        DataElement {
            tag,
            vr: VR::SQ,
            content: ElementContent::Sequence(items),
        }
    }
}

/// An ordered element table: a vector in insertion order plus a tag index.
#[derive(Debug)]
pub(crate) struct Table {
    kind: TableKind,
    entries: Vec<DataElement>,
    index: HashMap<Tag, usize>,
}

impl Table {
    pub(crate) fn new(
        kind: TableKind,
        entries: Vec<DataElement>,
        index: HashMap<Tag, usize>,
    ) -> Self {
        Table {
            kind,
            entries,
            index,
        }
    }

    /// Append an element, preserving insertion order.
    /// Fails with the offending tag when it is already present.
    pub(crate) fn insert(&mut self, element: DataElement) -> Result<(), Tag> {
        let tag = element.tag;
        if self.index.contains_key(&tag) {
            return Err(tag);
        }
        self.index.insert(tag, self.entries.len());
        self.entries.push(element);
        Ok(())
    }

    pub(crate) fn get(&self, tag: Tag) -> Option<&DataElement> {
        self.index.get(&tag).map(|&i| &self.entries[i])
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn kind(&self) -> TableKind {
        self.kind
    }

    pub(crate) fn into_parts(self) -> (Vec<DataElement>, HashMap<Tag, usize>) {
        (self.entries, self.index)
    }
}

/// A parsed DICOM data set.
///
/// The data set owns all of its value bytes; [`get_raw`](DataSet::get_raw)
/// and the other accessors return views borrowed from it. Dropping the data
/// set recursively disposes nested sequence items and returns every rented
/// arena block to its origin pool.
pub struct DataSet {
    arena: Arena,
    table: Table,
    pools: Arc<Pools>,
}

impl DataSet {
    pub(crate) fn new(arena: Arena, table: Table, pools: Arc<Pools>) -> Self {
        DataSet {
            arena,
            table,
            pools,
        }
    }

    /// A reference to the root item of this data set.
    pub fn root(&self) -> ItemRef<'_> {
        ItemRef {
            arena: &self.arena,
            table: &self.table,
        }
    }

    /// Retrieve the raw value bytes of the element with the given tag.
    /// Returns `None` when the element is absent or its content is a
    /// sequence or a fragment list.
    pub fn get_raw(&self, tag: impl Into<Tag>) -> Option<&[u8]> {
        self.root().get_raw(tag)
    }

    /// Retrieve the items of the sequence with the given tag.
    /// Returns `None` when the element is absent or not a sequence.
    pub fn get_sequence(&self, tag: impl Into<Tag>) -> Option<Items<'_>> {
        self.root().get_sequence(tag)
    }

    /// Retrieve the fragment list of the element with the given tag.
    /// Returns `None` when the element is absent or not fragmented.
    pub fn get_fragments(&self, tag: impl Into<Tag>) -> Option<Fragments<'_>> {
        self.root().get_fragments(tag)
    }

    /// Retrieve the element with the given tag.
    pub fn get(&self, tag: impl Into<Tag>) -> Option<ElementRef<'_>> {
        self.root().get(tag)
    }

    /// Iterate over the root elements in parse order.
    pub fn elements(&self) -> Elements<'_> {
        self.root().elements()
    }

    /// The number of elements at the root level.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Whether the root level holds no elements.
    pub fn is_empty(&self) -> bool {
        self.table.len() == 0
    }
}

impl Drop for DataSet {
    fn drop(&mut self) {
        // walk the tree iteratively so that deep nesting cannot
        // exhaust the call stack
        let root = mem::replace(&mut self.table, Table::new(TableKind::Root, Vec::new(), HashMap::new()));
        let mut pending = vec![root];
        while let Some(table) = pending.pop() {
            let kind = table.kind();
            let (mut entries, index) = table.into_parts();
            for element in entries.drain(..) {
                if let ElementContent::Sequence(items) = element.content {
                    pending.extend(items);
                }
            }
            self.pools.table_pool(kind).give_back(entries, index);
        }
        // the arena field drops afterwards, returning the value blocks
    }
}

impl fmt::Debug for DataSet {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("DataSet")
            .field("elements", &self.table.len())
            .finish()
    }
}

/// A borrowed view of one data set level: the root or a sequence item.
#[derive(Clone, Copy)]
pub struct ItemRef<'a> {
    arena: &'a Arena,
    table: &'a Table,
}

impl<'a> ItemRef<'a> {
    /// Retrieve the element with the given tag.
    pub fn get(&self, tag: impl Into<Tag>) -> Option<ElementRef<'a>> {
        self.table.get(tag.into()).map(|element| ElementRef {
            arena: self.arena,
            element,
        })
    }

    /// Retrieve the raw value bytes of the element with the given tag.
    pub fn get_raw(&self, tag: impl Into<Tag>) -> Option<&'a [u8]> {
        self.get(tag).and_then(|element| element.value())
    }

    /// Retrieve the items of the sequence with the given tag.
    pub fn get_sequence(&self, tag: impl Into<Tag>) -> Option<Items<'a>> {
        self.get(tag).and_then(|element| element.items())
    }

    /// Retrieve the fragment list of the element with the given tag.
    pub fn get_fragments(&self, tag: impl Into<Tag>) -> Option<Fragments<'a>> {
        self.get(tag).and_then(|element| element.fragments())
    }

    /// Iterate over the elements of this level in parse order.
    pub fn elements(&self) -> Elements<'a> {
        Elements {
            arena: self.arena,
            iter: self.table.entries.iter(),
        }
    }

    /// The number of elements at this level.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Whether this level holds no elements.
    pub fn is_empty(&self) -> bool {
        self.table.len() == 0
    }
}

impl fmt::Debug for ItemRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("ItemRef")
            .field("elements", &self.table.len())
            .finish()
    }
}

/// A borrowed view of one data element.
#[derive(Clone, Copy)]
pub struct ElementRef<'a> {
    arena: &'a Arena,
    element: &'a DataElement,
}

impl<'a> ElementRef<'a> {
    /// The element's tag.
    pub fn tag(&self) -> Tag {
        self.element.tag
    }

    /// The element's value representation.
    pub fn vr(&self) -> VR {
        self.element.vr
    }

    /// The raw value bytes, when the content is a plain value.
    pub fn value(&self) -> Option<&'a [u8]> {
        match &self.element.content {
            ElementContent::Value(raw) => Some(self.arena.slice(*raw)),
            _ => None,
        }
    }

    /// The nested items, when the content is a sequence.
    pub fn items(&self) -> Option<Items<'a>> {
        match &self.element.content {
            ElementContent::Sequence(items) => Some(Items {
                arena: self.arena,
                items,
            }),
            _ => None,
        }
    }

    /// The fragment list, when the content is an encapsulated value.
    pub fn fragments(&self) -> Option<Fragments<'a>> {
        match &self.element.content {
            ElementContent::Fragments(fragments) => Some(Fragments {
                arena: self.arena,
                slices: fragments,
            }),
            _ => None,
        }
    }

    /// Whether the content is a sequence of items.
    pub fn is_sequence(&self) -> bool {
        matches!(self.element.content, ElementContent::Sequence(_))
    }

    /// Whether the content is a fragment list.
    pub fn is_fragmented(&self) -> bool {
        matches!(self.element.content, ElementContent::Fragments(_))
    }
}

impl fmt::Debug for ElementRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut s = f.debug_struct("ElementRef");
        s.field("tag", &self.element.tag)
            .field("vr", &self.element.vr);
        match &self.element.content {
            ElementContent::Value(raw) => s.field("len", &raw.len),
            ElementContent::Fragments(list) => s.field("fragments", &list.len()),
            ElementContent::Sequence(items) => s.field("items", &items.len()),
        };
        s.finish()
    }
}

/// Iterator over the elements of one data set level, in parse order.
pub struct Elements<'a> {
    arena: &'a Arena,
    iter: std::slice::Iter<'a, DataElement>,
}

impl<'a> Iterator for Elements<'a> {
    type Item = ElementRef<'a>;

    fn next(&mut self) -> Option<ElementRef<'a>> {
        self.iter.next().map(|element| ElementRef {
            arena: self.arena,
            element,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

/// The ordered items of a sequence element.
#[derive(Clone, Copy)]
pub struct Items<'a> {
    arena: &'a Arena,
    items: &'a [Table],
}

impl<'a> Items<'a> {
    /// The number of items in the sequence.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the sequence holds no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Retrieve the item at the given position.
    pub fn get(&self, index: usize) -> Option<ItemRef<'a>> {
        self.items.get(index).map(|table| ItemRef {
            arena: self.arena,
            table,
        })
    }

    /// Iterate over the items in order.
    pub fn iter(&self) -> ItemsIter<'a> {
        ItemsIter {
            arena: self.arena,
            iter: self.items.iter(),
        }
    }
}

impl fmt::Debug for Items<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Items").field("len", &self.items.len()).finish()
    }
}

impl<'a> IntoIterator for Items<'a> {
    type Item = ItemRef<'a>;
    type IntoIter = ItemsIter<'a>;

    fn into_iter(self) -> ItemsIter<'a> {
        self.iter()
    }
}

/// Iterator over the items of a sequence.
pub struct ItemsIter<'a> {
    arena: &'a Arena,
    iter: std::slice::Iter<'a, Table>,
}

impl<'a> Iterator for ItemsIter<'a> {
    type Item = ItemRef<'a>;

    fn next(&mut self) -> Option<ItemRef<'a>> {
        self.iter.next().map(|table| ItemRef {
            arena: self.arena,
            table,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

/// The ordered fragment list of an encapsulated value.
#[derive(Clone, Copy)]
pub struct Fragments<'a> {
    arena: &'a Arena,
    slices: &'a [RawSlice],
}

impl<'a> Fragments<'a> {
    /// The number of fragments.
    pub fn len(&self) -> usize {
        self.slices.len()
    }

    /// Whether the list holds no fragments.
    pub fn is_empty(&self) -> bool {
        self.slices.is_empty()
    }

    /// Retrieve the bytes of the fragment at the given position.
    pub fn get(&self, index: usize) -> Option<&'a [u8]> {
        self.slices.get(index).map(|&raw| self.arena.slice(raw))
    }

    /// Iterate over the fragment byte runs in order.
    pub fn iter(&self) -> impl Iterator<Item = &'a [u8]> + '_ {
        self.slices.iter().map(|&raw| self.arena.slice(raw))
    }
}

impl fmt::Debug for Fragments<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Fragments")
            .field("len", &self.slices.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::Pools;

    fn sample_dataset(pools: &Arc<Pools>) -> DataSet {
        let mut arena = Arena::new();
        let mut block = pools.small.rent(64);
        block[..6].copy_from_slice(b"CT\0ABC");
        let index = arena.add_block(block);

        let mut root = pools.root_tables.rent();
        root.insert(DataElement::raw(
            Tag(0x0008, 0x0060),
            VR::CS,
            RawSlice {
                block: index,
                start: 0,
                len: 2,
            },
        ))
        .unwrap();

        let mut item = pools.item_tables.rent();
        item.insert(DataElement::raw(
            Tag(0x0008, 0x0104),
            VR::LO,
            RawSlice {
                block: index,
                start: 3,
                len: 3,
            },
        ))
        .unwrap();
        root.insert(DataElement::sequence(Tag(0x0008, 0x2112), vec![item]))
            .unwrap();

        DataSet::new(arena, root, Arc::clone(pools))
    }

    #[test]
    fn raw_and_sequence_navigation() {
        let pools = Arc::new(Pools::new());
        let dataset = sample_dataset(&pools);

        assert_eq!(dataset.get_raw((0x0008, 0x0060)), Some(&b"CT"[..]));
        // sequence-valued elements have no raw view
        assert_eq!(dataset.get_raw((0x0008, 0x2112)), None);
        assert!(dataset.get_sequence((0x0008, 0x0060)).is_none());

        let items = dataset.get_sequence((0x0008, 0x2112)).unwrap();
        assert_eq!(items.len(), 1);
        let first = items.get(0).unwrap();
        assert_eq!(first.get_raw((0x0008, 0x0104)), Some(&b"ABC"[..]));
    }

    #[test]
    fn iteration_preserves_insertion_order() {
        let pools = Arc::new(Pools::new());
        let dataset = sample_dataset(&pools);
        let tags: Vec<Tag> = dataset.elements().map(|e| e.tag()).collect();
        assert_eq!(tags, vec![Tag(0x0008, 0x0060), Tag(0x0008, 0x2112)]);
    }

    #[test]
    fn duplicate_insertion_is_rejected() {
        let pools = Pools::new();
        let mut table = pools.root_tables.rent();
        table
            .insert(DataElement::raw(Tag(0x0010, 0x0010), VR::PN, RawSlice::EMPTY))
            .unwrap();
        let err = table
            .insert(DataElement::raw(Tag(0x0010, 0x0010), VR::PN, RawSlice::EMPTY))
            .unwrap_err();
        assert_eq!(err, Tag(0x0010, 0x0010));
    }

    #[test]
    fn dropping_returns_blocks() {
        let pools = Arc::new(Pools::new());
        let dataset = sample_dataset(&pools);
        assert_eq!(pools.outstanding_blocks(), 1);
        drop(dataset);
        assert_eq!(pools.outstanding_blocks(), 0);
    }
}
