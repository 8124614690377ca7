//! The stateful element decoder: a resumable state machine over the
//! segmented byte pipe.
//!
//! The decoder advances through five stages per element (group, element,
//! VR, length, value) and never blocks: a stage that cannot complete with
//! the buffered bytes leaves the machine untouched and hands control back
//! to the driver, which refills the buffer and re-enters. Sequence nesting
//! is tracked with an explicit frame stack, so nesting depth is bounded
//! only by the input.

use byteordered::byteorder::{ByteOrder, LittleEndian};
use part10_core::dictionary::{DataDictionary, DataDictionaryEntry};
use part10_core::{Length, Tag, VR};
use smallvec::SmallVec;
use snafu::{ensure, OptionExt};
use std::sync::Arc;

use crate::arena::{Arena, RawSlice};
use crate::dataset::{DataElement, DataSet, Table};
use crate::error::{
    BadPreambleSnafu, CancelledSnafu, DuplicateTagSnafu, MalformedItemSnafu, Result, TooSmallSnafu,
    UnexpectedEndSnafu, UnknownParseStageSnafu, UnknownVrSnafu,
    UnsupportedExplicitLengthItemSnafu, ValueTooLargeSnafu,
};
use crate::pipe::SegmentedBuf;
use crate::pool::Pools;
use crate::CancelToken;

/// Maximum admissible value payload, in bytes.
pub(crate) const MAX_VALUE_LENGTH: u32 = 2_147_483_591;

/// The transfer syntax UID of _Implicit VR Little Endian_,
/// bare and NUL-padded to even length.
const TS_IMPLICIT_VR_LE: &[u8] = b"1.2.840.10008.1.2";
const TS_IMPLICIT_VR_LE_PADDED: &[u8] = b"1.2.840.10008.1.2\0";

/// The stage to resume from when the decoder is re-entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    Preamble,
    Group,
    Element,
    Vr,
    Length,
    Value,
}

/// An open sequence: its element tag, the items closed so far,
/// and the item currently receiving elements, if any.
#[derive(Debug)]
struct SequenceFrame {
    tag: Tag,
    items: Vec<Table>,
    open: Option<Table>,
}

/// An open encapsulated value collecting fragments.
#[derive(Debug)]
struct FragmentFrame {
    tag: Tag,
    vr: VR,
    fragments: SmallVec<[RawSlice; 2]>,
}

/// The destination and write cursor of the value being copied.
#[derive(Debug, Clone, Copy)]
struct ValueCursor {
    dst: RawSlice,
    written: u32,
}

/// The block and offset that short values bump-allocate from.
#[derive(Debug, Clone, Copy)]
struct BumpCursor {
    block: u32,
    offset: usize,
}

/// A resumable decoder for one DICOM Part 10 stream.
///
/// `D` is the data dictionary consulted for VR inference when the stream
/// switches to _Implicit VR Little Endian_.
#[derive(Debug)]
pub(crate) struct StatefulDecoder<D> {
    dict: D,
    pools: Arc<Pools>,
    bump_block_size: usize,
    large_value_threshold: usize,

    stage: Stage,
    /// input bytes consumed so far
    position: u64,
    /// preamble bytes still to skip before the magic code
    preamble_remaining: usize,

    group: u16,
    element: u16,
    vr: VR,
    length: u32,
    /// the current length came from a 16-bit field
    short_length: bool,

    explicit_vr: bool,
    /// switch to implicit VR once the file meta group ends
    switch_pending: bool,

    sequences: Vec<SequenceFrame>,
    fragments: Option<FragmentFrame>,
    value: Option<ValueCursor>,
    bump: Option<BumpCursor>,

    arena: Arena,
    root: Table,
}

impl<D> StatefulDecoder<D>
where
    D: DataDictionary,
{
    pub(crate) fn new(
        dict: D,
        pools: Arc<Pools>,
        bump_block_size: usize,
        large_value_threshold: usize,
    ) -> Self {
        let root = pools.root_tables.rent();
        StatefulDecoder {
            dict,
            pools,
            bump_block_size,
            large_value_threshold,
            stage: Stage::Preamble,
            position: 0,
            preamble_remaining: 128,
            group: 0,
            element: 0,
            vr: VR::UN,
            length: 0,
            short_length: false,
            explicit_vr: true,
            switch_pending: false,
            sequences: Vec::new(),
            fragments: None,
            value: None,
            bump: None,
            arena: Arena::new(),
            root,
        }
    }

    /// The number of input bytes consumed so far.
    pub(crate) fn position(&self) -> u64 {
        self.position
    }

    /// Run stages until the buffer runs out of usable bytes.
    ///
    /// The cancellation token is observed before every stage iteration.
    pub(crate) fn advance(&mut self, buf: &mut SegmentedBuf, cancel: &CancelToken) -> Result<()> {
        loop {
            ensure!(
                !cancel.is_cancelled(),
                CancelledSnafu {
                    position: self.position
                }
            );
            let progressed = match self.stage {
                Stage::Preamble => self.step_preamble(buf)?,
                Stage::Group => self.step_group(buf),
                Stage::Element => self.step_element(buf)?,
                Stage::Vr => self.step_vr(buf)?,
                Stage::Length => self.step_length(buf)?,
                Stage::Value => self.step_value(buf)?,
            };
            if !progressed {
                return Ok(());
            }
        }
    }

    /// Conclude the parse after the pipe has completed and the buffer has
    /// been drained as far as possible.
    pub(crate) fn finish(self, buf: &SegmentedBuf) -> Result<DataSet> {
        ensure!(
            self.stage != Stage::Preamble,
            TooSmallSnafu {
                position: self.position
            }
        );
        let clean = self.stage == Stage::Group
            && buf.is_empty()
            && self.sequences.is_empty()
            && self.fragments.is_none();
        ensure!(
            clean,
            UnexpectedEndSnafu {
                position: self.position
            }
        );
        Ok(DataSet::new(self.arena, self.root, self.pools))
    }

    fn tag(&self) -> Tag {
        Tag(self.group, self.element)
    }

    fn step_preamble(&mut self, buf: &mut SegmentedBuf) -> Result<bool> {
        if self.preamble_remaining > 0 {
            let n = self.preamble_remaining.min(buf.len());
            buf.advance(n);
            self.position += n as u64;
            self.preamble_remaining -= n;
            if self.preamble_remaining > 0 {
                return Ok(false);
            }
        }
        let mut magic = [0u8; 4];
        if !buf.try_read_exact(&mut magic) {
            return Ok(false);
        }
        ensure!(
            &magic == b"DICM",
            BadPreambleSnafu {
                position: self.position
            }
        );
        self.position += 4;
        self.stage = Stage::Group;
        Ok(true)
    }

    fn step_group(&mut self, buf: &mut SegmentedBuf) -> bool {
        match buf.try_read_u16_le() {
            Some(group) => {
                self.group = group;
                self.position += 2;
                self.stage = Stage::Element;
                true
            }
            None => false,
        }
    }

    fn step_element(&mut self, buf: &mut SegmentedBuf) -> Result<bool> {
        let Some(element) = buf.try_read_u16_le() else {
            return Ok(false);
        };
        self.element = element;
        self.position += 2;

        if self.switch_pending && self.group > 0x0002 {
            self.explicit_vr = false;
            self.switch_pending = false;
            tracing::debug!(
                position = self.position,
                "file meta group ended, switching to implicit VR"
            );
        }

        let tag = self.tag();
        if tag.is_item_group() {
            // item and delimitation markers have no VR and no padding
            self.stage = Stage::Length;
            return Ok(true);
        }
        if self.fragments.is_some() {
            // a fragment sequence admits only item-group markers
            return MalformedItemSnafu {
                tag,
                position: self.position,
            }
            .fail();
        }
        if let Some(frame) = self.sequences.last() {
            // inside a sequence, elements may only occur within an open item
            ensure!(
                frame.open.is_some(),
                MalformedItemSnafu {
                    tag,
                    position: self.position
                }
            );
        }
        if self.explicit_vr {
            self.stage = Stage::Vr;
        } else {
            let vr = self
                .dict
                .by_tag(tag)
                .map(|entry| entry.vr())
                .unwrap_or(VR::UN);
            self.vr = if tag.is_group_length() && vr == VR::UN {
                VR::UL
            } else {
                vr
            };
            self.stage = Stage::Length;
        }
        Ok(true)
    }

    fn step_vr(&mut self, buf: &mut SegmentedBuf) -> Result<bool> {
        let mut bytes = [0u8; 2];
        if !buf.try_read_exact(&mut bytes) {
            return Ok(false);
        }
        let vr = VR::from_binary(bytes).context(UnknownVrSnafu {
            bytes,
            position: self.position,
        })?;
        self.vr = vr;
        self.position += 2;
        self.stage = Stage::Length;
        Ok(true)
    }

    fn step_length(&mut self, buf: &mut SegmentedBuf) -> Result<bool> {
        if self.group == 0xFFFE {
            let Some(len) = buf.try_read_u32_le() else {
                return Ok(false);
            };
            self.position += 4;
            return self.dispatch_item_marker(len);
        }

        if self.explicit_vr && !self.vr.has_32bit_length() {
            let Some(len) = buf.try_read_u16_le() else {
                return Ok(false);
            };
            self.position += 2;
            self.length = u32::from(len);
            self.short_length = true;
            return self.begin_value();
        }

        // 32-bit length, preceded by a reserved word in explicit VR
        if self.explicit_vr {
            let mut fields = [0u8; 6];
            if !buf.try_read_exact(&mut fields) {
                return Ok(false);
            }
            self.position += 6;
            self.length = LittleEndian::read_u32(&fields[2..]);
        } else {
            let Some(len) = buf.try_read_u32_le() else {
                return Ok(false);
            };
            self.position += 4;
            self.length = len;
        }
        self.short_length = false;

        if self.vr == VR::SQ {
            self.sequences.push(SequenceFrame {
                tag: self.tag(),
                items: Vec::new(),
                open: None,
            });
            self.stage = Stage::Group;
            return Ok(true);
        }
        if Length(self.length).is_undefined() {
            self.fragments = Some(FragmentFrame {
                tag: self.tag(),
                vr: self.vr,
                fragments: SmallVec::new(),
            });
            self.stage = Stage::Group;
            return Ok(true);
        }
        ensure!(
            self.length <= MAX_VALUE_LENGTH,
            ValueTooLargeSnafu {
                len: self.length,
                position: self.position
            }
        );
        self.begin_value()
    }

    /// Handle a marker of the item group (0xFFFE) after its length field.
    fn dispatch_item_marker(&mut self, len: u32) -> Result<bool> {
        let tag = self.tag();
        let position = self.position;
        match self.element {
            0xE000 => {
                if self.fragments.is_some() {
                    // the value of an item is the next fragment
                    ensure!(len <= MAX_VALUE_LENGTH, ValueTooLargeSnafu { len, position });
                    self.length = len;
                    self.short_length = false;
                    self.begin_value()
                } else if let Some(frame) = self.sequences.last_mut() {
                    ensure!(
                        Length(len).is_undefined(),
                        UnsupportedExplicitLengthItemSnafu { len, position }
                    );
                    // a new item may only open once the previous one closed
                    ensure!(frame.open.is_none(), MalformedItemSnafu { tag, position });
                    frame.open = Some(self.pools.item_tables.rent());
                    self.stage = Stage::Group;
                    Ok(true)
                } else {
                    MalformedItemSnafu { tag, position }.fail()
                }
            }
            0xE00D => {
                ensure!(len == 0, MalformedItemSnafu { tag, position });
                ensure!(
                    self.fragments.is_none(),
                    MalformedItemSnafu { tag, position }
                );
                let frame = self
                    .sequences
                    .last_mut()
                    .context(MalformedItemSnafu { tag, position })?;
                let item = frame
                    .open
                    .take()
                    .context(MalformedItemSnafu { tag, position })?;
                frame.items.push(item);
                self.stage = Stage::Group;
                Ok(true)
            }
            0xE0DD => {
                ensure!(len == 0, MalformedItemSnafu { tag, position });
                if let Some(frag) = self.fragments.take() {
                    let element = DataElement::fragments(frag.tag, frag.vr, frag.fragments);
                    self.insert(element)?;
                    self.stage = Stage::Group;
                    return Ok(true);
                }
                let frame = self
                    .sequences
                    .pop()
                    .context(MalformedItemSnafu { tag, position })?;
                ensure!(frame.open.is_none(), MalformedItemSnafu { tag, position });
                let element = DataElement::sequence(frame.tag, frame.items);
                self.insert(element)?;
                self.stage = Stage::Group;
                Ok(true)
            }
            _ => MalformedItemSnafu { tag, position }.fail(),
        }
    }

    /// Reserve the arena destination for the current value and move to the
    /// value stage; zero-length values complete on the spot.
    fn begin_value(&mut self) -> Result<bool> {
        if self.length == 0 {
            self.complete_value(RawSlice::EMPTY)?;
            return Ok(true);
        }
        let len = self.length as usize;
        let dst = if self.short_length {
            let bump = match self.bump {
                Some(bump) if self.arena.block_capacity(bump.block) - bump.offset >= len => bump,
                _ => {
                    let block = self.pools.small.rent(len.max(self.bump_block_size));
                    let index = self.arena.add_block(block);
                    BumpCursor {
                        block: index,
                        offset: 0,
                    }
                }
            };
            let dst = RawSlice {
                block: bump.block,
                start: bump.offset as u32,
                len: self.length,
            };
            self.bump = Some(BumpCursor {
                block: bump.block,
                offset: bump.offset + len,
            });
            dst
        } else {
            let pool = if len >= self.large_value_threshold {
                &self.pools.large
            } else {
                &self.pools.small
            };
            let block = pool.rent(len);
            let index = self.arena.add_block(block);
            RawSlice {
                block: index,
                start: 0,
                len: self.length,
            }
        };
        self.value = Some(ValueCursor { dst, written: 0 });
        self.stage = Stage::Value;
        Ok(true)
    }

    fn step_value(&mut self, buf: &mut SegmentedBuf) -> Result<bool> {
        let Some(cursor) = self.value.as_mut() else {
            return UnknownParseStageSnafu {
                position: self.position,
            }
            .fail();
        };
        let dst = cursor.dst;
        let start = (dst.start + cursor.written) as usize;
        let remaining = (dst.len - cursor.written) as usize;
        let target = &mut self.arena.block_mut(dst.block)[start..start + remaining];
        let copied = buf.copy_to(target);
        cursor.written += copied as u32;
        self.position += copied as u64;
        if cursor.written < dst.len {
            return Ok(false);
        }
        self.value = None;
        self.complete_value(dst)?;
        Ok(true)
    }

    /// Store the completed value and return to the group stage.
    fn complete_value(&mut self, dst: RawSlice) -> Result<()> {
        self.stage = Stage::Group;
        if let Some(frag) = self.fragments.as_mut() {
            frag.fragments.push(dst);
            return Ok(());
        }
        if self.group == 0x0002 && self.element == 0x0010 {
            let value = self.arena.slice(dst);
            if value == TS_IMPLICIT_VR_LE || value == TS_IMPLICIT_VR_LE_PADDED {
                self.switch_pending = true;
                tracing::debug!("transfer syntax is Implicit VR Little Endian");
            }
        }
        if self.element == 0x0000 {
            // group length pseudo-elements are not stored
            return Ok(());
        }
        let element = DataElement::raw(self.tag(), self.vr, dst);
        self.insert(element)
    }

    /// Insert an element into the innermost open item, or the root.
    fn insert(&mut self, element: DataElement) -> Result<()> {
        let tag = element.tag;
        let position = self.position;
        let table = match self.sequences.last_mut() {
            Some(frame) => frame
                .open
                .as_mut()
                .context(MalformedItemSnafu { tag, position })?,
            None => &mut self.root,
        };
        table
            .insert(element)
            .map_err(|tag| DuplicateTagSnafu { tag, position }.build())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipe::Segment;
    use part10_dictionary_std::StandardDataDictionary;

    fn decoder(pools: &Arc<Pools>) -> StatefulDecoder<StandardDataDictionary> {
        StatefulDecoder::new(
            StandardDataDictionary,
            Arc::clone(pools),
            16 * 1024,
            1024 * 1024,
        )
    }

    fn buf_from(pools: &Arc<Pools>, bytes: &[u8]) -> SegmentedBuf {
        let mut buf = SegmentedBuf::new();
        if !bytes.is_empty() {
            let mut block = pools.small.rent(bytes.len());
            block[..bytes.len()].copy_from_slice(bytes);
            buf.push(Segment::new(block, bytes.len()));
        }
        buf
    }

    fn file_head() -> Vec<u8> {
        let mut bytes = vec![0u8; 128];
        bytes.extend_from_slice(b"DICM");
        bytes
    }

    //  Tag: (0008,0060) Modality
    //  VR: CS, Length: 2, Value: "CT"
    const RAW_MODALITY: &[u8] = &[
        0x08, 0x00, 0x60, 0x00, b'C', b'S', 0x02, 0x00, b'C', b'T',
    ];

    #[test]
    fn decode_one_explicit_element() {
        let pools = Arc::new(Pools::new());
        let cancel = CancelToken::new();
        let mut bytes = file_head();
        bytes.extend_from_slice(RAW_MODALITY);

        let mut decoder = decoder(&pools);
        let mut buf = buf_from(&pools, &bytes);
        decoder.advance(&mut buf, &cancel).unwrap();
        let dataset = decoder.finish(&buf).unwrap();

        assert_eq!(dataset.len(), 1);
        assert_eq!(dataset.get_raw((0x0008, 0x0060)), Some(&b"CT"[..]));
        let element = dataset.get((0x0008, 0x0060)).unwrap();
        assert_eq!(element.vr(), VR::CS);
    }

    #[test]
    fn decode_is_resumable_at_any_byte() {
        let pools = Arc::new(Pools::new());
        let cancel = CancelToken::new();
        let mut bytes = file_head();
        bytes.extend_from_slice(RAW_MODALITY);

        let mut decoder = decoder(&pools);
        let mut buf = SegmentedBuf::new();
        for &byte in &bytes {
            let mut block = pools.small.rent(1);
            block[0] = byte;
            buf.push(Segment::new(block, 1));
            decoder.advance(&mut buf, &cancel).unwrap();
        }
        let dataset = decoder.finish(&buf).unwrap();
        assert_eq!(dataset.get_raw((0x0008, 0x0060)), Some(&b"CT"[..]));
    }

    #[test]
    fn unknown_vr_pair_fails() {
        let pools = Arc::new(Pools::new());
        let cancel = CancelToken::new();
        let mut bytes = file_head();
        bytes.extend_from_slice(&[0x08, 0x00, 0x60, 0x00, b'Z', b'Z', 0x02, 0x00]);

        let mut decoder = decoder(&pools);
        let mut buf = buf_from(&pools, &bytes);
        let error = decoder.advance(&mut buf, &cancel).unwrap_err();
        assert!(matches!(
            error,
            crate::error::Error::UnknownVr { bytes: [b'Z', b'Z'], .. }
        ));
    }

    #[test]
    fn orphan_item_delimitation_fails() {
        let pools = Arc::new(Pools::new());
        let cancel = CancelToken::new();
        let mut bytes = file_head();
        bytes.extend_from_slice(&[0xFE, 0xFF, 0x0D, 0xE0, 0x00, 0x00, 0x00, 0x00]);

        let mut decoder = decoder(&pools);
        let mut buf = buf_from(&pools, &bytes);
        let error = decoder.advance(&mut buf, &cancel).unwrap_err();
        assert!(matches!(
            error,
            crate::error::Error::MalformedItem { .. }
        ));
    }

    #[test]
    fn group_length_is_discarded() {
        let pools = Arc::new(Pools::new());
        let cancel = CancelToken::new();
        let mut bytes = file_head();
        // (0008,0000) UL 4, then the modality element
        bytes.extend_from_slice(&[
            0x08, 0x00, 0x00, 0x00, b'U', b'L', 0x04, 0x00, 0x0A, 0x00, 0x00, 0x00,
        ]);
        bytes.extend_from_slice(RAW_MODALITY);

        let mut decoder = decoder(&pools);
        let mut buf = buf_from(&pools, &bytes);
        decoder.advance(&mut buf, &cancel).unwrap();
        let dataset = decoder.finish(&buf).unwrap();

        assert_eq!(dataset.len(), 1);
        assert!(dataset.get((0x0008, 0x0000)).is_none());
    }

    #[test]
    fn stub_dictionary_falls_back_to_un_and_ul() {
        use part10_core::dictionary::stub::StubDataDictionary;

        let pools = Arc::new(Pools::new());
        let cancel = CancelToken::new();
        let mut bytes = file_head();
        // announce implicit VR, then one group length and one ordinary
        // element in the main data set
        bytes.extend_from_slice(&[
            0x02, 0x00, 0x10, 0x00, b'U', b'I', 0x12, 0x00,
        ]);
        bytes.extend_from_slice(b"1.2.840.10008.1.2\0");
        bytes.extend_from_slice(&[0x08, 0x00, 0x00, 0x00, 0x04, 0x00, 0x00, 0x00]);
        bytes.extend_from_slice(&10u32.to_le_bytes());
        bytes.extend_from_slice(&[0x08, 0x00, 0x18, 0x00, 0x04, 0x00, 0x00, 0x00]);
        bytes.extend_from_slice(b"1.2\0");

        let mut decoder =
            StatefulDecoder::new(StubDataDictionary, Arc::clone(&pools), 16 * 1024, 1024 * 1024);
        let mut buf = buf_from(&pools, &bytes);
        decoder.advance(&mut buf, &cancel).unwrap();
        let dataset = decoder.finish(&buf).unwrap();

        // with an empty dictionary every inferred VR is UN, except the
        // group length override
        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.get((0x0008, 0x0018)).unwrap().vr(), VR::UN);
        assert!(dataset.get((0x0008, 0x0000)).is_none());
    }

    #[test]
    fn cancellation_is_observed_between_stages() {
        let pools = Arc::new(Pools::new());
        let cancel = CancelToken::new();
        let mut bytes = file_head();
        bytes.extend_from_slice(RAW_MODALITY);

        let mut decoder = decoder(&pools);
        let mut buf = buf_from(&pools, &bytes);
        cancel.cancel();
        let error = decoder.advance(&mut buf, &cancel).unwrap_err();
        assert!(matches!(error, crate::error::Error::Cancelled { .. }));

        // dropping the decoder releases everything rented so far
        drop(decoder);
        drop(buf);
        assert_eq!(pools.outstanding_blocks(), 0);
    }
}
