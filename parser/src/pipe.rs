//! The byte pipe connecting the producer task to the parse state machine.
//!
//! The producer publishes filled blocks as segments and suspends when the
//! pipe holds too many unread bytes; the consumer drains segments into a
//! [`SegmentedBuf`] and reads typed fields from it. Field reads only
//! consume whole fields: a field split across segment boundaries stays
//! buffered (examined but not consumed) until the missing bytes arrive.

use byteordered::byteorder::{ByteOrder, LittleEndian};
use std::collections::VecDeque;
use std::io;
use std::sync::{Condvar, Mutex};

use crate::pool::PoolBlock;

/// A filled byte block published by the producer.
/// `start..end` is the unread window within the block.
#[derive(Debug)]
pub(crate) struct Segment {
    block: PoolBlock,
    start: usize,
    end: usize,
}

impl Segment {
    pub(crate) fn new(block: PoolBlock, len: usize) -> Self {
        debug_assert!(len <= block.len());
        Segment {
            block,
            start: 0,
            end: len,
        }
    }

    fn len(&self) -> usize {
        self.end - self.start
    }

    fn as_slice(&self) -> &[u8] {
        &self.block[self.start..self.end]
    }
}

/// Outcome of waiting on the pipe for more data.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum FillOutcome {
    /// At least one new segment was moved into the consumer buffer.
    Data,
    /// The producer completed and no unread segments remain in the pipe.
    Completed,
}

#[derive(Debug)]
struct PipeShared {
    segments: VecDeque<Segment>,
    /// total unread bytes across `segments`
    buffered: usize,
    completed: bool,
    failed: Option<io::Error>,
    reader_closed: bool,
}

/// A bounded pipe of byte segments with producer backpressure.
#[derive(Debug)]
pub(crate) struct BytePipe {
    shared: Mutex<PipeShared>,
    readable: Condvar,
    writable: Condvar,
    capacity: usize,
}

impl BytePipe {
    pub(crate) fn new(capacity: usize) -> Self {
        BytePipe {
            shared: Mutex::new(PipeShared {
                segments: VecDeque::new(),
                buffered: 0,
                completed: false,
                failed: None,
                reader_closed: false,
            }),
            readable: Condvar::new(),
            writable: Condvar::new(),
            capacity,
        }
    }

    /// Publish a segment, waiting while the pipe is over capacity.
    /// Returns `false` if the read side has been closed, in which case the
    /// segment is dropped and the producer should stop.
    pub(crate) fn write(&self, segment: Segment) -> bool {
        let mut shared = self.shared.lock().unwrap();
        while shared.buffered >= self.capacity && !shared.reader_closed {
            shared = self.writable.wait(shared).unwrap();
        }
        if shared.reader_closed {
            return false;
        }
        shared.buffered += segment.len();
        shared.segments.push_back(segment);
        drop(shared);
        self.readable.notify_one();
        true
    }

    /// Signal that no further segments will be written.
    pub(crate) fn complete(&self) {
        let mut shared = self.shared.lock().unwrap();
        shared.completed = true;
        drop(shared);
        self.readable.notify_one();
    }

    /// Signal that the producer failed; implies completion.
    pub(crate) fn fail(&self, error: io::Error) {
        let mut shared = self.shared.lock().unwrap();
        shared.failed = Some(error);
        shared.completed = true;
        drop(shared);
        self.readable.notify_one();
    }

    /// Close the read side. Buffered segments are released and any blocked
    /// producer is woken so it can observe the closure instead of hanging.
    pub(crate) fn close_reader(&self) {
        let mut shared = self.shared.lock().unwrap();
        shared.reader_closed = true;
        shared.segments.clear();
        shared.buffered = 0;
        drop(shared);
        self.writable.notify_one();
    }

    /// Move every available segment into the consumer buffer, waiting for
    /// the producer when the pipe is empty and not yet completed.
    pub(crate) fn fill(&self, buf: &mut SegmentedBuf) -> io::Result<FillOutcome> {
        let mut shared = self.shared.lock().unwrap();
        loop {
            if !shared.segments.is_empty() {
                while let Some(segment) = shared.segments.pop_front() {
                    shared.buffered -= segment.len();
                    buf.push(segment);
                }
                drop(shared);
                self.writable.notify_one();
                return Ok(FillOutcome::Data);
            }
            if let Some(error) = shared.failed.take() {
                return Err(error);
            }
            if shared.completed {
                return Ok(FillOutcome::Completed);
            }
            shared = self.readable.wait(shared).unwrap();
        }
    }
}

/// The consumer-side buffer of unconsumed segments.
///
/// This is the single "try to read N bytes" seam of the parser: every typed
/// read either consumes a whole field or consumes nothing, whichever way the
/// field falls across segment boundaries. Fully consumed segments release
/// their blocks back to the pool immediately.
#[derive(Debug, Default)]
pub(crate) struct SegmentedBuf {
    segments: VecDeque<Segment>,
    len: usize,
}

impl SegmentedBuf {
    pub(crate) fn new() -> Self {
        SegmentedBuf::default()
    }

    pub(crate) fn len(&self) -> usize {
        self.len
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub(crate) fn push(&mut self, segment: Segment) {
        self.len += segment.len();
        if segment.len() > 0 {
            self.segments.push_back(segment);
        }
    }

    /// Copy `out.len()` bytes from the front without consuming them.
    /// Returns `false` when fewer bytes are buffered.
    fn peek(&self, out: &mut [u8]) -> bool {
        if self.len < out.len() {
            return false;
        }
        // single-segment fast path
        if let Some(first) = self.segments.front() {
            if first.len() >= out.len() {
                out.copy_from_slice(&first.as_slice()[..out.len()]);
                return true;
            }
        }
        let mut filled = 0;
        for segment in &self.segments {
            let bytes = segment.as_slice();
            let take = bytes.len().min(out.len() - filled);
            out[filled..filled + take].copy_from_slice(&bytes[..take]);
            filled += take;
            if filled == out.len() {
                break;
            }
        }
        true
    }

    /// Consume `n` buffered bytes. Panics if fewer are buffered.
    pub(crate) fn advance(&mut self, n: usize) {
        assert!(n <= self.len, "advanced past the buffered window");
        let mut remaining = n;
        while remaining > 0 {
            let segment = self.segments.front_mut().expect("buffered bytes");
            let take = segment.len().min(remaining);
            segment.start += take;
            remaining -= take;
            if segment.len() == 0 {
                // releases the block back to its pool
                self.segments.pop_front();
            }
        }
        self.len -= n;
    }

    /// Read one little-endian 16-bit unsigned integer, or `None` when
    /// fewer than 2 bytes are buffered.
    pub(crate) fn try_read_u16_le(&mut self) -> Option<u16> {
        let mut bytes = [0u8; 2];
        if !self.peek(&mut bytes) {
            return None;
        }
        self.advance(2);
        Some(LittleEndian::read_u16(&bytes))
    }

    /// Read one little-endian 32-bit unsigned integer, or `None` when
    /// fewer than 4 bytes are buffered.
    pub(crate) fn try_read_u32_le(&mut self) -> Option<u32> {
        let mut bytes = [0u8; 4];
        if !self.peek(&mut bytes) {
            return None;
        }
        self.advance(4);
        Some(LittleEndian::read_u32(&bytes))
    }

    /// Read `out.len()` bytes into `out`, or nothing when fewer are
    /// buffered.
    pub(crate) fn try_read_exact(&mut self, out: &mut [u8]) -> bool {
        if !self.peek(out) {
            return false;
        }
        self.advance(out.len());
        true
    }

    /// Consume up to `out.len()` bytes into `out`, greedily.
    /// Returns the number of bytes copied.
    pub(crate) fn copy_to(&mut self, out: &mut [u8]) -> usize {
        let total = self.len.min(out.len());
        let mut filled = 0;
        while filled < total {
            let segment = self.segments.front_mut().expect("buffered bytes");
            let bytes = segment.as_slice();
            let take = bytes.len().min(total - filled);
            out[filled..filled + take].copy_from_slice(&bytes[..take]);
            segment.start += take;
            filled += take;
            if segment.len() == 0 {
                self.segments.pop_front();
            }
        }
        self.len -= total;
        total
    }
}
