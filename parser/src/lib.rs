//! An incremental, allocation-conscious parser for DICOM Part 10 files.
//!
//! The parser consumes a byte source through a bounded segment pipe: a
//! producer task fills fixed-size blocks from the source while the consumer
//! drives a resumable state machine over the buffered segments. The machine
//! tolerates the source delivering arbitrarily small chunks, with value and
//! length fields falling anywhere across segment boundaries.
//!
//! All value bytes of the resulting [`DataSet`] live in pooled arena blocks
//! owned by the data set; the views handed out by its accessors borrow from
//! it, and dropping the data set returns every block to its pool.
//!
//! ```no_run
//! use part10_parser::open_file;
//!
//! # fn main() -> Result<(), part10_parser::Error> {
//! let dataset = open_file("image.dcm")?;
//! if let Some(uid) = dataset.get_raw((0x0008, 0x0018)) {
//!     println!("SOP Instance UID: {}", String::from_utf8_lossy(uid));
//! }
//! # Ok(())
//! # }
//! ```

mod arena;
pub mod dataset;
pub mod error;
mod pipe;
mod pool;
mod stateful;

use snafu::{ensure, ResultExt};
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

use part10_dictionary_std::StandardDataDictionary;

use crate::error::{CancelledSnafu, ReadSourceSnafu};
use crate::pipe::{BytePipe, FillOutcome, Segment, SegmentedBuf};
use crate::stateful::decode::StatefulDecoder;

pub use crate::dataset::{DataSet, ElementRef, Elements, Fragments, ItemRef, Items, ItemsIter};
pub use crate::error::{Error, Result};
pub use crate::pool::Pools;

const KIB: usize = 1024;
const MIB: usize = 1024 * 1024;

/// A shareable cancellation signal.
///
/// Cancelling stops the producer from reading the source and makes the
/// consumer surface [`Error::Cancelled`] before its next stage iteration,
/// after releasing every arena block rented for the in-flight data set.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    /// Create a token in the not-cancelled state.
    pub fn new() -> Self {
        CancelToken::default()
    }

    /// Signal cancellation to every holder of this token.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    /// Whether cancellation has been signalled.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
}

/// The set of options for a parse invocation.
///
/// The defaults match the intended deployment sizes; they are exposed for
/// tuning and for tests that need small buffers to exercise boundaries.
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// The size of the blocks the producer fills from the source.
    pub pipe_block_size: usize,
    /// The number of buffered pipe bytes above which the producer suspends.
    pub pipe_capacity: usize,
    /// The size of the shared block that short values bump-allocate from.
    pub bump_block_size: usize,
    /// Value length at and above which a dedicated block comes from the
    /// large pool instead of the small pool.
    pub large_value_threshold: usize,
    /// Cancellation signal observed by both pipeline tasks.
    pub cancel: Option<CancelToken>,
    /// The pools to rent blocks and tables from.
    /// Defaults to the process-scoped set.
    pub pools: Option<Arc<Pools>>,
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions {
            pipe_block_size: MIB,
            pipe_capacity: 4 * MIB,
            bump_block_size: 16 * KIB,
            large_value_threshold: MIB,
            cancel: None,
            pools: None,
        }
    }
}

impl ParseOptions {
    /// Replace the pipe block size.
    pub fn pipe_block_size(mut self, size: usize) -> Self {
        self.pipe_block_size = size;
        self
    }

    /// Replace the pipe capacity.
    pub fn pipe_capacity(mut self, capacity: usize) -> Self {
        self.pipe_capacity = capacity;
        self
    }

    /// Replace the bump block size.
    pub fn bump_block_size(mut self, size: usize) -> Self {
        self.bump_block_size = size;
        self
    }

    /// Replace the small/large pool threshold.
    pub fn large_value_threshold(mut self, threshold: usize) -> Self {
        self.large_value_threshold = threshold;
        self
    }

    /// Attach a cancellation token.
    pub fn cancel(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Use a private pool set instead of the process-scoped one.
    pub fn pools(mut self, pools: Arc<Pools>) -> Self {
        self.pools = Some(pools);
        self
    }
}

/// Parse a complete DICOM Part 10 stream into a data set.
///
/// The source is read to completion. On success the returned [`DataSet`]
/// owns all parsed values; on failure no partial data is returned and all
/// rented blocks have been released.
pub fn parse<R>(source: R) -> Result<DataSet>
where
    R: Read + Send,
{
    parse_with_options(source, &ParseOptions::default())
}

/// Parse a complete DICOM Part 10 stream with the given options.
pub fn parse_with_options<R>(source: R, options: &ParseOptions) -> Result<DataSet>
where
    R: Read + Send,
{
    let pools = options
        .pools
        .clone()
        .unwrap_or_else(Pools::shared);
    let cancel = options.cancel.clone().unwrap_or_default();
    let pipe = BytePipe::new(options.pipe_capacity);

    thread::scope(|scope| {
        {
            let pipe = &pipe;
            let pools = &pools;
            let cancel = &cancel;
            let block_size = options.pipe_block_size;
            scope.spawn(move || pump(source, pipe, pools, block_size, cancel));
        }
        let result = drive(&pipe, &pools, options, &cancel);
        // unblock the producer if it is suspended on backpressure
        pipe.close_reader();
        result
    })
}

/// Open and parse a DICOM Part 10 file from the file system.
pub fn open_file<P>(path: P) -> Result<DataSet>
where
    P: AsRef<Path>,
{
    let file = File::open(path).context(ReadSourceSnafu { position: 0u64 })?;
    parse(file)
}

/// The producer task: fill blocks from the source and publish them.
fn pump<R>(mut source: R, pipe: &BytePipe, pools: &Arc<Pools>, block_size: usize, cancel: &CancelToken)
where
    R: Read,
{
    loop {
        if cancel.is_cancelled() {
            pipe.complete();
            return;
        }
        let mut block = pools.small.rent(block_size);
        let read = match source.read(&mut block[..block_size]) {
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => {
                pipe.fail(e);
                return;
            }
        };
        if read == 0 {
            pipe.complete();
            return;
        }
        if !pipe.write(Segment::new(block, read)) {
            // the read side is gone; stop without completing
            return;
        }
    }
}

/// The consumer task: drive the state machine over the pipe.
fn drive(
    pipe: &BytePipe,
    pools: &Arc<Pools>,
    options: &ParseOptions,
    cancel: &CancelToken,
) -> Result<DataSet> {
    let mut decoder = StatefulDecoder::new(
        StandardDataDictionary,
        Arc::clone(pools),
        options.bump_block_size,
        options.large_value_threshold,
    );
    let mut buf = SegmentedBuf::new();
    loop {
        decoder.advance(&mut buf, cancel)?;
        match pipe.fill(&mut buf) {
            Ok(FillOutcome::Data) => {}
            Ok(FillOutcome::Completed) => {
                ensure!(
                    !cancel.is_cancelled(),
                    CancelledSnafu {
                        position: decoder.position()
                    }
                );
                return decoder.finish(&buf);
            }
            Err(source) => {
                return Err(source).context(ReadSourceSnafu {
                    position: decoder.position(),
                });
            }
        }
    }
}
