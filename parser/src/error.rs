//! Error types raised while parsing a DICOM Part 10 stream.
//!
//! Every variant carries the byte offset at which the condition was
//! detected, counted from the beginning of the input (the preamble is
//! offset 0).

use part10_core::Tag;
use snafu::{Backtrace, Snafu};

/// The error type for a failed parse.
///
/// All format errors are fatal to the current parse: no partial data set is
/// returned, and every arena block rented for the in-flight data set is
/// released before the error surfaces.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
#[non_exhaustive]
pub enum Error {
    /// The input ended before the 132-byte file head
    /// (128-byte preamble plus `DICM` magic code).
    #[snafu(display("Input too small: ended at {} bytes, before the end of the file head", position))]
    TooSmall { position: u64, backtrace: Backtrace },

    /// The four bytes at offset 128 are not the `DICM` magic code.
    #[snafu(display("Bad preamble: no `DICM` magic code at offset 128"))]
    BadPreamble { position: u64, backtrace: Backtrace },

    /// An explicit-VR element header holds a byte pair which is not a known
    /// value representation.
    #[snafu(display(
        "Unknown VR code {:?} at position {}",
        String::from_utf8_lossy(bytes),
        position
    ))]
    UnknownVr {
        bytes: [u8; 2],
        position: u64,
        backtrace: Backtrace,
    },

    /// An item or delimitation marker appeared where the current nesting
    /// state does not admit it.
    #[snafu(display("Malformed item or delimitation {} at position {}", tag, position))]
    MalformedItem {
        tag: Tag,
        position: u64,
        backtrace: Backtrace,
    },

    /// A sequence item declared an explicit byte length.
    /// Only undefined-length (delimiter-terminated) items are supported.
    #[snafu(display(
        "Unsupported explicit length {} for sequence item at position {}",
        len,
        position
    ))]
    UnsupportedExplicitLengthItem {
        len: u32,
        position: u64,
        backtrace: Backtrace,
    },

    /// A value length field exceeds the maximum supported payload size.
    #[snafu(display("Value length {} at position {} exceeds the supported maximum", len, position))]
    ValueTooLarge {
        len: u32,
        position: u64,
        backtrace: Backtrace,
    },

    /// The input completed in the middle of an element or with an open
    /// sequence or fragment container.
    #[snafu(display("Unexpected end of input at position {}", position))]
    UnexpectedEnd { position: u64, backtrace: Backtrace },

    /// The state machine reached a stage it does not know.
    /// This is a programmer error and must not occur.
    #[snafu(display("Unknown parse stage at position {}", position))]
    UnknownParseStage { position: u64, backtrace: Backtrace },

    /// A cancellation signal was observed.
    #[snafu(display("Parse cancelled at position {}", position))]
    Cancelled { position: u64 },

    /// The underlying byte source failed.
    #[snafu(display("Could not read from source at position {}", position))]
    ReadSource {
        position: u64,
        source: std::io::Error,
        backtrace: Backtrace,
    },

    /// The same tag appeared twice at one data set level.
    #[snafu(display("Duplicate tag {} at position {}", tag, position))]
    DuplicateTag {
        tag: Tag,
        position: u64,
        backtrace: Backtrace,
    },
}

impl Error {
    /// The input byte offset at which the error was detected.
    pub fn position(&self) -> u64 {
        match self {
            Error::TooSmall { position, .. }
            | Error::BadPreamble { position, .. }
            | Error::UnknownVr { position, .. }
            | Error::MalformedItem { position, .. }
            | Error::UnsupportedExplicitLengthItem { position, .. }
            | Error::ValueTooLarge { position, .. }
            | Error::UnexpectedEnd { position, .. }
            | Error::UnknownParseStage { position, .. }
            | Error::Cancelled { position }
            | Error::ReadSource { position, .. }
            | Error::DuplicateTag { position, .. } => *position,
        }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
