//! This crate contains the base types required for interpreting DICOM data
//! elements: the attribute tag, the value representation, and the element
//! length, as well as the data dictionary abstraction used for value
//! representation inference under _Implicit VR Little Endian_.
//!
//! The types herein carry no I/O logic. Actual data set parsing is provided
//! by the `part10-parser` crate.

pub mod dictionary;
pub mod header;

pub use crate::dictionary::DataDictionary;
pub use crate::header::{Length, Tag, VR};
