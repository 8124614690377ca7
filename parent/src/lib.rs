//! This crate serves as a parent for the library crates of the part10
//! project, an incremental parser for DICOM Part 10 files.
//!
//! For parsing files, see [`parser`], or use the re-exported entry points
//! directly:
//!
//! ```no_run
//! # fn main() -> Result<(), part10::Error> {
//! let dataset = part10::open_file("image.dcm")?;
//! # Ok(())
//! # }
//! ```
pub use part10_core as core;
pub use part10_dictionary_std as dictionary_std;
pub use part10_parser as parser;

pub use part10_core::{Length, Tag, VR};
pub use part10_parser::{open_file, parse, parse_with_options, DataSet, Error, ParseOptions};
