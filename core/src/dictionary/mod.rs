//! This module contains the concept of a DICOM data dictionary.
//!
//! A data dictionary maps attribute tags to the information needed to decode
//! them, most importantly the value representation to assume when parsing
//! data sets in _Implicit VR Little Endian_. The standard attribute
//! dictionary is available in the `part10-dictionary-std` crate.

pub mod stub;

use crate::header::{Tag, VR};
use std::fmt::Debug;

/// Specification of a range of tags pertaining to an attribute.
/// Most attributes are uniquely identified by a specific `(group, element)`
/// pair, but some occupy a range of groups or elements
/// (e.g. _Overlay Data_ is `(60xx,3000)`).
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum TagRange {
    /// Only a specific tag
    Single(Tag),
    /// The two rightmost digits of the _group_ portion are open:
    /// `(GGxx,EEEE)`
    Group100(Tag),
    /// The two rightmost digits of the _element_ portion are open:
    /// `(GGGG,EExx)`
    Element100(Tag),
}

impl TagRange {
    /// Retrieve the inner tag representation of this range,
    /// with any open digits zeroed out.
    pub fn inner(self) -> Tag {
        match self {
            TagRange::Single(tag) => tag,
            TagRange::Group100(tag) => tag,
            TagRange::Element100(tag) => tag,
        }
    }
}

/// The dictionary entry data type, representing a DICOM attribute.
pub trait DataDictionaryEntry {
    /// The full possible tag range of the attribute.
    fn tag_range(&self) -> TagRange;

    /// The attribute single tag, with any open range digits zeroed out.
    fn tag(&self) -> Tag {
        self.tag_range().inner()
    }

    /// The alias of the attribute, with no spaces, usually in UpperCamelCase.
    fn alias(&self) -> &str;

    /// The value representation of the attribute.
    fn vr(&self) -> VR;
}

/// A data type for a dictionary entry using string slices
/// for its alias, with a `'static` lifetime in the typical case.
#[derive(Debug, PartialEq, Clone, Copy)]
pub struct DataDictionaryEntryRef<'a> {
    /// The attribute tag range
    pub tag: TagRange,
    /// The alias of the attribute, with no spaces, usually in UpperCamelCase
    pub alias: &'a str,
    /// The value representation of the attribute
    pub vr: VR,
}

impl<'a> DataDictionaryEntry for DataDictionaryEntryRef<'a> {
    fn tag_range(&self) -> TagRange {
        self.tag
    }

    fn alias(&self) -> &str {
        self.alias
    }

    fn vr(&self) -> VR {
        self.vr
    }
}

/// Type trait for a dictionary of DICOM attributes.
///
/// Attribute dictionaries provide the means to convert a tag to an alias and
/// vice versa, as well as to look up the value representation to assume when
/// the transfer syntax does not encode it inline.
pub trait DataDictionary: Debug {
    /// The type of the dictionary entry.
    type Entry: DataDictionaryEntry;

    /// Fetch an entry by its usual alias (e.g. "PatientName" or "SOPInstanceUID").
    /// Aliases are usually case sensitive and not separated by spaces.
    fn by_name(&self, name: &str) -> Option<&Self::Entry>;

    /// Fetch an entry by its tag.
    fn by_tag(&self, tag: Tag) -> Option<&Self::Entry>;
}

impl<T> DataDictionary for &T
where
    T: DataDictionary,
{
    type Entry = T::Entry;

    fn by_name(&self, name: &str) -> Option<&T::Entry> {
        (**self).by_name(name)
    }

    fn by_tag(&self, tag: Tag) -> Option<&T::Entry> {
        (**self).by_tag(tag)
    }
}
