//! This crate implements the standard attribute dictionary.
//!
//! The dictionary is a singleton containing the attributes that the parser
//! needs to resolve value representations under
//! _Implicit VR Little Endian_, plus the usual identification attributes of
//! imaging data sets. It is a curated subset of DICOM PS3.6; attributes not
//! listed here simply fall back to the `UN` value representation, which the
//! parser treats as raw bytes.

pub mod tags;

use crate::tags::ENTRIES;
use once_cell::sync::Lazy;
use part10_core::dictionary::{
    DataDictionary, DataDictionaryEntryRef, TagRange::*,
};
use part10_core::header::Tag;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::fmt::{Display, Formatter};

static DICT: Lazy<StandardDataDictionaryRegistry> = Lazy::new(init_dictionary);

/// Retrieve a singleton instance of the standard dictionary registry.
///
/// Note that one does not generally have to call this
/// unless when retrieving the underlying registry is important.
/// The unit type [`StandardDataDictionary`]
/// already provides a lazy loaded singleton implementing the necessary traits.
#[inline]
pub fn registry() -> &'static StandardDataDictionaryRegistry {
    &DICT
}

/// The data struct actually containing the standard dictionary.
///
/// This structure is made opaque via the unit type [`StandardDataDictionary`],
/// which provides a lazy loaded singleton.
#[derive(Debug)]
pub struct StandardDataDictionaryRegistry {
    /// mapping: name → entry
    by_name: HashMap<&'static str, &'static DataDictionaryEntryRef<'static>>,
    /// mapping: tag → entry
    by_tag: HashMap<Tag, &'static DataDictionaryEntryRef<'static>>,
    /// repeating elements of the form (ggxx, eeee). The `xx` portion is zeroed.
    repeating_ggxx: HashSet<Tag>,
    /// repeating elements of the form (gggg, eexx). The `xx` portion is zeroed.
    repeating_eexx: HashSet<Tag>,
}

impl StandardDataDictionaryRegistry {
    fn new() -> StandardDataDictionaryRegistry {
        StandardDataDictionaryRegistry {
            by_name: HashMap::with_capacity(ENTRIES.len()),
            by_tag: HashMap::with_capacity(ENTRIES.len()),
            repeating_ggxx: HashSet::new(),
            repeating_eexx: HashSet::new(),
        }
    }

    /// record the given dictionary entry reference
    fn index(&mut self, entry: &'static DataDictionaryEntryRef<'static>) -> &mut Self {
        self.by_name.insert(entry.alias, entry);
        self.by_tag.insert(entry.tag.inner(), entry);
        match entry.tag {
            Group100(tag) => {
                self.repeating_ggxx.insert(tag);
            }
            Element100(tag) => {
                self.repeating_eexx.insert(tag);
            }
            _ => {}
        }
        self
    }
}

/// A data dictionary which consults
/// the library's standard attribute registry.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StandardDataDictionary;

impl StandardDataDictionary {
    fn indexed_tag(tag: Tag) -> Option<&'static DataDictionaryEntryRef<'static>> {
        let r = registry();

        r.by_tag.get(&tag).copied().or_else(|| {
            let group_trimmed = Tag(tag.0 & 0xFF00, tag.1);

            if r.repeating_ggxx.contains(&group_trimmed) {
                return r.by_tag.get(&group_trimmed).copied();
            }
            let elem_trimmed = Tag(tag.0, tag.1 & 0xFF00);
            if r.repeating_eexx.contains(&elem_trimmed) {
                return r.by_tag.get(&elem_trimmed).copied();
            }
            None
        })
    }
}

impl DataDictionary for StandardDataDictionary {
    type Entry = DataDictionaryEntryRef<'static>;

    fn by_name(&self, name: &str) -> Option<&Self::Entry> {
        registry().by_name.get(name).copied()
    }

    fn by_tag(&self, tag: Tag) -> Option<&Self::Entry> {
        StandardDataDictionary::indexed_tag(tag)
    }
}

impl Display for StandardDataDictionary {
    fn fmt(&self, f: &mut Formatter) -> Result<(), fmt::Error> {
        f.write_str("Standard DICOM Data Dictionary")
    }
}

fn init_dictionary() -> StandardDataDictionaryRegistry {
    let mut d = StandardDataDictionaryRegistry::new();
    for entry in ENTRIES {
        d.index(entry);
    }
    d
}

#[cfg(test)]
mod tests {
    use super::StandardDataDictionary;
    use part10_core::dictionary::{DataDictionary, DataDictionaryEntryRef, TagRange::*};
    use part10_core::header::{Tag, VR};

    // tests for just a few attributes to make sure that the entries
    // were well installed into the crate
    #[test]
    fn smoke_test() {
        let dict = StandardDataDictionary;

        assert_eq!(
            dict.by_name("PatientName"),
            Some(&DataDictionaryEntryRef {
                tag: Single(Tag(0x0010, 0x0010)),
                alias: "PatientName",
                vr: VR::PN,
            })
        );

        assert_eq!(
            dict.by_name("Modality"),
            Some(&DataDictionaryEntryRef {
                tag: Single(Tag(0x0008, 0x0060)),
                alias: "Modality",
                vr: VR::CS,
            })
        );

        let pixel_data = dict
            .by_tag(Tag(0x7FE0, 0x0010))
            .expect("Pixel Data attribute should exist");
        assert_eq!(pixel_data.alias, "PixelData");
        assert_eq!(pixel_data.vr, VR::OW);

        let code_meaning = dict
            .by_tag(Tag(0x0008, 0x0104))
            .expect("Code Meaning attribute should exist");
        assert_eq!(code_meaning.vr, VR::LO);
    }

    #[test]
    fn repeating_group_resolution() {
        let dict = StandardDataDictionary;

        // any overlay group resolves through the (60xx,3000) range
        for group in [0x6000, 0x6002, 0x60FE] {
            let entry = dict
                .by_tag(Tag(group, 0x3000))
                .expect("Overlay Data attribute should exist");
            assert_eq!(entry.alias, "OverlayData");
            assert_eq!(entry.vr, VR::OW);
        }

        // outside the open digits there is no match
        assert!(dict.by_tag(Tag(0x6100, 0x3000)).is_none());
        assert!(dict.by_tag(Tag(0x6000, 0x3001)).is_none());
    }

    #[test]
    fn unknown_tags_resolve_to_none() {
        let dict = StandardDataDictionary;
        assert!(dict.by_tag(Tag(0x4321, 0x1234)).is_none());
        assert!(dict.by_name("ThisAttributeDoesNotExist").is_none());
    }
}
