//! Named tag constants and the attribute entry table.
//!
//! The table is a curated subset of the registry of DICOM data elements
//! in PS3.6, covering file meta information, patient/study/series/instance
//! identification, image pixel description, common code and reference
//! sequences, overlay groups, and pixel data.

use part10_core::dictionary::DataDictionaryEntryRef;
use part10_core::dictionary::TagRange::*;
use part10_core::header::{Tag, VR};

/// File Meta Information Group Length (0002,0000)
pub const FILE_META_INFORMATION_GROUP_LENGTH: Tag = Tag(0x0002, 0x0000);
/// Media Storage SOP Class UID (0002,0002)
pub const MEDIA_STORAGE_SOP_CLASS_UID: Tag = Tag(0x0002, 0x0002);
/// Media Storage SOP Instance UID (0002,0003)
pub const MEDIA_STORAGE_SOP_INSTANCE_UID: Tag = Tag(0x0002, 0x0003);
/// Transfer Syntax UID (0002,0010)
pub const TRANSFER_SYNTAX_UID: Tag = Tag(0x0002, 0x0010);
/// Implementation Class UID (0002,0012)
pub const IMPLEMENTATION_CLASS_UID: Tag = Tag(0x0002, 0x0012);
/// Specific Character Set (0008,0005)
pub const SPECIFIC_CHARACTER_SET: Tag = Tag(0x0008, 0x0005);
/// SOP Class UID (0008,0016)
pub const SOP_CLASS_UID: Tag = Tag(0x0008, 0x0016);
/// SOP Instance UID (0008,0018)
pub const SOP_INSTANCE_UID: Tag = Tag(0x0008, 0x0018);
/// Modality (0008,0060)
pub const MODALITY: Tag = Tag(0x0008, 0x0060);
/// Code Value (0008,0100)
pub const CODE_VALUE: Tag = Tag(0x0008, 0x0100);
/// Coding Scheme Designator (0008,0102)
pub const CODING_SCHEME_DESIGNATOR: Tag = Tag(0x0008, 0x0102);
/// Code Meaning (0008,0104)
pub const CODE_MEANING: Tag = Tag(0x0008, 0x0104);
/// Series Description (0008,103E)
pub const SERIES_DESCRIPTION: Tag = Tag(0x0008, 0x103E);
/// Referenced SOP Class UID (0008,1150)
pub const REFERENCED_SOP_CLASS_UID: Tag = Tag(0x0008, 0x1150);
/// Referenced SOP Instance UID (0008,1155)
pub const REFERENCED_SOP_INSTANCE_UID: Tag = Tag(0x0008, 0x1155);
/// Source Image Sequence (0008,2112)
pub const SOURCE_IMAGE_SEQUENCE: Tag = Tag(0x0008, 0x2112);
/// Patient Name (0010,0010)
pub const PATIENT_NAME: Tag = Tag(0x0010, 0x0010);
/// Patient ID (0010,0020)
pub const PATIENT_ID: Tag = Tag(0x0010, 0x0020);
/// Study Instance UID (0020,000D)
pub const STUDY_INSTANCE_UID: Tag = Tag(0x0020, 0x000D);
/// Series Instance UID (0020,000E)
pub const SERIES_INSTANCE_UID: Tag = Tag(0x0020, 0x000E);
/// Rows (0028,0010)
pub const ROWS: Tag = Tag(0x0028, 0x0010);
/// Columns (0028,0011)
pub const COLUMNS: Tag = Tag(0x0028, 0x0011);
/// Rescale Type (0028,1054)
pub const RESCALE_TYPE: Tag = Tag(0x0028, 0x1054);
/// Placer Order Number / Imaging Service Request (0040,2016)
pub const PLACER_ORDER_NUMBER_IMAGING_SERVICE_REQUEST: Tag = Tag(0x0040, 0x2016);
/// Purpose of Reference Code Sequence (0040,A170)
pub const PURPOSE_OF_REFERENCE_CODE_SEQUENCE: Tag = Tag(0x0040, 0xA170);
/// Pixel Data (7FE0,0010)
pub const PIXEL_DATA: Tag = Tag(0x7FE0, 0x0010);

/// The complete attribute entry table of this dictionary.
pub static ENTRIES: &[DataDictionaryEntryRef<'static>] = &[
    DataDictionaryEntryRef { tag: Single(Tag(0x0002, 0x0000)), alias: "FileMetaInformationGroupLength", vr: VR::UL },
    DataDictionaryEntryRef { tag: Single(Tag(0x0002, 0x0001)), alias: "FileMetaInformationVersion", vr: VR::OB },
    DataDictionaryEntryRef { tag: Single(Tag(0x0002, 0x0002)), alias: "MediaStorageSOPClassUID", vr: VR::UI },
    DataDictionaryEntryRef { tag: Single(Tag(0x0002, 0x0003)), alias: "MediaStorageSOPInstanceUID", vr: VR::UI },
    DataDictionaryEntryRef { tag: Single(Tag(0x0002, 0x0010)), alias: "TransferSyntaxUID", vr: VR::UI },
    DataDictionaryEntryRef { tag: Single(Tag(0x0002, 0x0012)), alias: "ImplementationClassUID", vr: VR::UI },
    DataDictionaryEntryRef { tag: Single(Tag(0x0002, 0x0013)), alias: "ImplementationVersionName", vr: VR::SH },
    DataDictionaryEntryRef { tag: Single(Tag(0x0002, 0x0016)), alias: "SourceApplicationEntityTitle", vr: VR::AE },
    DataDictionaryEntryRef { tag: Single(Tag(0x0008, 0x0005)), alias: "SpecificCharacterSet", vr: VR::CS },
    DataDictionaryEntryRef { tag: Single(Tag(0x0008, 0x0008)), alias: "ImageType", vr: VR::CS },
    DataDictionaryEntryRef { tag: Single(Tag(0x0008, 0x0016)), alias: "SOPClassUID", vr: VR::UI },
    DataDictionaryEntryRef { tag: Single(Tag(0x0008, 0x0018)), alias: "SOPInstanceUID", vr: VR::UI },
    DataDictionaryEntryRef { tag: Single(Tag(0x0008, 0x0020)), alias: "StudyDate", vr: VR::DA },
    DataDictionaryEntryRef { tag: Single(Tag(0x0008, 0x0021)), alias: "SeriesDate", vr: VR::DA },
    DataDictionaryEntryRef { tag: Single(Tag(0x0008, 0x0022)), alias: "AcquisitionDate", vr: VR::DA },
    DataDictionaryEntryRef { tag: Single(Tag(0x0008, 0x0023)), alias: "ContentDate", vr: VR::DA },
    DataDictionaryEntryRef { tag: Single(Tag(0x0008, 0x0030)), alias: "StudyTime", vr: VR::TM },
    DataDictionaryEntryRef { tag: Single(Tag(0x0008, 0x0031)), alias: "SeriesTime", vr: VR::TM },
    DataDictionaryEntryRef { tag: Single(Tag(0x0008, 0x0032)), alias: "AcquisitionTime", vr: VR::TM },
    DataDictionaryEntryRef { tag: Single(Tag(0x0008, 0x0033)), alias: "ContentTime", vr: VR::TM },
    DataDictionaryEntryRef { tag: Single(Tag(0x0008, 0x0050)), alias: "AccessionNumber", vr: VR::SH },
    DataDictionaryEntryRef { tag: Single(Tag(0x0008, 0x0060)), alias: "Modality", vr: VR::CS },
    DataDictionaryEntryRef { tag: Single(Tag(0x0008, 0x0070)), alias: "Manufacturer", vr: VR::LO },
    DataDictionaryEntryRef { tag: Single(Tag(0x0008, 0x0080)), alias: "InstitutionName", vr: VR::LO },
    DataDictionaryEntryRef { tag: Single(Tag(0x0008, 0x0090)), alias: "ReferringPhysicianName", vr: VR::PN },
    DataDictionaryEntryRef { tag: Single(Tag(0x0008, 0x0100)), alias: "CodeValue", vr: VR::SH },
    DataDictionaryEntryRef { tag: Single(Tag(0x0008, 0x0102)), alias: "CodingSchemeDesignator", vr: VR::SH },
    DataDictionaryEntryRef { tag: Single(Tag(0x0008, 0x0103)), alias: "CodingSchemeVersion", vr: VR::SH },
    DataDictionaryEntryRef { tag: Single(Tag(0x0008, 0x0104)), alias: "CodeMeaning", vr: VR::LO },
    DataDictionaryEntryRef { tag: Single(Tag(0x0008, 0x1010)), alias: "StationName", vr: VR::SH },
    DataDictionaryEntryRef { tag: Single(Tag(0x0008, 0x1030)), alias: "StudyDescription", vr: VR::LO },
    DataDictionaryEntryRef { tag: Single(Tag(0x0008, 0x103E)), alias: "SeriesDescription", vr: VR::LO },
    DataDictionaryEntryRef { tag: Single(Tag(0x0008, 0x1040)), alias: "InstitutionalDepartmentName", vr: VR::LO },
    DataDictionaryEntryRef { tag: Single(Tag(0x0008, 0x1050)), alias: "PerformingPhysicianName", vr: VR::PN },
    DataDictionaryEntryRef { tag: Single(Tag(0x0008, 0x1090)), alias: "ManufacturerModelName", vr: VR::LO },
    DataDictionaryEntryRef { tag: Single(Tag(0x0008, 0x1110)), alias: "ReferencedStudySequence", vr: VR::SQ },
    DataDictionaryEntryRef { tag: Single(Tag(0x0008, 0x1115)), alias: "ReferencedSeriesSequence", vr: VR::SQ },
    DataDictionaryEntryRef { tag: Single(Tag(0x0008, 0x1140)), alias: "ReferencedImageSequence", vr: VR::SQ },
    DataDictionaryEntryRef { tag: Single(Tag(0x0008, 0x1150)), alias: "ReferencedSOPClassUID", vr: VR::UI },
    DataDictionaryEntryRef { tag: Single(Tag(0x0008, 0x1155)), alias: "ReferencedSOPInstanceUID", vr: VR::UI },
    DataDictionaryEntryRef { tag: Single(Tag(0x0008, 0x2112)), alias: "SourceImageSequence", vr: VR::SQ },
    DataDictionaryEntryRef { tag: Single(Tag(0x0008, 0x9215)), alias: "DerivationCodeSequence", vr: VR::SQ },
    DataDictionaryEntryRef { tag: Single(Tag(0x0010, 0x0010)), alias: "PatientName", vr: VR::PN },
    DataDictionaryEntryRef { tag: Single(Tag(0x0010, 0x0020)), alias: "PatientID", vr: VR::LO },
    DataDictionaryEntryRef { tag: Single(Tag(0x0010, 0x0030)), alias: "PatientBirthDate", vr: VR::DA },
    DataDictionaryEntryRef { tag: Single(Tag(0x0010, 0x0040)), alias: "PatientSex", vr: VR::CS },
    DataDictionaryEntryRef { tag: Single(Tag(0x0010, 0x1010)), alias: "PatientAge", vr: VR::AS },
    DataDictionaryEntryRef { tag: Single(Tag(0x0010, 0x1020)), alias: "PatientSize", vr: VR::DS },
    DataDictionaryEntryRef { tag: Single(Tag(0x0010, 0x1030)), alias: "PatientWeight", vr: VR::DS },
    DataDictionaryEntryRef { tag: Single(Tag(0x0010, 0x4000)), alias: "PatientComments", vr: VR::LT },
    DataDictionaryEntryRef { tag: Single(Tag(0x0018, 0x0015)), alias: "BodyPartExamined", vr: VR::CS },
    DataDictionaryEntryRef { tag: Single(Tag(0x0018, 0x0020)), alias: "ScanningSequence", vr: VR::CS },
    DataDictionaryEntryRef { tag: Single(Tag(0x0018, 0x0050)), alias: "SliceThickness", vr: VR::DS },
    DataDictionaryEntryRef { tag: Single(Tag(0x0018, 0x0060)), alias: "KVP", vr: VR::DS },
    DataDictionaryEntryRef { tag: Single(Tag(0x0018, 0x0088)), alias: "SpacingBetweenSlices", vr: VR::DS },
    DataDictionaryEntryRef { tag: Single(Tag(0x0018, 0x1020)), alias: "SoftwareVersions", vr: VR::LO },
    DataDictionaryEntryRef { tag: Single(Tag(0x0018, 0x1030)), alias: "ProtocolName", vr: VR::LO },
    DataDictionaryEntryRef { tag: Single(Tag(0x0018, 0x1151)), alias: "XRayTubeCurrent", vr: VR::IS },
    DataDictionaryEntryRef { tag: Single(Tag(0x0018, 0x5100)), alias: "PatientPosition", vr: VR::CS },
    DataDictionaryEntryRef { tag: Single(Tag(0x0020, 0x000D)), alias: "StudyInstanceUID", vr: VR::UI },
    DataDictionaryEntryRef { tag: Single(Tag(0x0020, 0x000E)), alias: "SeriesInstanceUID", vr: VR::UI },
    DataDictionaryEntryRef { tag: Single(Tag(0x0020, 0x0010)), alias: "StudyID", vr: VR::SH },
    DataDictionaryEntryRef { tag: Single(Tag(0x0020, 0x0011)), alias: "SeriesNumber", vr: VR::IS },
    DataDictionaryEntryRef { tag: Single(Tag(0x0020, 0x0013)), alias: "InstanceNumber", vr: VR::IS },
    DataDictionaryEntryRef { tag: Single(Tag(0x0020, 0x0020)), alias: "PatientOrientation", vr: VR::CS },
    DataDictionaryEntryRef { tag: Single(Tag(0x0020, 0x0032)), alias: "ImagePositionPatient", vr: VR::DS },
    DataDictionaryEntryRef { tag: Single(Tag(0x0020, 0x0037)), alias: "ImageOrientationPatient", vr: VR::DS },
    DataDictionaryEntryRef { tag: Single(Tag(0x0020, 0x0052)), alias: "FrameOfReferenceUID", vr: VR::UI },
    DataDictionaryEntryRef { tag: Single(Tag(0x0020, 0x1041)), alias: "SliceLocation", vr: VR::DS },
    DataDictionaryEntryRef { tag: Single(Tag(0x0020, 0x4000)), alias: "ImageComments", vr: VR::LT },
    DataDictionaryEntryRef { tag: Single(Tag(0x0028, 0x0002)), alias: "SamplesPerPixel", vr: VR::US },
    DataDictionaryEntryRef { tag: Single(Tag(0x0028, 0x0004)), alias: "PhotometricInterpretation", vr: VR::CS },
    DataDictionaryEntryRef { tag: Single(Tag(0x0028, 0x0006)), alias: "PlanarConfiguration", vr: VR::US },
    DataDictionaryEntryRef { tag: Single(Tag(0x0028, 0x0008)), alias: "NumberOfFrames", vr: VR::IS },
    DataDictionaryEntryRef { tag: Single(Tag(0x0028, 0x0010)), alias: "Rows", vr: VR::US },
    DataDictionaryEntryRef { tag: Single(Tag(0x0028, 0x0011)), alias: "Columns", vr: VR::US },
    DataDictionaryEntryRef { tag: Single(Tag(0x0028, 0x0030)), alias: "PixelSpacing", vr: VR::DS },
    DataDictionaryEntryRef { tag: Single(Tag(0x0028, 0x0100)), alias: "BitsAllocated", vr: VR::US },
    DataDictionaryEntryRef { tag: Single(Tag(0x0028, 0x0101)), alias: "BitsStored", vr: VR::US },
    DataDictionaryEntryRef { tag: Single(Tag(0x0028, 0x0102)), alias: "HighBit", vr: VR::US },
    DataDictionaryEntryRef { tag: Single(Tag(0x0028, 0x0103)), alias: "PixelRepresentation", vr: VR::US },
    DataDictionaryEntryRef { tag: Single(Tag(0x0028, 0x0106)), alias: "SmallestImagePixelValue", vr: VR::US },
    DataDictionaryEntryRef { tag: Single(Tag(0x0028, 0x0107)), alias: "LargestImagePixelValue", vr: VR::US },
    DataDictionaryEntryRef { tag: Single(Tag(0x0028, 0x1050)), alias: "WindowCenter", vr: VR::DS },
    DataDictionaryEntryRef { tag: Single(Tag(0x0028, 0x1051)), alias: "WindowWidth", vr: VR::DS },
    DataDictionaryEntryRef { tag: Single(Tag(0x0028, 0x1052)), alias: "RescaleIntercept", vr: VR::DS },
    DataDictionaryEntryRef { tag: Single(Tag(0x0028, 0x1053)), alias: "RescaleSlope", vr: VR::DS },
    DataDictionaryEntryRef { tag: Single(Tag(0x0028, 0x1054)), alias: "RescaleType", vr: VR::LO },
    DataDictionaryEntryRef { tag: Single(Tag(0x0028, 0x1101)), alias: "RedPaletteColorLookupTableDescriptor", vr: VR::US },
    DataDictionaryEntryRef { tag: Single(Tag(0x0028, 0x1102)), alias: "GreenPaletteColorLookupTableDescriptor", vr: VR::US },
    DataDictionaryEntryRef { tag: Single(Tag(0x0028, 0x1103)), alias: "BluePaletteColorLookupTableDescriptor", vr: VR::US },
    DataDictionaryEntryRef { tag: Single(Tag(0x0028, 0x1201)), alias: "RedPaletteColorLookupTableData", vr: VR::OW },
    DataDictionaryEntryRef { tag: Single(Tag(0x0028, 0x1202)), alias: "GreenPaletteColorLookupTableData", vr: VR::OW },
    DataDictionaryEntryRef { tag: Single(Tag(0x0028, 0x1203)), alias: "BluePaletteColorLookupTableData", vr: VR::OW },
    DataDictionaryEntryRef { tag: Single(Tag(0x0028, 0x2110)), alias: "LossyImageCompression", vr: VR::CS },
    DataDictionaryEntryRef { tag: Single(Tag(0x0032, 0x1060)), alias: "RequestedProcedureDescription", vr: VR::LO },
    DataDictionaryEntryRef { tag: Single(Tag(0x0040, 0x0244)), alias: "PerformedProcedureStepStartDate", vr: VR::DA },
    DataDictionaryEntryRef { tag: Single(Tag(0x0040, 0x0254)), alias: "PerformedProcedureStepDescription", vr: VR::LO },
    DataDictionaryEntryRef { tag: Single(Tag(0x0040, 0x1001)), alias: "RequestedProcedureID", vr: VR::SH },
    DataDictionaryEntryRef { tag: Single(Tag(0x0040, 0x2016)), alias: "PlacerOrderNumberImagingServiceRequest", vr: VR::LO },
    DataDictionaryEntryRef { tag: Single(Tag(0x0040, 0x2017)), alias: "FillerOrderNumberImagingServiceRequest", vr: VR::LO },
    DataDictionaryEntryRef { tag: Single(Tag(0x0040, 0xA170)), alias: "PurposeOfReferenceCodeSequence", vr: VR::SQ },
    DataDictionaryEntryRef { tag: Single(Tag(0x0054, 0x0220)), alias: "ViewCodeSequence", vr: VR::SQ },
    DataDictionaryEntryRef { tag: Single(Tag(0x0088, 0x0200)), alias: "IconImageSequence", vr: VR::SQ },
    DataDictionaryEntryRef { tag: Group100(Tag(0x6000, 0x0010)), alias: "OverlayRows", vr: VR::US },
    DataDictionaryEntryRef { tag: Group100(Tag(0x6000, 0x0011)), alias: "OverlayColumns", vr: VR::US },
    DataDictionaryEntryRef { tag: Group100(Tag(0x6000, 0x0040)), alias: "OverlayType", vr: VR::CS },
    DataDictionaryEntryRef { tag: Group100(Tag(0x6000, 0x0050)), alias: "OverlayOrigin", vr: VR::SS },
    DataDictionaryEntryRef { tag: Group100(Tag(0x6000, 0x0100)), alias: "OverlayBitsAllocated", vr: VR::US },
    DataDictionaryEntryRef { tag: Group100(Tag(0x6000, 0x0102)), alias: "OverlayBitPosition", vr: VR::US },
    DataDictionaryEntryRef { tag: Group100(Tag(0x6000, 0x3000)), alias: "OverlayData", vr: VR::OW },
    DataDictionaryEntryRef { tag: Single(Tag(0x7FE0, 0x0008)), alias: "FloatPixelData", vr: VR::OF },
    DataDictionaryEntryRef { tag: Single(Tag(0x7FE0, 0x0009)), alias: "DoubleFloatPixelData", vr: VR::OD },
    DataDictionaryEntryRef { tag: Single(Tag(0x7FE0, 0x0010)), alias: "PixelData", vr: VR::OW },
];
