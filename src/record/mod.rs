pub mod json;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A DICOM-style data element tag: (group, element) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Tag {
    pub group: u16,
    pub element: u16,
}

impl Tag {
    pub const fn new(group: u16, element: u16) -> Self {
        Tag { group, element }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:04x},{:04x})", self.group, self.element)
    }
}

/// Tags read anywhere in this crate. The RT-structure-set tags are an
/// external contract: real structure-set documents use exactly these codes.
pub mod tags {
    use super::Tag;

    pub const STRUCTURE_SET_ROI_SEQUENCE: Tag = Tag::new(0x3006, 0x0020);
    pub const ROI_CONTOUR_SEQUENCE: Tag = Tag::new(0x3006, 0x0039);
    pub const ROI_NAME: Tag = Tag::new(0x3006, 0x0026);
    pub const ROI_DISPLAY_COLOR: Tag = Tag::new(0x3006, 0x002a);
    pub const CONTOUR_SEQUENCE: Tag = Tag::new(0x3006, 0x0040);
    pub const CONTOUR_DATA: Tag = Tag::new(0x3006, 0x0050);

    pub const WAVEFORM_SEQUENCE: Tag = Tag::new(0x5400, 0x0100);
    pub const WAVEFORM_BITS_ALLOCATED: Tag = Tag::new(0x5400, 0x1004);
    pub const WAVEFORM_DATA: Tag = Tag::new(0x5400, 0x1010);

    pub const PATIENT_NAME: Tag = Tag::new(0x0010, 0x0010);
    pub const PATIENT_ID: Tag = Tag::new(0x0010, 0x0020);
    pub const PATIENT_AGE: Tag = Tag::new(0x0010, 0x1010);
    pub const PATIENT_SEX: Tag = Tag::new(0x0010, 0x0040);
    pub const PATIENT_BIRTH_DATE: Tag = Tag::new(0x0010, 0x0030);
    pub const STUDY_DATE: Tag = Tag::new(0x0008, 0x0020);
    pub const ACQUISITION_DATE: Tag = Tag::new(0x0008, 0x0022);
    pub const STUDY_TIME: Tag = Tag::new(0x0008, 0x0030);
    pub const ACQUISITION_TIME: Tag = Tag::new(0x0008, 0x0032);
    pub const IMAGE_DATE: Tag = Tag::new(0x0008, 0x0023);
    pub const IMAGE_TIME: Tag = Tag::new(0x0008, 0x0033);
    pub const IMAGE_NUMBER: Tag = Tag::new(0x0020, 0x0013);
    pub const SERIES_NUMBER: Tag = Tag::new(0x0020, 0x0011);
    pub const SERIES_DESCRIPTION: Tag = Tag::new(0x0008, 0x103e);
    pub const STUDY_ID: Tag = Tag::new(0x0020, 0x0010);
    pub const STUDY_DESCRIPTION: Tag = Tag::new(0x0008, 0x1030);
    pub const MODALITY: Tag = Tag::new(0x0008, 0x0060);
    pub const MANUFACTURER: Tag = Tag::new(0x0008, 0x0070);
    pub const MANUFACTURER_MODEL_NAME: Tag = Tag::new(0x0008, 0x1090);
    pub const STATION_NAME: Tag = Tag::new(0x0008, 0x1010);
    pub const INSTITUTION_NAME: Tag = Tag::new(0x0008, 0x0080);
    pub const CONVOLUTION_KERNEL: Tag = Tag::new(0x0018, 0x1210);
    pub const SLICE_THICKNESS: Tag = Tag::new(0x0018, 0x0050);
    pub const KVP: Tag = Tag::new(0x0018, 0x0060);
    pub const GANTRY_TILT: Tag = Tag::new(0x0018, 0x1120);
    pub const ECHO_TIME: Tag = Tag::new(0x0018, 0x0081);
    pub const ECHO_TRAIN_LENGTH: Tag = Tag::new(0x0018, 0x0091);
    pub const REPETITION_TIME: Tag = Tag::new(0x0018, 0x0080);
    pub const EXPOSURE_TIME: Tag = Tag::new(0x0018, 0x1150);
    pub const XRAY_TUBE_CURRENT: Tag = Tag::new(0x0018, 0x1151);
    pub const EXPOSURE: Tag = Tag::new(0x0018, 0x1152);
    pub const WINDOW_CENTER: Tag = Tag::new(0x0028, 0x1050);
    pub const WINDOW_WIDTH: Tag = Tag::new(0x0028, 0x1051);
    pub const WINDOW_EXPLANATION: Tag = Tag::new(0x0028, 0x1055);
}

/// The value of one data element: a raw byte buffer, an already-parsed
/// numeric array, or a nested sequence of records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordValue {
    Bytes(Vec<u8>),
    Numbers(Vec<f64>),
    Sequence(Vec<TaggedRecord>),
}

impl RecordValue {
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            RecordValue::Bytes(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_numbers(&self) -> Option<&[f64]> {
        match self {
            RecordValue::Numbers(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[TaggedRecord]> {
        match self {
            RecordValue::Sequence(s) => Some(s),
            _ => None,
        }
    }
}

/// One parsed data set: an ordered map from tag to value. Extraction only
/// ever reads from it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaggedRecord {
    elements: BTreeMap<Tag, RecordValue>,
}

impl TaggedRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, used to assemble documents in adapters and tests.
    pub fn with(mut self, tag: Tag, value: RecordValue) -> Self {
        self.insert(tag, value);
        self
    }

    pub fn insert(&mut self, tag: Tag, value: RecordValue) {
        self.elements.insert(tag, value);
    }

    pub fn has(&self, tag: Tag) -> bool {
        self.elements.contains_key(&tag)
    }

    pub fn get(&self, tag: Tag) -> Option<&RecordValue> {
        self.elements.get(&tag)
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn sequence(&self, tag: Tag) -> Option<&[TaggedRecord]> {
        self.get(tag).and_then(RecordValue::as_sequence)
    }

    pub fn numbers(&self, tag: Tag) -> Option<&[f64]> {
        self.get(tag).and_then(RecordValue::as_numbers)
    }

    pub fn bytes(&self, tag: Tag) -> Option<&[u8]> {
        self.get(tag).and_then(RecordValue::as_bytes)
    }

    /// Decodes a byte value as text, dropping the trailing NUL/space padding
    /// DICOM writers add to even out element lengths. Returns an owned string
    /// per call, safe under concurrent readers.
    pub fn string_value(&self, tag: Tag) -> Option<String> {
        let bytes = self.bytes(tag)?;
        let text = String::from_utf8_lossy(bytes);
        Some(text.trim_end_matches(['\0', ' ']).to_string())
    }
}
