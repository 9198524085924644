use crate::record::{tags, RecordValue, TaggedRecord};
use std::f64::consts::PI;

/// Generates `n` contour point triples on a unit circle at height `z`,
/// flattened the way ContourData stores them.
pub fn contour_points(n: usize, z: f64) -> Vec<f64> {
    let mut data = Vec::with_capacity(n * 3);
    for i in 0..n {
        let theta = 2.0 * PI * (i as f64) / (n as f64);
        data.push(theta.cos());
        data.push(theta.sin());
        data.push(z);
    }
    data
}

/// Builds a StructureSetROISequence entry; `None` leaves the ROIName out.
pub fn roi_entry(name: Option<&str>) -> TaggedRecord {
    let mut entry = TaggedRecord::new();
    if let Some(name) = name {
        entry.insert(tags::ROI_NAME, RecordValue::Bytes(name.as_bytes().to_vec()));
    }
    entry
}

/// Builds a ROIContourSequence entry. `color` is the raw 0–255 display
/// color; `contours` is one ContourData buffer per contour item, with `None`
/// leaving the ContourSequence out entirely.
pub fn contour_entry(color: Option<[f64; 3]>, contours: Option<&[Vec<f64>]>) -> TaggedRecord {
    let mut entry = TaggedRecord::new();
    if let Some(color) = color {
        entry.insert(tags::ROI_DISPLAY_COLOR, RecordValue::Numbers(color.to_vec()));
    }
    if let Some(contours) = contours {
        let items = contours
            .iter()
            .map(|data| {
                TaggedRecord::new().with(tags::CONTOUR_DATA, RecordValue::Numbers(data.clone()))
            })
            .collect();
        entry.insert(tags::CONTOUR_SEQUENCE, RecordValue::Sequence(items));
    }
    entry
}

/// Assembles a structure-set document from parallel ROI and contour entries.
/// Both sequences are always present, possibly zero-length.
pub fn structure_set_document(
    rois: Vec<TaggedRecord>,
    contour_entries: Vec<TaggedRecord>,
) -> TaggedRecord {
    TaggedRecord::new()
        .with(
            tags::STRUCTURE_SET_ROI_SEQUENCE,
            RecordValue::Sequence(rois),
        )
        .with(
            tags::ROI_CONTOUR_SEQUENCE,
            RecordValue::Sequence(contour_entries),
        )
}

/// Assembles a waveform document holding the given i16 samples.
pub fn waveform_document(samples: &[i16]) -> TaggedRecord {
    let raw: Vec<u8> = samples
        .iter()
        .flat_map(|s| s.to_le_bytes())
        .collect();
    let item = TaggedRecord::new()
        .with(
            tags::WAVEFORM_BITS_ALLOCATED,
            RecordValue::Numbers(vec![16.0]),
        )
        .with(tags::WAVEFORM_DATA, RecordValue::Bytes(raw));
    TaggedRecord::new().with(tags::WAVEFORM_SEQUENCE, RecordValue::Sequence(vec![item]))
}
