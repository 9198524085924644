use super::ExtractError;
use crate::record::{tags, Tag, TaggedRecord};
use nalgebra::Vector3;
use serde::Serialize;

/// Color assigned when a structure carries no ROIDisplayColor element.
pub const DEFAULT_COLOR: [f32; 3] = [1.0, 0.0, 0.0];

/// Suffix appended to the name of a structure without any contour.
pub const EMPTY_SUFFIX: &str = " (empty)";

/// One named structure from an RT-structure-set document: a flat point
/// buffer holding every contour back to back, with per-contour point counts
/// in `outline_length` so the buffer can be cut back into polylines.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tissue {
    pub name: String,
    pub color: [f32; 3],
    pub points: Vec<f32>,
    pub outline_length: Vec<u32>,
}

impl Tissue {
    pub fn contour_count(&self) -> usize {
        self.outline_length.len()
    }

    /// Cuts the flat point buffer back into one `&[f32]` slice per contour,
    /// three floats per point, in contour order.
    pub fn contours(&self) -> impl Iterator<Item = &[f32]> + '_ {
        self.outline_length.iter().scan(0usize, move |offset, &len| {
            let start = *offset;
            *offset += len as usize * 3;
            Some(&self.points[start..*offset])
        })
    }

    /// All points of the tissue as vectors, contours concatenated.
    pub fn vertices(&self) -> impl Iterator<Item = Vector3<f32>> + '_ {
        self.points
            .chunks_exact(3)
            .map(|p| Vector3::new(p[0], p[1], p[2]))
    }
}

fn top_level_sequence<'a>(
    document: &'a TaggedRecord,
    name: &'static str,
    tag: Tag,
) -> Result<&'a [TaggedRecord], ExtractError> {
    let items = document
        .get(tag)
        .and_then(|value| value.as_sequence())
        .ok_or(ExtractError::MissingSequence { name, tag })?;
    if items.is_empty() {
        return Err(ExtractError::EmptySequence { name, tag });
    }
    Ok(items)
}

/// Extracts every structure of an RT-structure-set document as a prioritized
/// list of tissues.
///
/// The document must carry a non-empty ROIContourSequence and
/// StructureSetROISequence, and every paired structure entry must carry an
/// ROIName; anything else rejects the whole document and returns no partial
/// output. A missing display color falls back to red, and a structure with
/// no contour sequence is kept with zero contours and an `" (empty)"` name
/// suffix.
pub fn extract_structure_set(document: &TaggedRecord) -> Result<Vec<Tissue>, ExtractError> {
    let contour_entries =
        top_level_sequence(document, "ROIContour", tags::ROI_CONTOUR_SEQUENCE)?;
    let roi_entries =
        top_level_sequence(document, "StructureSetROI", tags::STRUCTURE_SET_ROI_SEQUENCE)?;

    let mut tissues = Vec::with_capacity(contour_entries.len().min(roi_entries.len()));

    for (index, (entry, roi)) in contour_entries.iter().zip(roi_entries).enumerate() {
        let mut name = roi
            .string_value(tags::ROI_NAME)
            .ok_or(ExtractError::MissingName {
                index,
                tag: tags::ROI_NAME,
            })?;

        let color = match entry.numbers(tags::ROI_DISPLAY_COLOR) {
            Some([r, g, b, ..]) => [
                (*r / 255.0) as f32,
                (*g / 255.0) as f32,
                (*b / 255.0) as f32,
            ],
            _ => DEFAULT_COLOR,
        };

        let contours = entry.sequence(tags::CONTOUR_SEQUENCE).unwrap_or(&[]);
        if contours.is_empty() {
            name.push_str(EMPTY_SUFFIX);
        }

        let mut points = Vec::new();
        let mut outline_length = Vec::with_capacity(contours.len());
        for (contour, item) in contours.iter().enumerate() {
            let data =
                item.numbers(tags::CONTOUR_DATA)
                    .ok_or(ExtractError::MissingContourData {
                        structure: index,
                        contour,
                        tag: tags::CONTOUR_DATA,
                    })?;
            // Triples only; a ragged tail is dropped.
            let npts = data.len() / 3;
            outline_length.push(npts as u32);
            points.extend(data[..npts * 3].iter().map(|&v| v as f32));
        }

        tissues.push(Tissue {
            name,
            color,
            points,
            outline_length,
        });
    }

    Ok(priority_sort(tissues))
}

/// Orders the collected tissues so small structures take priority over large
/// ones. Each tissue's rank is the number of tissues at least as large as
/// itself, counted over the whole document-order collection, and the tissue
/// is inserted at that rank, appending when the rank runs past the end.
/// Equal-size tissues keep their document order. Deliberately not a plain
/// ascending sort; consumers depend on this exact order.
fn priority_sort(tissues: Vec<Tissue>) -> Vec<Tissue> {
    let sizes: Vec<usize> = tissues.iter().map(|t| t.points.len()).collect();
    let mut ordered: Vec<Tissue> = Vec::with_capacity(tissues.len());

    for (index, tissue) in tissues.into_iter().enumerate() {
        let rank = sizes.iter().filter(|&&size| size >= sizes[index]).count();
        if rank >= ordered.len() {
            ordered.push(tissue);
        } else {
            ordered.insert(rank, tissue);
        }
    }

    ordered
}
