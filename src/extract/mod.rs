pub mod metadata;
pub mod structure_set;
pub mod waveform;

use crate::record::{Tag, TaggedRecord};
use rayon::prelude::*;
use structure_set::Tissue;
use thiserror::Error;

/// Document-level extraction failures. Structure-level problems (missing
/// color, missing contour sequence) degrade softly and never show up here.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractError {
    #[error("document has no {name} sequence {tag}")]
    MissingSequence { name: &'static str, tag: Tag },

    #[error("{name} sequence {tag} holds no items")]
    EmptySequence { name: &'static str, tag: Tag },

    #[error("structure {index} has no name element {tag}")]
    MissingName { index: usize, tag: Tag },

    #[error("contour {contour} of structure {structure} has no contour data {tag}")]
    MissingContourData {
        structure: usize,
        contour: usize,
        tag: Tag,
    },

    #[error("waveform item has no {name} element {tag}")]
    MissingWaveformElement { name: &'static str, tag: Tag },
}

/// Extracts several independent documents in parallel, one result per input
/// document in input order. Each extraction is pure and only reads its own
/// document, so the fan-out needs no coordination.
pub fn extract_structure_sets(
    documents: &[TaggedRecord],
) -> Vec<Result<Vec<Tissue>, ExtractError>> {
    documents
        .par_iter()
        .map(structure_set::extract_structure_set)
        .collect()
}
