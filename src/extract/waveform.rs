use super::ExtractError;
use crate::record::{tags, TaggedRecord};

/// Amplitude divisor the original reader applied to raw samples.
pub const WAVEFORM_SCALE: f32 = 8800.0;

/// A sampled waveform as a polyline: flat xyz point triples plus the index
/// pairs linking consecutive samples.
#[derive(Debug, Clone, PartialEq)]
pub struct Waveform {
    pub points: Vec<f32>,
    pub segments: Vec<[u32; 2]>,
}

impl Waveform {
    pub fn sample_count(&self) -> usize {
        self.points.len() / 3
    }
}

/// Extracts the first waveform of a hemodynamic-waveform document. Samples
/// are little-endian i16; sample `k` becomes the point
/// `(sample / 8800, k, 0)`.
pub fn extract_waveform(document: &TaggedRecord) -> Result<Waveform, ExtractError> {
    let items = document
        .sequence(tags::WAVEFORM_SEQUENCE)
        .ok_or(ExtractError::MissingSequence {
            name: "Waveform",
            tag: tags::WAVEFORM_SEQUENCE,
        })?;
    let item = items.first().ok_or(ExtractError::EmptySequence {
        name: "Waveform",
        tag: tags::WAVEFORM_SEQUENCE,
    })?;

    if !item.has(tags::WAVEFORM_BITS_ALLOCATED) {
        return Err(ExtractError::MissingWaveformElement {
            name: "WaveformBitsAllocated",
            tag: tags::WAVEFORM_BITS_ALLOCATED,
        });
    }
    let data = item
        .bytes(tags::WAVEFORM_DATA)
        .ok_or(ExtractError::MissingWaveformElement {
            name: "WaveformData",
            tag: tags::WAVEFORM_DATA,
        })?;

    let mut points = Vec::with_capacity(data.len() / 2 * 3);
    for (index, sample) in data.chunks_exact(2).enumerate() {
        let value = i16::from_le_bytes([sample[0], sample[1]]);
        points.push(value as f32 / WAVEFORM_SCALE);
        points.push(index as f32);
        points.push(0.0);
    }

    let samples = points.len() / 3;
    let segments = (1..samples as u32).map(|i| [i - 1, i]).collect();

    Ok(Waveform { points, segments })
}

#[cfg(test)]
mod waveform_tests {
    use super::*;
    use crate::record::RecordValue;
    use crate::utils::test_utils::waveform_document;
    use approx::assert_relative_eq;

    #[test]
    fn test_missing_waveform_sequence_rejected() {
        assert_eq!(
            extract_waveform(&TaggedRecord::new()),
            Err(ExtractError::MissingSequence {
                name: "Waveform",
                tag: tags::WAVEFORM_SEQUENCE,
            })
        );

        let empty = TaggedRecord::new()
            .with(tags::WAVEFORM_SEQUENCE, RecordValue::Sequence(vec![]));
        assert_eq!(
            extract_waveform(&empty),
            Err(ExtractError::EmptySequence {
                name: "Waveform",
                tag: tags::WAVEFORM_SEQUENCE,
            })
        );
    }

    #[test]
    fn test_missing_waveform_elements_rejected() {
        let item = TaggedRecord::new();
        let doc = TaggedRecord::new()
            .with(tags::WAVEFORM_SEQUENCE, RecordValue::Sequence(vec![item]));
        assert_eq!(
            extract_waveform(&doc),
            Err(ExtractError::MissingWaveformElement {
                name: "WaveformBitsAllocated",
                tag: tags::WAVEFORM_BITS_ALLOCATED,
            })
        );

        let item = TaggedRecord::new()
            .with(tags::WAVEFORM_BITS_ALLOCATED, RecordValue::Numbers(vec![16.0]));
        let doc = TaggedRecord::new()
            .with(tags::WAVEFORM_SEQUENCE, RecordValue::Sequence(vec![item]));
        assert_eq!(
            extract_waveform(&doc),
            Err(ExtractError::MissingWaveformElement {
                name: "WaveformData",
                tag: tags::WAVEFORM_DATA,
            })
        );
    }

    #[test]
    fn test_samples_decode_little_endian_and_scale() {
        let doc = waveform_document(&[186, 48, -138, 1200]);
        let wave = extract_waveform(&doc).unwrap();

        assert_eq!(wave.sample_count(), 4);
        assert_relative_eq!(wave.points[0], 186.0 / WAVEFORM_SCALE);
        assert_relative_eq!(wave.points[3], 48.0 / WAVEFORM_SCALE);
        assert_relative_eq!(wave.points[6], -138.0 / WAVEFORM_SCALE);
        // y carries the sample index, z stays flat
        assert_relative_eq!(wave.points[7], 2.0);
        assert_relative_eq!(wave.points[8], 0.0);
        assert_relative_eq!(wave.points[10], 3.0);

        assert_eq!(wave.segments, vec![[0, 1], [1, 2], [2, 3]]);
    }

    #[test]
    fn test_trailing_odd_byte_ignored() {
        let mut raw = 5i16.to_le_bytes().to_vec();
        raw.push(0xff); // dangling byte, not a full sample
        let item = TaggedRecord::new()
            .with(tags::WAVEFORM_BITS_ALLOCATED, RecordValue::Numbers(vec![16.0]))
            .with(tags::WAVEFORM_DATA, RecordValue::Bytes(raw));
        let doc = TaggedRecord::new()
            .with(tags::WAVEFORM_SEQUENCE, RecordValue::Sequence(vec![item]));

        let wave = extract_waveform(&doc).unwrap();
        assert_eq!(wave.sample_count(), 1);
        assert!(wave.segments.is_empty());
    }
}
