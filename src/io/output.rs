use csv::Writer;
use std::error::Error;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use crate::extract::structure_set::Tissue;
use crate::extract::waveform::Waveform;
use crate::record::TaggedRecord;

/// Saves a tagged document in its JSON interchange form.
pub fn save_document<P: AsRef<Path>>(
    path: P,
    document: &TaggedRecord,
) -> anyhow::Result<()> {
    use anyhow::Context;

    let file = File::create(&path)
        .with_context(|| format!("failed to create document {:?}", path.as_ref()))?;
    serde_json::to_writer_pretty(BufWriter::new(file), document)
        .with_context(|| format!("failed to write document {:?}", path.as_ref()))?;
    Ok(())
}

/// Writes extracted tissues to CSV, one row per point, tagged with the
/// tissue name, contour ordinal and display color.
pub fn write_tissues_to_csv<P: AsRef<Path>>(
    path: P,
    tissues: &[Tissue],
) -> Result<(), Box<dyn Error>> {
    let mut wtr = Writer::from_path(path)?;

    wtr.write_record(["tissue", "contour", "point_index", "x", "y", "z", "r", "g", "b"])?;

    for tissue in tissues {
        for (contour_id, contour) in tissue.contours().enumerate() {
            for (point_index, point) in contour.chunks_exact(3).enumerate() {
                let record = vec![
                    tissue.name.clone(),
                    contour_id.to_string(),
                    point_index.to_string(),
                    point[0].to_string(),
                    point[1].to_string(),
                    point[2].to_string(),
                    tissue.color[0].to_string(),
                    tissue.color[1].to_string(),
                    tissue.color[2].to_string(),
                ];
                wtr.write_record(&record)?;
            }
        }
    }

    wtr.flush()?;
    Ok(())
}

/// Writes a waveform polyline to CSV, one row per sample.
pub fn write_waveform_to_csv<P: AsRef<Path>>(
    path: P,
    waveform: &Waveform,
) -> Result<(), Box<dyn Error>> {
    let mut wtr = Writer::from_path(path)?;

    wtr.write_record(["sample", "x", "y", "z"])?;
    for (index, point) in waveform.points.chunks_exact(3).enumerate() {
        wtr.write_record(&[
            index.to_string(),
            point[0].to_string(),
            point[1].to_string(),
            point[2].to_string(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
