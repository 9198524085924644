use anyhow::{bail, Context, Result};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::record::TaggedRecord;

/// Loads a tagged document from its JSON interchange form. The wire-level
/// DICOM decoding happens upstream; this reads the already-parsed shape.
pub fn load_document<P: AsRef<Path>>(path: P) -> Result<TaggedRecord> {
    let file = File::open(&path)
        .with_context(|| format!("failed to open document {:?}", path.as_ref()))?;
    let document: TaggedRecord = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("failed to parse document {:?}", path.as_ref()))?;

    if document.is_empty() {
        bail!(
            "document {:?} holds no elements — this data is required",
            path.as_ref()
        );
    }
    println!("Loaded document {:?}", path.as_ref());

    Ok(document)
}
