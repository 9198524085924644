pub mod extract;
pub mod io;
pub mod record;
pub mod utils;

pub use extract::metadata::{read_image_metadata, ImageMetadata, WindowLevel};
pub use extract::structure_set::{extract_structure_set, Tissue};
pub use extract::waveform::{extract_waveform, Waveform};
pub use extract::{extract_structure_sets, ExtractError};
pub use record::{tags, RecordValue, Tag, TaggedRecord};
