pub mod input;
pub mod output;

pub use input::load_document;
pub use output::{save_document, write_tissues_to_csv, write_waveform_to_csv};
