use crate::record::{tags, TaggedRecord};
use serde::Serialize;

/// One window-level display preset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WindowLevel {
    pub width: f64,
    pub center: f64,
    pub explanation: Option<String>,
}

/// General patient/study/acquisition properties of an image document.
/// Every field is an owned string, empty when the element is absent; this
/// mirrors the Type 2/3 tolerance of the format, so reading never fails.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ImageMetadata {
    pub patient_name: String,
    pub patient_id: String,
    pub patient_age: String,
    pub patient_sex: String,
    pub patient_birth_date: String,
    pub study_date: String,
    pub acquisition_date: String,
    pub study_time: String,
    pub acquisition_time: String,
    pub image_date: String,
    pub image_time: String,
    pub image_number: String,
    pub series_number: String,
    pub series_description: String,
    pub study_id: String,
    pub study_description: String,
    pub modality: String,
    pub manufacturer: String,
    pub manufacturer_model_name: String,
    pub station_name: String,
    pub institution_name: String,
    pub convolution_kernel: String,
    pub slice_thickness: String,
    pub kvp: String,
    pub gantry_tilt: String,
    pub echo_time: String,
    pub echo_train_length: String,
    pub repetition_time: String,
    pub exposure_time: String,
    pub xray_tube_current: String,
    pub exposure: String,
    pub window_presets: Vec<WindowLevel>,
}

/// Reads the general image properties of a document.
pub fn read_image_metadata(document: &TaggedRecord) -> ImageMetadata {
    let text = |tag| document.string_value(tag).unwrap_or_default();

    ImageMetadata {
        patient_name: text(tags::PATIENT_NAME),
        patient_id: text(tags::PATIENT_ID),
        patient_age: text(tags::PATIENT_AGE),
        patient_sex: text(tags::PATIENT_SEX),
        patient_birth_date: text(tags::PATIENT_BIRTH_DATE),
        study_date: text(tags::STUDY_DATE),
        acquisition_date: text(tags::ACQUISITION_DATE),
        study_time: text(tags::STUDY_TIME),
        acquisition_time: text(tags::ACQUISITION_TIME),
        image_date: text(tags::IMAGE_DATE),
        image_time: text(tags::IMAGE_TIME),
        image_number: text(tags::IMAGE_NUMBER),
        series_number: text(tags::SERIES_NUMBER),
        series_description: text(tags::SERIES_DESCRIPTION),
        study_id: text(tags::STUDY_ID),
        study_description: text(tags::STUDY_DESCRIPTION),
        modality: text(tags::MODALITY),
        manufacturer: text(tags::MANUFACTURER),
        manufacturer_model_name: text(tags::MANUFACTURER_MODEL_NAME),
        station_name: text(tags::STATION_NAME),
        institution_name: text(tags::INSTITUTION_NAME),
        convolution_kernel: text(tags::CONVOLUTION_KERNEL),
        slice_thickness: text(tags::SLICE_THICKNESS),
        kvp: text(tags::KVP),
        gantry_tilt: text(tags::GANTRY_TILT),
        echo_time: text(tags::ECHO_TIME),
        echo_train_length: text(tags::ECHO_TRAIN_LENGTH),
        repetition_time: text(tags::REPETITION_TIME),
        exposure_time: text(tags::EXPOSURE_TIME),
        xray_tube_current: text(tags::XRAY_TUBE_CURRENT),
        exposure: text(tags::EXPOSURE),
        window_presets: read_window_presets(document),
    }
}

/// Pairs WindowCenter with WindowWidth values (shorter list wins) and
/// attaches the backslash-separated explanations when present. Some writers
/// emit more explanations than presets; the extras are ignored.
fn read_window_presets(document: &TaggedRecord) -> Vec<WindowLevel> {
    let (Some(centers), Some(widths)) = (
        document.numbers(tags::WINDOW_CENTER),
        document.numbers(tags::WINDOW_WIDTH),
    ) else {
        return Vec::new();
    };

    let mut presets: Vec<WindowLevel> = centers
        .iter()
        .zip(widths)
        .map(|(&center, &width)| WindowLevel {
            width,
            center,
            explanation: None,
        })
        .collect();

    if let Some(text) = document.string_value(tags::WINDOW_EXPLANATION) {
        for (preset, label) in presets.iter_mut().zip(text.split('\\')) {
            preset.explanation = Some(label.trim().to_string());
        }
    }

    presets
}

#[cfg(test)]
mod metadata_tests {
    use super::*;
    use crate::record::RecordValue;

    #[test]
    fn test_absent_elements_read_as_empty() {
        let meta = read_image_metadata(&TaggedRecord::new());
        assert_eq!(meta, ImageMetadata::default());
        assert!(meta.patient_name.is_empty());
        assert!(meta.window_presets.is_empty());
    }

    #[test]
    fn test_string_elements_trimmed() {
        let doc = TaggedRecord::new()
            .with(tags::PATIENT_NAME, RecordValue::Bytes(b"DOE^JOHN \0".to_vec()))
            .with(tags::MODALITY, RecordValue::Bytes(b"CT".to_vec()))
            .with(tags::SLICE_THICKNESS, RecordValue::Bytes(b"0.273438".to_vec()));

        let meta = read_image_metadata(&doc);
        assert_eq!(meta.patient_name, "DOE^JOHN");
        assert_eq!(meta.modality, "CT");
        assert_eq!(meta.slice_thickness, "0.273438");
        assert_eq!(meta.manufacturer, "");
    }

    #[test]
    fn test_window_presets_pair_center_and_width() {
        let doc = TaggedRecord::new()
            .with(tags::WINDOW_CENTER, RecordValue::Numbers(vec![498.0, 40.0]))
            .with(tags::WINDOW_WIDTH, RecordValue::Numbers(vec![1063.0, 400.0]))
            .with(
                tags::WINDOW_EXPLANATION,
                RecordValue::Bytes(b"BONE\\SOFT TISSUE".to_vec()),
            );

        let meta = read_image_metadata(&doc);
        assert_eq!(meta.window_presets.len(), 2);
        assert_eq!(meta.window_presets[0].center, 498.0);
        assert_eq!(meta.window_presets[0].width, 1063.0);
        assert_eq!(meta.window_presets[0].explanation.as_deref(), Some("BONE"));
        assert_eq!(
            meta.window_presets[1].explanation.as_deref(),
            Some("SOFT TISSUE")
        );
    }

    #[test]
    fn test_window_presets_use_shorter_list() {
        // one width but two comments, as seen in some scanner exports
        let doc = TaggedRecord::new()
            .with(tags::WINDOW_CENTER, RecordValue::Numbers(vec![498.0, 40.0]))
            .with(tags::WINDOW_WIDTH, RecordValue::Numbers(vec![1063.0]))
            .with(
                tags::WINDOW_EXPLANATION,
                RecordValue::Bytes(b"WINDOW1\\WINDOW2".to_vec()),
            );

        let meta = read_image_metadata(&doc);
        assert_eq!(meta.window_presets.len(), 1);
        assert_eq!(meta.window_presets[0].explanation.as_deref(), Some("WINDOW1"));

        let missing_width = TaggedRecord::new()
            .with(tags::WINDOW_CENTER, RecordValue::Numbers(vec![498.0]));
        assert!(read_image_metadata(&missing_width).window_presets.is_empty());
    }
}
