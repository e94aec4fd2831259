use crate::error::{Result, SegSelectError};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Measurement values keyed by measurement type name (e.g. "Mean")
pub type Measurements = BTreeMap<String, f64>;

/// One segmented structure derived from one source image series
///
/// Records are produced once by a record source and never mutated afterwards;
/// filtering only selects or discards them.
///
/// # Example
///
/// ```
/// use segselect_core::SegmentationRecord;
///
/// let record = SegmentationRecord::new(
///     "Case01", "5", "T2AX", "WholeGland",
///     "/data/Case01/5.nrrd", "/data/Case01/WholeGland.nrrd",
/// )
/// .unwrap()
/// .with_reader("fedorov");
///
/// assert_eq!(record.canonical_type(), "T2AX");
/// assert_eq!(record.reader(), Some("fedorov"));
/// assert!(record.measurements().is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SegmentationRecord {
    study: String,
    series: String,
    canonical_type: String,
    segmented_structure: String,
    reader: Option<String>,
    source_series_description: Option<String>,
    measurements: Option<Measurements>,
    orig_file_name: PathBuf,
    label_file_name: PathBuf,
}

impl SegmentationRecord {
    /// Creates a record from its required properties
    ///
    /// # Errors
    ///
    /// Returns `InvalidRecord` if any of study, series, canonical type or
    /// segmented structure is blank.
    pub fn new(
        study: impl Into<String>,
        series: impl Into<String>,
        canonical_type: impl Into<String>,
        segmented_structure: impl Into<String>,
        orig_file_name: impl Into<PathBuf>,
        label_file_name: impl Into<PathBuf>,
    ) -> Result<Self> {
        let record = Self {
            study: study.into(),
            series: series.into(),
            canonical_type: canonical_type.into(),
            segmented_structure: segmented_structure.into(),
            reader: None,
            source_series_description: None,
            measurements: None,
            orig_file_name: orig_file_name.into(),
            label_file_name: label_file_name.into(),
        };

        for (name, value) in [
            ("study", &record.study),
            ("series", &record.series),
            ("canonicalType", &record.canonical_type),
            ("segmentedStructure", &record.segmented_structure),
        ] {
            if value.trim().is_empty() {
                return Err(SegSelectError::InvalidRecord(format!(
                    "missing required property '{}' for {}",
                    name,
                    record.label_file_name.display()
                )));
            }
        }

        Ok(record)
    }

    /// Builder: Set the reader who produced the segmentation
    pub fn with_reader(mut self, reader: impl Into<String>) -> Self {
        self.reader = Some(reader.into());
        self
    }

    /// Builder: Set the free-text description of the source series
    pub fn with_series_description(mut self, description: impl Into<String>) -> Self {
        self.source_series_description = Some(description.into());
        self
    }

    /// Builder: Attach measurements
    ///
    /// An empty map is stored as "no measurements available".
    pub fn with_measurements(mut self, measurements: Measurements) -> Self {
        self.measurements = if measurements.is_empty() {
            None
        } else {
            Some(measurements)
        };
        self
    }

    pub fn study(&self) -> &str {
        &self.study
    }

    pub fn series(&self) -> &str {
        &self.series
    }

    pub fn canonical_type(&self) -> &str {
        &self.canonical_type
    }

    pub fn segmented_structure(&self) -> &str {
        &self.segmented_structure
    }

    pub fn reader(&self) -> Option<&str> {
        self.reader.as_deref()
    }

    pub fn source_series_description(&self) -> Option<&str> {
        self.source_series_description.as_deref()
    }

    pub fn measurements(&self) -> Option<&Measurements> {
        self.measurements.as_ref()
    }

    /// Returns a single measurement value, if present
    pub fn measurement(&self, measurement_type: &str) -> Option<f64> {
        self.measurements
            .as_ref()
            .and_then(|m| m.get(measurement_type).copied())
    }

    /// Path to the source image the segmentation was drawn on
    pub fn orig_file_name(&self) -> &Path {
        &self.orig_file_name
    }

    /// Path to the label (segmentation) file
    pub fn label_file_name(&self) -> &Path {
        &self.label_file_name
    }
}
