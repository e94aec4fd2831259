use crate::error::{Result, SegSelectError};
use crate::source::naming::SegmentationName;
use crate::types::{Measurements, SegmentationRecord};
use log::{debug, info, warn};
use serde::Deserialize;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

// Directory layout below each study
pub const RESOURCES_DIR: &str = "RESOURCES";
pub const RECONSTRUCTIONS_DIR: &str = "Reconstructions";
pub const CANONICAL_DIR: &str = "Canonical";
pub const SEGMENTATIONS_DIR: &str = "Segmentations";
pub const MEASUREMENTS_DIR: &str = "Measurements";

pub const IMAGE_EXTENSION: &str = "nrrd";

/// Canonical classification stored alongside each series
#[derive(Debug, Deserialize)]
struct CanonicalInfo {
    #[serde(rename = "CanonicalType")]
    canonical_type: String,
    #[serde(rename = "SeriesDescription", default)]
    series_description: Option<String>,
}

/// Discovers segmentation records in an mpReview data directory
///
/// Expected layout:
///
/// ```text
/// <root>/<study>/RESOURCES/<series>/
///     Reconstructions/<series>.nrrd
///     Canonical/<series>.json
///     Segmentations/[<reader>-]<structure>[-<timestamp>].nrrd
///     Measurements/<segmentation stem>.json
/// ```
///
/// Entries are visited in name order. Series without a canonical type and
/// unrecognised segmentation names are skipped with a warning.
pub struct MpReviewParser {
    root: PathBuf,
}

impl MpReviewParser {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Walks the data directory and returns every segmentation record found
    ///
    /// # Errors
    ///
    /// Returns `NotADirectory` if the root is not a directory, or an I/O
    /// error if a directory cannot be listed.
    pub fn segmentation_records(&self) -> Result<Vec<SegmentationRecord>> {
        if !self.root.is_dir() {
            return Err(SegSelectError::NotADirectory(self.root.clone()));
        }

        info!("Parsing data directory: {}", self.root.display());

        let mut records = Vec::new();
        for (study, study_dir) in sorted_entries(&self.root)? {
            let resources = study_dir.join(RESOURCES_DIR);
            if !resources.is_dir() {
                debug!("Skipping {}: no {} directory", study_dir.display(), RESOURCES_DIR);
                continue;
            }

            for (series, series_dir) in sorted_entries(&resources)? {
                if !series_dir.is_dir() {
                    continue;
                }
                self.collect_series(&study, &series, &series_dir, &mut records)?;
            }
        }

        info!("Found {} segmentation records", records.len());
        Ok(records)
    }

    fn collect_series(
        &self,
        study: &str,
        series: &str,
        series_dir: &Path,
        records: &mut Vec<SegmentationRecord>,
    ) -> Result<()> {
        let segmentations_dir = series_dir.join(SEGMENTATIONS_DIR);
        if !segmentations_dir.is_dir() {
            debug!("No segmentations for {}/{}", study, series);
            return Ok(());
        }

        let canonical_path = series_dir
            .join(CANONICAL_DIR)
            .join(format!("{}.json", series));
        let canonical = match read_canonical_info(&canonical_path) {
            Ok(info) => info,
            Err(e) => {
                warn!("Skipping series {}/{}: {}", study, series, e);
                return Ok(());
            }
        };

        let orig_file_name = series_dir
            .join(RECONSTRUCTIONS_DIR)
            .join(format!("{}.{}", series, IMAGE_EXTENSION));

        for (file_name, label_path) in sorted_entries(&segmentations_dir)? {
            let Some(stem) = image_stem(&file_name) else {
                continue;
            };
            let Some(name) = SegmentationName::parse(stem) else {
                warn!("Skipping unrecognised segmentation name: {}", label_path.display());
                continue;
            };

            let measurements_path = series_dir
                .join(MEASUREMENTS_DIR)
                .join(format!("{}.json", stem));

            let mut record = match SegmentationRecord::new(
                study,
                series,
                canonical.canonical_type.as_str(),
                name.structure,
                orig_file_name.clone(),
                label_path.clone(),
            ) {
                Ok(record) => record,
                Err(e) => {
                    warn!("Skipping {}: {}", label_path.display(), e);
                    continue;
                }
            };
            if let Some(reader) = name.reader {
                record = record.with_reader(reader);
            }
            if let Some(description) = &canonical.series_description {
                record = record.with_series_description(description.as_str());
            }
            if let Some(measurements) = read_measurements(&measurements_path) {
                record = record.with_measurements(measurements);
            }

            debug!("Found segmentation: {}", label_path.display());
            records.push(record);
        }

        Ok(())
    }
}

/// Lists non-hidden entries of a directory sorted by name
fn sorted_entries(dir: &Path) -> Result<Vec<(String, PathBuf)>> {
    let mut entries = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.starts_with('.') {
            continue;
        }
        entries.push((name, entry.path()));
    }
    entries.sort();
    Ok(entries)
}

/// Returns the stem of an image file name, or `None` for other files
fn image_stem(file_name: &str) -> Option<&str> {
    let (stem, ext) = file_name.rsplit_once('.')?;
    if ext.eq_ignore_ascii_case(IMAGE_EXTENSION) && !stem.is_empty() {
        Some(stem)
    } else {
        None
    }
}

fn read_canonical_info(path: &Path) -> Result<CanonicalInfo> {
    let contents = fs::read_to_string(path)?;
    serde_json::from_str(&contents).map_err(|e| {
        SegSelectError::InvalidRecord(format!("{}: {}", path.display(), e))
    })
}

/// Reads a measurement file
///
/// Missing or unreadable files yield `None`. Non-numeric values are dropped.
fn read_measurements(path: &Path) -> Option<Measurements> {
    let contents = fs::read_to_string(path).ok()?;
    let document: Value = match serde_json::from_str(&contents) {
        Ok(value) => value,
        Err(e) => {
            warn!("Ignoring malformed measurements {}: {}", path.display(), e);
            return None;
        }
    };

    let Some(object) = document.as_object() else {
        warn!(
            "Ignoring measurements {}: expected an object of measurement values",
            path.display()
        );
        return None;
    };

    let measurements: Measurements = object
        .iter()
        .filter_map(|(name, value)| value.as_f64().map(|v| (name.clone(), v)))
        .collect();

    if measurements.is_empty() {
        None
    } else {
        Some(measurements)
    }
}
