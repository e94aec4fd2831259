use crate::error::{Result, SegSelectError};
use crate::types::SegmentationRecord;
use log::{debug, info, warn};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Destination file name for a record's source image
pub fn image_file_name(record: &SegmentationRecord) -> String {
    format!(
        "{}-{}-{}-image.nrrd",
        record.study(),
        record.series(),
        record.canonical_type()
    )
}

/// Destination file name for a record's label file
pub fn label_file_name(record: &SegmentationRecord) -> String {
    format!(
        "{}-{}-{}-{}-seg-label.nrrd",
        record.study(),
        record.series(),
        record.canonical_type(),
        record.segmented_structure()
    )
}

/// Copies the source image and label file of every record into `dest_dir`
///
/// Files are renamed so they stay recognisable once flattened into one
/// directory. The directory is created if missing. Copies run in order and
/// stop at the first failure; files already copied are left in place.
///
/// A destination is written at most once. Records sharing a series share one
/// image copy. A second label mapping to an existing destination (e.g. the
/// same structure segmented by two readers) is skipped with a warning.
///
/// Returns the paths written.
pub fn copy_segmentation_files(
    records: &[&SegmentationRecord],
    dest_dir: &Path,
) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dest_dir)?;
    info!(
        "Copying {} segmentations to {}",
        records.len(),
        dest_dir.display()
    );

    let mut copied: HashMap<PathBuf, PathBuf> = HashMap::new();
    let mut written = Vec::with_capacity(records.len() * 2);
    for record in records {
        let image_dest = dest_dir.join(image_file_name(record));
        if copy_once(record.orig_file_name(), &image_dest, &mut copied)? {
            written.push(image_dest);
        }

        let label_dest = dest_dir.join(label_file_name(record));
        if copy_once(record.label_file_name(), &label_dest, &mut copied)? {
            written.push(label_dest);
        }
    }

    Ok(written)
}

/// Copies `from` to `to` unless `to` was already written during this export
///
/// Returns `true` if the file was copied.
fn copy_once(from: &Path, to: &Path, copied: &mut HashMap<PathBuf, PathBuf>) -> Result<bool> {
    match copied.get(to) {
        Some(previous) if previous == from => {
            debug!("Already copied {} to {}", from.display(), to.display());
            Ok(false)
        }
        Some(previous) => {
            warn!(
                "Skipping {}: {} was already copied from {}",
                from.display(),
                to.display(),
                previous.display()
            );
            Ok(false)
        }
        None => {
            copy_file(from, to)?;
            copied.insert(to.to_path_buf(), from.to_path_buf());
            Ok(true)
        }
    }
}

fn copy_file(from: &Path, to: &Path) -> Result<()> {
    fs::copy(from, to).map_err(|source| SegSelectError::Copy {
        from: from.to_path_buf(),
        to: to.to_path_buf(),
        source,
    })?;
    Ok(())
}
