use crate::cli::OutputFormat;
use crate::error::{Result, SegSelectError};
use crate::export::table::format_measurement;
use crate::types::SegmentationRecord;
use std::fmt;
use std::io::Write;

/// Measurement shown in the console listing
pub const SUMMARY_MEASUREMENT: &str = "Mean";

/// Console listing of selected segmentation records
pub struct SelectionReport<'a> {
    records: &'a [&'a SegmentationRecord],
}

impl<'a> SelectionReport<'a> {
    /// Creates a new selection report
    pub fn new(records: &'a [&'a SegmentationRecord]) -> Self {
        Self { records }
    }
}

impl<'a> fmt::Display for SelectionReport<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Total segs: {}", self.records.len())?;

        for (i, record) in self.records.iter().enumerate() {
            writeln!(
                f,
                "{:03} {} {} {} {} \" {} \"",
                i,
                record.study(),
                record.series(),
                record.canonical_type(),
                record.segmented_structure(),
                record.source_series_description().unwrap_or("")
            )?;
            match record.measurement(SUMMARY_MEASUREMENT) {
                Some(value) => writeln!(
                    f,
                    "   '--> {}: {}",
                    SUMMARY_MEASUREMENT,
                    format_measurement(value)
                )?,
                None => writeln!(f, "   '--> {}: None", SUMMARY_MEASUREMENT)?,
            }
        }

        Ok(())
    }
}

/// Writes the selected records in the requested output format
pub fn write_selection<W: Write>(
    records: &[&SegmentationRecord],
    format: &OutputFormat,
    mut writer: W,
) -> Result<()> {
    match format {
        OutputFormat::Text => write!(writer, "{}", SelectionReport::new(records))?,
        OutputFormat::Paths => {
            for record in records {
                writeln!(writer, "{}", record.label_file_name().display())?;
            }
        }
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut writer, records).map_err(|e| {
                SegSelectError::Output(format!("Failed to serialize to JSON: {}", e))
            })?;
            writeln!(writer)?;
        }
    }
    writer.flush()?;
    Ok(())
}
