use crate::error::Result;
use crate::types::SegmentationRecord;
use log::info;
use std::collections::BTreeSet;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Fixed leading columns of the results table
pub const TABLE_HEADER: [&str; 5] = [
    "Study",
    "SeriesNumber",
    "SeriesDescription",
    "Series type",
    "Segmented structure",
];

/// Cell written for a measurement a record does not have
pub const MISSING_VALUE: &str = "NA";

/// Formats a measurement value for output
///
/// Whole numbers keep one decimal place (`2.0`), so a column of float
/// measurements reads uniformly.
pub fn format_measurement(value: f64) -> String {
    format!("{:?}", value)
}

/// Returns every measurement type found across the records, sorted by name
pub fn measurement_types(records: &[&SegmentationRecord]) -> BTreeSet<String> {
    records
        .iter()
        .filter_map(|record| record.measurements())
        .flat_map(|measurements| measurements.keys().cloned())
        .collect()
}

/// Writes records as a tab-delimited table
///
/// The header holds the fixed columns followed by the union of all
/// measurement types; absent measurements are written as `NA`.
pub fn write_table<W: Write>(records: &[&SegmentationRecord], mut writer: W) -> Result<()> {
    let columns = measurement_types(records);

    let header: Vec<&str> = TABLE_HEADER
        .iter()
        .copied()
        .chain(columns.iter().map(String::as_str))
        .collect();
    writeln!(writer, "{}", header.join("\t"))?;

    for record in records {
        if record.measurements().is_none() {
            info!(
                "No measurements for {} {} {}",
                record.study(),
                record.series(),
                record.segmented_structure()
            );
        }

        write!(
            writer,
            "{}\t{}\t{}\t{}\t{}",
            record.study(),
            record.series(),
            record.source_series_description().unwrap_or(""),
            record.canonical_type(),
            record.segmented_structure()
        )?;
        for column in &columns {
            match record.measurement(column) {
                Some(value) => write!(writer, "\t{}", format_measurement(value))?,
                None => write!(writer, "\t{}", MISSING_VALUE)?,
            }
        }
        writeln!(writer)?;
    }

    writer.flush()?;
    Ok(())
}

/// Writes the results table to a file, replacing any existing file
pub fn tabulate(records: &[&SegmentationRecord], path: &Path) -> Result<()> {
    info!("Writing {} rows to {}", records.len(), path.display());
    let file = File::create(path)?;
    write_table(records, BufWriter::new(file))
}
