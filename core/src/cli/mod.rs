pub mod report;

use crate::conditions::ConditionsParser;
use crate::types::RecordProperty;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Command-line arguments for selectsegs
#[derive(Parser, Debug)]
#[command(name = "selectsegs")]
#[command(about = "Select all segmentations that match the provided conditions")]
#[command(version)]
pub struct Cli {
    /// Root data directory to parse
    #[arg(value_name = "DIR")]
    pub dir: PathBuf,

    /// Studies that should be selected
    #[arg(long, num_args = 0..)]
    pub studies: Option<Vec<String>>,

    /// Series that should be selected
    #[arg(long, num_args = 0..)]
    pub series: Option<Vec<String>>,

    /// Series/canonical types that should be selected
    #[arg(long, num_args = 0..)]
    pub types: Option<Vec<String>>,

    /// Segmented structures that should be selected, e.g. WholeGland PeripheralZone
    #[arg(long, num_args = 0..)]
    pub structures: Option<Vec<String>>,

    /// Reader names that should be selected
    #[arg(long, num_args = 0..)]
    pub readers: Option<Vec<String>>,

    /// JSON file of filter conditions; overrides all other filter arguments
    #[arg(long, visible_alias = "conditionsFile", value_name = "FILE")]
    pub conditions_file: Option<PathBuf>,

    /// Directory to copy the selected segmentation and image files to
    #[arg(long, visible_alias = "copyTo", value_name = "DIR")]
    pub copy_to: Option<PathBuf>,

    /// Store results as a tab-delimited table
    #[arg(long, value_name = "FILE")]
    pub tabulate: Option<PathBuf>,

    /// Output format for the selection listing
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,

    /// Verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Builds the conditions parser for the filter arguments
    pub fn conditions_parser(&self) -> ConditionsParser {
        ConditionsParser::new()
            .with_list(RecordProperty::Study, self.studies.clone())
            .with_list(RecordProperty::Series, self.series.clone())
            .with_list(RecordProperty::CanonicalType, self.types.clone())
            .with_list(RecordProperty::SegmentedStructure, self.structures.clone())
            .with_list(RecordProperty::Reader, self.readers.clone())
            .with_conditions_file(self.conditions_file.clone())
    }
}

/// Output format options
#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable listing
    Text,
    /// JSON array of records
    Json,
    /// Label file paths only (one per line)
    Paths,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_discrete_lists() {
        let cli = Cli::parse_from([
            "selectsegs",
            "/data",
            "--studies",
            "A",
            "B",
            "--types",
            "T2AX",
        ]);

        assert_eq!(cli.studies, Some(vec!["A".to_string(), "B".to_string()]));
        assert!(cli.readers.is_none());

        let conditions = cli.conditions_parser().filter_conditions().unwrap();
        assert_eq!(conditions.len(), 2);
    }

    #[test]
    fn test_flag_without_values_is_empty_list() {
        let cli = Cli::parse_from(["selectsegs", "/data", "--readers"]);
        assert_eq!(cli.readers, Some(Vec::new()));
    }

    #[test]
    fn test_camel_case_aliases() {
        let cli = Cli::parse_from([
            "selectsegs",
            "/data",
            "--copyTo",
            "/out",
            "--conditionsFile",
            "c.json",
            "--tabulate",
            "t.tsv",
        ]);

        assert_eq!(cli.copy_to, Some(PathBuf::from("/out")));
        assert_eq!(cli.conditions_file, Some(PathBuf::from("c.json")));
        assert_eq!(cli.tabulate, Some(PathBuf::from("t.tsv")));
        assert!(matches!(cli.format, OutputFormat::Text));
    }
}
