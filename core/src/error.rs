use std::path::PathBuf;
use thiserror::Error;

/// Result type for segselect operations
pub type Result<T> = std::result::Result<T, SegSelectError>;

/// Error types for segselect operations
#[derive(Error, Debug)]
pub enum SegSelectError {
    /// Filter condition names a property records do not have
    #[error("Unknown record property: {0}")]
    UnknownProperty(String),

    /// Conditions file could not be interpreted
    #[error("Conditions file error: {0}")]
    ConditionsFile(String),

    /// Record is missing a required property
    #[error("Invalid segmentation record: {0}")]
    InvalidRecord(String),

    /// Root data path is not a directory
    #[error("Not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    /// Copying a selected file failed
    #[error("Failed to copy {} to {}: {source}", from.display(), to.display())]
    Copy {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Selection output could not be produced
    #[error("Output error: {0}")]
    Output(String),

    /// I/O error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl From<serde_json::Error> for SegSelectError {
    fn from(e: serde_json::Error) -> Self {
        SegSelectError::ConditionsFile(format!("{}", e))
    }
}
