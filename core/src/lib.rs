pub mod cli;
pub mod conditions;
pub mod error;
pub mod export;
pub mod selection;
pub mod source;
pub mod types;

pub use cli::report::SelectionReport;
pub use conditions::ConditionsParser;
pub use error::{Result, SegSelectError};
pub use selection::{select_records, SegmentationRecordsFilter};
pub use source::MpReviewParser;
pub use types::*;
