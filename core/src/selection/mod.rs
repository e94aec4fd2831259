//! Conditions-based selection of segmentation records

mod filter;

pub use filter::{select_records, SegmentationRecordsFilter};
