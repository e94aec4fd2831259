//! Core type definitions for segmentation selection
//!
//! - [`SegmentationRecord`]: One segmented structure of one source series
//! - [`RecordProperty`]: Record properties that filter conditions can refer to
//! - [`Condition`] / [`FilterConditions`]: Conjunction of accepted-value sets

mod condition;
mod property;
mod record;

pub use condition::{Condition, FilterConditions};
pub use property::{RecordProperty, ALL_PROPERTIES};
pub use record::{Measurements, SegmentationRecord};
