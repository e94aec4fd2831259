//! Discovery of segmentation records on disk

mod mpreview;
mod naming;

pub use mpreview::MpReviewParser;
pub use naming::SegmentationName;
