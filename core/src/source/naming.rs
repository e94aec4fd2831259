use regex::Regex;
use std::sync::OnceLock;

/// Components of a segmentation file name
///
/// Names follow `[<reader>-]<structure>[-<timestamp>]`, e.g.
/// `fedorov-WholeGland-20150207143511`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentationName {
    pub reader: Option<String>,
    pub structure: String,
    pub timestamp: Option<String>,
}

impl SegmentationName {
    /// Parses a segmentation file stem (file name without extension)
    ///
    /// Returns `None` if the stem has no structure component or too many
    /// dash-separated parts to be unambiguous.
    pub fn parse(stem: &str) -> Option<Self> {
        static TIMESTAMP: OnceLock<Regex> = OnceLock::new();
        let timestamp_re =
            TIMESTAMP.get_or_init(|| Regex::new(r"^\d{8,14}$").expect("Failed to compile regex"));

        let mut parts: Vec<&str> = stem.split('-').collect();
        let has_timestamp =
            parts.len() > 1 && parts.last().is_some_and(|last| timestamp_re.is_match(last));
        let timestamp = if has_timestamp {
            parts.pop().map(str::to_string)
        } else {
            None
        };

        if parts.iter().any(|p| p.trim().is_empty()) {
            return None;
        }

        match parts.as_slice() {
            [structure] => Some(Self {
                reader: None,
                structure: structure.to_string(),
                timestamp,
            }),
            [reader, structure] => Some(Self {
                reader: Some(reader.to_string()),
                structure: structure.to_string(),
                timestamp,
            }),
            _ => None,
        }
    }
}
