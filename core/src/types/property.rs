use crate::error::SegSelectError;
use crate::types::SegmentationRecord;
use std::fmt;
use std::str::FromStr;

/// Segmentation record properties that filter conditions can refer to
///
/// Each variant maps to a typed accessor on [`SegmentationRecord`], so
/// property names are validated when a condition is registered instead of
/// when records are evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RecordProperty {
    Study,
    Series,
    CanonicalType,
    SegmentedStructure,
    Reader,
}

/// All filterable properties, in display order
pub const ALL_PROPERTIES: [RecordProperty; 5] = [
    RecordProperty::Study,
    RecordProperty::Series,
    RecordProperty::CanonicalType,
    RecordProperty::SegmentedStructure,
    RecordProperty::Reader,
];

impl RecordProperty {
    /// Returns the canonical property token
    pub fn simple_name(&self) -> &'static str {
        match self {
            RecordProperty::Study => "study",
            RecordProperty::Series => "series",
            RecordProperty::CanonicalType => "canonicalType",
            RecordProperty::SegmentedStructure => "segmentedStructure",
            RecordProperty::Reader => "reader",
        }
    }

    /// Reads this property from a record
    ///
    /// Returns `None` only for optional properties that are absent.
    pub fn value<'a>(&self, record: &'a SegmentationRecord) -> Option<&'a str> {
        match self {
            RecordProperty::Study => Some(record.study()),
            RecordProperty::Series => Some(record.series()),
            RecordProperty::CanonicalType => Some(record.canonical_type()),
            RecordProperty::SegmentedStructure => Some(record.segmented_structure()),
            RecordProperty::Reader => record.reader(),
        }
    }
}

impl FromStr for RecordProperty {
    type Err = SegSelectError;

    /// Parses a property token; CLI flag names and snake_case spellings are
    /// accepted as aliases.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "study" | "studies" => Ok(RecordProperty::Study),
            "series" => Ok(RecordProperty::Series),
            "canonicalType" | "canonical_type" | "type" | "types" => {
                Ok(RecordProperty::CanonicalType)
            }
            "segmentedStructure" | "segmented_structure" | "structure" | "structures" => {
                Ok(RecordProperty::SegmentedStructure)
            }
            "reader" | "readers" => Ok(RecordProperty::Reader),
            other => Err(SegSelectError::UnknownProperty(other.to_string())),
        }
    }
}

impl fmt::Display for RecordProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.simple_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("study", RecordProperty::Study)]
    #[case("studies", RecordProperty::Study)]
    #[case("series", RecordProperty::Series)]
    #[case("canonicalType", RecordProperty::CanonicalType)]
    #[case("types", RecordProperty::CanonicalType)]
    #[case("segmentedStructure", RecordProperty::SegmentedStructure)]
    #[case("structures", RecordProperty::SegmentedStructure)]
    #[case("reader", RecordProperty::Reader)]
    #[case("readers", RecordProperty::Reader)]
    fn test_parse_property(#[case] token: &str, #[case] expected: RecordProperty) {
        assert_eq!(token.parse::<RecordProperty>().unwrap(), expected);
    }

    #[test]
    fn test_parse_unknown_property() {
        let err = "patientAge".parse::<RecordProperty>().unwrap_err();
        assert!(matches!(err, SegSelectError::UnknownProperty(ref p) if p == "patientAge"));
    }

    #[test]
    fn test_simple_name_round_trips() {
        for property in ALL_PROPERTIES {
            assert_eq!(
                property.simple_name().parse::<RecordProperty>().unwrap(),
                property
            );
        }
    }

    #[test]
    fn test_value_accessors() {
        let record = SegmentationRecord::new("A", "7", "ADC", "Tumor", "o.nrrd", "l.nrrd").unwrap();
        assert_eq!(RecordProperty::Study.value(&record), Some("A"));
        assert_eq!(RecordProperty::Series.value(&record), Some("7"));
        assert_eq!(RecordProperty::CanonicalType.value(&record), Some("ADC"));
        assert_eq!(RecordProperty::SegmentedStructure.value(&record), Some("Tumor"));
        assert_eq!(RecordProperty::Reader.value(&record), None);

        let record = record.with_reader("andrey");
        assert_eq!(RecordProperty::Reader.value(&record), Some("andrey"));
    }
}
