use crate::error::Result;
use crate::types::{RecordProperty, SegmentationRecord};
use std::collections::{BTreeMap, BTreeSet};

/// A single filter condition: a property and the values it may take
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Condition {
    pub property: RecordProperty,
    pub accepted_values: BTreeSet<String>,
}

impl Condition {
    /// Creates a condition from any collection of accepted values
    pub fn new<I, S>(property: RecordProperty, accepted_values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            property,
            accepted_values: accepted_values.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns `true` if the record's property value is one of the accepted values
    ///
    /// An absent optional property never matches.
    pub fn matches(&self, record: &SegmentationRecord) -> bool {
        accepts(self.property, &self.accepted_values, record)
    }
}

fn accepts(
    property: RecordProperty,
    accepted_values: &BTreeSet<String>,
    record: &SegmentationRecord,
) -> bool {
    property
        .value(record)
        .map(|value| accepted_values.contains(value))
        .unwrap_or(false)
}

/// Conjunction of filter conditions, at most one per property
///
/// Conditions registered for the same property are merged: the accepted
/// values become the union of every registration.
///
/// # Example
///
/// ```
/// use segselect_core::{FilterConditions, RecordProperty};
///
/// let conditions = FilterConditions::new()
///     .with_condition(RecordProperty::CanonicalType, ["T2AX"])
///     .with_condition(RecordProperty::CanonicalType, ["ADC"])
///     .try_with_condition("structures", ["WholeGland"])
///     .unwrap();
///
/// assert_eq!(conditions.len(), 2);
/// assert!(conditions.accepted_values(RecordProperty::CanonicalType).unwrap().contains("ADC"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterConditions {
    conditions: BTreeMap<RecordProperty, BTreeSet<String>>,
}

impl FilterConditions {
    /// Creates an empty condition set (matches every record)
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: Add a condition on a known property
    pub fn with_condition<I, S>(mut self, property: RecordProperty, accepted_values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.insert(Condition::new(property, accepted_values));
        self
    }

    /// Builder: Add a condition on a property given by name
    ///
    /// # Errors
    ///
    /// Returns `UnknownProperty` if the name does not resolve to a record property.
    pub fn try_with_condition<I, S>(self, property_name: &str, accepted_values: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let property = property_name.parse::<RecordProperty>()?;
        Ok(self.with_condition(property, accepted_values))
    }

    pub(crate) fn insert(&mut self, condition: Condition) {
        self.conditions
            .entry(condition.property)
            .or_default()
            .extend(condition.accepted_values);
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    /// Number of properties with a registered condition
    pub fn len(&self) -> usize {
        self.conditions.len()
    }

    /// Accepted values registered for a property, if any
    pub fn accepted_values(&self, property: RecordProperty) -> Option<&BTreeSet<String>> {
        self.conditions.get(&property)
    }

    /// Iterates conditions in property order
    pub fn iter(&self) -> impl Iterator<Item = Condition> + '_ {
        self.conditions.iter().map(|(property, values)| Condition {
            property: *property,
            accepted_values: values.clone(),
        })
    }

    /// Returns `true` if the record satisfies every condition
    pub fn matches(&self, record: &SegmentationRecord) -> bool {
        self.conditions
            .iter()
            .all(|(property, values)| accepts(*property, values, record))
    }
}

impl FromIterator<Condition> for FilterConditions {
    fn from_iter<T: IntoIterator<Item = Condition>>(iter: T) -> Self {
        let mut conditions = FilterConditions::new();
        for condition in iter {
            conditions.insert(condition);
        }
        conditions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(study: &str, canonical_type: &str) -> SegmentationRecord {
        SegmentationRecord::new(study, "1", canonical_type, "WholeGland", "o.nrrd", "l.nrrd")
            .unwrap()
    }

    #[test]
    fn test_empty_conditions_match_everything() {
        let conditions = FilterConditions::new();
        assert!(conditions.is_empty());
        assert!(conditions.matches(&record("A", "T2")));
    }

    #[test]
    fn test_repeated_property_merges_as_union() {
        let conditions = FilterConditions::new()
            .with_condition(RecordProperty::Study, ["A"])
            .with_condition(RecordProperty::Study, ["B"]);

        assert_eq!(conditions.len(), 1);
        assert!(conditions.matches(&record("A", "T2")));
        assert!(conditions.matches(&record("B", "T2")));
        assert!(!conditions.matches(&record("C", "T2")));
    }

    #[test]
    fn test_conditions_are_conjunctive() {
        let conditions = FilterConditions::new()
            .with_condition(RecordProperty::Study, ["A"])
            .with_condition(RecordProperty::CanonicalType, ["ADC"]);

        assert!(conditions.matches(&record("A", "ADC")));
        assert!(!conditions.matches(&record("A", "T2")));
        assert!(!conditions.matches(&record("B", "ADC")));
    }

    #[test]
    fn test_empty_accepted_values_match_nothing() {
        let conditions =
            FilterConditions::new().with_condition(RecordProperty::Study, Vec::<String>::new());
        assert!(!conditions.matches(&record("A", "T2")));
    }

    #[test]
    fn test_absent_reader_never_matches() {
        let condition = Condition::new(RecordProperty::Reader, ["fedorov"]);
        let anonymous = record("A", "T2");
        assert!(!condition.matches(&anonymous));
        assert!(condition.matches(&anonymous.with_reader("fedorov")));
    }

    #[test]
    fn test_try_with_unknown_property() {
        let result = FilterConditions::new().try_with_condition("modality", ["MR"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_collect_from_conditions() {
        let conditions: FilterConditions = vec![
            Condition::new(RecordProperty::Series, ["1"]),
            Condition::new(RecordProperty::Series, ["2"]),
            Condition::new(RecordProperty::Reader, ["andrey"]),
        ]
        .into_iter()
        .collect();

        assert_eq!(conditions.len(), 2);
        let series: Vec<_> = conditions.iter().next().unwrap().accepted_values.into_iter().collect();
        assert_eq!(series, vec!["1".to_string(), "2".to_string()]);
    }
}
