use crate::error::Result;
use crate::types::{Condition, FilterConditions, RecordProperty, SegmentationRecord};
use log::debug;
use std::borrow::Borrow;

/// Selects the records that satisfy every condition
///
/// Input order is preserved. With no conditions every record is returned.
/// Works on borrowed (`&[SegmentationRecord]`) and owned record lists alike.
pub fn select_records<I>(records: I, conditions: &FilterConditions) -> Vec<I::Item>
where
    I: IntoIterator,
    I::Item: Borrow<SegmentationRecord>,
{
    records
        .into_iter()
        .filter(|record| {
            conditions.matches(<I::Item as Borrow<SegmentationRecord>>::borrow(record))
        })
        .collect()
}

/// Holds a record list and accumulates named conditions against it
///
/// # Example
///
/// ```
/// use segselect_core::{SegmentationRecord, SegmentationRecordsFilter};
///
/// let records = vec![
///     SegmentationRecord::new("A", "1", "T2", "WholeGland", "a.nrrd", "a-seg.nrrd").unwrap(),
///     SegmentationRecord::new("B", "1", "ADC", "WholeGland", "b.nrrd", "b-seg.nrrd").unwrap(),
/// ];
///
/// let mut filter = SegmentationRecordsFilter::new(records);
/// filter.add_condition("canonicalType", ["T2"]).unwrap();
///
/// let results = filter.results();
/// assert_eq!(results.len(), 1);
/// assert_eq!(results[0].study(), "A");
/// ```
#[derive(Debug, Clone)]
pub struct SegmentationRecordsFilter {
    records: Vec<SegmentationRecord>,
    conditions: FilterConditions,
}

impl SegmentationRecordsFilter {
    pub fn new(records: Vec<SegmentationRecord>) -> Self {
        Self {
            records,
            conditions: FilterConditions::new(),
        }
    }

    /// Registers a condition on the named property
    ///
    /// Registering the same property again widens its accepted values.
    ///
    /// # Errors
    ///
    /// Returns `UnknownProperty` if the name does not resolve to a record
    /// property; the filter is left unchanged.
    pub fn add_condition<I, S>(&mut self, property_name: &str, accepted_values: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let property = property_name.parse::<RecordProperty>()?;
        let condition = Condition::new(property, accepted_values);
        debug!(
            "Adding condition {} in {:?}",
            condition.property, condition.accepted_values
        );
        self.conditions.insert(condition);
        Ok(())
    }

    /// Registers every condition of a prepared condition set
    pub fn add_conditions(&mut self, conditions: &FilterConditions) {
        for condition in conditions.iter() {
            self.conditions.insert(condition);
        }
    }

    pub fn conditions(&self) -> &FilterConditions {
        &self.conditions
    }

    pub fn records(&self) -> &[SegmentationRecord] {
        &self.records
    }

    /// Returns the records matching all registered conditions, in input order
    pub fn results(&self) -> Vec<&SegmentationRecord> {
        select_records(&self.records, &self.conditions)
    }

    /// Consumes the filter, returning the matching records
    pub fn into_results(self) -> Vec<SegmentationRecord> {
        select_records(self.records, &self.conditions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SegSelectError;

    fn record(study: &str, series: &str, canonical_type: &str) -> SegmentationRecord {
        SegmentationRecord::new(
            study,
            series,
            canonical_type,
            "WholeGland",
            format!("{}-{}.nrrd", study, series),
            format!("{}-{}-seg.nrrd", study, series),
        )
        .unwrap()
    }

    fn cohort() -> Vec<SegmentationRecord> {
        vec![
            record("A", "1", "T2"),
            record("B", "1", "ADC"),
            record("A", "2", "ADC"),
            record("C", "3", "T2"),
            record("B", "4", "DCE").with_reader("fedorov"),
        ]
    }

    fn owned(records: Vec<&SegmentationRecord>) -> Vec<SegmentationRecord> {
        records.into_iter().cloned().collect()
    }

    #[test]
    fn test_type_condition_selects_first_record() {
        let records = vec![record("A", "1", "T2"), record("B", "1", "ADC")];
        let mut filter = SegmentationRecordsFilter::new(records.clone());
        filter.add_condition("canonicalType", ["T2"]).unwrap();

        assert_eq!(filter.results(), vec![&records[0]]);
    }

    #[test]
    fn test_no_conditions_is_identity() {
        let records = cohort();
        let filter = SegmentationRecordsFilter::new(records.clone());
        assert_eq!(owned(filter.results()), records);
        assert_eq!(filter.into_results(), records);
    }

    #[test]
    fn test_unknown_property_leaves_filter_untouched() {
        let records = cohort();
        let mut filter = SegmentationRecordsFilter::new(records.clone());
        filter.add_condition("study", ["A"]).unwrap();
        let before = owned(filter.results());

        let err = filter.add_condition("patientName", ["Doe"]).unwrap_err();

        assert!(matches!(err, SegSelectError::UnknownProperty(_)));
        assert_eq!(filter.conditions().len(), 1);
        assert_eq!(owned(filter.results()), before);
    }

    #[test]
    fn test_results_preserve_input_order() {
        let records = cohort();
        let mut filter = SegmentationRecordsFilter::new(records.clone());
        filter.add_condition("canonicalType", ["ADC", "T2"]).unwrap();

        let results = filter.results();
        let positions: Vec<usize> = results
            .iter()
            .map(|r| records.iter().position(|x| x == *r).unwrap())
            .collect();
        let mut sorted = positions.clone();
        sorted.sort_unstable();
        assert_eq!(positions, sorted);
        assert_eq!(results.len(), 4);
    }

    #[test]
    fn test_conjunction_equals_sequential_filtering() {
        let records = cohort();
        let by_study = FilterConditions::new().with_condition(RecordProperty::Study, ["A", "B"]);
        let by_type =
            FilterConditions::new().with_condition(RecordProperty::CanonicalType, ["ADC"]);
        let both = by_study.clone().with_condition(RecordProperty::CanonicalType, ["ADC"]);

        let combined = owned(select_records(&records, &both));
        let first = owned(select_records(&records, &by_study));
        let sequential = owned(select_records(&first, &by_type));

        assert_eq!(combined, sequential);
        assert_eq!(combined.len(), 2);
    }

    #[test]
    fn test_filtering_is_idempotent() {
        let records = cohort();
        let conditions = FilterConditions::new().with_condition(RecordProperty::Study, ["B"]);

        let once = owned(select_records(&records, &conditions));
        let twice = owned(select_records(&once, &conditions));
        assert_eq!(once, twice);
    }

    #[test]
    fn test_empty_accepted_values_yield_empty_result() {
        let mut filter = SegmentationRecordsFilter::new(cohort());
        filter.add_condition("series", Vec::<String>::new()).unwrap();
        assert!(filter.results().is_empty());
    }

    #[test]
    fn test_reader_condition_skips_unread_records() {
        let mut filter = SegmentationRecordsFilter::new(cohort());
        filter.add_condition("readers", ["fedorov"]).unwrap();

        let results = filter.results();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].series(), "4");
    }

    #[test]
    fn test_add_conditions_merges_prepared_set() {
        let mut filter = SegmentationRecordsFilter::new(cohort());
        filter.add_condition("study", ["A"]).unwrap();
        filter.add_conditions(&FilterConditions::new().with_condition(RecordProperty::Study, ["C"]));

        let studies: Vec<_> = filter.results().iter().map(|r| r.study().to_string()).collect();
        assert_eq!(studies, vec!["A", "A", "C"]);
    }
}
