//! Construction of filter conditions from command-line lists or a JSON file

use crate::error::{Result, SegSelectError};
use crate::types::{FilterConditions, RecordProperty};
use log::{info, warn};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

/// Collects filter conditions from discrete value lists or a conditions file
///
/// When a conditions file is set, the discrete lists are ignored.
///
/// # Example
///
/// ```
/// use segselect_core::{ConditionsParser, RecordProperty};
///
/// let conditions = ConditionsParser::new()
///     .with_list(RecordProperty::Study, Some(vec!["Case01".to_string()]))
///     .with_list(RecordProperty::Reader, None)
///     .filter_conditions()
///     .unwrap();
///
/// assert_eq!(conditions.len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConditionsParser {
    lists: Vec<(RecordProperty, Vec<String>)>,
    conditions_file: Option<PathBuf>,
}

impl ConditionsParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: Add a discrete list of accepted values
    ///
    /// `None` means the list was not given and adds no condition. An empty
    /// list adds a condition that matches nothing.
    pub fn with_list(mut self, property: RecordProperty, values: Option<Vec<String>>) -> Self {
        if let Some(values) = values {
            self.lists.push((property, values));
        }
        self
    }

    /// Builder: Read conditions from a JSON file instead of the discrete lists
    pub fn with_conditions_file(mut self, path: Option<PathBuf>) -> Self {
        self.conditions_file = path;
        self
    }

    /// Produces the condition set
    ///
    /// # Errors
    ///
    /// Returns an error if the conditions file cannot be read or parsed, or
    /// names an unknown property.
    pub fn filter_conditions(&self) -> Result<FilterConditions> {
        if let Some(path) = &self.conditions_file {
            if !self.lists.is_empty() {
                warn!(
                    "Conditions file {} given, ignoring {} discrete filter list(s)",
                    path.display(),
                    self.lists.len()
                );
            }
            return load_conditions_file(path);
        }

        Ok(self
            .lists
            .iter()
            .fold(FilterConditions::new(), |conditions, (property, values)| {
                conditions.with_condition(*property, values.iter().cloned())
            }))
    }
}

/// Loads a JSON conditions file
pub fn load_conditions_file(path: &Path) -> Result<FilterConditions> {
    info!("Reading filter conditions from {}", path.display());
    let contents = fs::read_to_string(path)?;
    parse_conditions(&contents)
}

/// Parses conditions from JSON text
///
/// The document must be an object mapping property names to a list of
/// accepted values. A single string or number is treated as a one-element list.
///
/// ```
/// use segselect_core::{conditions::parse_conditions, RecordProperty};
///
/// let conditions = parse_conditions(r#"{"canonicalType": ["T2AX", "ADC"], "series": 5}"#).unwrap();
/// assert_eq!(conditions.accepted_values(RecordProperty::CanonicalType).unwrap().len(), 2);
/// assert!(conditions.accepted_values(RecordProperty::Series).unwrap().contains("5"));
/// ```
pub fn parse_conditions(json: &str) -> Result<FilterConditions> {
    let document: Value = serde_json::from_str(json)?;
    let object = document.as_object().ok_or_else(|| {
        SegSelectError::ConditionsFile("expected an object of property names".to_string())
    })?;

    let mut conditions = FilterConditions::new();
    for (name, value) in object {
        let values = match value {
            Value::Array(items) => items
                .iter()
                .map(|item| scalar_to_string(name, item))
                .collect::<Result<Vec<_>>>()?,
            other => vec![scalar_to_string(name, other)?],
        };
        conditions = conditions.try_with_condition(name, values)?;
    }

    Ok(conditions)
}

fn scalar_to_string(name: &str, value: &Value) -> Result<String> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(SegSelectError::ConditionsFile(format!(
            "unsupported value for '{}': {}",
            name, other
        ))),
    }
}
