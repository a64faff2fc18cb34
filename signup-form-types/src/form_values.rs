use std::collections::HashMap;

use crate::{FieldName, FieldValue};

/// Error type for typed value access.
#[derive(Debug, thiserror::Error)]
pub enum ValueError {
    #[error("Missing value for field: {0}")]
    MissingField(FieldName),

    #[error("Type mismatch at field '{field}': expected {expected}, got {actual}")]
    TypeMismatch {
        field: FieldName,
        expected: &'static str,
        actual: &'static str,
    },
}

/// Current values of every field in a form.
///
/// The whole snapshot is handed to validation so that cross-field rules
/// always see the latest sibling values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormValues {
    values: HashMap<FieldName, FieldValue>,
}

impl FormValues {
    /// Create a new empty value snapshot.
    pub fn new() -> Self {
        Self {
            values: HashMap::new(),
        }
    }

    /// Set the value of a field, replacing any previous value.
    pub fn insert(&mut self, field: impl Into<FieldName>, value: impl Into<FieldValue>) {
        self.values.insert(field.into(), value.into());
    }

    /// Builder-style variant of [`FormValues::insert`].
    pub fn with(mut self, field: impl Into<FieldName>, value: impl Into<FieldValue>) -> Self {
        self.insert(field, value);
        self
    }

    /// Get the value of a field.
    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.values.get(field)
    }

    /// Check if a value exists for the field.
    pub fn contains(&self, field: &str) -> bool {
        self.values.contains_key(field)
    }

    /// Get an iterator over all field-value pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&FieldName, &FieldValue)> {
        self.values.iter()
    }

    /// Get the number of fields with a value.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if there are no values.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Get a text value for the given field.
    pub fn get_text(&self, field: &str) -> Result<&str, ValueError> {
        match self.get(field) {
            Some(FieldValue::Text(s)) => Ok(s),
            Some(other) => Err(ValueError::TypeMismatch {
                field: field.into(),
                expected: "string",
                actual: other.type_name(),
            }),
            None => Err(ValueError::MissingField(field.into())),
        }
    }

    /// Get a boolean value for the given field.
    pub fn get_bool(&self, field: &str) -> Result<bool, ValueError> {
        match self.get(field) {
            Some(FieldValue::Bool(b)) => Ok(*b),
            Some(other) => Err(ValueError::TypeMismatch {
                field: field.into(),
                expected: "boolean",
                actual: other.type_name(),
            }),
            None => Err(ValueError::MissingField(field.into())),
        }
    }
}

impl<'a> IntoIterator for &'a FormValues {
    type Item = (&'a FieldName, &'a FieldValue);
    type IntoIter = std::collections::hash_map::Iter<'a, FieldName, FieldValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_and_get() {
        let mut values = FormValues::new();
        values.insert("email", "john@example.com");
        values.insert("agreeToTerms", true);

        assert_eq!(values.get_text("email").unwrap(), "john@example.com");
        assert!(values.get_bool("agreeToTerms").unwrap());
    }

    #[test]
    fn insert_replaces() {
        let values = FormValues::new()
            .with("password", "a")
            .with("password", "ab");
        assert_eq!(values.len(), 1);
        assert_eq!(values.get_text("password").unwrap(), "ab");
    }

    #[test]
    fn type_mismatch_error() {
        let values = FormValues::new().with("agreeToTerms", false);

        let result = values.get_text("agreeToTerms");
        assert!(matches!(result, Err(ValueError::TypeMismatch { .. })));
    }

    #[test]
    fn missing_field_error() {
        let err = FormValues::new().get_bool("agreeToTerms").unwrap_err();
        assert_eq!(err.to_string(), "Missing value for field: agreeToTerms");
    }
}
