use std::collections::HashMap;

use crate::FieldName;

/// Error messages for a form, keyed by field name.
///
/// Schema-derived entries are recomputed from the current values after every
/// change. The `general` slot is kept apart: it is written by the submission
/// workflow and survives revalidation until it is explicitly cleared.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    fields: HashMap<FieldName, String>,
    general: Option<String>,
}

impl FieldErrors {
    /// Create an empty error set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the error for a field. `"general"` reads the out-of-band slot.
    pub fn get(&self, field: &str) -> Option<&str> {
        if field == crate::GENERAL_KEY {
            return self.general();
        }
        self.fields.get(field).map(String::as_str)
    }

    /// Set the error for a field. `"general"` writes the out-of-band slot.
    pub fn insert(&mut self, field: impl Into<FieldName>, message: impl Into<String>) {
        let field = field.into();
        let message = message.into();
        if field.is_general() {
            self.general = Some(message);
        } else {
            self.fields.insert(field, message);
        }
    }

    /// Remove the error for a field, returning it.
    pub fn remove(&mut self, field: &str) -> Option<String> {
        if field == crate::GENERAL_KEY {
            return self.general.take();
        }
        self.fields.remove(field)
    }

    /// The whole-submission error, if any.
    pub fn general(&self) -> Option<&str> {
        self.general.as_deref()
    }

    pub fn clear_general(&mut self) {
        self.general = None;
    }

    /// Replace all schema-derived entries with `fresh`, keeping `general`.
    pub fn replace_field_errors(&mut self, fresh: FieldErrors) {
        self.fields = fresh.fields;
    }

    /// Iterate over schema-derived entries. The `general` slot is not included.
    pub fn iter(&self) -> impl Iterator<Item = (&FieldName, &str)> {
        self.fields.iter().map(|(name, msg)| (name, msg.as_str()))
    }

    /// Names of fields with a non-empty schema-derived error.
    pub fn invalid_fields(&self) -> Vec<FieldName> {
        let mut names: Vec<FieldName> = self
            .fields
            .iter()
            .filter(|(_, msg)| !msg.is_empty())
            .map(|(name, _)| name.clone())
            .collect();
        names.sort();
        names
    }

    /// Check if any schema field has a non-empty error.
    pub fn has_field_errors(&self) -> bool {
        self.fields.values().any(|msg| !msg.is_empty())
    }

    /// Number of schema-derived entries.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Check if there are no errors at all, including `general`.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.general.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn general_is_out_of_band() {
        let mut errors = FieldErrors::new();
        errors.insert("general", "boom");
        errors.insert("email", "Email is a required field");

        assert_eq!(errors.general(), Some("boom"));
        assert_eq!(errors.get("general"), Some("boom"));
        assert_eq!(errors.len(), 1);
        assert!(errors.iter().all(|(name, _)| !name.is_general()));
    }

    #[test]
    fn replace_keeps_general() {
        let mut errors = FieldErrors::new();
        errors.insert("general", "boom");
        errors.insert("email", "Email is a required field");

        errors.replace_field_errors(FieldErrors::new());
        assert_eq!(errors.get("email"), None);
        assert_eq!(errors.general(), Some("boom"));
        assert!(!errors.is_empty());

        errors.clear_general();
        assert!(errors.is_empty());
    }

    #[test]
    fn invalid_fields_sorted() {
        let mut errors = FieldErrors::new();
        errors.insert("password", "Seems a bit short...");
        errors.insert("email", "Email is a required field");
        errors.insert("confirmPassword", "");

        assert_eq!(
            errors.invalid_fields(),
            vec![FieldName::new("email"), FieldName::new("password")]
        );
        assert!(errors.has_field_errors());
    }
}
