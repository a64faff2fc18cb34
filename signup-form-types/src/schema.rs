use crate::{FieldDescriptor, FieldErrors, FormValues};

/// Whole-form rule set: every field descriptor of a form, in display order.
///
/// A schema is presentation-agnostic. Backends use it to render inputs, and
/// the form controller uses [`ValidationSchema::validate`] to recompute errors
/// after every change.
#[derive(Debug, Clone, Default)]
pub struct ValidationSchema {
    /// Optional heading shown above the form.
    pub title: Option<String>,

    /// All fields in the form.
    pub fields: Vec<FieldDescriptor>,
}

impl ValidationSchema {
    /// Create a new schema with the given fields.
    pub fn new(fields: Vec<FieldDescriptor>) -> Self {
        Self {
            title: None,
            fields,
        }
    }

    /// Set the heading.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Append a field.
    pub fn with_field(mut self, field: FieldDescriptor) -> Self {
        self.fields.push(field);
        self
    }

    /// Get the fields.
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// Look up a field by name.
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name().as_str() == name)
    }

    /// The values a freshly mounted form starts with.
    pub fn initial_values(&self) -> FormValues {
        let mut values = FormValues::new();
        for field in &self.fields {
            values.insert(field.name(), field.initial().clone());
        }
        values
    }

    /// Validate a complete snapshot.
    ///
    /// Returns the first violated rule's message for every invalid field and
    /// omits valid fields. The `general` slot of the result is always empty.
    pub fn validate(&self, values: &FormValues) -> FieldErrors {
        let mut errors = FieldErrors::new();
        for field in &self.fields {
            if let Some(message) = field.first_violation(values) {
                errors.insert(field.name(), message);
            }
        }
        errors
    }

    /// Check if the schema has any fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Get the number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }
}
