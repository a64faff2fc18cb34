//! Field presentation adapter.
//!
//! Binds one field's slice of [`FormController`] state to an input primitive.
//! Backends draw [`FieldProps`] and feed [`FieldEvent`]s back.

use signup_form_types::{FieldKind, FieldName, FieldValue};

use crate::FormController;

/// A raw input event for one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldEvent {
    /// The user edited the value.
    Change(FieldValue),

    /// The input lost focus.
    Blur,
}

/// Everything a backend needs to draw one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldProps {
    pub name: FieldName,
    pub label: String,
    pub placeholder: Option<String>,
    pub kind: FieldKind,
    pub value: FieldValue,
    /// The error to show. Always `None` until the field has been touched.
    pub error: Option<String>,
}

impl FieldProps {
    /// Whether the input should be drawn in its error style.
    pub fn is_flagged(&self) -> bool {
        self.error.is_some()
    }
}

impl FormController {
    /// The error to display for a field.
    ///
    /// Shown only if the field is touched and has a non-empty error.
    pub fn visible_error(&self, field: &str) -> Option<&str> {
        if !self.touched().is_touched(field) {
            return None;
        }
        self.errors().get(field).filter(|msg| !msg.is_empty())
    }

    /// The whole-submission error line. Not gated on touched flags.
    pub fn general_error(&self) -> Option<&str> {
        self.errors().general().filter(|msg| !msg.is_empty())
    }

    /// Presentation data for one schema field.
    pub fn field_props(&self, field: &str) -> Option<FieldProps> {
        let descriptor = self.schema().field(field)?;
        let value = self
            .values()
            .get(field)
            .cloned()
            .unwrap_or_else(|| descriptor.initial().clone());
        Some(FieldProps {
            name: descriptor.name().clone(),
            label: descriptor.label().to_string(),
            placeholder: descriptor.placeholder().map(str::to_string),
            kind: descriptor.kind(),
            value,
            error: self.visible_error(field).map(str::to_string),
        })
    }

    /// Presentation data for every schema field, in display order.
    pub fn all_field_props(&self) -> Vec<FieldProps> {
        self.schema()
            .fields()
            .iter()
            .filter_map(|descriptor| self.field_props(descriptor.name().as_str()))
            .collect()
    }

    /// Route an input event: edits go to `set_value`, blurs to `set_touched`.
    pub fn handle_field_event(&mut self, field: &str, event: FieldEvent) {
        match event {
            FieldEvent::Change(value) => self.set_value(field, value),
            FieldEvent::Blur => self.set_touched(field),
        }
    }
}
