//! Form state controller.
//!
//! Holds the current values, touched flags, errors and the submitting flag of
//! one form. Every value change re-runs the schema over the whole snapshot.

use signup_form_types::{
    FieldErrors, FieldName, FieldValue, Form, FormValues, GENERAL_KEY, TouchedFlags,
    ValidationSchema,
};
use tracing::{debug, trace};

use crate::{Settlement, SubmissionState};

/// In-process state of a single form.
///
/// All operations are synchronous and infallible.
#[derive(Debug, Clone)]
pub struct FormController {
    schema: ValidationSchema,
    values: FormValues,
    touched: TouchedFlags,
    errors: FieldErrors,
    submitting: bool,
    submit_count: u32,
    state: SubmissionState,
    last_settlement: Option<Settlement>,
}

impl FormController {
    /// Mount a form with the schema's initial values.
    pub fn new(schema: ValidationSchema) -> Self {
        let values = schema.initial_values();
        let errors = schema.validate(&values);
        Self {
            schema,
            values,
            touched: TouchedFlags::new(),
            errors,
            submitting: false,
            submit_count: 0,
            state: SubmissionState::Idle,
            last_settlement: None,
        }
    }

    /// Mount the form of a [`Form`] type.
    pub fn for_form<F: Form>() -> Self {
        Self::new(F::schema())
    }

    pub fn schema(&self) -> &ValidationSchema {
        &self.schema
    }

    pub fn values(&self) -> &FormValues {
        &self.values
    }

    pub fn touched(&self) -> &TouchedFlags {
        &self.touched
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Number of submit attempts, aborted ones included.
    pub fn submit_count(&self) -> u32 {
        self.submit_count
    }

    /// Where the submission workflow currently is.
    pub fn submission_state(&self) -> &SubmissionState {
        &self.state
    }

    /// How the most recent remote call ended, if any call has settled.
    ///
    /// Kept after the form returns to [`SubmissionState::Idle`].
    pub fn last_settlement(&self) -> Option<&Settlement> {
        self.last_settlement.as_ref()
    }

    /// Check if no schema field has an error.
    pub fn is_valid(&self) -> bool {
        !self.errors.has_field_errors()
    }

    /// Set a field's value and revalidate the whole snapshot.
    ///
    /// Schema-derived errors are replaced; the `general` error is kept.
    pub fn set_value(&mut self, field: impl Into<FieldName>, value: impl Into<FieldValue>) {
        let field = field.into();
        trace!(%field, "set value");
        self.values.insert(field, value);
        self.revalidate();
    }

    /// Mark a field as interacted with. Marking it again changes nothing.
    pub fn set_touched(&mut self, field: impl Into<FieldName>) {
        let field = field.into();
        if self.touched.touch(field.clone()) {
            debug!(%field, "field touched");
        }
    }

    /// Mark every schema field as touched, so all current errors become visible.
    pub fn touch_all(&mut self) {
        for field in &self.schema.fields {
            self.touched.touch(field.name());
        }
    }

    /// Set an error message directly.
    ///
    /// `"general"` writes the out-of-band slot. Any other field is overwritten
    /// by the next revalidation.
    pub fn set_field_error(&mut self, field: impl Into<FieldName>, message: impl Into<String>) {
        let field = field.into();
        let message = message.into();
        debug!(%field, %message, "set field error");
        self.errors.insert(field, message);
    }

    pub fn clear_general_error(&mut self) {
        self.errors.remove(GENERAL_KEY);
    }

    pub fn set_submitting(&mut self, submitting: bool) {
        self.submitting = submitting;
    }

    /// Go back to the freshly mounted state.
    pub fn reset(&mut self) {
        debug!("form reset");
        self.values = self.schema.initial_values();
        self.touched.clear();
        self.errors = self.schema.validate(&self.values);
        self.submitting = false;
        self.submit_count = 0;
        self.state = SubmissionState::Idle;
        self.last_settlement = None;
    }

    pub(crate) fn record_submit_attempt(&mut self) {
        self.submit_count += 1;
    }

    pub(crate) fn transition(&mut self, state: SubmissionState) {
        debug!(from = ?self.state, to = ?state, "submission transition");
        if let SubmissionState::Settled(settlement) = &state {
            self.last_settlement = Some(settlement.clone());
        }
        self.state = state;
    }

    pub(crate) fn revalidate(&mut self) {
        let fresh = self.schema.validate(&self.values);
        self.errors.replace_field_errors(fresh);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signup::*;

    fn controller() -> FormController {
        FormController::for_form::<SignUp>()
    }

    #[test]
    fn fresh_form() {
        let form = controller();
        assert_eq!(form.values().get_text(EMAIL).unwrap(), "");
        assert!(!form.values().get_bool(AGREE_TO_TERMS).unwrap());
        assert!(form.touched().is_empty());
        assert!(!form.is_submitting());
        assert_eq!(form.submit_count(), 0);
        assert!(!form.is_valid());
    }

    #[test]
    fn set_value_revalidates_dependents() {
        let mut form = controller();
        form.set_value(PASSWORD, "abc");
        form.set_value(CONFIRM_PASSWORD, "abc");
        assert_eq!(form.errors().get(CONFIRM_PASSWORD), None);

        // Only the password changes; the confirmation error must still appear.
        form.set_value(PASSWORD, "abcd");
        assert_eq!(form.errors().get(CONFIRM_PASSWORD), Some(PASSWORDS_MUST_MATCH));
    }

    #[test]
    fn general_survives_revalidation() {
        let mut form = controller();
        form.set_field_error("general", "You playing with the fake email");
        form.set_value(EMAIL, "x@y.com");
        assert_eq!(form.errors().general(), Some("You playing with the fake email"));

        form.clear_general_error();
        assert_eq!(form.errors().general(), None);
    }

    #[test]
    fn schema_slot_error_is_overwritten_by_revalidation() {
        let mut form = controller();
        form.set_value(EMAIL, "x@y.com");
        form.set_field_error(EMAIL, "taken");
        assert_eq!(form.errors().get(EMAIL), Some("taken"));

        form.set_value(PASSWORD, "abc");
        assert_eq!(form.errors().get(EMAIL), None);
    }

    #[test]
    fn touch_all_marks_schema_fields() {
        let mut form = controller();
        form.touch_all();
        assert_eq!(form.touched().len(), 4);
        assert!(!form.touched().is_touched(GENERAL_KEY));
    }

    #[test]
    fn reset_restores_mount_state() {
        let mut form = controller();
        form.set_value(EMAIL, "x@y.com");
        form.set_touched(EMAIL);
        form.set_field_error("general", "boom");
        form.record_submit_attempt();

        form.reset();
        assert_eq!(form.values(), &signup_schema().initial_values());
        assert!(form.touched().is_empty());
        assert_eq!(form.errors().general(), None);
        assert_eq!(form.submit_count(), 0);
    }
}
