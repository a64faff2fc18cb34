//! Submission workflow.
//!
//! `Idle → Validating → Submitting → Settled(Success | Failure) → Idle`
//!
//! [`submit`] runs the whole cycle. Event loops that must keep drawing while
//! the remote call is in flight use [`begin`] and [`settle`] instead and run
//! the call themselves.

use std::ops::{Deref, DerefMut};

use signup_form_types::{
    FieldName, FormValues, GENERAL_KEY, RemoteError, ResultSink, SignUpService,
};
use tracing::{info, warn};

use crate::FormController;
use crate::signup::EMAIL;

/// Where a form's submission currently is.
///
/// Between calls the form is only ever `Idle` or `Submitting`. `Validating`
/// and `Settled` are passed through inside [`begin`] and [`settle`] and show
/// up in the `submission transition` debug log; the outcome of the last
/// settled call stays readable through [`FormController::last_settlement`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SubmissionState {
    #[default]
    Idle,
    Validating,
    Submitting,
    Settled(Settlement),
}

/// How the remote call ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Settlement {
    Success,
    Failure(String),
}

/// Why a submit attempt never reached the remote call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmitAborted {
    /// At least one field failed validation.
    #[error("{} field(s) failed validation", fields.len())]
    Invalid { fields: Vec<FieldName> },

    /// A previous submission has not settled yet.
    #[error("A submission is already in progress")]
    InProgress,
}

/// Final result of one submit attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Validation failed; the remote call was never made.
    Aborted(SubmitAborted),

    /// The remote call succeeded and the values were presented.
    Succeeded(FormValues),

    /// The remote call (or presenting its result) failed with this message,
    /// which is now the form's `general` error.
    Failed(String),
}

impl SubmitOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Succeeded(_))
    }
}

/// A validated submission whose remote call has not settled yet.
///
/// Produced by [`begin`], consumed by [`settle`].
#[derive(Debug)]
#[must_use = "a pending submission keeps the form submitting until it is settled"]
pub struct PendingSubmission {
    email: String,
    values: FormValues,
}

impl PendingSubmission {
    /// The email address to send to the remote call.
    pub fn email(&self) -> &str {
        &self.email
    }

    /// The snapshot that was validated.
    pub fn values(&self) -> &FormValues {
        &self.values
    }
}

/// Resets the submitting flag when dropped, whichever way settlement went.
struct Finalizer<'a> {
    controller: &'a mut FormController,
}

impl<'a> Finalizer<'a> {
    fn new(controller: &'a mut FormController) -> Self {
        Self { controller }
    }
}

impl Deref for Finalizer<'_> {
    type Target = FormController;

    fn deref(&self) -> &FormController {
        self.controller
    }
}

impl DerefMut for Finalizer<'_> {
    fn deref_mut(&mut self) -> &mut FormController {
        self.controller
    }
}

impl Drop for Finalizer<'_> {
    fn drop(&mut self) {
        self.controller.set_submitting(false);
        self.controller.transition(SubmissionState::Idle);
    }
}

/// Start a submit attempt.
///
/// Clears the previous `general` error, marks every field touched and
/// validates the full snapshot. On success the form is submitting and the
/// returned [`PendingSubmission`] carries the email for the remote call.
pub fn begin(controller: &mut FormController) -> Result<PendingSubmission, SubmitAborted> {
    if controller.is_submitting() {
        return Err(SubmitAborted::InProgress);
    }

    controller.record_submit_attempt();
    controller.clear_general_error();
    controller.touch_all();
    controller.transition(SubmissionState::Validating);
    controller.revalidate();

    if !controller.is_valid() {
        let fields = controller.errors().invalid_fields();
        info!(?fields, "submission aborted, form is invalid");
        controller.transition(SubmissionState::Idle);
        return Err(SubmitAborted::Invalid { fields });
    }

    let email = controller
        .values()
        .get_text(EMAIL)
        .map(str::to_string)
        .unwrap_or_default();
    controller.set_submitting(true);
    controller.transition(SubmissionState::Submitting);

    Ok(PendingSubmission {
        email,
        values: controller.values().clone(),
    })
}

/// Map the remote call's outcome back into form state.
///
/// On success the snapshot is handed to `sink`; on failure (of the call or of
/// the sink) the message becomes the `general` error. The submitting flag is
/// always reset, even if `sink` panics.
pub fn settle<R>(
    controller: &mut FormController,
    pending: PendingSubmission,
    result: Result<(), RemoteError>,
    sink: &mut R,
) -> SubmitOutcome
where
    R: ResultSink + ?Sized,
{
    let mut finalizer = Finalizer::new(controller);
    apply_settlement(&mut finalizer, pending, result, sink)
}

/// Run a complete submit attempt against `service`.
///
/// If the returned future is dropped while the call is in flight, the
/// submitting flag is still reset.
pub async fn submit<S, R>(
    controller: &mut FormController,
    service: &S,
    sink: &mut R,
) -> SubmitOutcome
where
    S: SignUpService,
    R: ResultSink + ?Sized,
{
    let pending = match begin(controller) {
        Ok(pending) => pending,
        Err(aborted) => return SubmitOutcome::Aborted(aborted),
    };

    let mut finalizer = Finalizer::new(controller);
    let result = service.sign_up(pending.email()).await;
    apply_settlement(&mut finalizer, pending, result, sink)
}

fn apply_settlement<R>(
    controller: &mut FormController,
    pending: PendingSubmission,
    result: Result<(), RemoteError>,
    sink: &mut R,
) -> SubmitOutcome
where
    R: ResultSink + ?Sized,
{
    match result {
        Ok(()) => {
            controller.transition(SubmissionState::Settled(Settlement::Success));
            match sink.present(&pending.values) {
                Ok(()) => {
                    info!(email = %pending.email, "sign-up succeeded");
                    SubmitOutcome::Succeeded(pending.values)
                }
                Err(err) => {
                    let message = err.to_string();
                    warn!(%message, "presenting the submitted values failed");
                    controller.set_field_error(GENERAL_KEY, message.clone());
                    SubmitOutcome::Failed(message)
                }
            }
        }
        Err(err) => {
            let message = err.to_string();
            warn!(email = %pending.email, %message, "sign-up failed");
            controller.transition(SubmissionState::Settled(Settlement::Failure(
                message.clone(),
            )));
            controller.set_field_error(GENERAL_KEY, message.clone());
            SubmitOutcome::Failed(message)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signup::*;
    use crate::{MockSignUpService, SENTINEL_EMAIL};
    use std::panic::{AssertUnwindSafe, catch_unwind};
    use std::time::Duration;

    fn valid_form() -> FormController {
        let mut form = FormController::for_form::<SignUp>();
        form.set_value(EMAIL, "johndoe@example.com");
        form.set_value(PASSWORD, "abc");
        form.set_value(CONFIRM_PASSWORD, "abc");
        form.set_value(AGREE_TO_TERMS, true);
        form
    }

    fn ignore(_: &FormValues) -> anyhow::Result<()> {
        Ok(())
    }

    #[test]
    fn begin_enters_submitting() {
        let mut form = valid_form();
        let pending = begin(&mut form).unwrap();

        assert!(form.is_submitting());
        assert_eq!(form.submission_state(), &SubmissionState::Submitting);
        assert_eq!(pending.email(), "johndoe@example.com");
        assert_eq!(begin(&mut form).unwrap_err(), SubmitAborted::InProgress);

        let outcome = settle(&mut form, pending, Ok(()), &mut ignore);
        assert!(outcome.is_success());
        assert!(!form.is_submitting());
        assert_eq!(form.submission_state(), &SubmissionState::Idle);
        assert_eq!(form.last_settlement(), Some(&Settlement::Success));
    }

    #[test]
    fn begin_on_invalid_form_aborts() {
        let mut form = FormController::for_form::<SignUp>();
        form.set_value(EMAIL, "johndoe@example.com");

        let aborted = begin(&mut form).unwrap_err();
        assert_eq!(
            aborted,
            SubmitAborted::Invalid {
                fields: vec![
                    FieldName::new(AGREE_TO_TERMS),
                    FieldName::new(CONFIRM_PASSWORD),
                    FieldName::new(PASSWORD),
                ]
            }
        );
        assert_eq!(aborted.to_string(), "3 field(s) failed validation");
        assert!(!form.is_submitting());
        assert_eq!(form.submit_count(), 1);
        assert_eq!(form.visible_error(PASSWORD), Some(PASSWORD_REQUIRED));
    }

    #[test]
    fn failing_sink_becomes_general_error() {
        let mut form = valid_form();
        let pending = begin(&mut form).unwrap();

        let mut sink = |_: &FormValues| -> anyhow::Result<()> { anyhow::bail!("no display") };
        let outcome = settle(&mut form, pending, Ok(()), &mut sink);

        assert_eq!(outcome, SubmitOutcome::Failed("no display".to_string()));
        assert_eq!(form.general_error(), Some("no display"));
        assert!(!form.is_submitting());
    }

    #[test]
    fn panicking_sink_still_resets_flag() {
        let mut form = valid_form();
        let pending = begin(&mut form).unwrap();

        let mut sink = |_: &FormValues| -> anyhow::Result<()> { panic!("sink exploded") };
        let result = catch_unwind(AssertUnwindSafe(|| {
            settle(&mut form, pending, Ok(()), &mut sink)
        }));

        assert!(result.is_err());
        assert!(!form.is_submitting());
        assert_eq!(form.submission_state(), &SubmissionState::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn dropped_submission_resets_flag() {
        let mut form = valid_form();
        let service = MockSignUpService::new();

        let timed_out = tokio::time::timeout(
            Duration::from_millis(10),
            submit(&mut form, &service, &mut ignore),
        )
        .await;

        assert!(timed_out.is_err());
        assert!(!form.is_submitting());
    }

    #[tokio::test(start_paused = true)]
    async fn rejection_sets_general_error() {
        let mut form = valid_form();
        form.set_value(EMAIL, SENTINEL_EMAIL);
        let service = MockSignUpService::new();

        let outcome = submit(&mut form, &service, &mut ignore).await;
        assert_eq!(
            outcome,
            SubmitOutcome::Failed("You playing with the fake email".to_string())
        );
        assert_eq!(form.general_error(), Some("You playing with the fake email"));
        assert_eq!(form.submission_state(), &SubmissionState::Idle);
        assert_eq!(
            form.last_settlement(),
            Some(&Settlement::Failure(
                "You playing with the fake email".to_string()
            ))
        );
    }

    #[test]
    fn aborted_attempt_keeps_previous_settlement() {
        let mut form = valid_form();
        let pending = begin(&mut form).unwrap();
        let _ = settle(&mut form, pending, Err(RemoteError::rejected("taken")), &mut ignore);

        form.set_value(AGREE_TO_TERMS, false);
        assert!(begin(&mut form).is_err());
        assert_eq!(
            form.last_settlement(),
            Some(&Settlement::Failure("taken".to_string()))
        );

        form.reset();
        assert_eq!(form.last_settlement(), None);
    }
}
