//! # signup-form
//!
//! Sign-up form state, validation and submission. Backend-agnostic.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use signup_form::{Form, FormController, FormValues, MockSignUpService, SignUp, signup, submit};
//!
//! async fn sign_up() -> anyhow::Result<()> {
//!     let mut form = FormController::for_form::<SignUp>();
//!     form.set_value(signup::EMAIL, "johndoe@example.com");
//!     form.set_touched(signup::EMAIL);
//!
//!     // Errors are recomputed on every change but only shown once touched.
//!     assert_eq!(form.visible_error(signup::EMAIL), None);
//!
//!     let outcome = submit(&mut form, &MockSignUpService::new(), &mut |values: &FormValues| -> anyhow::Result<()> {
//!         println!("{}", SignUp::from_values(values)?.to_json()?);
//!         Ok(())
//!     })
//!     .await;
//!     println!("{outcome:?}");
//!     Ok(())
//! }
//! ```
//!
//! ## Pieces
//!
//! - [`signup`] - Field names, messages and the validation schema
//! - [`FormController`] - Values, touched flags, errors and the submitting flag
//! - [`FieldProps`] / [`FieldEvent`] - What a backend draws and sends back for one field
//! - [`begin`] / [`settle`] / [`submit`] - The submission workflow
//! - [`MockSignUpService`] - Simulated remote call with a fixed delay
//!
//! ## Backends
//!
//! Backends are separate crates that render a [`FormController`]:
//! - `signup-form-ratatui` - TUI form

// Re-export all types from signup-form-types
pub use signup_form_types::*;

pub mod signup;
pub use signup::{SignUp, signup_schema};

mod controller;
pub use controller::FormController;

mod adapter;
pub use adapter::{FieldEvent, FieldProps};

mod submission;
pub use submission::{
    PendingSubmission, Settlement, SubmissionState, SubmitAborted, SubmitOutcome, begin, settle,
    submit,
};

mod remote;
pub use remote::{DEFAULT_DELAY, MockSignUpService, REJECTION_MESSAGE, SENTINEL_EMAIL};

// Test service for exercising forms without a simulated network
mod test_service;
pub use test_service::TestService;
