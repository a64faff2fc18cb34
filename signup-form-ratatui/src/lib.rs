//! # signup-form-ratatui
//!
//! Ratatui backend for signup-form.
//!
//! Displays every sign-up field at once. Users move between fields with
//! Tab/Shift+Tab or the arrow keys; a field's error appears once focus has
//! left it. While the sign-up call is in flight the submit button shows a
//! spinner and edits are ignored.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use signup_form::MockSignUpService;
//! use signup_form_ratatui::RatatuiSignUpForm;
//!
//! fn main() -> anyhow::Result<()> {
//!     let runtime = tokio::runtime::Runtime::new()?;
//!     let signup = RatatuiSignUpForm::new().run(runtime.handle(), MockSignUpService::new())?;
//!     println!("{}", signup.to_json()?);
//!     Ok(())
//! }
//! ```

mod backend;
mod draw;
mod screen;

pub use backend::{RatatuiFormError, RatatuiSignUpForm, Theme};
