//! Test service for exercising forms without a simulated network.
//!
//! `TestService` settles immediately with a pre-configured outcome and records
//! every email it was called with.
//!
//! # Example
//!
//! ```rust,ignore
//! use signup_form::{FormController, FormValues, TestService, submit};
//!
//! async fn rejected(form: &mut FormController) {
//!     let service = TestService::rejecting("taken");
//!     submit(form, &service, &mut |_: &FormValues| -> anyhow::Result<()> { Ok(()) }).await;
//!
//!     assert_eq!(service.calls(), vec!["johndoe@example.com".to_string()]);
//! }
//! ```

use std::sync::{Arc, Mutex, PoisonError};

use crate::{RemoteError, SignUpService};

/// A sign-up service with a fixed outcome and a call log.
///
/// Clones share the same call log.
#[derive(Debug, Clone, Default)]
pub struct TestService {
    rejection: Option<String>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl TestService {
    /// A service that accepts every email.
    pub fn new() -> Self {
        Self::default()
    }

    /// A service that rejects every email with `message`.
    pub fn rejecting(message: impl Into<String>) -> Self {
        Self {
            rejection: Some(message.into()),
            ..Self::default()
        }
    }

    /// Emails the service was called with, oldest first.
    pub fn calls(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap_or_else(PoisonError::into_inner).len()
    }
}

impl SignUpService for TestService {
    async fn sign_up(&self, email: &str) -> Result<(), RemoteError> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(email.to_string());
        match &self.rejection {
            Some(message) => Err(RemoteError::rejected(message)),
            None => Ok(()),
        }
    }
}
