//! Simulated remote sign-up call.

use std::time::Duration;

use signup_form_types::{RemoteError, SignUpService};
use tracing::{debug, warn};

/// The email address the mock service always rejects.
pub const SENTINEL_EMAIL: &str = "a@a.com";

/// The rejection message for the sentinel address.
pub const REJECTION_MESSAGE: &str = "You playing with the fake email";

/// Simulated network latency.
pub const DEFAULT_DELAY: Duration = Duration::from_secs(1);

/// A sign-up service that waits a fixed delay and rejects one sentinel email.
#[derive(Debug, Clone)]
pub struct MockSignUpService {
    delay: Duration,
    rejected_email: String,
    rejection_message: String,
}

impl Default for MockSignUpService {
    fn default() -> Self {
        Self::new()
    }
}

impl MockSignUpService {
    /// Create a mock with the default delay and sentinel.
    pub fn new() -> Self {
        Self {
            delay: DEFAULT_DELAY,
            rejected_email: SENTINEL_EMAIL.to_string(),
            rejection_message: REJECTION_MESSAGE.to_string(),
        }
    }

    /// Set the simulated latency.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Set the email address that gets rejected.
    pub fn with_rejected_email(mut self, email: impl Into<String>) -> Self {
        self.rejected_email = email.into();
        self
    }

    /// Set the message the rejection carries.
    pub fn with_rejection_message(mut self, message: impl Into<String>) -> Self {
        self.rejection_message = message.into();
        self
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

impl SignUpService for MockSignUpService {
    async fn sign_up(&self, email: &str) -> Result<(), RemoteError> {
        debug!(email, delay_ms = self.delay.as_millis() as u64, "sign-up request sent");
        tokio::time::sleep(self.delay).await;

        if email == self.rejected_email {
            warn!(email, "sign-up rejected");
            return Err(RemoteError::rejected(&self.rejection_message));
        }
        debug!(email, "sign-up accepted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::Instant;

    #[tokio::test(start_paused = true)]
    async fn resolves_after_delay() {
        let service = MockSignUpService::new();
        let start = Instant::now();

        service.sign_up("johndoe@example.com").await.unwrap();
        assert!(start.elapsed() >= DEFAULT_DELAY);
    }

    #[tokio::test(start_paused = true)]
    async fn rejects_sentinel() {
        let service = MockSignUpService::new();
        let err = service.sign_up(SENTINEL_EMAIL).await.unwrap_err();
        assert_eq!(err, RemoteError::rejected(REJECTION_MESSAGE));
        assert_eq!(err.to_string(), "You playing with the fake email");
    }

    #[tokio::test(start_paused = true)]
    async fn builder_overrides() {
        let service = MockSignUpService::new()
            .with_delay(Duration::from_millis(5))
            .with_rejected_email("taken@example.com")
            .with_rejection_message("taken");

        let start = Instant::now();
        assert!(service.sign_up(SENTINEL_EMAIL).await.is_ok());
        assert!(start.elapsed() >= Duration::from_millis(5));
        assert_eq!(
            service.sign_up("taken@example.com").await,
            Err(RemoteError::rejected("taken"))
        );
    }
}
