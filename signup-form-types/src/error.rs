/// Error type for the remote sign-up call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RemoteError {
    /// The remote side refused the request.
    #[error("{0}")]
    Rejected(String),

    /// The request ended without producing a response (task dropped or panicked).
    #[error("Sign-up request ended without a response")]
    Interrupted,
}

impl RemoteError {
    /// Create a rejection with the given message.
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected(message.into())
    }

    /// Check if this error is a rejection by the remote side.
    pub fn is_rejected(&self) -> bool {
        matches!(self, Self::Rejected(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejection_displays_message_verbatim() {
        let err = RemoteError::rejected("You playing with the fake email");
        assert_eq!(err.to_string(), "You playing with the fake email");
        assert!(err.is_rejected());
        assert!(!RemoteError::Interrupted.is_rejected());
    }
}
