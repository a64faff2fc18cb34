use std::future::Future;

use crate::{FormValues, RemoteError, ValidationSchema, ValueError};

/// Trait for types that are filled in through a form.
///
/// Provides the form structure and reconstruction from a validated snapshot.
pub trait Form: Sized {
    /// Returns the form structure (fields, presentation hints, rules).
    fn schema() -> ValidationSchema;

    /// Reconstructs an instance from a value snapshot.
    ///
    /// Fails only if the snapshot does not match the schema's field kinds.
    fn from_values(values: &FormValues) -> Result<Self, ValueError>;
}

/// The remote operation a sign-up form submits to.
///
/// Implementations settle exactly once: `Ok(())` on success, or an error
/// whose message is shown to the user.
pub trait SignUpService {
    /// Register the given email address.
    fn sign_up(&self, email: &str) -> impl Future<Output = Result<(), RemoteError>> + Send;
}

/// Receives the submitted values after a successful remote call.
///
/// Implemented for closures, so tests and backends can pass
/// `&mut |values: &FormValues| { ...; Ok(()) }`.
pub trait ResultSink {
    /// Present the submitted values, e.g. in a confirmation popup.
    fn present(&mut self, values: &FormValues) -> anyhow::Result<()>;
}

impl<F> ResultSink for F
where
    F: FnMut(&FormValues) -> anyhow::Result<()>,
{
    fn present(&mut self, values: &FormValues) -> anyhow::Result<()> {
        self(values)
    }
}
