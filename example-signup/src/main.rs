use std::fs::File;
use std::sync::Mutex;
use std::time::Duration;

use anyhow::Context;
use signup_form::MockSignUpService;
use signup_form_ratatui::{RatatuiFormError, RatatuiSignUpForm};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Set up logging. With `SIGNUP_LOG_FILE` set, events go to that file so they
/// don't land on the TUI; otherwise stderr, silent unless `RUST_LOG` is set.
fn init_tracing() -> anyhow::Result<()> {
    match std::env::var_os("SIGNUP_LOG_FILE") {
        Some(path) => {
            let file = File::create(&path)
                .with_context(|| format!("cannot create log file {}", path.to_string_lossy()))?;
            tracing_subscriber::fmt()
                .with_env_filter(
                    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
                )
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(
                    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("off")),
                )
                .with_writer(std::io::stderr)
                .init();
        }
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    init_tracing()?;

    let mut service = MockSignUpService::new();
    if let Ok(delay) = std::env::var("SIGNUP_DELAY_MS") {
        let millis: u64 = delay
            .parse()
            .with_context(|| format!("SIGNUP_DELAY_MS must be a number of milliseconds, got {delay:?}"))?;
        service = service.with_delay(Duration::from_millis(millis));
    }
    info!(delay_ms = service.delay().as_millis() as u64, "starting sign-up form");

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_time()
        .build()?;

    println!("Try signing up with a@a.com to see a rejection.");
    match RatatuiSignUpForm::new().run(runtime.handle(), service) {
        Ok(signup) => {
            info!(email = %signup.email, "signed up");
            println!("Signed up:");
            println!("{}", signup.to_json()?);
        }
        Err(RatatuiFormError::Cancelled) => {
            info!("sign-up cancelled");
            println!("Sign-up cancelled");
        }
        Err(err) => {
            warn!(%err, "sign-up form failed");
            return Err(err.into());
        }
    }
    Ok(())
}
