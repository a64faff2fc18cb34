//! Ratatui sign-up form: terminal setup and the event loop.
//!
//! The loop owns the [`FormScreen`]. When a submission starts, the remote call
//! is spawned on the given tokio runtime and its result comes back over a
//! oneshot channel, so the form keeps redrawing (and the spinner keeps
//! turning) while the call is in flight.

use std::io::{self, Stdout};
use std::time::Duration;

use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, prelude::CrosstermBackend, style::Color};
use signup_form::{PendingSubmission, RemoteError, SignUp, SignUpService};
use thiserror::Error;
use tokio::runtime::Handle;
use tokio::sync::oneshot::{self, error::TryRecvError};
use tracing::{debug, info};

use crate::draw::draw_form;
use crate::screen::{Action, FormScreen};

/// Error type for the Ratatui sign-up form.
#[derive(Debug, Error)]
pub enum RatatuiFormError {
    /// User cancelled the form (e.g., pressed Esc).
    #[error("Form cancelled by user")]
    Cancelled,

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Color theme for the TUI form.
#[derive(Debug, Clone)]
pub struct Theme {
    pub primary: Color,
    pub text: Color,
    pub placeholder: Color,
    pub highlight: Color,
    pub error: Color,
    pub success: Color,
    pub border: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            primary: Color::Cyan,
            text: Color::White,
            placeholder: Color::DarkGray,
            highlight: Color::Yellow,
            error: Color::Red,
            success: Color::Green,
            border: Color::Gray,
        }
    }
}

/// How often the screen redraws while waiting for input.
const DEFAULT_TICK_RATE: Duration = Duration::from_millis(80);

/// Sign-up form that displays all fields at once.
#[derive(Debug, Clone)]
pub struct RatatuiSignUpForm {
    /// Title shown at the top of the form. Falls back to the schema's title.
    title: Option<String>,
    /// Color theme for the UI.
    theme: Theme,
    tick_rate: Duration,
}

impl Default for RatatuiSignUpForm {
    fn default() -> Self {
        Self::new()
    }
}

/// A submission whose remote call is running on the runtime.
type InFlight = (PendingSubmission, oneshot::Receiver<Result<(), RemoteError>>);

impl RatatuiSignUpForm {
    /// Create a new sign-up form with default settings.
    pub fn new() -> Self {
        Self {
            title: None,
            theme: Theme::default(),
            tick_rate: DEFAULT_TICK_RATE,
        }
    }

    /// Set the title shown at the top of the form.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set a custom color theme.
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Set how often the screen redraws while idle.
    pub fn with_tick_rate(mut self, tick_rate: Duration) -> Self {
        self.tick_rate = tick_rate;
        self
    }

    /// Run the form until the user confirms a successful sign-up or cancels.
    ///
    /// `service` is cloned into a task on `runtime` for every submission.
    pub fn run<S>(&self, runtime: &Handle, service: S) -> Result<SignUp, RatatuiFormError>
    where
        S: SignUpService + Clone + Send + Sync + 'static,
    {
        let mut terminal = self.setup_terminal()?;
        let result = self.event_loop(&mut terminal, runtime, &service);
        self.restore_terminal(&mut terminal)?;
        result
    }

    fn event_loop<S>(
        &self,
        terminal: &mut Terminal<CrosstermBackend<Stdout>>,
        runtime: &Handle,
        service: &S,
    ) -> Result<SignUp, RatatuiFormError>
    where
        S: SignUpService + Clone + Send + Sync + 'static,
    {
        let mut screen = FormScreen::new();
        let title = self.title.clone().unwrap_or_else(|| {
            screen
                .controller()
                .schema()
                .title
                .clone()
                .unwrap_or_else(|| "Form".to_string())
        });
        let mut in_flight: Option<InFlight> = None;

        loop {
            terminal.draw(|frame| draw_form(frame, &screen, &title, &self.theme))?;

            let settled = in_flight.as_mut().and_then(|(_, rx)| poll_sign_up(rx));
            if let Some(result) = settled
                && let Some((pending, _)) = in_flight.take()
            {
                screen.finish_submit(pending, result);
                continue;
            }

            if !event::poll(self.tick_rate)? {
                screen.tick();
                continue;
            }

            let Event::Key(key) = event::read()? else {
                continue;
            };
            if key.kind != KeyEventKind::Press {
                continue;
            }

            match screen.handle_key(key) {
                Action::None => {}
                Action::Submit(pending) => {
                    let rx = spawn_sign_up(runtime, service, pending.email().to_string());
                    in_flight = Some((pending, rx));
                }
                Action::Exit => {
                    if let Some(signup) = screen.take_confirmed() {
                        info!(email = %signup.email, "sign-up confirmed");
                        return Ok(signup);
                    }
                }
                Action::Cancel => {
                    debug!(in_flight = in_flight.is_some(), "form cancelled");
                    return Err(RatatuiFormError::Cancelled);
                }
            }
        }
    }

    fn setup_terminal(&self) -> Result<Terminal<CrosstermBackend<Stdout>>, RatatuiFormError> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        Ok(terminal)
    }

    fn restore_terminal(
        &self,
        terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    ) -> Result<(), RatatuiFormError> {
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;
        Ok(())
    }
}

/// Check for the remote call's result without blocking.
///
/// A task that ended without sending counts as [`RemoteError::Interrupted`].
fn poll_sign_up(
    rx: &mut oneshot::Receiver<Result<(), RemoteError>>,
) -> Option<Result<(), RemoteError>> {
    match rx.try_recv() {
        Ok(result) => Some(result),
        Err(TryRecvError::Closed) => Some(Err(RemoteError::Interrupted)),
        Err(TryRecvError::Empty) => None,
    }
}

/// Run the remote call on `runtime`, reporting back over a oneshot channel.
fn spawn_sign_up<S>(
    runtime: &Handle,
    service: &S,
    email: String,
) -> oneshot::Receiver<Result<(), RemoteError>>
where
    S: SignUpService + Clone + Send + Sync + 'static,
{
    let (tx, rx) = oneshot::channel();
    let service = service.clone();
    runtime.spawn(async move {
        let result = service.sign_up(&email).await;
        // The form may have been cancelled in the meantime.
        let _ = tx.send(result);
    });
    rx
}
