//! Interactive state of the TUI form: focus, cursor, spinner and popup.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use signup_form::{
    FieldEvent, FieldKind, FieldName, FieldProps, FieldValue, Form, FormController, FormValues,
    PendingSubmission, RemoteError, SignUp, SubmitOutcome, begin, settle,
};
use tracing::debug;

/// Braille spinner shown on the submit button while submitting.
pub(crate) const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Focus {
    Field(usize),
    Submit,
}

/// What the event loop should do after a key press.
#[derive(Debug)]
pub(crate) enum Action {
    None,
    /// Validation passed; run the remote call for this submission.
    Submit(PendingSubmission),
    /// The confirmation popup was dismissed.
    Exit,
    Cancel,
}

pub(crate) struct FormScreen {
    controller: FormController,
    focus: Focus,
    /// Cursor position in chars within the focused text field.
    cursor: usize,
    spinner: usize,
    popup: Option<String>,
    confirmed: Option<SignUp>,
}

impl FormScreen {
    pub(crate) fn new() -> Self {
        Self {
            controller: FormController::for_form::<SignUp>(),
            focus: Focus::Field(0),
            cursor: 0,
            spinner: 0,
            popup: None,
            confirmed: None,
        }
    }

    pub(crate) fn controller(&self) -> &FormController {
        &self.controller
    }

    pub(crate) fn focus(&self) -> Focus {
        self.focus
    }

    pub(crate) fn cursor(&self) -> usize {
        self.cursor
    }

    pub(crate) fn spinner_frame(&self) -> &'static str {
        SPINNER[self.spinner % SPINNER.len()]
    }

    pub(crate) fn popup(&self) -> Option<&str> {
        self.popup.as_deref()
    }

    pub(crate) fn take_confirmed(&mut self) -> Option<SignUp> {
        self.confirmed.take()
    }

    /// Advance the spinner. Called when no key arrived within one tick.
    pub(crate) fn tick(&mut self) {
        if self.controller.is_submitting() {
            self.spinner = self.spinner.wrapping_add(1);
        }
    }

    fn focused_props(&self) -> Option<FieldProps> {
        let Focus::Field(idx) = self.focus else {
            return None;
        };
        let name = self.controller.schema().fields().get(idx)?.name().clone();
        self.controller.field_props(name.as_str())
    }

    fn focused_name(&self) -> Option<FieldName> {
        self.focused_props().map(|props| props.name)
    }

    fn field_count(&self) -> usize {
        self.controller.schema().len()
    }

    /// Move focus, blurring the field that loses it.
    fn move_focus(&mut self, to: Focus) {
        if to == self.focus {
            return;
        }
        if let Some(name) = self.focused_name() {
            self.controller
                .handle_field_event(name.as_str(), FieldEvent::Blur);
        }
        self.focus = to;
        self.cursor = self.focused_text_len();
    }

    fn focused_text_len(&self) -> usize {
        self.focused_props()
            .and_then(|props| props.value.as_str().map(|text| text.chars().count()))
            .unwrap_or(0)
    }

    fn next_field(&mut self) {
        let next = match self.focus {
            Focus::Field(idx) if idx + 1 < self.field_count() => Focus::Field(idx + 1),
            _ => Focus::Submit,
        };
        self.move_focus(next);
    }

    fn prev_field(&mut self) {
        let prev = match self.focus {
            Focus::Field(idx) => Focus::Field(idx.saturating_sub(1)),
            Focus::Submit => Focus::Field(self.field_count().saturating_sub(1)),
        };
        self.move_focus(prev);
    }

    fn edit_text(&mut self, edit: impl FnOnce(&mut String, &mut usize)) {
        let Some(props) = self.focused_props() else {
            return;
        };
        let Some(text) = props.value.as_str() else {
            return;
        };
        let mut text = text.to_string();
        let mut cursor = self.cursor.min(text.chars().count());
        edit(&mut text, &mut cursor);
        self.cursor = cursor;
        self.controller
            .handle_field_event(props.name.as_str(), FieldEvent::Change(text.into()));
    }

    fn handle_text_input(&mut self, c: char) {
        self.edit_text(|text, cursor| {
            text.insert(byte_index(text, *cursor), c);
            *cursor += 1;
        });
    }

    fn handle_backspace(&mut self) {
        self.edit_text(|text, cursor| {
            if *cursor > 0 {
                *cursor -= 1;
                text.remove(byte_index(text, *cursor));
            }
        });
    }

    fn handle_delete(&mut self) {
        self.edit_text(|text, cursor| {
            if *cursor < text.chars().count() {
                text.remove(byte_index(text, *cursor));
            }
        });
    }

    fn cursor_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    fn cursor_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.focused_text_len());
    }

    fn cursor_end(&mut self) {
        self.cursor = self.focused_text_len();
    }

    fn toggle_bool(&mut self) {
        if let Some(props) = self.focused_props()
            && props.kind == FieldKind::Toggle
        {
            let checked = props.value.as_bool().unwrap_or(false);
            self.controller.handle_field_event(
                props.name.as_str(),
                FieldEvent::Change(FieldValue::Bool(!checked)),
            );
        }
    }

    fn is_toggle_focused(&self) -> bool {
        self.focused_props()
            .is_some_and(|props| props.kind == FieldKind::Toggle)
    }

    /// Try to start a submission. Invalid forms stay put with every error shown.
    fn request_submit(&mut self) -> Action {
        match begin(&mut self.controller) {
            Ok(pending) => Action::Submit(pending),
            Err(aborted) => {
                debug!(%aborted, "submit rejected locally");
                Action::None
            }
        }
    }

    /// Apply the remote call's result. On success the submitted values are
    /// shown as JSON in a popup.
    pub(crate) fn finish_submit(
        &mut self,
        pending: PendingSubmission,
        result: Result<(), RemoteError>,
    ) -> SubmitOutcome {
        let mut confirmed = None;
        let outcome = settle(
            &mut self.controller,
            pending,
            result,
            &mut |values: &FormValues| -> anyhow::Result<()> {
                let signup = SignUp::from_values(values)?;
                let json = signup.to_json()?;
                confirmed = Some((signup, json));
                Ok(())
            },
        );
        if let Some((signup, json)) = confirmed {
            self.popup = Some(json);
            self.confirmed = Some(signup);
        }
        outcome
    }

    pub(crate) fn handle_key(&mut self, key: KeyEvent) -> Action {
        if self.popup.is_some() {
            return Action::Exit;
        }

        match key.code {
            KeyCode::Esc => return Action::Cancel,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                return Action::Cancel;
            }
            _ => {}
        }

        if self.controller.is_submitting() {
            return Action::None;
        }

        match key.code {
            KeyCode::F(10) => return self.request_submit(),
            KeyCode::Enter if key.modifiers.contains(KeyModifiers::CONTROL) => {
                return self.request_submit();
            }
            KeyCode::Enter => {
                if self.focus == Focus::Submit {
                    return self.request_submit();
                }
                self.next_field();
            }
            KeyCode::BackTab | KeyCode::Up => self.prev_field(),
            KeyCode::Tab if key.modifiers.contains(KeyModifiers::SHIFT) => self.prev_field(),
            KeyCode::Tab | KeyCode::Down => self.next_field(),
            KeyCode::Left => self.cursor_left(),
            KeyCode::Right => self.cursor_right(),
            KeyCode::Home => self.cursor = 0,
            KeyCode::End => self.cursor_end(),
            KeyCode::Char(' ') if self.is_toggle_focused() => self.toggle_bool(),
            KeyCode::Char(c) => self.handle_text_input(c),
            KeyCode::Backspace => self.handle_backspace(),
            KeyCode::Delete => self.handle_delete(),
            _ => {}
        }
        Action::None
    }
}

fn byte_index(text: &str, char_idx: usize) -> usize {
    text.char_indices()
        .nth(char_idx)
        .map_or(text.len(), |(idx, _)| idx)
}
