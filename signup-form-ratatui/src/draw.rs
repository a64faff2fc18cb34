//! Rendering of the sign-up form.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};
use signup_form::{FieldKind, FieldProps};

use crate::Theme;
use crate::screen::{Focus, FormScreen};

const FIELD_HEIGHT: u16 = 3;

pub(crate) fn draw_form(frame: &mut Frame, screen: &FormScreen, title: &str, theme: &Theme) {
    let area = frame.area();
    let controller = screen.controller();
    let fields = controller.all_field_props();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),                                // Title
            Constraint::Min(FIELD_HEIGHT * fields.len() as u16), // Fields
            Constraint::Length(1),                                // General error
            Constraint::Length(3),                                // Submit button
            Constraint::Length(1),                                // Help bar
        ])
        .split(area);

    let title = Paragraph::new(title.to_string())
        .style(
            Style::default()
                .fg(theme.primary)
                .add_modifier(Modifier::BOLD),
        )
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(Style::default().fg(theme.border)),
        );
    frame.render_widget(title, chunks[0]);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(fields.iter().map(|_| Constraint::Length(FIELD_HEIGHT)))
        .split(chunks[1]);
    for (idx, (props, row)) in fields.iter().zip(rows.iter()).enumerate() {
        let field_area = Rect {
            x: row.x + 1,
            width: row.width.saturating_sub(2),
            ..*row
        };
        let cursor = (screen.focus() == Focus::Field(idx)).then(|| screen.cursor());
        draw_field(frame, props, field_area, cursor, theme);
    }

    if let Some(general) = controller.general_error() {
        let general = Paragraph::new(format!("✗ {general}"))
            .style(Style::default().fg(theme.error).add_modifier(Modifier::BOLD))
            .alignment(Alignment::Center);
        frame.render_widget(general, chunks[2]);
    }

    draw_submit(frame, screen, chunks[3], theme);

    let help_text = "Tab/↓: Next  Shift+Tab/↑: Back  Space: Toggle  Enter: Submit  Esc: Cancel";
    let help = Paragraph::new(help_text).style(Style::default().fg(theme.border));
    frame.render_widget(help, chunks[4]);

    if let Some(json) = screen.popup() {
        draw_popup(frame, json, theme);
    }
}

fn draw_submit(frame: &mut Frame, screen: &FormScreen, area: Rect, theme: &Theme) {
    let focused = screen.focus() == Focus::Submit;
    let submitting = screen.controller().is_submitting();

    let (text, style) = if submitting {
        (
            format!("{} Submitting...", screen.spinner_frame()),
            Style::default().fg(theme.placeholder),
        )
    } else if focused {
        (
            "  [ Submit ]  ".to_string(),
            Style::default()
                .fg(theme.text)
                .bg(theme.primary)
                .add_modifier(Modifier::BOLD),
        )
    } else {
        (
            "    Submit    ".to_string(),
            Style::default()
                .fg(theme.primary)
                .add_modifier(Modifier::BOLD),
        )
    };

    let button = Paragraph::new(text)
        .style(style)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(if focused && !submitting {
                    theme.primary
                } else {
                    theme.border
                })),
        );
    frame.render_widget(button, area);
}

fn draw_field(
    frame: &mut Frame,
    props: &FieldProps,
    area: Rect,
    cursor: Option<usize>,
    theme: &Theme,
) {
    let is_focused = cursor.is_some();
    let border_color = if props.is_flagged() {
        theme.error
    } else if is_focused {
        theme.primary
    } else {
        theme.border
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .title(format!(" {} ", props.label))
        .title_style(Style::default().fg(if is_focused {
            theme.highlight
        } else {
            theme.text
        }));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    match props.kind {
        FieldKind::Input | FieldKind::Masked => {
            let value = props.value.as_str().unwrap_or_default();
            let paragraph = if value.is_empty() {
                Paragraph::new(props.placeholder.clone().unwrap_or_default())
                    .style(Style::default().fg(theme.placeholder))
            } else if props.kind == FieldKind::Masked {
                Paragraph::new("●".repeat(value.chars().count()))
                    .style(Style::default().fg(theme.text))
            } else {
                Paragraph::new(value.to_string()).style(Style::default().fg(theme.text))
            };
            frame.render_widget(paragraph, inner);

            if let Some(cursor) = cursor {
                let cursor_x = inner.x.saturating_add(cursor as u16);
                if cursor_x < inner.x + inner.width {
                    frame.set_cursor_position((cursor_x, inner.y));
                }
            }
        }
        FieldKind::Toggle => {
            let checked = props.value.as_bool().unwrap_or(false);
            let checkbox = if checked { "[✓]" } else { "[ ]" };
            let text = Paragraph::new(format!("{checkbox} I agree"))
                .style(Style::default().fg(if checked { theme.success } else { theme.text }));
            frame.render_widget(text, inner);
        }
    }

    // Errors sit on the bottom border
    if let Some(error) = &props.error {
        let error_text =
            Paragraph::new(format!("⚠ {error}")).style(Style::default().fg(theme.error));
        let error_area = Rect {
            x: area.x + 1,
            y: area.y + area.height.saturating_sub(1),
            width: area.width.saturating_sub(2),
            height: 1,
        };
        frame.render_widget(error_text, error_area);
    }
}

fn draw_popup(frame: &mut Frame, json: &str, theme: &Theme) {
    let area = frame.area();
    let width = area.width.saturating_sub(4).min(56);
    let height = (json.lines().count() as u16 + 3).min(area.height);
    let popup = Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.success))
        .title(" Signed up ")
        .title_bottom(" Press any key to close ")
        .title_style(Style::default().fg(theme.success).add_modifier(Modifier::BOLD));
    let body = Paragraph::new(json.to_string())
        .style(Style::default().fg(theme.text))
        .wrap(Wrap { trim: false })
        .block(block);

    frame.render_widget(Clear, popup);
    frame.render_widget(body, popup);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use ratatui::{Terminal, backend::TestBackend};
    use signup_form::RemoteError;
    use signup_form::signup::*;

    use crate::screen::Action;

    fn render(screen: &FormScreen) -> String {
        let mut terminal = Terminal::new(TestBackend::new(64, 24)).unwrap();
        terminal
            .draw(|frame| draw_form(frame, screen, "Sign Up", &Theme::default()))
            .unwrap();

        let buffer = terminal.backend().buffer();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    fn press(screen: &mut FormScreen, code: KeyCode) -> Action {
        screen.handle_key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn type_text(screen: &mut FormScreen, text: &str) {
        for c in text.chars() {
            press(screen, KeyCode::Char(c));
        }
    }

    #[test]
    fn fresh_form_shows_no_errors() {
        let text = render(&FormScreen::new());
        assert!(text.contains("Sign Up"));
        assert!(text.contains("Confirm Password"));
        assert!(text.contains("johndoe@example.com"));
        assert!(!text.contains("is a required field"));
        assert!(!text.contains(MUST_AGREE_TO_TERMS));
    }

    #[test]
    fn blurred_field_shows_its_error() {
        let mut screen = FormScreen::new();
        press(&mut screen, KeyCode::Tab);

        let text = render(&screen);
        assert!(text.contains(EMAIL_REQUIRED));
        assert!(!text.contains(PASSWORD_REQUIRED));
    }

    #[test]
    fn password_is_masked() {
        let mut screen = FormScreen::new();
        press(&mut screen, KeyCode::Tab);
        type_text(&mut screen, "hunter");

        let text = render(&screen);
        assert!(text.contains("●●●●●●"));
        assert!(!text.contains("hunter"));
    }

    #[test]
    fn general_error_and_popup() {
        let mut screen = FormScreen::new();
        type_text(&mut screen, "johndoe@example.com");
        press(&mut screen, KeyCode::Tab);
        type_text(&mut screen, "abc");
        press(&mut screen, KeyCode::Tab);
        type_text(&mut screen, "abc");
        press(&mut screen, KeyCode::Tab);
        press(&mut screen, KeyCode::Char(' '));
        press(&mut screen, KeyCode::Tab);

        let Action::Submit(pending) = press(&mut screen, KeyCode::Enter) else {
            panic!("expected a submission");
        };
        assert!(render(&screen).contains("Submitting..."));
        screen.finish_submit(pending, Err(RemoteError::rejected("taken")));
        assert!(render(&screen).contains("✗ taken"));

        let Action::Submit(pending) = press(&mut screen, KeyCode::Enter) else {
            panic!("expected a submission");
        };
        screen.finish_submit(pending, Ok(()));
        let text = render(&screen);
        assert!(!text.contains("✗ taken"));
        assert!(text.contains("Signed up"));
        assert!(text.contains("\"email\": \"johndoe@example.com\""));
    }
}
