//! Pure view functions for the login form.
//!
//! Functions here take `&AppState` by immutable reference, draw to a ratatui
//! frame, and never mutate state or return effects. Styling decisions key
//! off the controller's typed state (focus, status, tagged outcome), never
//! off message wording.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use signon_core::SubmitOutcome;

use crate::state::{AppState, Focus};

/// Fixed size of the centered form card.
const CARD_WIDTH: u16 = 46;
const CARD_HEIGHT: u16 = 18;

/// Spinner frames shown on the submit control while submitting.
const SPINNER_FRAMES: &[&str] = &["◐", "◓", "◑", "◒"];

const EMAIL_PLACEHOLDER: &str = "you@example.com";
const PASSWORD_MASK: &str = "•";

/// Renders the entire login form to the frame.
pub fn render(app: &AppState, frame: &mut Frame) {
    let area = frame.area();
    let card = centered_rect(area, CARD_WIDTH, CARD_HEIGHT);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Welcome back ")
        .border_style(Style::default().fg(Color::Cyan));
    frame.render_widget(block, card);

    let inner = Rect::new(
        card.x + 2,
        card.y + 1,
        card.width.saturating_sub(4),
        card.height.saturating_sub(2),
    );
    let para = Paragraph::new(form_lines(app));
    frame.render_widget(para, inner);
}

fn form_lines(app: &AppState) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(Span::styled(
            "Sign in to continue",
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(""),
    ];

    lines.extend(text_field_lines(app, Focus::Email, "Email"));
    lines.extend(text_field_lines(app, Focus::Password, "Password"));
    lines.push(remember_line(app));
    lines.push(Line::from(""));
    lines.push(submit_line(app));
    lines.push(Line::from(""));

    if let Some(message) = app.controller.server_message() {
        let color = match message.outcome {
            SubmitOutcome::Success => Color::Green,
            SubmitOutcome::Failure => Color::Red,
        };
        lines.push(Line::from(Span::styled(
            message.text.clone(),
            Style::default().fg(color),
        )));
    } else {
        lines.push(Line::from(""));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Tab move · Enter submit · ^P show/hide · Esc quit",
        Style::default().fg(Color::DarkGray),
    )));
    lines
}

/// Label, value, and error lines for one text field.
fn text_field_lines(app: &AppState, focus: Focus, label: &'static str) -> Vec<Line<'static>> {
    let focused = app.focus == focus;
    let field = focus.field();

    let mut lines = vec![label_line(label, focused)];
    lines.push(value_line(app, focus, focused));
    match app.controller.errors().get(field) {
        Some(error) => lines.push(Line::from(Span::styled(
            format!("  {error}"),
            Style::default().fg(Color::Red),
        ))),
        None => lines.push(Line::from("")),
    }
    lines
}

fn label_line(label: &'static str, focused: bool) -> Line<'static> {
    let style = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::White)
    };
    Line::from(Span::styled(format!("{} {label}", pointer(focused)), style))
}

fn value_line(app: &AppState, focus: Focus, focused: bool) -> Line<'static> {
    let form = app.controller.form();
    let (text, is_placeholder) = match focus {
        Focus::Email if form.email.is_empty() => (EMAIL_PLACEHOLDER.to_string(), true),
        Focus::Email => (form.email.clone(), false),
        Focus::Password => (
            password_display(&form.password, app.controller.show_password()),
            false,
        ),
        Focus::Remember => (String::new(), false),
    };

    let style = if is_placeholder || app.controller.is_submitting() {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default().fg(Color::White)
    };

    let cursor = if focused && !app.controller.is_submitting() {
        "▏"
    } else {
        ""
    };
    Line::from(Span::styled(format!("  {text}{cursor}"), style))
}

fn remember_line(app: &AppState) -> Line<'static> {
    let focused = app.focus == Focus::Remember;
    let style = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::White)
    };
    let mark = if app.controller.form().remember {
        "x"
    } else {
        " "
    };
    Line::from(Span::styled(
        format!("{} [{mark}] Remember me", pointer(focused)),
        style,
    ))
}

fn submit_line(app: &AppState) -> Line<'static> {
    let style = if app.controller.is_submitting() {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default().fg(Color::Green)
    };
    Line::from(Span::styled(format!("  [ {} ]", submit_label(app)), style))
}

/// Submit control label; spins while the submission is in flight.
fn submit_label(app: &AppState) -> String {
    if app.controller.is_submitting() {
        let frame = SPINNER_FRAMES[app.spinner_frame % SPINNER_FRAMES.len()];
        format!("{frame} Signing in...")
    } else {
        "Sign in".to_string()
    }
}

/// Masks the password unless the display toggle is on.
fn password_display(password: &str, show: bool) -> String {
    if show {
        password.to_string()
    } else {
        PASSWORD_MASK.repeat(password.chars().count())
    }
}

fn pointer(focused: bool) -> &'static str {
    if focused { "›" } else { " " }
}

fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

#[cfg(test)]
mod tests {
    use signon_core::config::Config;
    use signon_core::{Field, FieldValue};

    use super::*;

    #[test]
    fn password_masks_by_character_count() {
        assert_eq!(password_display("secret1", false), "•••••••");
        assert_eq!(password_display("secret1", true), "secret1");
        assert_eq!(password_display("", false), "");
    }

    #[test]
    fn submit_label_reflects_submission_status() {
        let mut app = AppState::new(&Config::default());
        assert_eq!(submit_label(&app), "Sign in");

        app.controller
            .set_field(Field::Email, FieldValue::Text("a@b.co".into()));
        app.controller
            .set_field(Field::Password, FieldValue::Text("123456".into()));
        let _ = app.controller.begin_submit();
        assert!(submit_label(&app).contains("Signing in..."));
    }

    #[test]
    fn centered_rect_clamps_to_small_areas() {
        let area = Rect::new(0, 0, 10, 5);
        let rect = centered_rect(area, 46, 18);
        assert!(rect.width <= area.width);
        assert!(rect.height <= area.height);
    }
}
