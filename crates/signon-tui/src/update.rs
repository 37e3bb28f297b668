//! TUI reducer (update function).
//!
//! All state mutations happen here. The runtime calls `update(app, event)`
//! and executes the returned effects. Editing keys rewrite the focused
//! field's whole raw value through the controller; the controller decides
//! everything about validation and submission.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use signon_core::{FieldValue, SubmitAttempt, SubmitOutcome};

use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::state::{AppState, Focus};

/// The main reducer function.
pub fn update(app: &mut AppState, event: UiEvent) -> Vec<UiEffect> {
    match event {
        UiEvent::Tick => {
            if app.controller.is_submitting() {
                app.spinner_frame = app.spinner_frame.wrapping_add(1);
            }
            vec![]
        }
        UiEvent::Terminal(term_event) => handle_terminal_event(app, term_event),
        UiEvent::AuthResult { result } => match app.controller.finish_submit(result) {
            SubmitOutcome::Success => vec![UiEffect::Navigate {
                destination: app.destination.clone(),
            }],
            SubmitOutcome::Failure => vec![],
        },
    }
}

fn handle_terminal_event(app: &mut AppState, event: Event) -> Vec<UiEffect> {
    match event {
        Event::Key(key) => handle_key(app, key),
        Event::Paste(text) => {
            insert_text(app, &text);
            vec![]
        }
        _ => vec![],
    }
}

fn handle_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    match key.code {
        KeyCode::Esc => vec![UiEffect::Quit],
        KeyCode::Char('c') if ctrl => vec![UiEffect::Quit],

        // Display toggle; independent of validation and submission.
        KeyCode::Char('p') if ctrl => {
            app.controller.toggle_show_password();
            vec![]
        }

        KeyCode::Tab | KeyCode::Down => {
            app.focus = app.focus.next();
            vec![]
        }
        KeyCode::BackTab | KeyCode::Up => {
            app.focus = app.focus.prev();
            vec![]
        }

        KeyCode::Enter => attempt_submit(app),

        KeyCode::Char(' ') if app.focus == Focus::Remember => {
            if !app.controller.is_submitting() {
                let remember = app.controller.form().remember;
                app.controller
                    .set_field(app.focus.field(), FieldValue::Flag(!remember));
            }
            vec![]
        }
        KeyCode::Char(ch) if !ctrl => {
            insert_text(app, &ch.to_string());
            vec![]
        }
        KeyCode::Backspace => {
            delete_char(app);
            vec![]
        }
        _ => vec![],
    }
}

/// Starts a submit attempt through the controller. Validation failures and
/// the in-flight guard both come back as "nothing to do" here; the stored
/// errors are picked up by the next render.
fn attempt_submit(app: &mut AppState) -> Vec<UiEffect> {
    match app.controller.begin_submit() {
        SubmitAttempt::Begin(credentials) => vec![UiEffect::Authenticate { credentials }],
        SubmitAttempt::Blocked | SubmitAttempt::Invalid => vec![],
    }
}

/// Appends text to the focused field's raw value.
///
/// Inputs are disabled while a submission is in flight, so edits are
/// dropped then; the controller additionally guards re-entrant submits.
fn insert_text(app: &mut AppState, text: &str) {
    if app.controller.is_submitting() || !app.focus.is_text() {
        return;
    }
    let mut value = current_text(app).to_string();
    value.push_str(text);
    app.controller
        .set_field(app.focus.field(), FieldValue::Text(value));
}

fn delete_char(app: &mut AppState) {
    if app.controller.is_submitting() || !app.focus.is_text() {
        return;
    }
    let mut value = current_text(app).to_string();
    value.pop();
    app.controller
        .set_field(app.focus.field(), FieldValue::Text(value));
}

fn current_text(app: &AppState) -> &str {
    match app.focus {
        Focus::Email => &app.controller.form().email,
        Focus::Password => &app.controller.form().password,
        Focus::Remember => "",
    }
}
