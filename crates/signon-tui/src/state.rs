//! Application state for the login TUI.
//!
//! `AppState` wraps the domain controller with the little extra the render
//! surface needs: which control has focus, the quit flag, and the spinner
//! animation counter. All of it is mutated only by the reducer in `update`.

use signon_core::config::Config;
use signon_core::{Field, LoginController};

/// Which form control currently receives keyboard input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Email,
    Password,
    Remember,
}

impl Focus {
    pub fn next(self) -> Self {
        match self {
            Focus::Email => Focus::Password,
            Focus::Password => Focus::Remember,
            Focus::Remember => Focus::Email,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Focus::Email => Focus::Remember,
            Focus::Password => Focus::Email,
            Focus::Remember => Focus::Password,
        }
    }

    /// The domain field this control edits.
    pub fn field(self) -> Field {
        match self {
            Focus::Email => Field::Email,
            Focus::Password => Field::Password,
            Focus::Remember => Field::Remember,
        }
    }

    /// Whether this control takes typed text (as opposed to a flag toggle).
    pub fn is_text(self) -> bool {
        matches!(self, Focus::Email | Focus::Password)
    }
}

/// TUI application state.
pub struct AppState {
    /// Flag indicating the app should quit.
    pub should_quit: bool,
    /// The login form controller (all domain state lives in here).
    pub controller: LoginController,
    /// Currently focused control.
    pub focus: Focus,
    /// Destination handed to the navigation collaborator on success.
    pub destination: String,
    /// Spinner animation frame counter (advances while submitting).
    pub spinner_frame: usize,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        Self {
            should_quit: false,
            controller: LoginController::with_remember(config.remember),
            focus: Focus::Email,
            destination: config.destination.clone(),
            spinner_frame: 0,
        }
    }
}
