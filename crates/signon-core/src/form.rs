//! The login form controller.
//!
//! Owns all form state and the submission state machine:
//!
//! ```text
//! Idle --begin_submit (valid)--> Submitting --finish_submit--> Idle
//!  \--begin_submit (invalid or blocked)--> Idle (self-loop, no call made)
//! ```
//!
//! Validation only gates entry into `Submitting`; there is no state for
//! "validation error while submitting". The re-entrancy guard lives here in
//! the controller, not in the render surface: `begin_submit` refuses while a
//! submission is in flight.

use tracing::warn;

use crate::auth::{AuthError, Authenticator, Credentials};
use crate::validate::{ValidationErrors, validate};

pub const MSG_LOGIN_OK: &str = "Logged in successfully";
pub const MSG_LOGIN_FAILED: &str = "Login failed. Please try again.";

/// One of the form's user-editable inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Email,
    Password,
    Remember,
}

/// A raw value arriving from an input control.
///
/// `Flag` comes from checkbox-style controls, `Text` from everything else.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Flag(bool),
}

/// Raw field values as the user entered them. No trimming is applied to the
/// stored values; trimming happens inside the validation rules that want it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormState {
    pub email: String,
    pub password: String,
    pub remember: bool,
}

impl Default for FormState {
    fn default() -> Self {
        Self {
            email: String::new(),
            password: String::new(),
            remember: true,
        }
    }
}

/// Whether a submission is currently in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmitStatus {
    #[default]
    Idle,
    Submitting,
}

impl SubmitStatus {
    pub fn is_submitting(self) -> bool {
        matches!(self, SubmitStatus::Submitting)
    }
}

/// Tagged outcome of the last submission attempt.
///
/// Display styling keys off this tag, never off the message wording.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    Success,
    Failure,
}

/// The user-facing result of the last submission attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerMessage {
    pub outcome: SubmitOutcome,
    pub text: String,
}

/// What a submit attempt decided before any network call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitAttempt {
    /// A submission is already in flight; nothing changed.
    Blocked,
    /// Client-side validation failed; errors are stored, no call is made.
    Invalid,
    /// Validation passed; the caller should run the authentication call
    /// with these credentials and report back via `finish_submit`.
    Begin(Credentials),
}

/// Owns field values, validation errors, submission status, and the
/// server-response message. Created at startup, destroyed at exit; nothing
/// persists across runs.
#[derive(Debug, Default)]
pub struct LoginController {
    form: FormState,
    errors: ValidationErrors,
    status: SubmitStatus,
    server_message: Option<ServerMessage>,
    show_password: bool,
}

impl LoginController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a controller with a configured "remember me" default.
    pub fn with_remember(remember: bool) -> Self {
        Self {
            form: FormState {
                remember,
                ..FormState::default()
            },
            ..Self::default()
        }
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    /// Errors from the last submit attempt's validation pass. Deliberately
    /// stale between keystrokes: corrected fields keep their error on screen
    /// until the next submit recomputes the whole mapping.
    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub fn status(&self) -> SubmitStatus {
        self.status
    }

    pub fn is_submitting(&self) -> bool {
        self.status.is_submitting()
    }

    pub fn server_message(&self) -> Option<&ServerMessage> {
        self.server_message.as_ref()
    }

    pub fn show_password(&self) -> bool {
        self.show_password
    }

    /// Stores a raw value into a field. Never validates, never fails; a
    /// mismatched field/value pair (a flag for a text field or vice versa)
    /// has nothing sensible to store and is ignored.
    pub fn set_field(&mut self, field: Field, value: FieldValue) {
        match (field, value) {
            (Field::Email, FieldValue::Text(value)) => self.form.email = value,
            (Field::Password, FieldValue::Text(value)) => self.form.password = value,
            (Field::Remember, FieldValue::Flag(value)) => self.form.remember = value,
            (Field::Email | Field::Password, FieldValue::Flag(_))
            | (Field::Remember, FieldValue::Text(_)) => {}
        }
    }

    /// Flips the password visibility toggle. Display concern only.
    pub fn toggle_show_password(&mut self) {
        self.show_password = !self.show_password;
    }

    /// Starts a submit attempt: clears the previous server message, reruns
    /// validation wholesale, and either refuses (in-flight guard), stops on
    /// validation errors, or enters `Submitting` and hands out credentials.
    pub fn begin_submit(&mut self) -> SubmitAttempt {
        if self.status.is_submitting() {
            return SubmitAttempt::Blocked;
        }

        self.server_message = None;
        self.errors = validate(&self.form);
        if !self.errors.is_empty() {
            return SubmitAttempt::Invalid;
        }

        self.status = SubmitStatus::Submitting;
        SubmitAttempt::Begin(Credentials {
            email: self.form.email.clone(),
            password: self.form.password.clone(),
            remember: self.form.remember,
        })
    }

    /// Completes the in-flight submission with the authentication outcome.
    ///
    /// Runs on every exit path from `Submitting`: whatever the result, the
    /// status ends up `Idle` and the form is re-editable.
    pub fn finish_submit(&mut self, result: Result<(), AuthError>) -> SubmitOutcome {
        let outcome = match result {
            Ok(()) => {
                self.server_message = Some(ServerMessage {
                    outcome: SubmitOutcome::Success,
                    text: MSG_LOGIN_OK.to_string(),
                });
                SubmitOutcome::Success
            }
            Err(err) => {
                // The cause is not part of user messaging; keep it in the log.
                warn!(error = %err, "authentication attempt failed");
                self.server_message = Some(ServerMessage {
                    outcome: SubmitOutcome::Failure,
                    text: MSG_LOGIN_FAILED.to_string(),
                });
                SubmitOutcome::Failure
            }
        };
        self.status = SubmitStatus::Idle;
        outcome
    }

    /// Runs one whole submission against an authenticator.
    ///
    /// Returns `None` when the attempt never reached the network (guard or
    /// validation), otherwise the tagged outcome. The event-driven render
    /// surface uses the `begin_submit`/`finish_submit` halves directly so
    /// the call can run on a spawned task.
    pub async fn submit<A: Authenticator + ?Sized>(
        &mut self,
        authenticator: &A,
    ) -> Option<SubmitOutcome> {
        let credentials = match self.begin_submit() {
            SubmitAttempt::Begin(credentials) => credentials,
            SubmitAttempt::Blocked | SubmitAttempt::Invalid => return None,
        };
        let result = authenticator.authenticate(&credentials).await;
        Some(self.finish_submit(result))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use super::*;
    use crate::auth::MockAuthenticator;
    use crate::validate::{EMAIL_REQUIRED, PASSWORD_REQUIRED, PASSWORD_TOO_SHORT};

    /// Counts calls; optionally rejects every attempt.
    #[derive(Default)]
    struct CountingAuthenticator {
        calls: AtomicUsize,
        fail: bool,
    }

    impl CountingAuthenticator {
        fn failing() -> Self {
            Self {
                calls: AtomicUsize::new(0),
                fail: true,
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl Authenticator for CountingAuthenticator {
        async fn authenticate(&self, _credentials: &Credentials) -> Result<(), AuthError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                Err(AuthError::InvalidCredentials)
            } else {
                Ok(())
            }
        }
    }

    fn filled_controller() -> LoginController {
        let mut controller = LoginController::new();
        controller.set_field(Field::Email, FieldValue::Text("user@test.com".into()));
        controller.set_field(Field::Password, FieldValue::Text("secret1".into()));
        controller
    }

    #[test]
    fn defaults_remember_on_and_idle() {
        let controller = LoginController::new();
        assert!(controller.form().remember);
        assert_eq!(controller.status(), SubmitStatus::Idle);
        assert!(controller.errors().is_empty());
        assert!(controller.server_message().is_none());
        assert!(!controller.show_password());
    }

    #[test]
    fn set_field_stores_raw_values_without_validating() {
        let mut controller = LoginController::new();
        controller.set_field(Field::Email, FieldValue::Text("  spaced  ".into()));
        controller.set_field(Field::Remember, FieldValue::Flag(false));
        assert_eq!(controller.form().email, "  spaced  ");
        assert!(!controller.form().remember);
        assert!(controller.errors().is_empty());
    }

    #[test]
    fn mismatched_field_value_is_ignored() {
        let mut controller = LoginController::new();
        controller.set_field(Field::Email, FieldValue::Flag(true));
        controller.set_field(Field::Remember, FieldValue::Text("yes".into()));
        assert_eq!(controller.form().email, "");
        assert!(controller.form().remember);
    }

    #[test]
    fn errors_stay_stale_until_next_submit() {
        let mut controller = LoginController::new();
        assert_eq!(controller.begin_submit(), SubmitAttempt::Invalid);
        assert_eq!(controller.errors().get(Field::Email), Some(EMAIL_REQUIRED));

        // Fixing the field does not clear the displayed error...
        controller.set_field(Field::Email, FieldValue::Text("user@test.com".into()));
        assert_eq!(controller.errors().get(Field::Email), Some(EMAIL_REQUIRED));

        // ...the next submit attempt recomputes the mapping wholesale.
        assert_eq!(controller.begin_submit(), SubmitAttempt::Invalid);
        assert_eq!(controller.errors().get(Field::Email), None);
        assert_eq!(
            controller.errors().get(Field::Password),
            Some(PASSWORD_REQUIRED)
        );
    }

    #[test]
    fn toggle_show_password_touches_nothing_else() {
        let mut controller = filled_controller();
        let _ = controller.begin_submit();
        let form_before = controller.form().clone();
        let errors_before = controller.errors().clone();

        controller.toggle_show_password();
        assert!(controller.show_password());
        assert_eq!(controller.form(), &form_before);
        assert_eq!(controller.errors(), &errors_before);

        controller.toggle_show_password();
        assert!(!controller.show_password());
    }

    #[test]
    fn invalid_submit_stays_idle_and_clears_server_message() {
        let mut controller = LoginController::new();
        controller.set_field(Field::Email, FieldValue::Text("a@b.co".into()));
        controller.set_field(Field::Password, FieldValue::Text("12345".into()));

        // Seed a message from an earlier attempt to observe the reset.
        controller.status = SubmitStatus::Submitting;
        controller.finish_submit(Err(AuthError::Network("offline".into())));
        assert!(controller.server_message().is_some());

        assert_eq!(controller.begin_submit(), SubmitAttempt::Invalid);
        assert_eq!(controller.status(), SubmitStatus::Idle);
        assert!(controller.server_message().is_none());
        assert_eq!(
            controller.errors().get(Field::Password),
            Some(PASSWORD_TOO_SHORT)
        );
    }

    #[test]
    fn valid_submit_enters_submitting_with_form_credentials() {
        let mut controller = filled_controller();
        controller.set_field(Field::Remember, FieldValue::Flag(false));

        let SubmitAttempt::Begin(credentials) = controller.begin_submit() else {
            panic!("expected submission to begin");
        };
        assert!(controller.is_submitting());
        assert_eq!(credentials.email, "user@test.com");
        assert_eq!(credentials.password, "secret1");
        assert!(!credentials.remember);
    }

    #[test]
    fn reentrant_submit_is_blocked_without_corrupting_state() {
        let mut controller = filled_controller();
        assert!(matches!(controller.begin_submit(), SubmitAttempt::Begin(_)));

        assert_eq!(controller.begin_submit(), SubmitAttempt::Blocked);
        assert!(controller.is_submitting());
        assert!(controller.errors().is_empty());
    }

    #[test]
    fn finish_submit_returns_to_idle_on_both_outcomes() {
        let mut controller = filled_controller();
        let _ = controller.begin_submit();
        assert_eq!(
            controller.finish_submit(Ok(())),
            SubmitOutcome::Success
        );
        assert_eq!(controller.status(), SubmitStatus::Idle);
        let message = controller.server_message().expect("message set");
        assert_eq!(message.outcome, SubmitOutcome::Success);
        assert_eq!(message.text, MSG_LOGIN_OK);

        let _ = controller.begin_submit();
        assert_eq!(
            controller.finish_submit(Err(AuthError::Server("500".into()))),
            SubmitOutcome::Failure
        );
        assert_eq!(controller.status(), SubmitStatus::Idle);
        let message = controller.server_message().expect("message set");
        assert_eq!(message.outcome, SubmitOutcome::Failure);
        assert_eq!(message.text, MSG_LOGIN_FAILED);
    }

    #[tokio::test]
    async fn empty_submit_never_reaches_the_authenticator() {
        let auth = CountingAuthenticator::default();
        let mut controller = LoginController::new();

        assert_eq!(controller.submit(&auth).await, None);
        assert_eq!(auth.calls(), 0);
        assert_eq!(controller.status(), SubmitStatus::Idle);
        assert_eq!(controller.errors().get(Field::Email), Some(EMAIL_REQUIRED));
        assert_eq!(
            controller.errors().get(Field::Password),
            Some(PASSWORD_REQUIRED)
        );
    }

    #[tokio::test]
    async fn failed_submit_ends_idle_with_failure_message() {
        let auth = CountingAuthenticator::failing();
        let mut controller = filled_controller();

        assert_eq!(controller.submit(&auth).await, Some(SubmitOutcome::Failure));
        assert_eq!(auth.calls(), 1);
        assert_eq!(controller.status(), SubmitStatus::Idle);
        assert_eq!(
            controller.server_message().map(|m| m.outcome),
            Some(SubmitOutcome::Failure)
        );
    }

    #[tokio::test(start_paused = true)]
    async fn delay_mock_submit_ends_idle_with_success_message() {
        let auth = MockAuthenticator::default();
        let mut controller = filled_controller();

        assert_eq!(controller.submit(&auth).await, Some(SubmitOutcome::Success));
        assert_eq!(controller.status(), SubmitStatus::Idle);
        let message = controller.server_message().expect("message set");
        assert_eq!(message.outcome, SubmitOutcome::Success);
        assert_eq!(message.text, MSG_LOGIN_OK);
    }
}
