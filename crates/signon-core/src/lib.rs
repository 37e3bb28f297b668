//! Domain core for signon: the login form controller.
//!
//! Everything that decides what the form does lives here; nothing that
//! decides how it looks. The render surface (signon-tui) reads controller
//! state and forwards events back in.

pub mod auth;
pub mod config;
pub mod form;
pub mod validate;

pub use auth::{AuthError, Authenticator, Credentials, MockAuthenticator};
pub use form::{
    Field, FieldValue, FormState, LoginController, ServerMessage, SubmitAttempt, SubmitOutcome,
    SubmitStatus,
};
pub use validate::{ValidationErrors, validate};
