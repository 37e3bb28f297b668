//! UI effect types.
//!
//! Effects are commands returned by the reducer that the runtime executes.
//! They represent I/O and task spawning only; the reducer itself never
//! performs I/O or spawns tasks.

use signon_core::Credentials;

/// Effects returned by the reducer for the runtime to execute.
#[derive(Debug)]
pub enum UiEffect {
    /// Quit the application.
    Quit,

    /// Run the asynchronous authentication call with these credentials.
    /// Its result comes back through the inbox as `UiEvent::AuthResult`.
    Authenticate { credentials: Credentials },

    /// Hand the post-login redirect to the navigation collaborator.
    Navigate { destination: String },
}
