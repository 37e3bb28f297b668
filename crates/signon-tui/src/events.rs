//! Events fed into the reducer.

use signon_core::AuthError;

/// Everything the runtime can hand to `update`.
#[derive(Debug)]
pub enum UiEvent {
    /// Periodic tick; drives the spinner and render cadence.
    Tick,
    /// Raw terminal input (keys, paste, resize).
    Terminal(crossterm::event::Event),
    /// The spawned authentication call finished.
    AuthResult { result: Result<(), AuthError> },
}
