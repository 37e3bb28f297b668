//! Full-screen TUI render surface for signon.
//!
//! The surface is a pure function of controller state plus an event sink:
//! `render` reads state, the reducer in `update` receives events, and the
//! runtime executes the effects in between. No module here shares mutable
//! state with the domain crate.

pub mod effects;
pub mod events;
pub mod render;
pub mod runtime;
pub mod state;
pub mod terminal;
pub mod update;

use std::io::{IsTerminal, stderr};
use std::sync::Arc;

use anyhow::Result;
pub use runtime::LoginRuntime;
use signon_core::Authenticator;
use signon_core::config::Config;

/// Runs the interactive login form until the user quits.
pub async fn run_login(config: &Config, authenticator: Arc<dyn Authenticator>) -> Result<()> {
    // The form requires a terminal to render the TUI
    if !stderr().is_terminal() {
        anyhow::bail!("signon requires a terminal.");
    }

    let mut runtime = LoginRuntime::new(config, authenticator)?;
    runtime.run()?;

    Ok(())
}
