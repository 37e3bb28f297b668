//! TUI runtime - owns terminal, runs event loop, executes effects.
//!
//! This is the "Elm runtime" boundary: all side effects happen here.
//! The reducer stays pure and produces effects; this module executes them.
//!
//! Async results use an inbox pattern: the spawned authentication task
//! sends its `UiEvent` to `inbox_tx`, and the loop drains `inbox_rx`
//! before each tick.

use std::io::Stdout;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use signon_core::Authenticator;
use signon_core::config::Config;
use tokio::sync::mpsc;
use tracing::info;

use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::state::AppState;
use crate::{render, terminal, update};

/// Tick cadence while the spinner animates or keys are arriving.
pub const FRAME_DURATION: Duration = Duration::from_millis(50);

/// Poll duration when idle. Longer timeout reduces CPU usage when nothing
/// is happening.
pub const IDLE_POLL_DURATION: Duration = Duration::from_millis(250);

/// Full-screen TUI runtime.
///
/// Owns the terminal and state. Runs the event loop and executes effects.
/// Terminal state is restored on drop or panic.
pub struct LoginRuntime {
    /// Terminal instance.
    terminal: Terminal<CrosstermBackend<Stdout>>,
    /// Application state.
    pub state: AppState,
    /// Authentication collaborator invoked by the `Authenticate` effect.
    authenticator: Arc<dyn Authenticator>,
    /// Inbox sender - spawned tasks send events here.
    inbox_tx: mpsc::UnboundedSender<UiEvent>,
    /// Inbox receiver - the loop drains this each frame.
    inbox_rx: mpsc::UnboundedReceiver<UiEvent>,
    /// Last time a Tick event was emitted.
    last_tick: Instant,
    /// Last time a terminal event was received (for fast tick during typing).
    last_terminal_event: Instant,
}

impl LoginRuntime {
    /// Creates a new runtime.
    ///
    /// Must be called from within a tokio runtime: the `Authenticate`
    /// effect spawns the authentication call as a task.
    pub fn new(config: &Config, authenticator: Arc<dyn Authenticator>) -> Result<Self> {
        // Set up panic hook BEFORE entering alternate screen
        terminal::install_panic_hook();

        let terminal = terminal::setup_terminal().context("Failed to setup terminal")?;
        let state = AppState::new(config);
        let (inbox_tx, inbox_rx) = mpsc::unbounded_channel();

        let now = Instant::now();
        Ok(Self {
            terminal,
            state,
            authenticator,
            inbox_tx,
            inbox_rx,
            last_tick: now,
            last_terminal_event: now,
        })
    }

    /// Runs the main event loop.
    pub fn run(&mut self) -> Result<()> {
        terminal::enable_input_features()?;

        let result = self.event_loop();

        let _ = terminal::disable_input_features();

        result
    }

    fn event_loop(&mut self) -> Result<()> {
        let mut dirty = true; // Start dirty to ensure initial render

        while !self.state.should_quit {
            let events = self.collect_events()?;

            for event in events {
                if matches!(&event, UiEvent::Terminal(_)) {
                    self.last_terminal_event = Instant::now();
                    dirty = true;
                }
                if matches!(&event, UiEvent::Tick | UiEvent::AuthResult { .. }) {
                    dirty = true;
                }

                let effects = update::update(&mut self.state, event);
                self.execute_effects(effects);
            }

            if dirty {
                self.terminal.draw(|frame| {
                    render::render(&self.state, frame);
                })?;
                dirty = false;
            }
        }

        Ok(())
    }

    /// Collects events from the inbox and the terminal, emitting `Tick`
    /// when its interval elapses.
    fn collect_events(&mut self) -> Result<Vec<UiEvent>> {
        let mut events = Vec::new();

        // Fast polling while the spinner runs or the user is typing;
        // otherwise slow polling to save CPU.
        let recent_terminal_activity = self.last_terminal_event.elapsed() < IDLE_POLL_DURATION;
        let tick_interval = if self.state.controller.is_submitting() || recent_terminal_activity {
            FRAME_DURATION
        } else {
            IDLE_POLL_DURATION
        };

        // Drain inbox - the authentication result arrives here
        while let Ok(ev) = self.inbox_rx.try_recv() {
            events.push(ev);
        }

        // Poll terminal events:
        // - If we already have events to process, do a non-blocking poll
        // - Otherwise, block until the next tick is due
        let time_until_tick = tick_interval.saturating_sub(self.last_tick.elapsed());
        let poll_duration = if events.is_empty() {
            time_until_tick
        } else {
            Duration::ZERO
        };

        if event::poll(poll_duration)? {
            events.push(UiEvent::Terminal(event::read()?));
            // Drain any remaining buffered events (non-blocking)
            while event::poll(Duration::ZERO)? {
                events.push(UiEvent::Terminal(event::read()?));
            }
        }

        if self.last_tick.elapsed() >= tick_interval {
            events.push(UiEvent::Tick);
            self.last_tick = Instant::now();
        }

        Ok(events)
    }

    fn execute_effects(&mut self, effects: Vec<UiEffect>) {
        for effect in effects {
            self.execute_effect(effect);
        }
    }

    fn execute_effect(&mut self, effect: UiEffect) {
        match effect {
            UiEffect::Quit => {
                self.state.should_quit = true;
            }

            // The only suspension point in the whole form: the call runs to
            // completion or error on a spawned task, no cancellation, no
            // deadline. Its result re-enters the loop through the inbox.
            UiEffect::Authenticate { credentials } => {
                let authenticator = Arc::clone(&self.authenticator);
                let tx = self.inbox_tx.clone();
                tokio::spawn(async move {
                    let result = authenticator.authenticate(&credentials).await;
                    let _ = tx.send(UiEvent::AuthResult { result });
                });
            }

            // Navigation collaborator boundary: the redirect itself is not
            // this client's concern.
            UiEffect::Navigate { destination } => {
                info!(%destination, "login complete, handing off navigation");
            }
        }
    }
}

impl Drop for LoginRuntime {
    fn drop(&mut self) {
        let _ = terminal::restore_terminal();
    }
}
