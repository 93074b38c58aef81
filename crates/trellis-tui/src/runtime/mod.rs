//! TUI runtime - owns terminal, runs event loop, executes effects.
//!
//! This is the "Elm runtime" boundary: all side effects happen here.
//! The session and reducer stay pure and produce effects; this module
//! executes them.
//!
//! Structure:
//! - `mod.rs`: Core runtime (TuiRuntime, event loop, effect dispatch)
//! - `session.rs`: Coordinator wiring and per-event ordering
//! - `handlers/`: Effect handler implementations (network I/O)

mod handlers;
mod session;

use std::future::Future;
use std::io::Stdout;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
pub use session::Session;
use tracing::{info, warn};
use trellis_core::DismissalPolicy;
use trellis_core::profile::ProfileClient;

use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::render;
use crate::state::AppState;
use crate::terminal::{self, TerminalListeners};

/// Frame interval while the user is interacting.
pub const FRAME_DURATION: Duration = Duration::from_millis(16);

/// Poll duration when idle.
/// Longer timeout reduces CPU usage when nothing is happening.
pub const IDLE_POLL_DURATION: Duration = Duration::from_millis(100);

/// Full-screen board runtime.
///
/// Owns the terminal and the session. Terminal state is restored on drop or
/// panic.
pub struct TuiRuntime {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    session: Session<TerminalListeners<Stdout>>,
    /// Present when a token is configured.
    profile: Option<ProfileClient>,
    last_tick: Instant,
    last_terminal_event: Instant,
}

impl TuiRuntime {
    /// Creates a new TUI runtime.
    ///
    /// # Errors
    /// Returns an error if the terminal cannot be set up.
    pub fn new(
        state: AppState,
        policy: DismissalPolicy,
        profile: Option<ProfileClient>,
    ) -> Result<Self> {
        // Set up panic hook BEFORE entering alternate screen
        terminal::install_panic_hook();

        let terminal = terminal::setup_terminal().context("Failed to setup terminal")?;
        let session = Session::new(state, TerminalListeners::stdout(), policy);

        let now = Instant::now();
        Ok(Self {
            terminal,
            session,
            profile,
            last_tick: now,
            last_terminal_event: now,
        })
    }

    pub fn state(&self) -> &AppState {
        &self.session.state
    }

    /// Runs the main event loop.
    ///
    /// Must be called from within a tokio runtime.
    ///
    /// # Errors
    /// Returns an error if the coordinator cannot bind its listeners or the
    /// terminal fails.
    pub fn run(&mut self) -> Result<()> {
        let effects = self.session.activate()?;
        info!("board session started");
        self.execute_effects(effects);

        let result = self.event_loop();

        if let Err(e) = self.session.deactivate() {
            warn!("{e:#}");
        }
        info!("board session ended");
        result
    }

    fn event_loop(&mut self) -> Result<()> {
        let mut dirty = true; // Start dirty to ensure initial render

        while !self.session.state.should_quit {
            let mut events = self.collect_events()?;

            // Layout must be current before input is hit-tested.
            let size = self.terminal.size()?;
            events.insert(
                0,
                UiEvent::Frame {
                    width: size.width,
                    height: size.height,
                },
            );

            for event in events {
                if matches!(&event, UiEvent::Terminal(_)) {
                    self.last_terminal_event = Instant::now();
                }
                // Only Tick triggers render; everything else batches to it.
                if matches!(&event, UiEvent::Tick) {
                    dirty = true;
                }

                let effects = self.session.handle_event(event);
                self.execute_effects(effects);

                if self.session.state.should_quit {
                    break;
                }
            }

            if dirty {
                let state = &self.session.state;
                self.terminal.draw(|frame| render::render(state, frame))?;
                dirty = false;
            }
        }

        Ok(())
    }

    // ========================================================================
    // Event Collection
    // ========================================================================

    /// Collects terminal events and emits Tick at the current cadence.
    ///
    /// Inbox events (async results) are applied directly by the session.
    fn collect_events(&mut self) -> Result<Vec<UiEvent>> {
        let mut events = Vec::new();

        let effects = self.session.drain_inbox();
        let had_inbox = !effects.is_empty();
        self.execute_effects(effects);

        let recent_terminal_activity = self.last_terminal_event.elapsed() < IDLE_POLL_DURATION;
        let tick_interval = if recent_terminal_activity || self.session.state.profile_loading {
            FRAME_DURATION
        } else {
            IDLE_POLL_DURATION
        };

        let time_until_tick = tick_interval.saturating_sub(self.last_tick.elapsed());
        let poll_duration = if had_inbox {
            Duration::ZERO
        } else {
            time_until_tick
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

    // ========================================================================
    // Effect Dispatch
    // ========================================================================

    fn execute_effects(&mut self, effects: Vec<UiEffect>) {
        for effect in effects {
            self.execute_effect(effect);
        }
    }

    /// Spawns an async handler and sends its result event to the inbox.
    fn spawn_effect<F, Fut>(&self, f: F)
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = UiEvent> + Send + 'static,
    {
        let tx = self.session.inbox_sender();
        tokio::spawn(async move {
            let _ = tx.send(f().await);
        });
    }

    fn execute_effect(&mut self, effect: UiEffect) {
        match effect {
            UiEffect::Quit => {
                self.session.state.should_quit = true;
            }
            UiEffect::FetchUser => match self.profile.clone() {
                Some(client) => self.spawn_effect(move || handlers::fetch_profile(client)),
                None => {
                    let _ = self
                        .session
                        .inbox_sender()
                        .send(handlers::profile_unavailable());
                }
            },
        }
    }
}

impl Drop for TuiRuntime {
    fn drop(&mut self) {
        let _ = terminal::restore_terminal();
    }
}
