//! Terminal lifecycle management.
//!
//! This module handles terminal setup, restore, and panic hooks, and binds the
//! coordinator's listeners to terminal input modes.
//! Terminal state is guaranteed to be restored on:
//! - Normal exit (via Drop)
//! - Panic

use std::io::{self, Stdout, Write};
use std::panic;

use anyhow::{Context, Result};
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use trellis_core::{InputListeners, ListenerHandle, ListenerKind, ListenerRegistry};

/// Sets up the terminal for the TUI.
///
/// - Enables raw mode
/// - Enters alternate screen
/// - Creates the terminal instance
///
/// Mouse capture is left to `TerminalListeners`.
/// Call `install_panic_hook()` before this to ensure terminal restore on panic.
///
/// # Errors
/// Returns an error if the operation fails.
pub fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend).context("Failed to create terminal")?;
    Ok(terminal)
}

/// Restores terminal state.
///
/// - Disables mouse capture (safe to call even if not enabled)
/// - Leaves alternate screen
/// - Disables raw mode
///
/// This function is idempotent and safe to call multiple times.
///
/// # Errors
/// Returns an error if the operation fails.
pub fn restore_terminal() -> Result<()> {
    // Must happen before leaving raw mode.
    let _ = execute!(io::stdout(), DisableMouseCapture);

    execute!(io::stdout(), LeaveAlternateScreen).context("Failed to leave alternate screen")?;
    disable_raw_mode().context("Failed to disable raw mode")?;
    Ok(())
}

/// Installs a panic hook that restores the terminal before printing the panic.
///
/// Call this BEFORE `setup_terminal()` to ensure terminal restore on panic.
pub fn install_panic_hook() {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = restore_terminal();
        original_hook(panic_info);
    }));
}

/// Listener bindings backed by terminal input modes.
///
/// Click listeners need mouse reporting, so the first attached click listener
/// enables mouse capture on `out` and the last detached one disables it.
/// Key events are always delivered in raw mode; key-down listeners are only
/// tracked.
#[derive(Debug)]
pub struct TerminalListeners<W: Write> {
    out: W,
    registry: ListenerRegistry,
}

impl TerminalListeners<Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> TerminalListeners<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            registry: ListenerRegistry::new(),
        }
    }

    pub fn registry(&self) -> &ListenerRegistry {
        &self.registry
    }

    pub fn writer(&self) -> &W {
        &self.out
    }
}

impl<W: Write> InputListeners for TerminalListeners<W> {
    fn attach(&mut self, kind: ListenerKind) -> io::Result<ListenerHandle> {
        if kind == ListenerKind::Click && !self.registry.is_attached(ListenerKind::Click) {
            execute!(self.out, EnableMouseCapture)?;
        }
        self.registry.attach(kind)
    }

    fn detach(&mut self, handle: ListenerHandle) -> io::Result<()> {
        self.registry.detach(handle)?;
        if handle.kind() == ListenerKind::Click && !self.registry.is_attached(ListenerKind::Click) {
            execute!(self.out, DisableMouseCapture)?;
        }
        Ok(())
    }
}
