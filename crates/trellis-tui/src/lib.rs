//! Full-screen board for Trellis.
//!
//! A terminal host for the overlay-dismissal coordinator: a header with the
//! Boards and profile buttons, a boards menu, a profile pop-over and a modal.

pub mod effects;
pub mod events;
pub mod input;
pub mod layout;
pub mod render;
pub mod runtime;
pub mod state;
pub mod terminal;
pub mod update;

use std::io::{IsTerminal, Write, stderr};

use anyhow::Result;
pub use runtime::{Session, TuiRuntime};
use trellis_core::AuthContext;
use trellis_core::config::Config;
use trellis_core::profile::ProfileClient;

use crate::state::AppState;

/// Runs the interactive board.
///
/// With a token the session is authenticated and the profile is fetched on
/// activation; without one it runs anonymously.
///
/// # Errors
/// Returns an error if stderr is not a terminal, the profile client cannot
/// be built, or the terminal fails.
pub async fn run_board(config: &Config, token: Option<&str>) -> Result<()> {
    if !stderr().is_terminal() {
        anyhow::bail!(
            "The board requires a terminal.\n\
             Use `trellis decide ...` for non-interactive evaluation."
        );
    }

    let profile = token
        .map(|token| ProfileClient::new(&config.profile, token))
        .transpose()?;
    let auth = if profile.is_some() {
        AuthContext::authenticated("")
    } else {
        AuthContext::anonymous()
    };

    let mut runtime = TuiRuntime::new(AppState::new(auth), config.dismissal, profile)?;
    runtime.run()?;
    drop(runtime);

    writeln!(stderr(), "Goodbye!")?;
    Ok(())
}
