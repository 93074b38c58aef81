//! UI effect types.
//!
//! Effects are commands returned by the reducer that the runtime executes.
//! The reducer itself never performs I/O or spawns tasks.

/// Effects returned by the reducer for the runtime to execute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiEffect {
    /// Quit the application.
    Quit,
    /// Fetch the current user's profile in the background.
    FetchUser,
}
