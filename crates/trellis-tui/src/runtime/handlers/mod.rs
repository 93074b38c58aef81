//! Effect handlers for the TUI runtime.
//!
//! Handlers are pure async functions that return a `UiEvent`. The runtime
//! spawns them and sends the result to the session inbox. They never touch
//! state directly.

pub mod profile;

pub use profile::*;
