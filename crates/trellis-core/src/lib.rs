//! Core Trellis library (dismissal engine, dispatch, lifecycle, config).
//!
//! The coordinator decides which overlays close in response to global input:
//!
//! ```text
//! input event ─▶ Coordinator (lifecycle) ─▶ decide() ─▶ dispatch() ─▶ OverlayActions
//!                                                                        │
//!                                  OverlayStore ◀── OverlayMutation ◀────┘
//! ```
//!
//! The engine only reads `OverlaySnapshot`s; the store is owned by the host.

pub mod actions;
pub mod commands;
pub mod config;
pub mod decide;
pub mod error;
pub mod lifecycle;
pub mod logging;
pub mod policy;
pub mod presence;
pub mod profile;
pub mod state;
pub mod trigger;

pub use actions::{ActionName, ActionTable, OverlayActions, dispatch};
pub use commands::{Command, CommandSet};
pub use decide::decide;
pub use error::CoordinatorError;
pub use lifecycle::{Coordinator, InputListeners, ListenerHandle, ListenerKind, ListenerRegistry};
pub use policy::{DismissalPolicy, MenuDismissal};
pub use presence::OverlayPresence;
pub use state::{
    AuthContext, FocusContext, NotificationState, OverlayMutation, OverlaySnapshot, OverlayStore,
    OverlayVisibility,
};
pub use trigger::{ESCAPE_KEY_CODE, Trigger};
