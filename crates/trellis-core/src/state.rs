//! Overlay state store and the contexts read by the coordinator.
//!
//! ## Ownership
//!
//! ```text
//! OverlayStore (owned by the host)
//! ├── visibility: OverlayVisibility  (which overlays are open)
//! └── focus: FocusContext            (which overlay owns the current interaction)
//! ```
//!
//! The coordinator never writes the store. It reads an `OverlaySnapshot` per
//! event and emits commands; the host turns those into `OverlayMutation`s.

use serde::{Deserialize, Serialize};

use crate::commands::Command;

/// Which overlays are currently shown. Flags are independent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverlayVisibility {
    pub pop_over_open: bool,
    pub modal_open: bool,
    pub boards_menu_open: bool,
}

impl OverlayVisibility {
    pub fn any_open(&self) -> bool {
        self.pop_over_open || self.modal_open || self.boards_menu_open
    }
}

/// Whether the current interaction originated inside an overlay.
///
/// A flag only matters while the matching overlay is open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FocusContext {
    pub on_pop_over: bool,
    pub on_modal: bool,
    pub on_boards_menu: bool,
}

/// Consistent view of the store for a single event-processing step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverlaySnapshot {
    pub visibility: OverlayVisibility,
    pub focus: FocusContext,
}

/// Authentication status of the current session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthContext {
    pub is_authenticated: bool,
    pub full_name: String,
}

impl AuthContext {
    pub fn authenticated(full_name: impl Into<String>) -> Self {
        Self {
            is_authenticated: true,
            full_name: full_name.into(),
        }
    }

    pub fn anonymous() -> Self {
        Self::default()
    }
}

/// Error messages shown to the user, oldest first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotificationState {
    pub error_messages: Vec<String>,
}

impl NotificationState {
    pub fn push_error(&mut self, message: impl Into<String>) {
        self.error_messages.push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.error_messages.is_empty()
    }
}

/// Changes applied to the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayMutation {
    OpenPopOver,
    ClosePopOver,
    OpenModal,
    CloseAllModals,
    OpenBoardsMenu,
    CloseBoardsMenu,
    FocusPopOver(bool),
    FocusModal(bool),
    FocusBoardsMenu(bool),
}

impl From<Command> for OverlayMutation {
    fn from(command: Command) -> Self {
        match command {
            Command::CloseAllModals => OverlayMutation::CloseAllModals,
            Command::ClosePopOver => OverlayMutation::ClosePopOver,
            Command::CloseBoardsMenu => OverlayMutation::CloseBoardsMenu,
        }
    }
}

/// Shared overlay store. Writes are serialized by its owner.
#[derive(Debug, Clone, Default)]
pub struct OverlayStore {
    visibility: OverlayVisibility,
    focus: FocusContext,
}

impl OverlayStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> OverlaySnapshot {
        OverlaySnapshot {
            visibility: self.visibility,
            focus: self.focus,
        }
    }

    pub fn visibility(&self) -> &OverlayVisibility {
        &self.visibility
    }

    pub fn focus(&self) -> &FocusContext {
        &self.focus
    }

    /// Applies a mutation. Returns true if the store changed.
    ///
    /// Closing an already-closed overlay is a no-op. Closing an overlay also
    /// drops its focus flag.
    pub fn apply(&mut self, mutation: OverlayMutation) -> bool {
        let before = self.snapshot();
        let (vis, focus) = (&mut self.visibility, &mut self.focus);
        match mutation {
            OverlayMutation::OpenPopOver => vis.pop_over_open = true,
            OverlayMutation::ClosePopOver => {
                vis.pop_over_open = false;
                focus.on_pop_over = false;
            }
            OverlayMutation::OpenModal => vis.modal_open = true,
            OverlayMutation::CloseAllModals => {
                vis.modal_open = false;
                focus.on_modal = false;
            }
            OverlayMutation::OpenBoardsMenu => vis.boards_menu_open = true,
            OverlayMutation::CloseBoardsMenu => {
                vis.boards_menu_open = false;
                focus.on_boards_menu = false;
            }
            OverlayMutation::FocusPopOver(on) => focus.on_pop_over = on,
            OverlayMutation::FocusModal(on) => focus.on_modal = on,
            OverlayMutation::FocusBoardsMenu(on) => focus.on_boards_menu = on,
        }
        self.snapshot() != before
    }
}
