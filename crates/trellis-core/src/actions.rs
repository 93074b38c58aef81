//! Action capabilities and the command dispatcher.
//!
//! The coordinator never calls into the store directly. It holds an
//! `OverlayActions` implementation supplied by the host and invokes it once
//! per command. `ActionTable` is the closure-based implementation; tests
//! usually provide a recording implementation of the trait instead.

use std::fmt;

use tracing::debug;

use crate::commands::{Command, CommandSet};
use crate::error::CoordinatorError;

/// Names of the callbacks an action table must supply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionName {
    ClosePopOver,
    CloseAllModals,
    CloseBoardsMenu,
    FetchUser,
}

impl ActionName {
    pub const ALL: [ActionName; 4] = [
        ActionName::ClosePopOver,
        ActionName::CloseAllModals,
        ActionName::CloseBoardsMenu,
        ActionName::FetchUser,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ActionName::ClosePopOver => "closePopOver",
            ActionName::CloseAllModals => "closeAllModals",
            ActionName::CloseBoardsMenu => "closeBoardsMenu",
            ActionName::FetchUser => "fetchUser",
        }
    }
}

impl fmt::Display for ActionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Side effects the coordinator may request.
///
/// Close actions must be idempotent: the engine emits commands without
/// checking whether the overlay is still open.
pub trait OverlayActions {
    fn close_pop_over(&mut self);
    fn close_all_modals(&mut self);
    fn close_boards_menu(&mut self);
    fn fetch_user(&mut self);

    /// Validates that every action is available. Called on activation.
    ///
    /// # Errors
    /// Returns `CoordinatorError::MissingAction` naming the first absent action.
    fn ensure_complete(&self) -> Result<(), CoordinatorError> {
        Ok(())
    }
}

/// Invokes the action for each command, modal → pop-over → menu.
pub fn dispatch<A: OverlayActions + ?Sized>(commands: &CommandSet, actions: &mut A) {
    for command in commands.iter() {
        debug!(%command, "dispatching");
        match command {
            Command::CloseAllModals => actions.close_all_modals(),
            Command::ClosePopOver => actions.close_pop_over(),
            Command::CloseBoardsMenu => actions.close_boards_menu(),
        }
    }
}

type Action = Box<dyn FnMut()>;

/// Action table built from callbacks.
///
/// ```text
/// ActionTable::new()
///     .on_close_pop_over(..)
///     .on_close_all_modals(..)
///     .on_close_boards_menu(..)
///     .on_fetch_user(..)
/// ```
#[derive(Default)]
pub struct ActionTable {
    close_pop_over: Option<Action>,
    close_all_modals: Option<Action>,
    close_boards_menu: Option<Action>,
    fetch_user: Option<Action>,
}

impl ActionTable {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn on_close_pop_over(mut self, f: impl FnMut() + 'static) -> Self {
        self.close_pop_over = Some(Box::new(f));
        self
    }

    #[must_use]
    pub fn on_close_all_modals(mut self, f: impl FnMut() + 'static) -> Self {
        self.close_all_modals = Some(Box::new(f));
        self
    }

    #[must_use]
    pub fn on_close_boards_menu(mut self, f: impl FnMut() + 'static) -> Self {
        self.close_boards_menu = Some(Box::new(f));
        self
    }

    #[must_use]
    pub fn on_fetch_user(mut self, f: impl FnMut() + 'static) -> Self {
        self.fetch_user = Some(Box::new(f));
        self
    }

    fn slot(&self, name: ActionName) -> Option<&Action> {
        match name {
            ActionName::ClosePopOver => self.close_pop_over.as_ref(),
            ActionName::CloseAllModals => self.close_all_modals.as_ref(),
            ActionName::CloseBoardsMenu => self.close_boards_menu.as_ref(),
            ActionName::FetchUser => self.fetch_user.as_ref(),
        }
    }

    /// First action without a callback, if any.
    pub fn missing(&self) -> Option<ActionName> {
        ActionName::ALL
            .into_iter()
            .find(|name| self.slot(*name).is_none())
    }

    fn call(slot: &mut Option<Action>) {
        if let Some(f) = slot.as_mut() {
            f();
        }
    }
}

impl fmt::Debug for ActionTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let supplied: Vec<_> = ActionName::ALL
            .into_iter()
            .filter(|name| self.slot(*name).is_some())
            .map(ActionName::as_str)
            .collect();
        f.debug_struct("ActionTable")
            .field("supplied", &supplied)
            .finish()
    }
}

impl OverlayActions for ActionTable {
    fn close_pop_over(&mut self) {
        Self::call(&mut self.close_pop_over);
    }

    fn close_all_modals(&mut self) {
        Self::call(&mut self.close_all_modals);
    }

    fn close_boards_menu(&mut self) {
        Self::call(&mut self.close_boards_menu);
    }

    fn fetch_user(&mut self) {
        Self::call(&mut self.fetch_user);
    }

    fn ensure_complete(&self) -> Result<(), CoordinatorError> {
        match self.missing() {
            Some(name) => Err(CoordinatorError::MissingAction(name)),
            None => Ok(()),
        }
    }
}
