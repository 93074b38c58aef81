//! Board session: state, coordinator and inbox, without a terminal.
//!
//! Every terminal event goes through the same steps:
//! 1. focus flags follow the pointer
//! 2. the coordinator sees the trigger and dispatches close actions
//! 3. the actions' inbox events are applied to the store
//! 4. the reducer handles user-initiated opens
//!
//! Step 3 finishes before the next event starts, so each event sees a store
//! that already reflects the previous event's dismissals.

use anyhow::{Context, Result};
use tokio::sync::mpsc;
use trellis_core::{
    ActionTable, Coordinator, DismissalPolicy, InputListeners, OverlayMutation,
};

use crate::effects::UiEffect;
use crate::events::{UiEvent, UiEventReceiver, UiEventSender};
use crate::state::AppState;
use crate::{input, update};

pub struct Session<L: InputListeners> {
    pub state: AppState,
    coordinator: Coordinator<ActionTable, L>,
    inbox_tx: UiEventSender,
    inbox_rx: UiEventReceiver,
}

impl<L: InputListeners> Session<L> {
    pub fn new(state: AppState, listeners: L, policy: DismissalPolicy) -> Self {
        let (inbox_tx, inbox_rx) = mpsc::unbounded_channel();
        let coordinator = Coordinator::new(overlay_actions(&inbox_tx), listeners, policy);
        Self {
            state,
            coordinator,
            inbox_tx,
            inbox_rx,
        }
    }

    pub fn coordinator(&self) -> &Coordinator<ActionTable, L> {
        &self.coordinator
    }

    /// Sender for async handlers; their results are applied on the next drain.
    pub fn inbox_sender(&self) -> UiEventSender {
        self.inbox_tx.clone()
    }

    /// Activates the coordinator for the current auth state.
    ///
    /// A duplicate activation is ignored. Returns the effects of the initial
    /// actions (a profile fetch when authenticated).
    ///
    /// # Errors
    /// Returns an error if listeners cannot be bound.
    pub fn activate(&mut self) -> Result<Vec<UiEffect>> {
        if let Err(err) = self.coordinator.activate(&self.state.auth)
            && err.is_fatal()
        {
            return Err(err).context("Failed to activate overlay coordinator");
        }
        Ok(self.drain_inbox())
    }

    /// Unbinds listeners. No-op when inactive.
    ///
    /// # Errors
    /// Returns an error if a listener could not be unbound.
    pub fn deactivate(&mut self) -> Result<()> {
        self.coordinator
            .deactivate()
            .context("Failed to deactivate overlay coordinator")
    }

    /// Processes one event and returns the effects to execute.
    pub fn handle_event(&mut self, event: UiEvent) -> Vec<UiEffect> {
        let UiEvent::Terminal(term_event) = &event else {
            return update::update(&mut self.state, event);
        };

        update::track_focus(&mut self.state, term_event);

        let mut effects = Vec::new();
        if let Some(trigger) = input::trigger_for(term_event) {
            let snapshot = self.state.overlays.snapshot();
            self.coordinator.handle(&snapshot, trigger);
            effects.extend(self.drain_inbox());
        }
        effects.extend(update::update(&mut self.state, event));
        effects
    }

    /// Applies every queued inbox event.
    pub fn drain_inbox(&mut self) -> Vec<UiEffect> {
        let mut effects = Vec::new();
        while let Ok(event) = self.inbox_rx.try_recv() {
            effects.extend(update::update(&mut self.state, event));
        }
        effects
    }
}

/// Coordinator actions that post store mutations to the inbox.
fn overlay_actions(tx: &UiEventSender) -> ActionTable {
    let post = |event: UiEvent| {
        let tx = tx.clone();
        move || {
            let _ = tx.send(event.clone());
        }
    };
    ActionTable::new()
        .on_close_pop_over(post(UiEvent::Overlay(OverlayMutation::ClosePopOver)))
        .on_close_all_modals(post(UiEvent::Overlay(OverlayMutation::CloseAllModals)))
        .on_close_boards_menu(post(UiEvent::Overlay(OverlayMutation::CloseBoardsMenu)))
        .on_fetch_user(post(UiEvent::FetchUserRequested))
}
