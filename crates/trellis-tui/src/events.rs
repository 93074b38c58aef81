//! UI event types.
//!
//! Everything the reducer reacts to arrives as a `UiEvent`: terminal input,
//! frame ticks, overlay mutations requested by the coordinator's actions and
//! async results delivered through the runtime inbox.

use crossterm::event::Event;
use tokio::sync::mpsc;
use trellis_core::OverlayMutation;
use trellis_core::profile::UserProfile;

/// Events processed by the reducer.
#[derive(Debug, Clone)]
pub enum UiEvent {
    /// Render cadence.
    Tick,
    /// Current terminal size, sent before other events each loop iteration.
    Frame { width: u16, height: u16 },
    /// Raw terminal input.
    Terminal(Event),
    /// Store mutation requested by a coordinator action.
    Overlay(OverlayMutation),
    /// The coordinator asked for the current user's profile.
    FetchUserRequested,
    /// Profile fetch finished.
    ProfileLoaded(Result<UserProfile, String>),
}

pub type UiEventSender = mpsc::UnboundedSender<UiEvent>;
pub type UiEventReceiver = mpsc::UnboundedReceiver<UiEvent>;
