//! Board application state.

use ratatui::layout::Rect;
use trellis_core::{AuthContext, NotificationState, OverlayPresence, OverlayStore};

use crate::layout::BoardLayout;

const ANONYMOUS_LABEL: &str = "Guest";
const LOADING_LABEL: &str = "Profile";

/// State owned by the runtime and mutated only by the reducer.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub overlays: OverlayStore,
    pub auth: AuthContext,
    pub notifications: NotificationState,
    /// Terminal area from the last `Frame` event.
    pub area: Rect,
    pub profile_loading: bool,
    pub should_quit: bool,
}

impl AppState {
    pub fn new(auth: AuthContext) -> Self {
        Self {
            auth,
            ..Self::default()
        }
    }

    /// Text shown on the profile button.
    pub fn profile_label(&self) -> &str {
        if !self.auth.is_authenticated {
            ANONYMOUS_LABEL
        } else if self.auth.full_name.is_empty() {
            LOADING_LABEL
        } else {
            &self.auth.full_name
        }
    }

    pub fn layout(&self) -> BoardLayout {
        BoardLayout::compute(self.area, self.profile_label())
    }

    pub fn presence(&self) -> OverlayPresence {
        OverlayPresence::from(self.overlays.visibility())
    }
}
