//! Which layers a renderer should draw.

use crate::state::OverlayVisibility;

/// Pure projection of overlay visibility onto rendered layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlayPresence {
    pub header: bool,
    pub pop_over: bool,
    pub boards_menu: bool,
    pub modal: bool,
}

impl From<&OverlayVisibility> for OverlayPresence {
    fn from(visibility: &OverlayVisibility) -> Self {
        Self {
            header: true,
            pop_over: visibility.pop_over_open,
            boards_menu: visibility.boards_menu_open,
            modal: visibility.modal_open,
        }
    }
}
