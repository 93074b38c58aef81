//! Configurable dismissal rules.
//!
//! Modal and pop-over rules are fixed. The boards menu rule is configurable:
//! whether plain clicks close it, and whether focus inside the menu suppresses
//! its dismissal.

use serde::{Deserialize, Serialize};

use crate::trigger::Trigger;

/// Boards menu dismissal rule.
///
/// The default is deliberately Escape-only: a plain click leaves the menu
/// open unless `on_click` is set. Clicks that close the menu are an opt-in,
/// matching the boards client, where click-to-close for the menu was never
/// enabled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MenuDismissal {
    /// Close the menu on plain clicks (Escape always closes it).
    pub on_click: bool,
    /// Keep the menu open while the interaction originated inside it.
    pub focus_aware: bool,
}

impl MenuDismissal {
    /// Escape-only, focus-blind.
    pub const ESCAPE_ONLY: MenuDismissal = MenuDismissal {
        on_click: false,
        focus_aware: false,
    };

    /// Returns true if `trigger` should close an open menu.
    ///
    /// `trigger` is assumed to already qualify (click or Escape).
    pub fn dismisses(self, trigger: Trigger, focused: bool) -> bool {
        if trigger.is_click() && !self.on_click {
            return false;
        }
        !(self.focus_aware && focused)
    }
}

/// Rules applied by the decision engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DismissalPolicy {
    pub menu: MenuDismissal,
}

impl DismissalPolicy {
    pub fn with_menu(menu: MenuDismissal) -> Self {
        Self { menu }
    }
}
