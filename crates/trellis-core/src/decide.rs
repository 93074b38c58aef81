//! Dismissal decision engine.
//!
//! Pure function from (snapshot, trigger, policy) to the set of close
//! commands. Rules are evaluated independently per overlay, so one event can
//! close several overlays. Total over its input: never fails.

use crate::commands::{Command, CommandSet};
use crate::policy::DismissalPolicy;
use crate::state::OverlaySnapshot;
use crate::trigger::Trigger;

/// Computes the close commands for `trigger` against `snapshot`.
pub fn decide(snapshot: &OverlaySnapshot, trigger: Trigger, policy: &DismissalPolicy) -> CommandSet {
    let mut commands = CommandSet::empty();
    if !trigger.qualifies() {
        return commands;
    }

    let OverlaySnapshot { visibility, focus } = snapshot;

    if visibility.modal_open && !focus.on_modal {
        commands.insert(Command::CloseAllModals);
    }
    if visibility.pop_over_open && !focus.on_pop_over {
        commands.insert(Command::ClosePopOver);
    }
    if visibility.boards_menu_open && policy.menu.dismisses(trigger, focus.on_boards_menu) {
        commands.insert(Command::CloseBoardsMenu);
    }

    commands
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::MenuDismissal;
    use crate::state::{FocusContext, OverlayVisibility};

    fn snapshot(modal: bool, pop_over: bool, menu: bool) -> OverlaySnapshot {
        OverlaySnapshot {
            visibility: OverlayVisibility {
                pop_over_open: pop_over,
                modal_open: modal,
                boards_menu_open: menu,
            },
            focus: FocusContext::default(),
        }
    }

    fn set(commands: &[Command]) -> CommandSet {
        commands.iter().copied().collect()
    }

    #[test]
    fn test_click_closes_unfocused_modal() {
        let state = snapshot(true, false, false);
        let commands = decide(&state, Trigger::Click, &DismissalPolicy::default());
        assert_eq!(commands, set(&[Command::CloseAllModals]));
    }

    #[test]
    fn test_click_closes_modal_and_pop_over_together() {
        let state = snapshot(true, true, false);
        let commands = decide(&state, Trigger::Click, &DismissalPolicy::default());
        assert_eq!(
            commands,
            set(&[Command::CloseAllModals, Command::ClosePopOver])
        );
    }

    #[test]
    fn test_focus_on_pop_over_suppresses_its_close() {
        let mut state = snapshot(false, true, false);
        state.focus.on_pop_over = true;
        let commands = decide(&state, Trigger::Click, &DismissalPolicy::default());
        assert!(commands.is_empty());
    }

    #[test]
    fn test_focus_does_not_leak_to_other_overlays() {
        let mut state = snapshot(true, true, false);
        state.focus.on_pop_over = true;
        let commands = decide(&state, Trigger::ESCAPE, &DismissalPolicy::default());
        assert_eq!(commands, set(&[Command::CloseAllModals]));

        let mut state = snapshot(true, true, false);
        state.focus.on_modal = true;
        let commands = decide(&state, Trigger::Click, &DismissalPolicy::default());
        assert_eq!(commands, set(&[Command::ClosePopOver]));
    }

    #[test]
    fn test_escape_closes_menu() {
        let state = snapshot(false, false, true);
        let commands = decide(&state, Trigger::ESCAPE, &DismissalPolicy::default());
        assert_eq!(commands, set(&[Command::CloseBoardsMenu]));
    }

    #[test]
    fn test_click_leaves_menu_under_default_policy() {
        let state = snapshot(false, false, true);
        let commands = decide(&state, Trigger::Click, &DismissalPolicy::default());
        assert!(commands.is_empty());
    }

    #[test]
    fn test_click_closes_menu_when_enabled() {
        let state = snapshot(false, false, true);
        let policy = DismissalPolicy::with_menu(MenuDismissal {
            on_click: true,
            focus_aware: false,
        });
        let commands = decide(&state, Trigger::Click, &policy);
        assert_eq!(commands, set(&[Command::CloseBoardsMenu]));
    }

    #[test]
    fn test_focus_aware_menu_stays_open() {
        let mut state = snapshot(false, false, true);
        state.focus.on_boards_menu = true;
        let policy = DismissalPolicy::with_menu(MenuDismissal {
            on_click: true,
            focus_aware: true,
        });
        assert!(decide(&state, Trigger::Click, &policy).is_empty());
        assert!(decide(&state, Trigger::ESCAPE, &policy).is_empty());
    }

    #[test]
    fn test_non_escape_key_is_ignored() {
        let state = snapshot(true, true, true);
        let commands = decide(&state, Trigger::Key { code: 13 }, &DismissalPolicy::default());
        assert!(commands.is_empty());
    }
}
