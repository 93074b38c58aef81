//! TUI reducer (update function).
//!
//! All state mutations happen here. The session calls `update(app, event)`
//! and the runtime executes the returned effects.
//!
//! Dismissal is not decided here: closes arrive as `UiEvent::Overlay` from the
//! coordinator's actions. The reducer only handles user-initiated opens, focus
//! tracking and async results.

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::Rect;
use tracing::{debug, warn};
use trellis_core::OverlayMutation;

use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::layout::HitTarget;
use crate::state::AppState;

/// The main reducer function.
///
/// Takes the current state and an event, mutates state, and returns effects
/// for the runtime to execute.
pub fn update(app: &mut AppState, event: UiEvent) -> Vec<UiEffect> {
    match event {
        UiEvent::Tick => vec![],
        UiEvent::Frame { width, height } => {
            app.area = Rect::new(0, 0, width, height);
            vec![]
        }
        UiEvent::Terminal(term_event) => handle_terminal_event(app, &term_event),
        UiEvent::Overlay(mutation) => {
            apply_mutation(app, mutation);
            vec![]
        }
        UiEvent::FetchUserRequested => {
            if app.profile_loading {
                return vec![];
            }
            app.profile_loading = true;
            vec![UiEffect::FetchUser]
        }
        UiEvent::ProfileLoaded(result) => {
            app.profile_loading = false;
            match result {
                Ok(profile) => {
                    debug!(id = %profile.id, "profile loaded");
                    app.auth.full_name = profile.full_name;
                }
                Err(message) => {
                    warn!(%message, "profile fetch failed");
                    app.notifications
                        .push_error(format!("Failed to load profile: {message}"));
                }
            }
            vec![]
        }
    }
}

/// Updates focus flags from the pointer position.
///
/// Runs before the coordinator sees the event, so a click inside an overlay
/// (or on the header button that opens it) counts as focused.
pub fn track_focus(app: &mut AppState, event: &Event) {
    let Event::Mouse(MouseEvent {
        kind, column, row, ..
    }) = event
    else {
        return;
    };
    if matches!(kind, MouseEventKind::Up(_)) {
        return;
    }

    let target = app
        .layout()
        .hit_test(app.overlays.visibility(), *column, *row);
    let focus = [
        OverlayMutation::FocusModal(target == HitTarget::Modal),
        OverlayMutation::FocusPopOver(matches!(
            target,
            HitTarget::PopOver | HitTarget::ProfileButton
        )),
        OverlayMutation::FocusBoardsMenu(matches!(
            target,
            HitTarget::BoardsMenu | HitTarget::BoardsButton
        )),
    ];
    for mutation in focus {
        app.overlays.apply(mutation);
    }
}

fn apply_mutation(app: &mut AppState, mutation: OverlayMutation) {
    if app.overlays.apply(mutation) {
        debug!(?mutation, "overlay store changed");
    }
}

fn handle_terminal_event(app: &mut AppState, event: &Event) -> Vec<UiEffect> {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => handle_key(app, key),
        Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            ..
        }) => {
            handle_click(app, *column, *row);
            vec![]
        }
        Event::Resize(width, height) => {
            app.area = Rect::new(0, 0, *width, *height);
            vec![]
        }
        _ => vec![],
    }
}

fn handle_key(app: &mut AppState, key: &KeyEvent) -> Vec<UiEffect> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Char('c') if ctrl => return vec![UiEffect::Quit],
        KeyCode::Char('q') => return vec![UiEffect::Quit],
        KeyCode::Char('b') => {
            let mutation = if app.overlays.visibility().boards_menu_open {
                OverlayMutation::CloseBoardsMenu
            } else {
                OverlayMutation::OpenBoardsMenu
            };
            apply_mutation(app, mutation);
        }
        KeyCode::Char('p') => {
            let mutation = if app.overlays.visibility().pop_over_open {
                OverlayMutation::ClosePopOver
            } else {
                OverlayMutation::OpenPopOver
            };
            apply_mutation(app, mutation);
        }
        KeyCode::Char('n') => apply_mutation(app, OverlayMutation::OpenModal),
        _ => {}
    }
    vec![]
}

/// Header buttons only open; closing is the coordinator's job.
fn handle_click(app: &mut AppState, column: u16, row: u16) {
    let target = app
        .layout()
        .hit_test(app.overlays.visibility(), column, row);
    match target {
        HitTarget::BoardsButton => apply_mutation(app, OverlayMutation::OpenBoardsMenu),
        HitTarget::ProfileButton => apply_mutation(app, OverlayMutation::OpenPopOver),
        _ => {}
    }
}
