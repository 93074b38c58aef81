//! Screen geometry and pointer hit testing.
//!
//! The board is a one-row header (Boards button left, profile button right)
//! over a body. The boards menu docks to the left edge of the body, the
//! profile pop-over hangs under the profile button and the modal is centered.

use ratatui::layout::{Position, Rect};
use trellis_core::OverlayVisibility;
use unicode_width::UnicodeWidthStr;

pub const BOARDS_LABEL: &str = "Boards";

const MENU_WIDTH: u16 = 30;
const POP_OVER_WIDTH: u16 = 32;
const POP_OVER_HEIGHT: u16 = 8;
const MODAL_WIDTH: u16 = 50;
const MODAL_HEIGHT: u16 = 12;

/// What lies under the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitTarget {
    Modal,
    PopOver,
    BoardsMenu,
    BoardsButton,
    ProfileButton,
    Header,
    Body,
    Outside,
}

/// Regions of the board for a given terminal area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardLayout {
    pub area: Rect,
    pub header: Rect,
    pub boards_button: Rect,
    pub profile_button: Rect,
    pub body: Rect,
    pub boards_menu: Rect,
    pub pop_over: Rect,
    pub modal: Rect,
}

impl BoardLayout {
    /// Computes the layout; `profile_label` sizes the profile button.
    pub fn compute(area: Rect, profile_label: &str) -> Self {
        let header = Rect::new(area.x, area.y, area.width, area.height.min(1));
        let body = Rect::new(
            area.x,
            area.y.saturating_add(header.height),
            area.width,
            area.height.saturating_sub(header.height),
        );

        let boards_button = button(header, header.x.saturating_add(1), BOARDS_LABEL);
        let profile_width = label_width(profile_label).min(header.width);
        let profile_x = header.right().saturating_sub(profile_width.saturating_add(1));
        let profile_button = button(header, profile_x, profile_label);

        let boards_menu = Rect::new(body.x, body.y, MENU_WIDTH.min(body.width), body.height);

        let pop_over_width = POP_OVER_WIDTH.min(body.width);
        let pop_over = Rect::new(
            body.right().saturating_sub(pop_over_width),
            body.y,
            pop_over_width,
            POP_OVER_HEIGHT.min(body.height),
        );

        let modal = calculate_overlay_area(area, MODAL_WIDTH, MODAL_HEIGHT);

        Self {
            area,
            header,
            boards_button,
            profile_button,
            body,
            boards_menu,
            pop_over,
            modal,
        }
    }

    /// Returns the topmost region at (`column`, `row`).
    ///
    /// Closed overlays are transparent. Stacking order is modal, pop-over,
    /// boards menu, then the header buttons.
    pub fn hit_test(&self, visibility: &OverlayVisibility, column: u16, row: u16) -> HitTarget {
        let pos = Position::new(column, row);
        let layers = [
            (visibility.modal_open, self.modal, HitTarget::Modal),
            (visibility.pop_over_open, self.pop_over, HitTarget::PopOver),
            (
                visibility.boards_menu_open,
                self.boards_menu,
                HitTarget::BoardsMenu,
            ),
            (true, self.boards_button, HitTarget::BoardsButton),
            (true, self.profile_button, HitTarget::ProfileButton),
            (true, self.header, HitTarget::Header),
            (true, self.body, HitTarget::Body),
        ];
        layers
            .into_iter()
            .find(|(visible, rect, _)| *visible && rect.contains(pos))
            .map_or(HitTarget::Outside, |(_, _, target)| target)
    }
}

/// Centers a `width` x `height` box in `area`, keeping a margin.
pub fn calculate_overlay_area(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width.saturating_sub(4));
    let height = height.min(area.height.saturating_sub(2));

    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}

/// Width of a label rendered with one cell of padding on each side.
pub fn label_width(label: &str) -> u16 {
    u16::try_from(label.width())
        .unwrap_or(u16::MAX)
        .saturating_add(2)
}

fn button(header: Rect, x: u16, label: &str) -> Rect {
    let x = x.min(header.right());
    let width = label_width(label).min(header.right() - x);
    Rect::new(x, header.y, width, header.height)
}
