//! Pure view/render functions for the board.
//!
//! Functions here take `&AppState`, draw to a ratatui Frame, and never mutate
//! state. Layers are drawn bottom-up (body, menu, pop-over, modal) and only
//! when `OverlayPresence` says they exist.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::layout::{BOARDS_LABEL, BoardLayout};
use crate::state::AppState;

const HINTS: &str = "b boards · p profile · n new board · q quit";

/// Renders the entire board to the frame.
pub fn render(app: &AppState, frame: &mut Frame) {
    let layout = app.layout();
    let presence = app.presence();

    if presence.header {
        render_header(app, &layout, frame);
    }
    render_body(app, layout.body, frame);

    if presence.boards_menu {
        render_boards_menu(layout.boards_menu, frame);
    }
    if presence.pop_over {
        render_pop_over(app, layout.pop_over, frame);
    }
    if presence.modal {
        render_modal(layout.modal, frame);
    }
}

fn render_header(app: &AppState, layout: &BoardLayout, frame: &mut Frame) {
    let bar = Style::default().bg(Color::Blue).fg(Color::White);
    frame.render_widget(Paragraph::new("").style(bar), layout.header);

    let button = |label: &str, open: bool| {
        let style = if open {
            bar.add_modifier(Modifier::BOLD | Modifier::REVERSED)
        } else {
            bar.add_modifier(Modifier::BOLD)
        };
        Paragraph::new(Line::from(Span::styled(format!(" {label} "), style)))
    };

    let visibility = app.overlays.visibility();
    frame.render_widget(
        button(BOARDS_LABEL, visibility.boards_menu_open),
        layout.boards_button,
    );
    frame.render_widget(
        button(app.profile_label(), visibility.pop_over_open),
        layout.profile_button,
    );
}

fn render_body(app: &AppState, area: Rect, frame: &mut Frame) {
    let mut lines: Vec<Line> = app
        .notifications
        .error_messages
        .iter()
        .map(|message| Line::from(Span::styled(message.as_str(), Color::Red)))
        .collect();
    if !lines.is_empty() {
        lines.push(Line::default());
    }
    lines.push(Line::from(Span::styled(HINTS, Color::DarkGray)));

    frame.render_widget(
        Paragraph::new(lines).wrap(Wrap { trim: false }),
        inset(area, 2, 1),
    );
}

fn render_boards_menu(area: Rect, frame: &mut Frame) {
    render_overlay_container(frame, area, BOARDS_LABEL, Color::Cyan);
    let body = vec![
        Line::from("Personal boards"),
        Line::default(),
        Line::from(Span::styled("Esc to close", Color::DarkGray)),
    ];
    frame.render_widget(Paragraph::new(body), inset(area, 2, 1));
}

fn render_pop_over(app: &AppState, area: Rect, frame: &mut Frame) {
    render_overlay_container(frame, area, "Account", Color::Yellow);
    let name = if app.profile_loading {
        "Loading profile…"
    } else {
        app.profile_label()
    };
    let body = vec![
        Line::from(Span::styled(name, Modifier::BOLD)),
        Line::default(),
        Line::from(Span::styled("Esc or click outside", Color::DarkGray)),
    ];
    frame.render_widget(Paragraph::new(body), inset(area, 2, 1));
}

fn render_modal(area: Rect, frame: &mut Frame) {
    render_overlay_container(frame, area, "Create board", Color::Magenta);
    let body = vec![
        Line::from("New board"),
        Line::default(),
        Line::from(Span::styled("Click outside to close", Color::DarkGray)),
    ];
    frame.render_widget(Paragraph::new(body), inset(area, 2, 1));
}

/// Renders the base container for an overlay (clears background, draws border and title).
pub fn render_overlay_container(frame: &mut Frame, area: Rect, title: &str, border_color: Color) {
    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .title(format!(" {title} "))
        .title_style(
            Style::default()
                .fg(border_color)
                .add_modifier(Modifier::BOLD),
        );
    frame.render_widget(block, area);
}

fn inset(area: Rect, horizontal: u16, vertical: u16) -> Rect {
    Rect::new(
        area.x.saturating_add(horizontal),
        area.y.saturating_add(vertical),
        area.width.saturating_sub(horizontal * 2),
        area.height.saturating_sub(vertical * 2),
    )
}

#[cfg(test)]
mod tests {
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use trellis_core::{AuthContext, OverlayMutation};

    use super::*;

    fn draw(app: &mut AppState) -> String {
        app.area = Rect::new(0, 0, 100, 30);
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|frame| render(app, frame)).unwrap();
        let buffer = terminal.backend().buffer();
        buffer
            .content()
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_header_only_when_closed() {
        let mut app = AppState::new(AuthContext::authenticated("Ada Lovelace"));
        let screen = draw(&mut app);

        assert!(screen.contains("Boards"));
        assert!(screen.contains("Ada Lovelace"));
        assert!(!screen.contains("Account"));
        assert!(!screen.contains("Create board"));
        assert!(!screen.contains("Personal boards"));
    }

    #[test]
    fn test_open_layers_are_drawn() {
        let mut app = AppState::new(AuthContext::anonymous());
        app.overlays.apply(OverlayMutation::OpenBoardsMenu);
        app.overlays.apply(OverlayMutation::OpenPopOver);
        app.overlays.apply(OverlayMutation::OpenModal);

        let screen = draw(&mut app);

        assert!(screen.contains("Personal boards"));
        assert!(screen.contains("Account"));
        assert!(screen.contains("Create board"));
    }

    #[test]
    fn test_errors_are_listed() {
        let mut app = AppState::new(AuthContext::authenticated(""));
        app.notifications
            .push_error("Failed to load profile: Profile request returned 500");

        let screen = draw(&mut app);

        assert!(screen.contains("Profile request returned 500"));
    }
}
