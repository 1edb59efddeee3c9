//! TUI rendering.
//!
//! Stateless draw functions over `App`; all state lives in the app and the
//! session machine. Which screen renders is decided entirely by the current
//! `SessionState`.

mod landing;
pub mod theme;
mod viewer;

use crate::app::App;
use crate::session::SessionState;
use ratatui::{
    layout::Rect,
    style::Style,
    widgets::{Block, Paragraph},
    Frame,
};

/// Render the whole frame for the current state.
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    // Paint the slate background before anything else.
    frame.render_widget(
        Block::default().style(Style::default().bg(theme::COLOR_BG)),
        area,
    );

    match &app.session {
        SessionState::Idle | SessionState::Failed { .. } => landing::render(frame, app, area),
        SessionState::Loading { query } => landing::render_loading(frame, app, area, query),
        SessionState::Ready { .. } => viewer::render(frame, app, area),
    }

    if let Some(status) = &app.status {
        render_status_line(frame, area, status);
    }
}

/// One-line transient status at the very bottom of the frame.
fn render_status_line(frame: &mut Frame, area: Rect, status: &str) {
    if area.height == 0 {
        return;
    }
    let line = Rect {
        x: area.x,
        y: area.y + area.height - 1,
        width: area.width,
        height: 1,
    };
    frame.render_widget(
        Paragraph::new(status.to_string()).style(
            Style::default()
                .fg(theme::COLOR_HIGHLIGHT)
                .bg(theme::COLOR_BG),
        ),
        line,
    );
}

/// Center a `width` x `height` rect inside `area`, clamped to fit.
pub(crate) fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
