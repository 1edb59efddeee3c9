//! Result screen: header bar, rendered/source presentation, and the
//! collapsible explanation panel.

use super::theme;
use crate::app::App;
use crate::export;
use crate::models::VisualizationArtifact;
use crate::session::{SessionState, ViewMode};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let SessionState::Ready {
        artifact,
        view,
        show_explanation,
        ..
    } = &app.session
    else {
        return;
    };

    let explanation_height = if *show_explanation { 7 } else { 0 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // header
            Constraint::Min(3),    // body
            Constraint::Length(explanation_height),
            Constraint::Length(1), // key hints
        ])
        .split(area);

    render_header(frame, artifact, *view, chunks[0]);

    match view {
        ViewMode::Rendered => render_rendered_pane(frame, artifact, chunks[1]),
        ViewMode::Source => render_source_pane(frame, app, artifact, chunks[1]),
    }

    if *show_explanation {
        render_explanation(frame, artifact, chunks[2]);
    }

    frame.render_widget(
        Paragraph::new(
            "o: open preview   v: view   e: explanation   c: copy   x: export   n: new   q: quit",
        )
        .style(Style::default().fg(theme::COLOR_DIM))
        .alignment(Alignment::Center),
        chunks[3],
    );
}

fn render_header(frame: &mut Frame, artifact: &VisualizationArtifact, view: ViewMode, area: Rect) {
    let (visual_style, source_style) = match view {
        ViewMode::Rendered => (
            Style::default()
                .fg(theme::COLOR_ACCENT)
                .add_modifier(Modifier::BOLD),
            Style::default().fg(theme::COLOR_DIM),
        ),
        ViewMode::Source => (
            Style::default().fg(theme::COLOR_DIM),
            Style::default()
                .fg(theme::COLOR_ACCENT)
                .add_modifier(Modifier::BOLD),
        ),
    };

    let line = Line::from(vec![
        Span::styled(
            format!(" {} ", artifact.title),
            Style::default()
                .fg(theme::COLOR_TEXT)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("│ ", Style::default().fg(theme::COLOR_BORDER)),
        Span::styled("Visual", visual_style),
        Span::raw("  "),
        Span::styled("Code", source_style),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

/// The rendered presentation. The artifact itself executes in the external
/// sandboxed browser context; this pane is its control surface.
fn render_rendered_pane(frame: &mut Frame, artifact: &VisualizationArtifact, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::COLOR_BORDER));

    let lines = vec![
        Line::default(),
        Line::from(Span::styled(
            artifact.title.clone(),
            Style::default()
                .fg(theme::COLOR_ACCENT)
                .add_modifier(Modifier::BOLD),
        )),
        Line::default(),
        Line::from(Span::styled(
            format!(
                "Generated {} · {} bytes of HTML",
                artifact.generated_at.format("%H:%M:%S"),
                artifact.html.len()
            ),
            Style::default().fg(theme::COLOR_DIM),
        )),
        Line::default(),
        Line::from(vec![
            Span::styled("Press ", Style::default().fg(theme::COLOR_TEXT)),
            Span::styled(
                "o",
                Style::default()
                    .fg(theme::COLOR_HIGHLIGHT)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                " to run it in a sandboxed browser window",
                Style::default().fg(theme::COLOR_TEXT),
            ),
        ]),
        Line::from(Span::styled(
            "(scripts and popups only; no navigation, no storage access)",
            Style::default().fg(theme::COLOR_DIM),
        )),
    ];

    frame.render_widget(
        Paragraph::new(lines)
            .block(block)
            .alignment(Alignment::Center),
        area,
    );
}

/// Inert source view with scroll.
fn render_source_pane(frame: &mut Frame, app: &App, artifact: &VisualizationArtifact, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::COLOR_BORDER))
        .title(Span::styled(
            format!(" {} ", export::export_filename(&artifact.title)),
            Style::default().fg(theme::COLOR_DIM),
        ))
        .title_alignment(Alignment::Right);

    frame.render_widget(
        Paragraph::new(artifact.html.clone())
            .style(Style::default().fg(theme::COLOR_TEXT))
            .block(block)
            .scroll((app.source_scroll, 0)),
        area,
    );
}

fn render_explanation(frame: &mut Frame, artifact: &VisualizationArtifact, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::COLOR_PANEL))
        .title(Span::styled(
            format!(" {} ", artifact.title),
            Style::default()
                .fg(theme::COLOR_PANEL)
                .add_modifier(Modifier::BOLD),
        ));

    frame.render_widget(
        Paragraph::new(artifact.explanation.clone())
            .style(Style::default().fg(theme::COLOR_TEXT))
            .wrap(Wrap { trim: true })
            .block(block),
        area,
    );
}
