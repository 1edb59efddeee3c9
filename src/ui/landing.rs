//! Landing screen: hero text, query input, suggestion chips, and the
//! failure notice with its retry hint.

use super::{centered_rect, theme};
use crate::app::{App, SUGGESTIONS};
use crate::models::ConceptQuery;
use crate::session::SessionState;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let column = centered_rect(area, area.width.min(68), area.height.min(22));
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // hero title
            Constraint::Length(2), // tagline
            Constraint::Length(3), // input
            Constraint::Length(1), // spacer
            Constraint::Length(SUGGESTIONS.len() as u16), // suggestion chips
            Constraint::Min(0),    // failure notice / hints
        ])
        .split(column);

    let hero = Line::from(vec![
        Span::styled(
            "Concept",
            Style::default()
                .fg(theme::COLOR_TEXT)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            "Viz",
            Style::default()
                .fg(theme::COLOR_ACCENT)
                .add_modifier(Modifier::BOLD),
        ),
    ]);
    frame.render_widget(
        Paragraph::new(hero).alignment(Alignment::Center),
        chunks[0],
    );

    frame.render_widget(
        Paragraph::new("Describe a concept. Get an interactive visualization.")
            .style(Style::default().fg(theme::COLOR_DIM))
            .alignment(Alignment::Center),
        chunks[1],
    );

    app.input.render(
        chunks[2],
        frame.buffer_mut(),
        "e.g. Fourier Transform, Sorting Algorithms...",
        true,
    );

    render_suggestions(frame, app, chunks[4]);

    if let SessionState::Failed { message, .. } = &app.session {
        render_failure(frame, message, chunks[5]);
    } else {
        frame.render_widget(
            Paragraph::new("enter: generate   tab: suggestions   esc: quit")
                .style(Style::default().fg(theme::COLOR_DIM))
                .alignment(Alignment::Center),
            chunks[5],
        );
    }
}

fn render_suggestions(frame: &mut Frame, app: &App, area: Rect) {
    let lines: Vec<Line> = SUGGESTIONS
        .iter()
        .enumerate()
        .map(|(i, suggestion)| {
            let selected = app.selected_suggestion == Some(i);
            let style = if selected {
                Style::default()
                    .fg(theme::COLOR_BG)
                    .bg(theme::COLOR_ACCENT)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme::COLOR_DIM)
            };
            let marker = if selected { "▸ " } else { "  " };
            Line::from(vec![
                Span::styled(marker, Style::default().fg(theme::COLOR_ACCENT)),
                Span::styled(*suggestion, style),
            ])
        })
        .collect();

    frame.render_widget(
        Paragraph::new(lines).alignment(Alignment::Center),
        area,
    );
}

fn render_failure(frame: &mut Frame, message: &str, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::COLOR_ERROR))
        .title(" Error Generating Visualization ");

    let text = vec![
        Line::from(Span::styled(
            message.to_string(),
            Style::default().fg(theme::COLOR_ERROR),
        )),
        Line::default(),
        Line::from(Span::styled(
            "enter: try again   esc: dismiss",
            Style::default().fg(theme::COLOR_DIM),
        )),
    ];

    frame.render_widget(
        Paragraph::new(text)
            .block(block)
            .wrap(Wrap { trim: true })
            .alignment(Alignment::Center),
        area,
    );
}

/// Full-screen loading state with spinner and the in-flight query.
pub fn render_loading(frame: &mut Frame, app: &App, area: Rect, query: &ConceptQuery) {
    let center = centered_rect(area, area.width.min(60), 5);
    let spinner = SPINNER_FRAMES[app.spinner_frame % SPINNER_FRAMES.len()];

    let lines = vec![
        Line::from(Span::styled(
            format!("{} COMPUTING VISUALIZATION", spinner),
            Style::default()
                .fg(theme::COLOR_ACCENT)
                .add_modifier(Modifier::BOLD),
        )),
        Line::default(),
        Line::from(Span::styled(
            format!("\"{}\"", query),
            Style::default().fg(theme::COLOR_TEXT),
        )),
    ];

    frame.render_widget(
        Paragraph::new(lines).alignment(Alignment::Center),
        center,
    );
}
