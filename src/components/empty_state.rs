//! Placeholder screens shown while no snapshot is available

use crate::model::FetchState;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// What to show in place of the dashboard panels
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmptyState<'a> {
    /// Nothing requested yet
    NoRepository,
    Loading { repo_url: &'a str },
    Failed { message: &'a str },
}

impl<'a> EmptyState<'a> {
    pub fn from_fetch(state: FetchState, repo_url: Option<&'a str>, error: Option<&'a str>) -> Self {
        match (state, repo_url, error) {
            (FetchState::Loading, Some(url), _) => EmptyState::Loading { repo_url: url },
            (FetchState::Failure, _, Some(message)) => EmptyState::Failed { message },
            _ => EmptyState::NoRepository,
        }
    }

    pub fn lines(&self, tick: usize) -> Vec<Line<'static>> {
        let key = |k: &str| {
            Span::styled(
                format!(" {} ", k),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
        };

        match self {
            EmptyState::NoRepository => vec![
                Line::from(Span::styled(
                    "No repository analyzed",
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                )),
                Line::from(""),
                Line::from(vec![
                    Span::raw("Press"),
                    key("o"),
                    Span::raw("to enter a GitHub repository URL"),
                ]),
            ],
            EmptyState::Loading { repo_url } => vec![
                Line::from(vec![
                    Span::styled(
                        format!("{} ", SPINNER[tick % SPINNER.len()]),
                        Style::default().fg(Color::Cyan),
                    ),
                    Span::styled(
                        "Analyzing repository",
                        Style::default()
                            .fg(Color::White)
                            .add_modifier(Modifier::BOLD),
                    ),
                ]),
                Line::from(""),
                Line::from(Span::styled(
                    repo_url.to_string(),
                    Style::default().fg(Color::DarkGray),
                )),
            ],
            EmptyState::Failed { message } => vec![
                Line::from(Span::styled(
                    "Failed to load project",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                )),
                Line::from(""),
                Line::from(Span::styled(
                    message.to_string(),
                    Style::default().fg(Color::Red),
                )),
                Line::from(""),
                Line::from(vec![
                    Span::raw("Press"),
                    key("r"),
                    Span::raw("to retry or"),
                    key("o"),
                    Span::raw("to analyze another repository"),
                ]),
            ],
        }
    }
}

pub fn render_empty_state(frame: &mut Frame, area: Rect, state: &EmptyState, tick: usize) {
    let mut lines = vec![Line::from(""); (area.height / 3) as usize];
    lines.extend(state.lines(tick));

    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        );
    frame.render_widget(paragraph, area);
}
