//! Project information dialog component
//!
//! Displays product details, sync time and the Conductor tracks of the
//! analyzed repository.

use crate::action::Action;
use crate::component::Component;
use crate::model::ProgressSnapshot;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Project information dialog component
#[derive(Default)]
pub struct ProjectInfoDialog {
    /// Cached content lines
    content: Vec<Line<'static>>,
}

impl ProjectInfoDialog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Update content from the current snapshot
    pub fn set_snapshot(&mut self, snapshot: Option<&ProgressSnapshot>, repo_url: Option<&str>) {
        self.content = match snapshot {
            Some(snapshot) => render_project_info(snapshot, repo_url),
            None => vec![
                Line::from(""),
                Line::from(Span::styled(
                    "No repository analyzed yet",
                    Style::default().fg(Color::DarkGray),
                )),
                Line::from(""),
                Line::from("Press 'o' on the dashboard to analyze a repository"),
            ],
        };
    }
}

impl Component for ProjectInfoDialog {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Char('i') | KeyCode::Esc | KeyCode::Char('q') => Some(Action::CloseModal),
            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let margin = 2;
        let overlay_area = Rect::new(
            area.x + margin,
            area.y + margin,
            area.width.saturating_sub(margin * 2),
            area.height.saturating_sub(margin * 2),
        );
        frame.render_widget(Clear, overlay_area);

        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(1), Constraint::Length(3)])
            .split(overlay_area);

        let paragraph = Paragraph::new(self.content.clone())
            .wrap(Wrap { trim: false })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Cyan))
                    .title(" Project Info ")
                    .title_style(
                        Style::default()
                            .fg(Color::Cyan)
                            .add_modifier(Modifier::BOLD),
                    ),
            );

        frame.render_widget(paragraph, main_chunks[0]);

        let help = Paragraph::new(Line::from(vec![
            Span::styled(
                " i/Esc ",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("Close"),
        ]))
        .block(Block::default().borders(Borders::ALL));

        frame.render_widget(help, main_chunks[1]);

        Ok(())
    }
}

fn section(title: &str) -> Line<'static> {
    Line::from(Span::styled(
        title.to_string(),
        Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD),
    ))
}

fn field(label: &str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::raw(format!("  {}: ", label)),
        Span::styled(value, Style::default().fg(Color::White)),
    ])
}

fn render_project_info(snapshot: &ProgressSnapshot, repo_url: Option<&str>) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(Span::styled(
            snapshot.display_name().to_string(),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "═".repeat(60),
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(""),
        section("Repository"),
        field("Slug", snapshot.slug()),
    ];
    if let Some(url) = repo_url {
        lines.push(field("URL", url.to_string()));
    }
    let synced = if snapshot.last_synced.is_empty() {
        "unknown".to_string()
    } else {
        snapshot.last_synced.clone()
    };
    lines.push(field("Last synced", synced));
    lines.push(Line::from(""));

    if let Some(description) = snapshot
        .product_description
        .as_deref()
        .filter(|d| !d.trim().is_empty())
    {
        lines.push(section("Product"));
        for text in description.lines() {
            lines.push(Line::from(format!("  {}", text)));
        }
        lines.push(Line::from(""));
    }

    lines.push(section(&format!("Tracks ({})", snapshot.tracks.len())));
    if snapshot.tracks.is_empty() {
        lines.push(Line::from(Span::styled(
            "  No tracks registered",
            Style::default().fg(Color::DarkGray),
        )));
    }
    for track in &snapshot.tracks {
        lines.push(Line::from(vec![
            Span::styled(
                format!("  {} ", track.status.icon()),
                Style::default().fg(track.status.color()),
            ),
            Span::styled(track.name.clone(), Style::default().fg(Color::White)),
            Span::styled(
                format!("  [{}]", track.status.badge()),
                Style::default().fg(track.status.color()),
            ),
        ]));
        if !track.path.is_empty() {
            lines.push(Line::from(Span::styled(
                format!("    {}", track.path),
                Style::default().fg(Color::DarkGray),
            )));
        }
    }

    lines
}
