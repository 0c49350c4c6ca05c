//! Repository input dialog component

use crate::action::Action;
use crate::component::Component;
use crate::components::centered_popup;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Single-line editor for the repository URL
#[derive(Default)]
pub struct RepoInputDialog {
    pub input: String,
    /// Set when Enter was pressed on blank input
    rejected: bool,
}

impl RepoInputDialog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset the editor, pre-filled with the current repository
    pub fn open(&mut self, current: Option<&str>) {
        self.input = current.unwrap_or_default().to_string();
        self.rejected = false;
    }

    pub fn can_submit(&self) -> bool {
        !self.input.trim().is_empty()
    }
}

impl Component for RepoInputDialog {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Esc => Some(Action::CloseModal),
            KeyCode::Enter => {
                if self.can_submit() {
                    Some(Action::SubmitRepo(self.input.trim().to_string()))
                } else {
                    self.rejected = true;
                    None
                }
            }
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.input.clear();
                None
            }
            KeyCode::Backspace => {
                self.input.pop();
                None
            }
            KeyCode::Char(c) => {
                self.input.push(c);
                self.rejected = false;
                None
            }
            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let popup_area = centered_popup(area, 70, 8);
        frame.render_widget(Clear, popup_area);

        let hint = if self.rejected {
            Line::from(Span::styled(
                "Enter a repository URL first",
                Style::default().fg(Color::Red),
            ))
        } else {
            Line::from(Span::styled(
                "e.g. https://github.com/owner/repo or owner/repo",
                Style::default().fg(Color::DarkGray),
            ))
        };

        let submit_style = if self.can_submit() {
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        let content = vec![
            Line::from(""),
            Line::from(vec![
                Span::styled("> ", Style::default().fg(Color::Cyan)),
                Span::styled(self.input.clone(), Style::default().fg(Color::White)),
                Span::styled("█", Style::default().fg(Color::Cyan)),
            ]),
            hint,
            Line::from(""),
            Line::from(vec![
                Span::styled(" Enter ", submit_style),
                Span::raw("Analyze  "),
                Span::styled(
                    " Ctrl+u ",
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw("Clear  "),
                Span::styled(
                    " Esc ",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                ),
                Span::raw("Cancel"),
            ]),
        ];

        let paragraph = Paragraph::new(content).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(" Analyze Repository ")
                .title_style(
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                ),
        );

        frame.render_widget(paragraph, popup_area);
        Ok(())
    }
}
