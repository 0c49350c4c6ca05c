//! Keyboard shortcut reference

use crate::action::Action;
use crate::component::Component;
use crate::components::centered_popup;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Margin, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState},
    Frame,
};

const SHORTCUTS: &[(&str, &[(&str, &str)])] = &[
    (
        "Navigation",
        &[
            ("Tab / S-Tab", "Cycle Timeline, Tasks and Activity"),
            ("j k ↓ ↑", "Move the selection"),
            ("g G", "Jump to first / last item"),
            ("Enter Space", "Expand or collapse the selected phase"),
        ],
    ),
    (
        "Repository",
        &[
            ("o", "Analyze another repository"),
            ("r", "Sync or retry the current repository"),
            ("i", "Project info"),
        ],
    ),
    (
        "Task Filters",
        &[
            ("s", "Filter by status"),
            ("p", "Filter by phase"),
            ("c", "Clear all filters"),
        ],
    ),
    (
        "General",
        &[("?", "Toggle this help"), ("q Esc", "Quit"), ("Ctrl-c", "Quit immediately")],
    ),
];

#[derive(Default)]
pub struct HelpDialog {
    pub scroll_offset: usize,
}

impl Component for HelpDialog {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?') => Some(Action::CloseModal),
            KeyCode::Char('j') | KeyCode::Down => {
                self.scroll_offset = self.scroll_offset.saturating_add(1);
                None
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.scroll_offset = self.scroll_offset.saturating_sub(1);
                None
            }
            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let lines = shortcut_lines();
        let popup = centered_popup(area, 60, lines.len() as u16 + 2);
        frame.render_widget(Clear, popup);

        let visible = popup.height.saturating_sub(2) as usize;
        let max_scroll = lines.len().saturating_sub(visible);
        self.scroll_offset = self.scroll_offset.min(max_scroll);

        let paragraph = Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Keyboard Shortcuts ")
                    .title_bottom(Line::from(" ? or Esc to close ").right_aligned())
                    .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
                    .border_style(Style::default().fg(Color::Cyan)),
            )
            .scroll((self.scroll_offset as u16, 0));
        frame.render_widget(paragraph, popup);

        if max_scroll > 0 {
            let mut state = ScrollbarState::new(max_scroll).position(self.scroll_offset);
            frame.render_stateful_widget(
                Scrollbar::new(ScrollbarOrientation::VerticalRight),
                popup.inner(Margin {
                    vertical: 1,
                    horizontal: 0,
                }),
                &mut state,
            );
        }

        Ok(())
    }
}

fn shortcut_lines() -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for (section, shortcuts) in SHORTCUTS {
        if !lines.is_empty() {
            lines.push(Line::from(""));
        }
        lines.push(Line::from(Span::styled(
            format!(" {}", section),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )));
        for (keys, description) in shortcuts.iter() {
            lines.push(Line::from(vec![
                Span::styled(
                    format!("   {:<13}", keys),
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                ),
                Span::raw(*description),
            ]));
        }
    }
    lines
}
