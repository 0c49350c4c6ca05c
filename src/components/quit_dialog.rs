//! Quit confirmation

use crate::action::Action;
use crate::component::Component;
use crate::components::centered_popup;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

#[derive(Default)]
pub struct QuitDialog {
    /// An analysis request is still running and will be abandoned
    pub syncing: bool,
}

impl QuitDialog {
    fn lines(&self) -> Vec<Line<'static>> {
        let key = |k: &'static str, color: Color| {
            Span::styled(k, Style::default().fg(color).add_modifier(Modifier::BOLD))
        };

        let mut lines = vec![Line::from(""), Line::from("Leave the dashboard?")];
        if self.syncing {
            lines.push(Line::from(Span::styled(
                "A sync is still running",
                Style::default().fg(Color::Yellow),
            )));
        }
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            key(" y ", Color::Green),
            Span::raw("quit   "),
            key(" n ", Color::Red),
            Span::raw("stay"),
        ]));
        lines
    }
}

impl Component for QuitDialog {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Char('y' | 'Y' | 'q') => Some(Action::ConfirmModal),
            KeyCode::Char('n' | 'N') | KeyCode::Esc => Some(Action::CloseModal),
            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let lines = self.lines();
        let popup = centered_popup(area, 40, lines.len() as u16 + 2);
        frame.render_widget(Clear, popup);

        let paragraph = Paragraph::new(lines).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Quit ")
                .border_style(Style::default().fg(Color::Yellow)),
        );
        frame.render_widget(paragraph, popup);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn press(dialog: &mut QuitDialog, c: char) -> Option<Action> {
        dialog
            .handle_key_event(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE))
            .unwrap()
    }

    #[test]
    fn test_confirm_and_cancel_keys() {
        let mut dialog = QuitDialog::default();
        assert_eq!(press(&mut dialog, 'y'), Some(Action::ConfirmModal));
        assert_eq!(press(&mut dialog, 'q'), Some(Action::ConfirmModal));
        assert_eq!(press(&mut dialog, 'n'), Some(Action::CloseModal));
        assert_eq!(press(&mut dialog, 'x'), None);
    }

    #[test]
    fn test_warns_about_running_sync() {
        let dialog = QuitDialog { syncing: true };
        let text: String = dialog
            .lines()
            .iter()
            .flat_map(|l| l.spans.iter().map(|s| s.content.to_string()))
            .collect();
        assert!(text.contains("sync is still running"));
    }
}
