//! Filter dialog component
//!
//! Multi-select checklist used for both the status and the phase filter of
//! the task table. Toggling an entry emits an Action; the App applies it to
//! the table's filter and refreshes the checklist.

use crate::action::Action;
use crate::component::Component;
use crate::model::view::{distinct_phase_names, flatten_tasks};
use crate::model::{ProgressSnapshot, TaskFilter, TaskStatus};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
    Frame,
};

/// One checklist entry
#[derive(Debug, Clone, PartialEq)]
pub struct FilterOption {
    pub label: String,
    pub count: usize,
    pub checked: bool,
    /// Emitted when the entry is toggled
    pub toggle: Action,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKind {
    Status,
    Phase,
}

impl FilterKind {
    fn title(&self) -> &'static str {
        match self {
            FilterKind::Status => " Filter by Status ",
            FilterKind::Phase => " Filter by Phase ",
        }
    }

    fn empty_message(&self) -> &'static str {
        match self {
            FilterKind::Status => "No statuses available",
            FilterKind::Phase => "No phases with tasks",
        }
    }
}

pub struct FilterDialog {
    pub kind: FilterKind,
    pub options: Vec<FilterOption>,
    pub list_state: ListState,
}

impl FilterDialog {
    pub fn new(kind: FilterKind) -> Self {
        Self {
            kind,
            options: Vec::new(),
            list_state: ListState::default(),
        }
    }

    /// Rebuild the checklist from the snapshot and the current filter,
    /// keeping the cursor where it was
    pub fn refresh(&mut self, snapshot: Option<&ProgressSnapshot>, filter: &TaskFilter) {
        self.options = match self.kind {
            FilterKind::Status => status_options(snapshot, filter),
            FilterKind::Phase => phase_options(snapshot, filter),
        };

        let selected = match self.list_state.selected() {
            _ if self.options.is_empty() => None,
            Some(i) => Some(i.min(self.options.len() - 1)),
            None => Some(0),
        };
        self.list_state.select(selected);
    }

    /// Number of checked entries
    pub fn checked_count(&self) -> usize {
        self.options.iter().filter(|o| o.checked).count()
    }

    fn select_next(&mut self) {
        if let Some(i) = self.list_state.selected() {
            if i + 1 < self.options.len() {
                self.list_state.select(Some(i + 1));
            }
        }
    }

    fn select_prev(&mut self) {
        if let Some(i) = self.list_state.selected() {
            self.list_state.select(Some(i.saturating_sub(1)));
        }
    }
}

fn status_options(snapshot: Option<&ProgressSnapshot>, filter: &TaskFilter) -> Vec<FilterOption> {
    let rows: Vec<_> = snapshot
        .map(|s| flatten_tasks(&s.phases).collect())
        .unwrap_or_default();

    TaskStatus::ALL
        .iter()
        .map(|status| FilterOption {
            label: format!("{} {}", status.icon(), status.label()),
            count: rows.iter().filter(|r| r.status() == *status).count(),
            checked: filter.statuses.contains(status),
            toggle: Action::ToggleStatusFilter(*status),
        })
        .collect()
}

fn phase_options(snapshot: Option<&ProgressSnapshot>, filter: &TaskFilter) -> Vec<FilterOption> {
    let rows: Vec<_> = snapshot
        .map(|s| flatten_tasks(&s.phases).collect())
        .unwrap_or_default();
    let present = distinct_phase_names(rows.iter().copied());

    let option = |name: &str| FilterOption {
        label: name.to_string(),
        count: rows.iter().filter(|r| r.phase_name == name).count(),
        checked: filter.phases.contains(name),
        toggle: Action::TogglePhaseFilter(name.to_string()),
    };

    // Selections carried over from an earlier snapshot stay visible so they
    // can be unchecked
    let stale = filter
        .phases
        .iter()
        .map(String::as_str)
        .filter(|name| !present.contains(name));

    present
        .iter()
        .copied()
        .chain(stale)
        .map(option)
        .collect()
}

impl Component for FilterDialog {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Esc | KeyCode::Char('q') => Some(Action::CloseModal),
            KeyCode::Enter | KeyCode::Char(' ') => self
                .list_state
                .selected()
                .and_then(|i| self.options.get(i))
                .map(|option| option.toggle.clone()),
            KeyCode::Char('c') => Some(Action::ClearFilters),
            KeyCode::Up | KeyCode::Char('k') => {
                self.select_prev();
                None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.select_next();
                None
            }
            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let popup_width = 50u16.min(area.width.saturating_sub(4));
        let content_height = if self.options.is_empty() {
            3
        } else {
            self.options.len() as u16 + 2
        };
        let popup_height = (content_height + 6).min(area.height.saturating_sub(2));
        let popup_area = super::centered_popup(area, popup_width, popup_height);

        frame.render_widget(Clear, popup_area);

        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(3),    // Options
                Constraint::Length(3), // Help bar
            ])
            .split(popup_area);

        let checked = self.checked_count();
        let header_text = if checked == 0 {
            "No filter active (showing all)".to_string()
        } else {
            format!("{} selected", checked)
        };
        let header = Paragraph::new(Line::from(Span::styled(
            header_text,
            Style::default().fg(Color::Cyan),
        )))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(self.kind.title())
                .title_style(
                    Style::default()
                        .fg(Color::Magenta)
                        .add_modifier(Modifier::BOLD),
                ),
        );
        frame.render_widget(header, main_chunks[0]);

        if self.options.is_empty() {
            let empty = Paragraph::new(Line::from(Span::styled(
                self.kind.empty_message(),
                Style::default().fg(Color::Yellow),
            )))
            .alignment(ratatui::layout::Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::DarkGray)),
            );
            frame.render_widget(empty, main_chunks[1]);
        } else {
            let items: Vec<ListItem> = self
                .options
                .iter()
                .map(|option| {
                    let (marker, marker_style) = if option.checked {
                        ("[x] ", Style::default().fg(Color::Green))
                    } else {
                        ("[ ] ", Style::default().fg(Color::DarkGray))
                    };
                    ListItem::new(Line::from(vec![
                        Span::styled(marker, marker_style),
                        Span::styled(option.label.clone(), Style::default().fg(Color::White)),
                        Span::styled(
                            format!(" ({})", option.count),
                            Style::default().fg(Color::DarkGray),
                        ),
                    ]))
                })
                .collect();

            let list = List::new(items)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(Color::DarkGray)),
                )
                .highlight_style(
                    Style::default()
                        .bg(Color::Blue)
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                )
                .highlight_symbol("▶ ");

            frame.render_stateful_widget(list, main_chunks[1], &mut self.list_state);
        }

        let help = Paragraph::new(Line::from(vec![
            Span::styled(" Space ", Style::default().fg(Color::Yellow)),
            Span::raw("Toggle  "),
            Span::styled(" c ", Style::default().fg(Color::Cyan)),
            Span::raw("Clear  "),
            Span::styled(" Esc ", Style::default().fg(Color::Yellow)),
            Span::raw("Close"),
        ]))
        .alignment(ratatui::layout::Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
        frame.render_widget(help, main_chunks[2]);

        Ok(())
    }
}
