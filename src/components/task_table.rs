//! Task table component
//!
//! Flattened task list with status and phase filters. The filter selection
//! lives here so it survives re-syncs of the same or another repository.

use crate::model::view::{apply_filters, flatten_tasks, TaskRow};
use crate::model::{ProgressSnapshot, TaskFilter};
use crate::services::commit_link;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub const NO_TASKS_MESSAGE: &str = "No tasks found in the Conductor plan.";
pub const NO_MATCHES_MESSAGE: &str = "No tasks match the current filters.";

const STATUS_WIDTH: usize = 13;
const PHASE_WIDTH: usize = 18;
const COMMIT_WIDTH: usize = 8;

/// Task table state: filters and selected row
#[derive(Default)]
pub struct TaskTableComponent {
    pub filter: TaskFilter,
    pub list_state: ListState,
}

impl TaskTableComponent {
    pub fn new() -> Self {
        Self {
            filter: TaskFilter::new(),
            list_state: ListState::default(),
        }
    }

    /// Rows after applying the current filters
    pub fn rows<'a>(&self, snapshot: &'a ProgressSnapshot) -> Vec<TaskRow<'a>> {
        apply_filters(flatten_tasks(&snapshot.phases), &self.filter)
    }

    pub fn selected_row<'a>(&self, snapshot: &'a ProgressSnapshot) -> Option<TaskRow<'a>> {
        let index = self.list_state.selected()?;
        self.rows(snapshot).get(index).copied()
    }

    /// Clamp the selection after the rows changed
    pub fn sync_with(&mut self, len: usize) {
        match self.list_state.selected() {
            _ if len == 0 => self.list_state.select(None),
            Some(index) if index >= len => self.list_state.select(Some(len - 1)),
            None => self.list_state.select(Some(0)),
            Some(_) => {}
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Navigation
    // ─────────────────────────────────────────────────────────────────────────

    pub fn next(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        let next = match self.list_state.selected() {
            Some(i) if i + 1 < len => i + 1,
            _ => 0,
        };
        self.list_state.select(Some(next));
    }

    pub fn previous(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        let prev = match self.list_state.selected() {
            Some(0) | None => len - 1,
            Some(i) => i - 1,
        };
        self.list_state.select(Some(prev));
    }

    pub fn select_first(&mut self, len: usize) {
        self.list_state.select(if len == 0 { None } else { Some(0) });
    }

    pub fn select_last(&mut self, len: usize) {
        self.list_state.select(len.checked_sub(1));
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Rendering
    // ─────────────────────────────────────────────────────────────────────────

    /// Title with filtered count and active filter selections
    pub fn title(&self, shown: usize, total: usize) -> String {
        let mut title = if shown == total {
            format!(" Tasks ({}) ", total)
        } else {
            format!(" Tasks ({}/{}) ", shown, total)
        };
        if self.filter.is_empty() {
            return title;
        }
        if !self.filter.statuses.is_empty() {
            title = format!("{}[status:{}] ", title, self.filter.statuses.len());
        }
        if !self.filter.phases.is_empty() {
            title = format!("{}[phase:{}] ", title, self.filter.phases.len());
        }
        title
    }

    pub fn draw_with_snapshot(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        snapshot: &ProgressSnapshot,
        repo_url: Option<&str>,
        focused: bool,
    ) {
        let total = flatten_tasks(&snapshot.phases).count();
        let rows = self.rows(snapshot);
        self.sync_with(rows.len());

        let border_color = if focused { Color::Cyan } else { Color::DarkGray };
        let block = Block::default()
            .borders(Borders::ALL)
            .title(self.title(rows.len(), total))
            .border_style(Style::default().fg(border_color));

        if rows.is_empty() {
            let message = if total == 0 {
                NO_TASKS_MESSAGE
            } else {
                NO_MATCHES_MESSAGE
            };
            let empty = Paragraph::new(vec![
                Line::from(""),
                Line::from(Span::styled(message, Style::default().fg(Color::DarkGray))),
            ])
            .alignment(ratatui::layout::Alignment::Center)
            .block(block);
            frame.render_widget(empty, area);
            return;
        }

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(inner);

        // Leave room for the highlight symbol
        let name_width = (inner.width as usize)
            .saturating_sub(2 + STATUS_WIDTH + PHASE_WIDTH + COMMIT_WIDTH + 3)
            .max(8);

        let header = Line::from(Span::styled(
            format!(
                "  {} {} {} {}",
                fit("Status", STATUS_WIDTH),
                fit("Task", name_width),
                fit("Phase", PHASE_WIDTH),
                fit("Commit", COMMIT_WIDTH)
            ),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ));
        frame.render_widget(Paragraph::new(header), chunks[0]);

        let items: Vec<ListItem> = rows
            .iter()
            .map(|row| {
                let status = row.status();
                ListItem::new(Line::from(vec![
                    Span::styled(
                        fit(&format!("{} {}", status.icon(), status.label()), STATUS_WIDTH),
                        Style::default().fg(status.color()),
                    ),
                    Span::raw(" "),
                    Span::styled(fit(&row.task.name, name_width), Style::default().fg(Color::White)),
                    Span::raw(" "),
                    Span::styled(fit(row.phase_name, PHASE_WIDTH), Style::default().fg(Color::DarkGray)),
                    Span::raw(" "),
                    Span::styled(
                        fit(row.task.commit_sha.as_deref().unwrap_or("-"), COMMIT_WIDTH),
                        Style::default().fg(Color::Magenta),
                    ),
                ]))
            })
            .collect();

        let list = List::new(items)
            .highlight_style(Style::default().bg(Color::Blue).fg(Color::White))
            .highlight_symbol("▶ ");
        frame.render_stateful_widget(list, chunks[1], &mut self.list_state);

        let link = self
            .selected_row(snapshot)
            .and_then(|row| row.task.commit_sha.as_deref())
            .zip(repo_url)
            .map(|(sha, url)| commit_link(url, sha));
        if let Some(link) = link {
            frame.render_widget(
                Paragraph::new(Line::from(vec![
                    Span::styled("commit: ", Style::default().fg(Color::DarkGray)),
                    Span::styled(link, Style::default().fg(Color::Blue)),
                ])),
                chunks[2],
            );
        }
    }
}

/// Pad or truncate `text` to exactly `width` terminal columns
pub fn fit(text: &str, width: usize) -> String {
    if text.width() <= width {
        let padding = width - text.width();
        return format!("{}{}", text, " ".repeat(padding));
    }
    if width == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > width - 1 {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    used += 1;
    out.push_str(&" ".repeat(width - used));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};
    use crate::model::snapshot::{Phase, Task};
    use crate::model::status::TaskStatus;

    fn sample() -> ProgressSnapshot {
        let task = |name: &str, status| Task {
            name: name.to_string(),
            status,
            commit_sha: None,
            subtasks: vec![],
        };
        ProgressSnapshot {
            phases: vec![
                Phase {
                    name: "Setup".to_string(),
                    tasks: vec![
                        task("init", TaskStatus::Completed),
                        task("ci", TaskStatus::InProgress),
                    ],
                    ..Default::default()
                },
                Phase {
                    name: "Build".to_string(),
                    tasks: vec![task("api", TaskStatus::Pending)],
                    ..Default::default()
                },
            ],
            ..Default::default()
        }
    }

    #[test]
    fn test_fit_pads_and_truncates() {
        assert_eq!(fit("abc", 5), "abc  ");
        assert_eq!(fit("abcdef", 4), "abc…");
        assert_eq!(fit("", 0), "");
        assert_eq!(fit("日本語", 4), "日… ");
    }

    #[test]
    fn test_rows_follow_filter() {
        let snapshot = sample();
        let mut table = TaskTableComponent::new();
        assert_eq!(table.rows(&snapshot).len(), 3);

        table.filter.toggle_phase("Setup");
        assert_eq!(table.rows(&snapshot).len(), 2);

        table.filter.toggle_status(TaskStatus::Completed);
        let rows = table.rows(&snapshot);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].task.name, "init");
    }

    #[test]
    fn test_title_reports_filtered_count() {
        let mut table = TaskTableComponent::new();
        assert_eq!(table.title(3, 3), " Tasks (3) ");

        table.filter.toggle_status(TaskStatus::Pending);
        table.filter.toggle_status(TaskStatus::Blocked);
        assert_eq!(table.title(1, 3), " Tasks (1/3) [status:2] ");
    }

    #[test]
    fn test_sync_with_clamps_selection() {
        let mut table = TaskTableComponent::new();
        table.select_last(5);
        table.sync_with(2);
        assert_eq!(table.list_state.selected(), Some(1));
        table.sync_with(0);
        assert_eq!(table.list_state.selected(), None);
    }

    #[test]
    fn test_selected_row() {
        let snapshot = sample();
        let mut table = TaskTableComponent::new();
        table.select_last(table.rows(&snapshot).len());
        assert_eq!(table.selected_row(&snapshot).map(|r| r.phase_name), Some("Build"));
    }

    fn rendered_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        buffer
            .content()
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn draw(table: &mut TaskTableComponent, snapshot: &ProgressSnapshot) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 10)).unwrap();
        terminal
            .draw(|frame| table.draw_with_snapshot(frame, frame.area(), snapshot, None, true))
            .unwrap();
        rendered_text(&terminal)
    }

    #[test]
    fn test_phases_without_tasks_render_empty_message() {
        let snapshot = ProgressSnapshot {
            phases: vec![Phase {
                name: "Setup".to_string(),
                tasks: vec![],
                ..Default::default()
            }],
            ..Default::default()
        };
        let mut table = TaskTableComponent::new();
        let text = draw(&mut table, &snapshot);
        assert!(text.contains(NO_TASKS_MESSAGE));
        assert!(!text.contains(NO_MATCHES_MESSAGE));
    }

    #[test]
    fn test_unmatched_filter_renders_no_matches_message() {
        let snapshot = sample();
        let mut table = TaskTableComponent::new();
        table.filter.toggle_status(TaskStatus::Blocked);

        let text = draw(&mut table, &snapshot);
        assert!(text.contains(NO_MATCHES_MESSAGE));
        assert!(text.contains("Tasks (0/3)"));
        assert_eq!(table.list_state.selected(), None);
    }
}
