//! Stage timeline component
//!
//! One entry per phase with status badge, completion count and a small
//! progress bar. Phases with tasks can be expanded to show their tasks,
//! commit references and subtasks.

use crate::model::view::phase_completion_ratio;
use crate::model::Phase;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};
use std::collections::HashSet;

pub const NO_PHASES_MESSAGE: &str = "No Conductor phases detected in this repository.";

const RATIO_BAR_WIDTH: usize = 10;

/// Timeline panel state: selected phase and expanded phases
#[derive(Default)]
pub struct TimelineComponent {
    pub list_state: ListState,
    /// Expanded phases, by index into the snapshot's phase list
    expanded: HashSet<usize>,
}

impl TimelineComponent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_expanded(&self, index: usize) -> bool {
        self.expanded.contains(&index)
    }

    /// Expand or collapse the selected phase. Phases without tasks never expand.
    pub fn toggle_selected(&mut self, phases: &[Phase]) {
        let Some(index) = self.list_state.selected() else {
            return;
        };
        let Some(phase) = phases.get(index) else {
            return;
        };
        if !phase.is_expandable() {
            return;
        }
        if !self.expanded.remove(&index) {
            self.expanded.insert(index);
        }
    }

    /// Keep selection and expansion valid after a new snapshot arrives
    pub fn sync_with(&mut self, phases: &[Phase]) {
        self.expanded
            .retain(|index| phases.get(*index).is_some_and(Phase::is_expandable));
        match self.list_state.selected() {
            _ if phases.is_empty() => self.list_state.select(None),
            Some(index) if index >= phases.len() => self.list_state.select(Some(phases.len() - 1)),
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
            Some(_) => 0,
            None => 0,
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

    pub fn draw_with_phases(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        phases: &[Phase],
        focused: bool,
    ) {
        let border_color = if focused { Color::Cyan } else { Color::DarkGray };
        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!(" Timeline ({}) ", phases.len()))
            .border_style(Style::default().fg(border_color));

        if phases.is_empty() {
            let empty = Paragraph::new(vec![
                Line::from(""),
                Line::from(Span::styled(
                    NO_PHASES_MESSAGE,
                    Style::default().fg(Color::DarkGray),
                )),
            ])
            .alignment(ratatui::layout::Alignment::Center)
            .block(block);
            frame.render_widget(empty, area);
            return;
        }

        let items: Vec<ListItem> = phases
            .iter()
            .enumerate()
            .map(|(index, phase)| ListItem::new(phase_text(phase, self.is_expanded(index))))
            .collect();

        let list = List::new(items)
            .block(block)
            .highlight_style(Style::default().bg(Color::Blue).fg(Color::White))
            .highlight_symbol("▶ ");

        frame.render_stateful_widget(list, area, &mut self.list_state);
    }
}

/// `██████░░░░` style bar for a completion ratio
pub fn ratio_bar(ratio: f64, width: usize) -> String {
    let filled = ((ratio.clamp(0.0, 1.0) * width as f64).round() as usize).min(width);
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

fn phase_text(phase: &Phase, expanded: bool) -> Text<'static> {
    let expander = match (phase.is_expandable(), expanded) {
        (false, _) => "  ",
        (true, false) => "▸ ",
        (true, true) => "▾ ",
    };
    let ratio = phase_completion_ratio(phase);
    let mut name_style = Style::default().fg(Color::White);
    if phase.status.is_active() {
        name_style = name_style.add_modifier(Modifier::BOLD);
    }

    let mut lines = vec![Line::from(vec![
        Span::styled(expander, Style::default().fg(Color::DarkGray)),
        Span::styled(
            format!("{} ", phase.status.icon()),
            Style::default().fg(phase.status.color()),
        ),
        Span::styled(phase.name.clone(), name_style),
        Span::raw(" "),
        Span::styled(
            format!("[{}]", phase.status.badge()),
            Style::default()
                .fg(phase.status.color())
                .add_modifier(Modifier::BOLD),
        ),
    ])];

    lines.push(Line::from(vec![
        Span::raw("    "),
        Span::styled(
            ratio_bar(ratio, RATIO_BAR_WIDTH),
            Style::default().fg(phase.status.color()),
        ),
        Span::styled(
            format!(
                " {}/{} tasks",
                phase.completed_task_count(),
                phase.total_task_count()
            ),
            Style::default().fg(Color::DarkGray),
        ),
    ]));

    if expanded {
        for task in &phase.tasks {
            let mut spans = vec![
                Span::raw("      "),
                Span::styled(
                    format!("{} ", task.status.icon()),
                    Style::default().fg(task.status.color()),
                ),
                Span::styled(task.name.clone(), Style::default().fg(Color::White)),
            ];
            if let Some(sha) = task.commit_sha.as_deref() {
                spans.push(Span::styled(
                    format!(" ({})", sha),
                    Style::default().fg(Color::Magenta),
                ));
            }
            lines.push(Line::from(spans));

            for subtask in &task.subtasks {
                lines.push(Line::from(Span::styled(
                    format!("          • {}", subtask),
                    Style::default().fg(Color::DarkGray),
                )));
            }
        }
    }

    Text::from(lines)
}
