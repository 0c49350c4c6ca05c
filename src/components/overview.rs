//! Progress overview panels
//!
//! Overall completion gauge, per-status stacked bar and counters, and the
//! status distribution chart.

use crate::model::view::{completion_segments, status_distribution};
use crate::model::{ProgressSnapshot, TaskStatus};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Gauge, Paragraph},
    Frame,
};

pub const NO_TASKS_MESSAGE: &str = "No tasks to display.";

/// Overall completion gauge, stacked status bar and counters
pub fn render_progress(frame: &mut Frame, area: Rect, snapshot: &ProgressSnapshot) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Overall Progress ")
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(inner);

    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(Color::Green).bg(Color::Black))
        .percent(u16::from(snapshot.overall_completion))
        .label(format!("{}% complete", snapshot.overall_completion));
    frame.render_widget(gauge, chunks[0]);

    frame.render_widget(
        Paragraph::new(Line::from(segment_spans(snapshot, chunks[2].width))),
        chunks[2],
    );
    frame.render_widget(Paragraph::new(stat_lines(snapshot)), chunks[3]);
}

/// Stacked bar with one colored run per non-zero status
pub fn segment_spans(snapshot: &ProgressSnapshot, width: u16) -> Vec<Span<'static>> {
    let segments = completion_segments(snapshot, width);
    if segments.is_empty() {
        return vec![Span::styled(
            "░".repeat(width as usize),
            Style::default().fg(Color::DarkGray),
        )];
    }

    let used: u16 = segments.iter().map(|(_, cells)| *cells).sum();
    let mut spans: Vec<Span> = segments
        .into_iter()
        .map(|(status, cells)| {
            Span::styled("█".repeat(cells as usize), Style::default().fg(status.color()))
        })
        .collect();
    if used < width {
        spans.push(Span::styled(
            "░".repeat((width - used) as usize),
            Style::default().fg(Color::DarkGray),
        ));
    }
    spans
}

fn stat_lines(snapshot: &ProgressSnapshot) -> Vec<Line<'static>> {
    let mut spans = vec![
        Span::styled("Total ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            snapshot.total_tasks.to_string(),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ),
    ];

    for status in TaskStatus::ALL {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            format!("{} {} ", status.icon(), status.label()),
            Style::default().fg(status.color()),
        ));
        spans.push(Span::styled(
            snapshot.count_for(status).to_string(),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ));
    }

    vec![Line::from(spans)]
}

/// Horizontal bar chart of the status distribution
pub fn render_distribution(frame: &mut Frame, area: Rect, snapshot: &ProgressSnapshot) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Status Distribution ")
        .border_style(Style::default().fg(Color::DarkGray));

    let distribution = status_distribution(snapshot);
    if distribution.is_empty() {
        let empty = Paragraph::new(Line::from(Span::styled(
            NO_TASKS_MESSAGE,
            Style::default().fg(Color::DarkGray),
        )))
        .alignment(ratatui::layout::Alignment::Center)
        .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let bars: Vec<Bar> = distribution
        .iter()
        .map(|(status, count)| {
            Bar::default()
                .value(u64::from(*count))
                .label(Line::from(format!("{:<11}", status.label())))
                .text_value(count.to_string())
                .style(Style::default().fg(status.color()))
                .value_style(
                    Style::default()
                        .fg(Color::Black)
                        .bg(status.color())
                        .add_modifier(Modifier::BOLD),
                )
        })
        .collect();

    let chart = BarChart::default()
        .block(block)
        .direction(Direction::Horizontal)
        .bar_width(1)
        .bar_gap(0)
        .data(BarGroup::default().bars(&bars));

    frame.render_widget(chart, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};

    fn snapshot(counts: [u32; 4]) -> ProgressSnapshot {
        ProgressSnapshot {
            total_tasks: counts.iter().sum(),
            completed_tasks: counts[0],
            in_progress_tasks: counts[1],
            pending_tasks: counts[2],
            blocked_tasks: counts[3],
            overall_completion: 60,
            ..Default::default()
        }
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

    #[test]
    fn test_segment_spans_fill_width() {
        let spans = segment_spans(&snapshot([5, 0, 5, 0]), 20);
        let total: usize = spans.iter().map(|s| s.content.chars().count()).sum();
        assert_eq!(total, 20);
        assert_eq!(spans.len(), 2);
    }

    #[test]
    fn test_segment_spans_empty_snapshot() {
        let spans = segment_spans(&ProgressSnapshot::default(), 8);
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].content, "░".repeat(8));
    }

    #[test]
    fn test_distribution_empty_state() {
        let mut terminal = Terminal::new(TestBackend::new(40, 6)).unwrap();
        terminal
            .draw(|frame| render_distribution(frame, frame.area(), &ProgressSnapshot::default()))
            .unwrap();
        assert!(rendered_text(&terminal).contains(NO_TASKS_MESSAGE));
    }

    #[test]
    fn test_distribution_omits_zero_counts() {
        let mut terminal = Terminal::new(TestBackend::new(40, 7)).unwrap();
        terminal
            .draw(|frame| render_distribution(frame, frame.area(), &snapshot([6, 2, 2, 0])))
            .unwrap();
        let text = rendered_text(&terminal);
        assert!(text.contains("Completed"));
        assert!(text.contains("Pending"));
        assert!(!text.contains("Blocked"));
    }

    #[test]
    fn test_progress_shows_percentage() {
        let mut terminal = Terminal::new(TestBackend::new(80, 7)).unwrap();
        terminal
            .draw(|frame| render_progress(frame, frame.area(), &snapshot([6, 2, 2, 0])))
            .unwrap();
        let text = rendered_text(&terminal);
        assert!(text.contains("60% complete"));
        assert!(text.contains("Total 10"));
    }
}
