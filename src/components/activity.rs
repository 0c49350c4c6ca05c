//! Activity feed component
//!
//! Recent commits, newest first. Commits made through Conductor carry a
//! badge.

use crate::model::Commit;
use crate::services::commit_link;
use chrono::{DateTime, FixedOffset, Utc};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

pub const NO_COMMITS_MESSAGE: &str = "No commits found.";

#[derive(Default)]
pub struct ActivityComponent {
    pub list_state: ListState,
}

impl ActivityComponent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sync_with(&mut self, len: usize) {
        match self.list_state.selected() {
            _ if len == 0 => self.list_state.select(None),
            Some(index) if index >= len => self.list_state.select(Some(len - 1)),
            None => self.list_state.select(Some(0)),
            Some(_) => {}
        }
    }

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

    pub fn draw_with_commits(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        commits: &[Commit],
        repo_url: Option<&str>,
        focused: bool,
    ) {
        self.sync_with(commits.len());
        let now = Utc::now();

        let border_color = if focused { Color::Cyan } else { Color::DarkGray };
        let mut block = Block::default()
            .borders(Borders::ALL)
            .title(format!(" Activity ({}) ", commits.len()))
            .border_style(Style::default().fg(border_color));

        if commits.is_empty() {
            let empty = Paragraph::new(vec![
                Line::from(""),
                Line::from(Span::styled(
                    NO_COMMITS_MESSAGE,
                    Style::default().fg(Color::DarkGray),
                )),
            ])
            .alignment(ratatui::layout::Alignment::Center)
            .block(block);
            frame.render_widget(empty, area);
            return;
        }

        let selected = self.list_state.selected().and_then(|i| commits.get(i));
        if let Some((commit, url)) = selected.zip(repo_url) {
            block = block.title_bottom(Line::from(Span::styled(
                format!(" {} ", commit_link(url, commit.key())),
                Style::default().fg(Color::Blue),
            )));
        }

        let items: Vec<ListItem> = commits
            .iter()
            .map(|commit| ListItem::new(commit_text(commit, now)))
            .collect();

        let list = List::new(items)
            .block(block)
            .highlight_style(Style::default().bg(Color::Blue).fg(Color::White))
            .highlight_symbol("▶ ");

        frame.render_stateful_widget(list, area, &mut self.list_state);
    }
}

fn commit_text(commit: &Commit, now: DateTime<Utc>) -> Text<'static> {
    let message = commit.message.lines().next().unwrap_or_default().to_string();
    let mut first = vec![
        Span::styled(
            format!("{} ", commit.sha),
            Style::default().fg(Color::Magenta),
        ),
        Span::styled(message, Style::default().fg(Color::White)),
    ];
    if commit.is_conductor {
        first.push(Span::raw(" "));
        first.push(Span::styled(
            " CONDUCTOR ",
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ));
    }

    let when = commit
        .timestamp()
        .map(|then| format_relative(then, now))
        .unwrap_or_else(|| commit.date.clone());

    Text::from(vec![
        Line::from(first),
        Line::from(Span::styled(
            format!("  {} · {}", commit.author, when),
            Style::default().fg(Color::DarkGray),
        )),
    ])
}

/// Human readable age such as "3 hours ago"
pub fn format_relative(then: DateTime<FixedOffset>, now: DateTime<Utc>) -> String {
    let seconds = now
        .signed_duration_since(then.with_timezone(&Utc))
        .num_seconds();
    if seconds < 60 {
        return "just now".to_string();
    }

    let (value, unit) = match seconds {
        s if s < 3_600 => (s / 60, "minute"),
        s if s < 86_400 => (s / 3_600, "hour"),
        s if s < 30 * 86_400 => (s / 86_400, "day"),
        s if s < 365 * 86_400 => (s / (30 * 86_400), "month"),
        s => (s / (365 * 86_400), "year"),
    };
    let plural = if value == 1 { "" } else { "s" };
    format!("{} {}{} ago", value, unit, plural)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn at(now: DateTime<Utc>, ago: Duration) -> DateTime<FixedOffset> {
        (now - ago).fixed_offset()
    }

    #[test]
    fn test_format_relative_units() {
        let now = Utc::now();
        assert_eq!(format_relative(at(now, Duration::seconds(5)), now), "just now");
        assert_eq!(format_relative(at(now, Duration::minutes(1)), now), "1 minute ago");
        assert_eq!(format_relative(at(now, Duration::hours(3)), now), "3 hours ago");
        assert_eq!(format_relative(at(now, Duration::days(2)), now), "2 days ago");
        assert_eq!(format_relative(at(now, Duration::days(65)), now), "2 months ago");
        assert_eq!(format_relative(at(now, Duration::days(800)), now), "2 years ago");
    }

    #[test]
    fn test_future_dates_read_as_just_now() {
        let now = Utc::now();
        assert_eq!(format_relative(at(now, Duration::hours(-2)), now), "just now");
    }

    #[test]
    fn test_commit_text_badges_conductor_commits() {
        let commit = Commit {
            sha: "abc1234".to_string(),
            message: "conductor(plan): mark task complete\n\nbody".to_string(),
            author: "dev".to_string(),
            date: "not a date".to_string(),
            is_conductor: true,
            ..Default::default()
        };
        let text = commit_text(&commit, Utc::now());
        let first: String = text.lines[0].spans.iter().map(|s| s.content.as_ref()).collect();
        assert!(first.contains("CONDUCTOR"));
        assert!(!first.contains("body"));

        let second: String = text.lines[1].spans.iter().map(|s| s.content.as_ref()).collect();
        assert!(second.ends_with("not a date"));
    }
}
