//! Dashboard component - Main application screen
//!
//! Owns panel focus and maps dashboard keys to Actions. Rendering goes
//! through `draw_dashboard`, which takes the snapshot and panel components
//! from the App.

use crate::action::Action;
use crate::component::Component;
use crate::components::empty_state::{render_empty_state, EmptyState};
use crate::components::overview::{render_distribution, render_progress};
use crate::components::{
    calculate_dashboard_layout, ActivityComponent, TaskTableComponent, TimelineComponent,
};
use crate::model::ui::Panel;
use crate::model::{FetchState, ProgressSnapshot};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

// ═══════════════════════════════════════════════════════════════════════════════
// Dashboard Component
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Default)]
pub struct DashboardComponent {
    /// Panel receiving navigation keys
    pub focus: Panel,
}

impl DashboardComponent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_panel(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn previous_panel(&mut self) {
        self.focus = self.focus.previous();
    }
}

impl Component for DashboardComponent {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(Action::ForceQuit)
            }

            // Navigation
            KeyCode::Char('j') | KeyCode::Down => Some(Action::NextItem),
            KeyCode::Char('k') | KeyCode::Up => Some(Action::PrevItem),
            KeyCode::Char('g') | KeyCode::Home => Some(Action::FirstItem),
            KeyCode::Char('G') | KeyCode::End => Some(Action::LastItem),
            KeyCode::Tab => Some(Action::NextPanel),
            KeyCode::BackTab => Some(Action::PrevPanel),
            KeyCode::Enter | KeyCode::Char(' ') if self.focus == Panel::Timeline => {
                Some(Action::TogglePhase)
            }

            // Repository
            KeyCode::Char('r') => Some(Action::Sync),
            KeyCode::Char('o') => Some(Action::OpenRepoInput),

            // Filters
            KeyCode::Char('s') => Some(Action::OpenStatusFilter),
            KeyCode::Char('p') => Some(Action::OpenPhaseFilter),
            KeyCode::Char('c') => Some(Action::ClearFilters),

            // Modals
            KeyCode::Char('i') => Some(Action::OpenProjectInfo),
            KeyCode::Char('?') => Some(Action::OpenHelp),
            KeyCode::Char('q') | KeyCode::Esc => Some(Action::OpenQuitDialog),

            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, _frame: &mut Frame, _area: Rect) -> Result<()> {
        // Drawing is done through draw_dashboard which takes full context
        Ok(())
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Rendering Functions
// ═══════════════════════════════════════════════════════════════════════════════

/// Context needed for rendering the dashboard
pub struct DashboardRenderContext<'a> {
    pub snapshot: Option<&'a ProgressSnapshot>,
    pub fetch_state: FetchState,
    pub error: Option<&'a str>,
    /// URL as submitted by the user
    pub repo_url: Option<&'a str>,
    /// Browsable GitHub URL used for commit links
    pub web_url: Option<&'a str>,
    pub service_url: &'a str,
    /// Tick counter for the loading spinner
    pub tick: usize,
}

/// Panel components drawn by the dashboard
pub struct DashboardPanels<'a> {
    pub timeline: &'a mut TimelineComponent,
    pub tasks: &'a mut TaskTableComponent,
    pub activity: &'a mut ActivityComponent,
}

/// Draw the dashboard screen
pub fn draw_dashboard(
    frame: &mut Frame,
    area: Rect,
    dashboard: &DashboardComponent,
    panels: DashboardPanels,
    ctx: &DashboardRenderContext,
) -> Result<()> {
    let Some(snapshot) = ctx.snapshot else {
        // Nothing to show yet: header, placeholder, status and help
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(1),
                Constraint::Length(1),
            ])
            .split(area);

        render_header(frame, chunks[0], ctx);
        let state = EmptyState::from_fetch(ctx.fetch_state, ctx.repo_url, ctx.error);
        render_empty_state(frame, chunks[1], &state, ctx.tick);
        render_status_bar(frame, chunks[2], ctx);
        render_help_bar(frame, chunks[3], ctx, None);
        return Ok(());
    };

    let layout = calculate_dashboard_layout(area);

    render_header(frame, layout.header, ctx);
    render_progress(frame, layout.progress, snapshot);
    render_distribution(frame, layout.distribution, snapshot);

    panels.timeline.draw_with_phases(
        frame,
        layout.timeline,
        &snapshot.phases,
        dashboard.focus == Panel::Timeline,
    );
    panels.tasks.draw_with_snapshot(
        frame,
        layout.tasks,
        snapshot,
        ctx.web_url,
        dashboard.focus == Panel::Tasks,
    );
    panels.activity.draw_with_commits(
        frame,
        layout.activity,
        &snapshot.commits,
        ctx.web_url,
        dashboard.focus == Panel::Activity,
    );

    render_status_bar(frame, layout.status, ctx);
    render_help_bar(frame, layout.help, ctx, Some(dashboard.focus));

    Ok(())
}

fn render_header(frame: &mut Frame, area: Rect, ctx: &DashboardRenderContext) {
    let mut spans = vec![Span::styled(
        " CONDUCTOR ",
        Style::default()
            .fg(Color::Black)
            .bg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )];

    if let Some(snapshot) = ctx.snapshot {
        spans.push(Span::raw(" "));
        spans.push(Span::styled(
            snapshot.display_name().to_string(),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::styled(
            format!("  {}", snapshot.slug()),
            Style::default().fg(Color::DarkGray),
        ));
    } else {
        spans.push(Span::styled(
            " Progress Dashboard",
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ));
    }

    match ctx.fetch_state {
        FetchState::Loading => spans.push(Span::styled(
            "  ⟳ Syncing…",
            Style::default().fg(Color::Yellow),
        )),
        FetchState::Failure if ctx.snapshot.is_some() => spans.push(Span::styled(
            "  ✗ Sync failed",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        _ => {}
    }

    let header = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    frame.render_widget(header, area);
}

fn render_status_bar(frame: &mut Frame, area: Rect, ctx: &DashboardRenderContext) {
    let spans = if let Some(error) = ctx.error {
        vec![
            Span::styled(format!(" Error: {} ", error), Style::default().fg(Color::Red)),
            Span::styled("(r to retry)", Style::default().fg(Color::DarkGray)),
        ]
    } else if ctx.fetch_state == FetchState::Loading {
        vec![Span::styled(
            format!(" Analyzing {} ", ctx.repo_url.unwrap_or_default()),
            Style::default().fg(Color::Yellow),
        )]
    } else if let Some(snapshot) = ctx.snapshot {
        vec![
            Span::styled(" Last synced ", Style::default().fg(Color::DarkGray)),
            Span::styled(snapshot.last_synced.clone(), Style::default().fg(Color::White)),
            Span::styled(
                format!("  via {}", ctx.service_url),
                Style::default().fg(Color::DarkGray),
            ),
        ]
    } else {
        vec![Span::styled(
            format!(" Service: {}", ctx.service_url),
            Style::default().fg(Color::DarkGray),
        )]
    };

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_help_bar(
    frame: &mut Frame,
    area: Rect,
    ctx: &DashboardRenderContext,
    focus: Option<Panel>,
) {
    let key_style = |color: Color| Style::default().fg(color).add_modifier(Modifier::BOLD);
    // Sync is unavailable without a repository and while a request is running
    let sync_color = if ctx.repo_url.is_none() || ctx.fetch_state == FetchState::Loading {
        Color::DarkGray
    } else {
        Color::Green
    };

    let mut help_spans = vec![
        Span::styled(" q ", key_style(Color::Yellow)),
        Span::raw("Quit "),
        Span::styled(" o ", key_style(Color::Cyan)),
        Span::raw("Open "),
        Span::styled(" r ", key_style(sync_color)),
        Span::raw("Sync "),
        Span::styled(" Tab ", key_style(Color::Cyan)),
        Span::raw("Panel "),
        Span::styled(" s ", key_style(Color::Magenta)),
        Span::raw("Status "),
        Span::styled(" p ", key_style(Color::Magenta)),
        Span::raw("Phase "),
        Span::styled(" c ", key_style(Color::Magenta)),
        Span::raw("Clear "),
        Span::styled(" i ", key_style(Color::Cyan)),
        Span::raw("Info "),
        Span::styled(" ? ", key_style(Color::White)),
        Span::raw("Help"),
    ];
    if let Some(panel) = focus {
        help_spans.push(Span::styled(
            format!("  [{}]", panel.name()),
            Style::default().fg(Color::DarkGray),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(help_spans)), area);
}
