//! Root application component
//!
//! The App struct implements the Component trait, acting as the root component
//! that delegates event handling and rendering to child components.
//! Fetch bookkeeping lives in `FetchController`; the App only wires the
//! controller, the background runner and the components together.

use crate::action::Action;
use crate::component::Component;
use crate::components::{
    draw_dashboard, ActivityComponent, DashboardComponent, DashboardPanels,
    DashboardRenderContext, FilterDialog, FilterKind, HelpDialog, ProjectInfoDialog, QuitDialog,
    RepoInputDialog, TaskTableComponent, TimelineComponent,
};
use crate::config::Config;
use crate::model::fetch::AnalysisRequest;
use crate::model::modal::{Modal, ModalStack};
use crate::model::ui::Panel;
use crate::model::FetchController;
use crate::services::{repo_web_url, AnalysisClient, AnalysisRunner};
use anyhow::Result;
use crossterm::event::KeyEvent;
use ratatui::{layout::Rect, Frame};
use std::sync::Arc;
use tracing::debug;

// ═══════════════════════════════════════════════════════════════════════════════
// App Struct
// ═══════════════════════════════════════════════════════════════════════════════

/// Main application state - coordinates between components
pub struct App {
    pub config: Config,

    /// Snapshot, loading/error state and remembered repository
    pub controller: FetchController,

    /// Background analysis requests
    pub runner: AnalysisRunner,

    /// Modal overlay stack
    pub modals: ModalStack,

    /// Flag to indicate the app should quit
    pub should_quit: bool,

    /// Ticks since start, drives the loading spinner
    tick: usize,

    // ─────────────────────────────────────────────────────────────────────────
    // Child Components
    // ─────────────────────────────────────────────────────────────────────────
    pub dashboard: DashboardComponent,
    pub timeline: TimelineComponent,
    pub task_table: TaskTableComponent,
    pub activity: ActivityComponent,
    pub quit_dialog: QuitDialog,
    pub repo_input: RepoInputDialog,
    pub status_filter: FilterDialog,
    pub phase_filter: FilterDialog,
    pub project_info_dialog: ProjectInfoDialog,
    pub help_dialog: HelpDialog,
}

// ═══════════════════════════════════════════════════════════════════════════════
// App Implementation
// ═══════════════════════════════════════════════════════════════════════════════

impl App {
    pub fn new(config: Config, client: Arc<dyn AnalysisClient>) -> App {
        App {
            controller: FetchController::new(config.default_repo_url.clone()),
            runner: AnalysisRunner::new(client),
            modals: ModalStack::new(),
            should_quit: false,
            tick: 0,
            config,
            dashboard: DashboardComponent::new(),
            timeline: TimelineComponent::new(),
            task_table: TaskTableComponent::new(),
            activity: ActivityComponent::new(),
            quit_dialog: QuitDialog::default(),
            repo_input: RepoInputDialog::new(),
            status_filter: FilterDialog::new(FilterKind::Status),
            phase_filter: FilterDialog::new(FilterKind::Phase),
            project_info_dialog: ProjectInfoDialog::new(),
            help_dialog: HelpDialog::default(),
        }
    }

    fn dispatch(&mut self, request: Option<AnalysisRequest>) {
        if let Some(request) = request {
            self.runner.spawn(request);
        }
    }

    /// Number of rows in the focused panel
    fn focused_len(&self) -> usize {
        let Some(snapshot) = self.controller.snapshot() else {
            return 0;
        };
        match self.dashboard.focus {
            Panel::Timeline => snapshot.phases.len(),
            Panel::Tasks => self.task_table.rows(snapshot).len(),
            Panel::Activity => snapshot.commits.len(),
        }
    }

    /// Link base for the snapshot currently on screen
    fn web_url(&self) -> Option<String> {
        repo_web_url(self.controller.repo_url(), self.controller.snapshot())
    }

    /// Revalidate selections after the snapshot or the filters changed
    fn refresh_views(&mut self) {
        let snapshot = self.controller.snapshot();
        if let Some(snapshot) = snapshot {
            self.timeline.sync_with(&snapshot.phases);
            self.task_table.sync_with(self.task_table.rows(snapshot).len());
            self.activity.sync_with(snapshot.commits.len());
        }
        self.status_filter.refresh(snapshot, &self.task_table.filter);
        self.phase_filter.refresh(snapshot, &self.task_table.filter);
    }

    fn navigate(&mut self, action: &Action) {
        let len = self.focused_len();
        match (self.dashboard.focus, action) {
            (Panel::Timeline, Action::NextItem) => self.timeline.next(len),
            (Panel::Timeline, Action::PrevItem) => self.timeline.previous(len),
            (Panel::Timeline, Action::FirstItem) => self.timeline.select_first(len),
            (Panel::Timeline, Action::LastItem) => self.timeline.select_last(len),
            (Panel::Tasks, Action::NextItem) => self.task_table.next(len),
            (Panel::Tasks, Action::PrevItem) => self.task_table.previous(len),
            (Panel::Tasks, Action::FirstItem) => self.task_table.select_first(len),
            (Panel::Tasks, Action::LastItem) => self.task_table.select_last(len),
            (Panel::Activity, Action::NextItem) => self.activity.next(len),
            (Panel::Activity, Action::PrevItem) => self.activity.previous(len),
            (Panel::Activity, Action::FirstItem) => self.activity.select_first(len),
            (Panel::Activity, Action::LastItem) => self.activity.select_last(len),
            _ => {}
        }
    }

    fn handle_modal_key_event(&mut self, modal: &Modal, key: KeyEvent) -> Result<Option<Action>> {
        match modal {
            Modal::QuitConfirm => self.quit_dialog.handle_key_event(key),
            Modal::RepoInput => self.repo_input.handle_key_event(key),
            Modal::StatusFilter => self.status_filter.handle_key_event(key),
            Modal::PhaseFilter => self.phase_filter.handle_key_event(key),
            Modal::ProjectInfo => self.project_info_dialog.handle_key_event(key),
            Modal::Help => self.help_dialog.handle_key_event(key),
        }
    }

    fn draw_modal(&mut self, frame: &mut Frame, area: Rect, modal: &Modal) -> Result<()> {
        match modal {
            Modal::QuitConfirm => {
                self.quit_dialog.syncing = self.controller.is_loading();
                self.quit_dialog.draw(frame, area)?;
            }
            Modal::RepoInput => self.repo_input.draw(frame, area)?,
            Modal::StatusFilter => self.status_filter.draw(frame, area)?,
            Modal::PhaseFilter => self.phase_filter.draw(frame, area)?,
            Modal::ProjectInfo => {
                let web_url = self.web_url();
                self.project_info_dialog
                    .set_snapshot(self.controller.snapshot(), web_url.as_deref());
                self.project_info_dialog.draw(frame, area)?;
            }
            Modal::Help => self.help_dialog.draw(frame, area)?,
        }
        Ok(())
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Component Implementation
// ═══════════════════════════════════════════════════════════════════════════════

impl Component for App {
    fn init(&mut self) -> Result<()> {
        let request = self.controller.initialize();
        self.dispatch(request);
        Ok(())
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if let Some(modal) = self.modals.top().cloned() {
            self.handle_modal_key_event(&modal, key)
        } else {
            self.dashboard.handle_key_event(key)
        }
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        if action != Action::Tick {
            debug!(action = %action, "update");
        }

        match action {
            // ─────────────────────────────────────────────────────────────────
            // App Lifecycle
            // ─────────────────────────────────────────────────────────────────
            Action::Tick => {
                self.tick = self.tick.wrapping_add(1);
                if self.runner.poll(&mut self.controller) {
                    self.refresh_views();
                }
            }
            Action::ForceQuit => {
                self.should_quit = true;
            }
            Action::Resize(_, _) => {}

            // ─────────────────────────────────────────────────────────────────
            // Navigation
            // ─────────────────────────────────────────────────────────────────
            // Selections are frozen while an overlay is open
            Action::NextItem | Action::PrevItem | Action::FirstItem | Action::LastItem => {
                if self.modals.is_empty() {
                    self.navigate(&action);
                }
            }
            Action::NextPanel => self.dashboard.next_panel(),
            Action::PrevPanel => self.dashboard.previous_panel(),
            Action::TogglePhase => {
                if let Some(snapshot) = self.controller.snapshot() {
                    self.timeline.toggle_selected(&snapshot.phases);
                }
            }

            // ─────────────────────────────────────────────────────────────────
            // Analysis
            // ─────────────────────────────────────────────────────────────────
            Action::SubmitRepo(url) => {
                let request = self.controller.request_analysis(&url);
                if request.is_some() && self.modals.top() == Some(&Modal::RepoInput) {
                    self.modals.pop();
                }
                self.dispatch(request);
            }
            Action::Sync => {
                if self.controller.is_loading() {
                    debug!(
                        seq = self.controller.latest_seq(),
                        in_flight = self.runner.in_flight(),
                        "sync ignored while a request is running"
                    );
                } else {
                    let request = self.controller.sync();
                    self.dispatch(request);
                }
            }

            // ─────────────────────────────────────────────────────────────────
            // Filters
            // ─────────────────────────────────────────────────────────────────
            Action::ToggleStatusFilter(status) => {
                self.task_table.filter.toggle_status(status);
                self.refresh_views();
            }
            Action::TogglePhaseFilter(phase) => {
                self.task_table.filter.toggle_phase(&phase);
                self.refresh_views();
            }
            Action::ClearFilters => {
                self.task_table.filter.clear();
                self.refresh_views();
            }

            // ─────────────────────────────────────────────────────────────────
            // Modals
            // ─────────────────────────────────────────────────────────────────
            Action::OpenQuitDialog => {
                self.modals.push(Modal::QuitConfirm);
            }
            Action::OpenRepoInput => {
                self.repo_input.open(self.controller.repo_url());
                self.modals.push(Modal::RepoInput);
            }
            Action::OpenStatusFilter => {
                self.status_filter
                    .refresh(self.controller.snapshot(), &self.task_table.filter);
                self.modals.toggle(Modal::StatusFilter);
            }
            Action::OpenPhaseFilter => {
                self.phase_filter
                    .refresh(self.controller.snapshot(), &self.task_table.filter);
                self.modals.toggle(Modal::PhaseFilter);
            }
            Action::OpenProjectInfo => {
                self.modals.toggle(Modal::ProjectInfo);
            }
            Action::OpenHelp => {
                self.help_dialog.scroll_offset = 0;
                self.modals.toggle(Modal::Help);
            }
            Action::CloseModal => {
                self.modals.pop();
            }
            Action::ConfirmModal => {
                if self.modals.top() == Some(&Modal::QuitConfirm) {
                    self.should_quit = true;
                }
                self.modals.pop();
            }
        }

        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        {
            let web_url = self.web_url();
            let ctx = DashboardRenderContext {
                snapshot: self.controller.snapshot(),
                fetch_state: self.controller.state(),
                error: self.controller.error(),
                repo_url: self.controller.repo_url(),
                web_url: web_url.as_deref(),
                service_url: &self.config.service_url,
                tick: self.tick,
            };
            let panels = DashboardPanels {
                timeline: &mut self.timeline,
                tasks: &mut self.task_table,
                activity: &mut self.activity,
            };
            draw_dashboard(frame, area, &self.dashboard, panels, &ctx)?;
        }

        if let Some(modal) = self.modals.top().cloned() {
            self.draw_modal(frame, area, &modal)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::fetch::{FetchError, FetchState};
    use crate::model::snapshot::{Phase, ProgressSnapshot, Task};
    use crate::model::status::{PhaseStatus, TaskStatus};
    use crate::model::view::flatten_tasks;
    use crossterm::event::{KeyCode, KeyModifiers};
    use ratatui::{backend::TestBackend, Terminal};
    use std::collections::HashMap;
    use std::time::{Duration, Instant};

    /// Answers immediately from a fixed table; unknown URLs fail
    struct StaticClient {
        responses: HashMap<String, Result<ProgressSnapshot, String>>,
    }

    impl AnalysisClient for StaticClient {
        fn analyze(&self, repo_url: &str) -> Result<ProgressSnapshot, FetchError> {
            match self.responses.get(repo_url) {
                Some(Ok(snapshot)) => Ok(snapshot.clone()),
                Some(Err(message)) => Err(FetchError::Service {
                    status: 404,
                    message: message.clone(),
                }),
                None => Err(FetchError::Transport("connection refused".to_string())),
            }
        }
    }

    fn sample() -> ProgressSnapshot {
        let task = |name: &str, status| Task {
            name: name.to_string(),
            status,
            commit_sha: Some("abc1234".to_string()),
            subtasks: vec![],
        };
        ProgressSnapshot {
            owner: "acme".to_string(),
            repo_name: "todo".to_string(),
            product_name: Some("Todo App".to_string()),
            total_tasks: 3,
            completed_tasks: 1,
            in_progress_tasks: 1,
            pending_tasks: 1,
            overall_completion: 33,
            phases: vec![
                Phase {
                    name: "Setup".to_string(),
                    status: PhaseStatus::Completed,
                    tasks: vec![task("init", TaskStatus::Completed)],
                },
                Phase {
                    name: "Build".to_string(),
                    status: PhaseStatus::InProgress,
                    tasks: vec![
                        task("api", TaskStatus::InProgress),
                        task("ui", TaskStatus::Pending),
                    ],
                },
            ],
            ..Default::default()
        }
    }

    fn app_with(default_repo: Option<&str>) -> App {
        let mut responses = HashMap::new();
        responses.insert("acme/todo".to_string(), Ok(sample()));
        responses.insert("acme/missing".to_string(), Err("Repository not found".to_string()));
        let mut other = sample();
        other.repo_name = "other".to_string();
        for phase in other.phases.iter_mut() {
            phase.name = format!("Launch {}", phase.name);
        }
        responses.insert("acme/other".to_string(), Ok(other));

        let config = Config {
            default_repo_url: default_repo.map(str::to_string),
            ..Default::default()
        };
        App::new(config, Arc::new(StaticClient { responses }))
    }

    fn task_count(app: &App) -> usize {
        app.controller
            .snapshot()
            .map(|s| flatten_tasks(&s.phases).count())
            .unwrap_or(0)
    }

    /// Tick until every spawned request has reported back
    fn settle(app: &mut App) {
        let deadline = Instant::now() + Duration::from_secs(5);
        loop {
            app.update(Action::Tick).unwrap();
            if app.runner.in_flight() == 0 || Instant::now() > deadline {
                break;
            }
            std::thread::sleep(Duration::from_millis(5));
        }
    }

    fn press(app: &mut App, code: KeyCode) {
        let mut action = app
            .handle_key_event(KeyEvent::new(code, KeyModifiers::NONE))
            .unwrap();
        while let Some(a) = action {
            action = app.update(a).unwrap();
        }
    }

    fn render(app: &mut App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        terminal.draw(|frame| app.draw(frame, frame.area()).unwrap()).unwrap();
        let buffer = terminal.backend().buffer();
        buffer
            .content()
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_init_loads_default_repository() {
        let mut app = app_with(Some("acme/todo"));
        app.init().unwrap();
        assert!(app.controller.is_loading());

        settle(&mut app);
        assert_eq!(task_count(&app), 3);

        let screen = render(&mut app);
        assert!(screen.contains("Todo App"));
        assert!(screen.contains("33% complete"));
        assert!(screen.contains("No commits found."));
    }

    #[test]
    fn test_no_default_repository_waits_for_input() {
        let mut app = app_with(None);
        app.init().unwrap();
        assert_eq!(app.runner.in_flight(), 0);
        assert!(render(&mut app).contains("No repository analyzed"));
    }

    #[test]
    fn test_failed_initial_load_offers_retry() {
        let mut app = app_with(Some("acme/missing"));
        app.init().unwrap();
        settle(&mut app);

        let screen = render(&mut app);
        assert!(screen.contains("Repository not found"));
        assert!(screen.contains("to retry"));
    }

    #[test]
    fn test_failed_resubmit_keeps_previous_snapshot() {
        let mut app = app_with(Some("acme/todo"));
        app.init().unwrap();
        settle(&mut app);

        app.update(Action::SubmitRepo("acme/missing".to_string())).unwrap();
        settle(&mut app);

        assert_eq!(app.controller.error(), Some("Repository not found"));
        assert_eq!(task_count(&app), 3);
        let screen = render(&mut app);
        assert!(screen.contains("Sync failed"));
        assert!(screen.contains("Todo App"));
    }

    #[test]
    fn test_links_follow_shown_snapshot_after_failed_resubmit() {
        let mut app = app_with(Some("acme/todo"));
        app.init().unwrap();
        settle(&mut app);

        app.update(Action::SubmitRepo("https://github.com/other/missing".to_string()))
            .unwrap();
        settle(&mut app);

        assert_eq!(app.controller.state(), FetchState::Failure);
        assert_eq!(app.web_url().as_deref(), Some("https://github.com/acme/todo"));

        let screen = render(&mut app);
        assert!(screen.contains("https://github.com/acme/todo/commit/abc1234"));
        assert!(!screen.contains("other/missing/commit"));
    }

    #[test]
    fn test_blank_submit_and_busy_sync_are_ignored() {
        let mut app = app_with(Some("acme/todo"));
        app.init().unwrap();
        let seq = app.controller.latest_seq();

        app.update(Action::Sync).unwrap();
        assert_eq!(app.controller.latest_seq(), seq);

        app.update(Action::SubmitRepo("   ".to_string())).unwrap();
        assert_eq!(app.controller.latest_seq(), seq);
        settle(&mut app);
    }

    #[test]
    fn test_filters_survive_sync() {
        let mut app = app_with(Some("acme/todo"));
        app.init().unwrap();
        settle(&mut app);

        app.update(Action::ToggleStatusFilter(TaskStatus::Pending)).unwrap();
        let snapshot = app.controller.snapshot().unwrap().clone();
        assert_eq!(app.task_table.rows(&snapshot).len(), 1);

        press(&mut app, KeyCode::Char('r'));
        settle(&mut app);
        assert!(app.task_table.filter.statuses.contains(&TaskStatus::Pending));

        press(&mut app, KeyCode::Char('c'));
        assert!(app.task_table.filter.is_empty());
    }

    #[test]
    fn test_repo_input_flow() {
        let mut app = app_with(None);
        app.init().unwrap();

        press(&mut app, KeyCode::Char('o'));
        assert_eq!(app.modals.top(), Some(&Modal::RepoInput));

        // Blank input keeps the dialog open
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.modals.top(), Some(&Modal::RepoInput));

        for c in "acme/todo".chars() {
            press(&mut app, KeyCode::Char(c));
        }
        press(&mut app, KeyCode::Enter);
        assert!(app.modals.is_empty());

        settle(&mut app);
        assert_eq!(app.controller.repo_url(), Some("acme/todo"));
        assert_eq!(task_count(&app), 3);
    }

    #[test]
    fn test_phase_filter_dialog_toggles_table_filter() {
        let mut app = app_with(Some("acme/todo"));
        app.init().unwrap();
        settle(&mut app);

        press(&mut app, KeyCode::Char('p'));
        assert_eq!(app.modals.top(), Some(&Modal::PhaseFilter));
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Char(' '));

        assert!(app.task_table.filter.phases.contains("Build"));
        assert!(app.phase_filter.options[1].checked);
        assert!(render(&mut app).contains("1 selected"));

        press(&mut app, KeyCode::Esc);
        assert!(app.modals.is_empty());
        assert!(render(&mut app).contains("Tasks (2/3)"));
    }

    #[test]
    fn test_phase_filter_from_previous_repo_stays_visible() {
        let mut app = app_with(Some("acme/todo"));
        app.init().unwrap();
        settle(&mut app);
        app.update(Action::TogglePhaseFilter("Build".to_string())).unwrap();

        app.update(Action::SubmitRepo("acme/other".to_string())).unwrap();
        settle(&mut app);
        let snapshot = app.controller.snapshot().unwrap().clone();
        assert_eq!(snapshot.repo_name, "other");
        assert!(app.task_table.rows(&snapshot).is_empty());

        press(&mut app, KeyCode::Char('p'));
        assert_eq!(app.phase_filter.checked_count(), app.task_table.filter.phases.len());
        let labels: Vec<&str> = app.phase_filter.options.iter().map(|o| o.label.as_str()).collect();
        assert_eq!(labels, vec!["Launch Setup", "Launch Build", "Build"]);
        assert!(render(&mut app).contains("1 selected"));

        // Unchecking the carried-over phase brings the rows back
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Char(' '));
        assert!(app.task_table.filter.is_empty());
        assert_eq!(app.task_table.rows(&snapshot).len(), 3);
    }

    #[test]
    fn test_timeline_expand_and_panel_navigation() {
        let mut app = app_with(Some("acme/todo"));
        app.init().unwrap();
        settle(&mut app);

        press(&mut app, KeyCode::Char('j'));
        press(&mut app, KeyCode::Enter);
        assert!(app.timeline.is_expanded(1));
        assert!(render(&mut app).contains("api (abc1234)"));

        press(&mut app, KeyCode::Tab);
        assert_eq!(app.dashboard.focus, Panel::Tasks);
        press(&mut app, KeyCode::Char('G'));
        assert_eq!(app.task_table.list_state.selected(), Some(2));
    }

    #[test]
    fn test_navigation_ignored_under_overlay() {
        let mut app = app_with(Some("acme/todo"));
        app.init().unwrap();
        settle(&mut app);
        assert_eq!(app.timeline.list_state.selected(), Some(0));

        press(&mut app, KeyCode::Char('?'));
        app.update(Action::NextItem).unwrap();
        assert_eq!(app.timeline.list_state.selected(), Some(0));

        press(&mut app, KeyCode::Esc);
        app.update(Action::NextItem).unwrap();
        assert_eq!(app.timeline.list_state.selected(), Some(1));
    }

    #[test]
    fn test_quit_confirmation() {
        let mut app = app_with(None);
        press(&mut app, KeyCode::Char('q'));
        assert_eq!(app.modals.top(), Some(&Modal::QuitConfirm));

        press(&mut app, KeyCode::Char('n'));
        assert!(!app.should_quit);
        assert!(app.modals.is_empty());

        press(&mut app, KeyCode::Char('q'));
        press(&mut app, KeyCode::Char('y'));
        assert!(app.should_quit);
    }
}
