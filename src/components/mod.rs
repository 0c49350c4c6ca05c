//! UI Components
//!
//! Each component encapsulates its own state, event handling, and rendering logic.
//! Components communicate through Actions rather than direct state mutation.

pub mod activity;
pub mod dashboard;
pub mod empty_state;
pub mod filter_dialog;
pub mod help_dialog;
pub mod info;
pub mod layout;
pub mod overview;
pub mod quit_dialog;
pub mod repo_input;
pub mod task_table;
pub mod timeline;

pub use activity::ActivityComponent;
pub use dashboard::{draw_dashboard, DashboardComponent, DashboardPanels, DashboardRenderContext};
pub use filter_dialog::{FilterDialog, FilterKind};
pub use help_dialog::HelpDialog;
pub use info::ProjectInfoDialog;
pub use layout::{calculate_dashboard_layout, centered_popup};
pub use quit_dialog::QuitDialog;
pub use repo_input::RepoInputDialog;
pub use task_table::TaskTableComponent;
pub use timeline::TimelineComponent;
