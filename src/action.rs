//! Action enum - All possible application actions
//!
//! Components emit Actions in response to key events, and the App processes
//! them to update state.

use crate::model::TaskStatus;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    // ─────────────────────────────────────────────────────────────────────────
    // App Lifecycle
    // ─────────────────────────────────────────────────────────────────────────
    /// Regular tick; drains finished analysis requests
    Tick,
    /// Terminal was resized
    Resize(u16, u16),
    /// Quit without confirmation
    ForceQuit,

    // ─────────────────────────────────────────────────────────────────────────
    // Navigation
    // ─────────────────────────────────────────────────────────────────────────
    NextItem,
    PrevItem,
    FirstItem,
    LastItem,
    /// Focus the next dashboard panel
    NextPanel,
    /// Focus the previous dashboard panel
    PrevPanel,
    /// Expand or collapse the selected phase
    TogglePhase,

    // ─────────────────────────────────────────────────────────────────────────
    // Analysis
    // ─────────────────────────────────────────────────────────────────────────
    /// Analyze a repository URL
    SubmitRepo(String),
    /// Re-analyze the remembered repository
    Sync,

    // ─────────────────────────────────────────────────────────────────────────
    // Filters
    // ─────────────────────────────────────────────────────────────────────────
    ToggleStatusFilter(TaskStatus),
    TogglePhaseFilter(String),
    ClearFilters,

    // ─────────────────────────────────────────────────────────────────────────
    // Modals
    // ─────────────────────────────────────────────────────────────────────────
    OpenQuitDialog,
    OpenRepoInput,
    OpenStatusFilter,
    OpenPhaseFilter,
    OpenProjectInfo,
    OpenHelp,
    CloseModal,
    ConfirmModal,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Tick => write!(f, "Tick"),
            Action::Resize(w, h) => write!(f, "Resize({}, {})", w, h),
            Action::ForceQuit => write!(f, "ForceQuit"),
            Action::NextItem => write!(f, "NextItem"),
            Action::PrevItem => write!(f, "PrevItem"),
            Action::FirstItem => write!(f, "FirstItem"),
            Action::LastItem => write!(f, "LastItem"),
            Action::NextPanel => write!(f, "NextPanel"),
            Action::PrevPanel => write!(f, "PrevPanel"),
            Action::TogglePhase => write!(f, "TogglePhase"),
            Action::SubmitRepo(url) => write!(f, "SubmitRepo({})", url),
            Action::Sync => write!(f, "Sync"),
            Action::ToggleStatusFilter(status) => {
                write!(f, "ToggleStatusFilter({})", status.label())
            }
            Action::TogglePhaseFilter(phase) => write!(f, "TogglePhaseFilter({})", phase),
            Action::ClearFilters => write!(f, "ClearFilters"),
            Action::OpenQuitDialog => write!(f, "OpenQuitDialog"),
            Action::OpenRepoInput => write!(f, "OpenRepoInput"),
            Action::OpenStatusFilter => write!(f, "OpenStatusFilter"),
            Action::OpenPhaseFilter => write!(f, "OpenPhaseFilter"),
            Action::OpenProjectInfo => write!(f, "OpenProjectInfo"),
            Action::OpenHelp => write!(f, "OpenHelp"),
            Action::CloseModal => write!(f, "CloseModal"),
            Action::ConfirmModal => write!(f, "ConfirmModal"),
        }
    }
}
