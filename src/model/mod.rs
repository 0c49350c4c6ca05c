//! Model layer - centralized state management
//!
//! This module contains all state-related types:
//! - `ProgressSnapshot` - Data returned by the analysis service
//! - `FetchController` - Request lifecycle and last-request-wins bookkeeping
//! - `TaskFilter` and derivation helpers - View-state computed from a snapshot
//! - `ModalStack` - Modal overlay management

pub mod fetch;
pub mod modal;
pub mod snapshot;
pub mod status;
pub mod ui;
pub mod view;

// Re-export commonly used types
pub use fetch::{FetchController, FetchError, FetchState};
pub use snapshot::{Commit, Phase, ProgressSnapshot};
pub use status::TaskStatus;
pub use view::TaskFilter;
