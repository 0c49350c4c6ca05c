//! Snapshot fetch state machine
//!
//! Owns the current snapshot, the loading/error state, and the remembered
//! repository URL. Requests are numbered; only the completion carrying the
//! most recent number may change visible state.

use super::snapshot::ProgressSnapshot;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Message used when the service rejects a request without a reason
pub const DEFAULT_FAILURE_MESSAGE: &str = "Failed to analyze repository";

/// Failures reported by the analysis service boundary
#[derive(Debug, Error)]
pub enum FetchError {
    /// The service answered with a non-success status. The message is shown verbatim.
    #[error("{message}")]
    Service { status: u16, message: String },

    #[error("could not reach analysis service: {0}")]
    Transport(String),

    #[error("malformed response from analysis service: {0}")]
    Decode(String),
}

/// Lifecycle of the most recent request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FetchState {
    #[default]
    Idle,
    Loading,
    Success,
    Failure,
}

/// A request the runner should execute
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisRequest {
    pub seq: u64,
    pub repo_url: String,
}

/// Outcome of feeding a completion into the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Applied,
    Stale,
}

#[derive(Debug, Default)]
pub struct FetchController {
    state: FetchState,
    snapshot: Option<ProgressSnapshot>,
    error: Option<String>,
    repo_url: Option<String>,
    default_repo_url: Option<String>,
    latest_seq: u64,
    initialized: bool,
}

impl FetchController {
    pub fn new(default_repo_url: Option<String>) -> Self {
        Self {
            default_repo_url,
            ..Self::default()
        }
    }

    /// Issue the first request against the configured default repository.
    ///
    /// Only the first call does anything.
    pub fn initialize(&mut self) -> Option<AnalysisRequest> {
        if self.initialized {
            return None;
        }
        self.initialized = true;

        match self.default_repo_url.clone() {
            Some(url) => self.request_analysis(&url),
            None => {
                debug!("no default repository configured, waiting for input");
                None
            }
        }
    }

    /// Start analysing `repo_url`. Blank input is ignored.
    pub fn request_analysis(&mut self, repo_url: &str) -> Option<AnalysisRequest> {
        let url = repo_url.trim();
        if url.is_empty() {
            debug!("ignoring blank repository url");
            return None;
        }

        self.latest_seq += 1;
        self.repo_url = Some(url.to_string());
        self.error = None;
        self.state = FetchState::Loading;

        info!(seq = self.latest_seq, repo_url = url, "requesting analysis");
        Some(AnalysisRequest {
            seq: self.latest_seq,
            repo_url: url.to_string(),
        })
    }

    /// Re-request the remembered repository, if any
    pub fn sync(&mut self) -> Option<AnalysisRequest> {
        let url = self.repo_url.clone()?;
        self.request_analysis(&url)
    }

    /// Apply a finished request. Superseded requests are discarded.
    pub fn complete(
        &mut self,
        seq: u64,
        result: Result<ProgressSnapshot, FetchError>,
    ) -> Completion {
        if seq != self.latest_seq {
            debug!(seq, latest = self.latest_seq, "discarding stale analysis response");
            return Completion::Stale;
        }

        match result {
            Ok(snapshot) => {
                info!(
                    seq,
                    phases = snapshot.phases.len(),
                    tasks = snapshot.total_tasks,
                    "analysis succeeded"
                );
                if !snapshot.counters_consistent() {
                    warn!(seq, "status counters do not add up to total_tasks");
                }
                self.snapshot = Some(snapshot);
                self.error = None;
                self.state = FetchState::Success;
            }
            Err(err) => {
                warn!(seq, error = %err, "analysis failed");
                self.error = Some(err.to_string());
                self.state = FetchState::Failure;
            }
        }
        Completion::Applied
    }

    pub fn state(&self) -> FetchState {
        self.state
    }

    pub fn is_loading(&self) -> bool {
        self.state == FetchState::Loading
    }

    pub fn snapshot(&self) -> Option<&ProgressSnapshot> {
        self.snapshot.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn repo_url(&self) -> Option<&str> {
        self.repo_url.as_deref()
    }

    pub fn latest_seq(&self) -> u64 {
        self.latest_seq
    }
}
