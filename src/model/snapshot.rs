//! Data models for a Conductor progress snapshot
//!
//! A snapshot is what the analysis service returns for one repository.
//! Every field has a default so partially populated responses still decode.

use super::status::{PhaseStatus, TaskStatus};
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Deserializer, Serialize};

/// One fetched view of a repository's progress
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProgressSnapshot {
    #[serde(default)]
    pub owner: String,
    #[serde(default)]
    pub repo_name: String,
    #[serde(default)]
    pub product_name: Option<String>,
    #[serde(default)]
    pub product_description: Option<String>,
    #[serde(default)]
    pub repo_url: String,
    #[serde(default)]
    pub total_tasks: u32,
    #[serde(default)]
    pub completed_tasks: u32,
    #[serde(default)]
    pub in_progress_tasks: u32,
    #[serde(default)]
    pub pending_tasks: u32,
    #[serde(default)]
    pub blocked_tasks: u32,
    /// Percentage reported by the service, rounded and clamped to 0..=100
    #[serde(default, deserialize_with = "deserialize_percent")]
    pub overall_completion: u8,
    #[serde(default)]
    pub last_synced: String,
    #[serde(default)]
    pub phases: Vec<Phase>,
    #[serde(default)]
    pub tracks: Vec<Track>,
    /// Newest first
    #[serde(default)]
    pub commits: Vec<Commit>,
}

/// A named development stage
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Phase {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub status: PhaseStatus,
    #[serde(default)]
    pub tasks: Vec<Task>,
}

/// An individual unit of work
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Task {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub status: TaskStatus,
    #[serde(default)]
    pub commit_sha: Option<String>,
    #[serde(default)]
    pub subtasks: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Commit {
    #[serde(default)]
    pub sha: String,
    #[serde(default)]
    pub full_sha: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub is_conductor: bool,
}

/// A Conductor track listed in tracks.md
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Track {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub path: String,
    #[serde(default)]
    pub status: PhaseStatus,
}

impl ProgressSnapshot {
    /// Name shown in headers; falls back to the repository name
    pub fn display_name(&self) -> &str {
        match self.product_name.as_deref() {
            Some(name) if !name.trim().is_empty() => name,
            _ => &self.repo_name,
        }
    }

    /// `owner/repo` slug
    pub fn slug(&self) -> String {
        format!("{}/{}", self.owner, self.repo_name)
    }

    /// Count for a single status, read from the aggregate counters
    pub fn count_for(&self, status: TaskStatus) -> u32 {
        match status {
            TaskStatus::Completed => self.completed_tasks,
            TaskStatus::InProgress => self.in_progress_tasks,
            TaskStatus::Pending => self.pending_tasks,
            TaskStatus::Blocked => self.blocked_tasks,
        }
    }

    /// Whether the per-status counters add up to `total_tasks`
    pub fn counters_consistent(&self) -> bool {
        let sum: u64 = TaskStatus::ALL
            .iter()
            .map(|s| u64::from(self.count_for(*s)))
            .sum();
        sum == u64::from(self.total_tasks)
    }
}

impl Phase {
    pub fn completed_task_count(&self) -> usize {
        self.tasks
            .iter()
            .filter(|t| t.status == TaskStatus::Completed)
            .count()
    }

    pub fn total_task_count(&self) -> usize {
        self.tasks.len()
    }

    /// Phases without tasks have no detail to expand
    pub fn is_expandable(&self) -> bool {
        !self.tasks.is_empty()
    }
}

impl Commit {
    /// Parsed commit timestamp, if the service sent a valid RFC 3339 date
    pub fn timestamp(&self) -> Option<DateTime<FixedOffset>> {
        DateTime::parse_from_rfc3339(&self.date).ok()
    }

    /// Stable key for list rendering
    pub fn key(&self) -> &str {
        if self.full_sha.is_empty() {
            &self.sha
        } else {
            &self.full_sha
        }
    }
}

fn deserialize_percent<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<f64>::deserialize(deserializer)?;
    let value = raw.filter(|v| v.is_finite()).unwrap_or(0.0);
    Ok(value.round().clamp(0.0, 100.0) as u8)
}
