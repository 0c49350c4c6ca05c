//! Status taxonomy for tasks and phases
//!
//! Both enums decode from the snake_case strings the analysis service sends.
//! Anything unrecognized decodes as `Pending` so rendering stays total over
//! partially malformed snapshots.

use ratatui::style::Color;
use serde::{Deserialize, Deserializer, Serialize};
use std::cmp::Ordering;

/// Status of a single task in a Conductor plan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Completed,
    InProgress,
    #[default]
    Pending,
    Blocked,
}

impl TaskStatus {
    /// Filter menu order
    pub const ALL: [TaskStatus; 4] = [
        TaskStatus::Completed,
        TaskStatus::InProgress,
        TaskStatus::Pending,
        TaskStatus::Blocked,
    ];

    /// Parse a wire value, falling back to `Pending`
    pub fn parse(value: &str) -> Self {
        match value.trim() {
            "completed" => TaskStatus::Completed,
            "in_progress" => TaskStatus::InProgress,
            "pending" => TaskStatus::Pending,
            "blocked" => TaskStatus::Blocked,
            _ => TaskStatus::Pending,
        }
    }

    /// Position in `ALL`
    pub fn ordinal(&self) -> usize {
        match self {
            TaskStatus::Completed => 0,
            TaskStatus::InProgress => 1,
            TaskStatus::Pending => 2,
            TaskStatus::Blocked => 3,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TaskStatus::Completed => "Completed",
            TaskStatus::InProgress => "In Progress",
            TaskStatus::Pending => "Pending",
            TaskStatus::Blocked => "Blocked",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            TaskStatus::Completed => "✓",
            TaskStatus::InProgress => "◐",
            TaskStatus::Pending => "○",
            TaskStatus::Blocked => "!",
        }
    }

    /// Terminal color used for badges, chart bars and icons
    pub fn color(&self) -> Color {
        match self {
            TaskStatus::Completed => Color::Green,
            TaskStatus::InProgress => Color::Yellow,
            TaskStatus::Pending => Color::Gray,
            TaskStatus::Blocked => Color::Red,
        }
    }
}

impl<'de> Deserialize<'de> for TaskStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.map(|s| TaskStatus::parse(&s)).unwrap_or_default())
    }
}

impl Ord for TaskStatus {
    fn cmp(&self, other: &Self) -> Ordering {
        self.ordinal().cmp(&other.ordinal())
    }
}

impl PartialOrd for TaskStatus {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Status of a phase or track. Phases are never blocked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PhaseStatus {
    Completed,
    InProgress,
    #[default]
    Pending,
}

impl PhaseStatus {
    pub fn parse(value: &str) -> Self {
        match value.trim() {
            "completed" => PhaseStatus::Completed,
            "in_progress" => PhaseStatus::InProgress,
            _ => PhaseStatus::Pending,
        }
    }

    /// Uppercase badge shown next to a phase in the timeline
    pub fn badge(&self) -> &'static str {
        match self {
            PhaseStatus::Completed => "COMPLETED",
            PhaseStatus::InProgress => "IN PROGRESS",
            PhaseStatus::Pending => "PENDING",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            PhaseStatus::Completed => "✓",
            PhaseStatus::InProgress => "◐",
            PhaseStatus::Pending => "○",
        }
    }

    pub fn color(&self) -> Color {
        match self {
            PhaseStatus::Completed => Color::Green,
            PhaseStatus::InProgress => Color::Yellow,
            PhaseStatus::Pending => Color::DarkGray,
        }
    }

    pub fn is_active(&self) -> bool {
        *self == PhaseStatus::InProgress
    }
}

impl<'de> Deserialize<'de> for PhaseStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.map(|s| PhaseStatus::parse(&s)).unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_status_parse_known_values() {
        assert_eq!(TaskStatus::parse("completed"), TaskStatus::Completed);
        assert_eq!(TaskStatus::parse("in_progress"), TaskStatus::InProgress);
        assert_eq!(TaskStatus::parse("pending"), TaskStatus::Pending);
        assert_eq!(TaskStatus::parse("blocked"), TaskStatus::Blocked);
    }

    #[test]
    fn test_task_status_unknown_falls_back_to_pending() {
        assert_eq!(TaskStatus::parse("unknown_value"), TaskStatus::Pending);
        assert_eq!(TaskStatus::parse(""), TaskStatus::Pending);

        let status: TaskStatus = serde_json::from_str("\"unknown_value\"").unwrap();
        assert_eq!(status, TaskStatus::Pending);

        let status: TaskStatus = serde_json::from_str("null").unwrap();
        assert_eq!(status, TaskStatus::Pending);
    }

    #[test]
    fn test_task_status_order_matches_menu_order() {
        let ordinals: Vec<usize> = TaskStatus::ALL.iter().map(|s| s.ordinal()).collect();
        assert_eq!(ordinals, vec![0, 1, 2, 3]);

        let mut shuffled = vec![TaskStatus::Blocked, TaskStatus::Completed, TaskStatus::Pending];
        shuffled.sort();
        assert_eq!(
            shuffled,
            vec![TaskStatus::Completed, TaskStatus::Pending, TaskStatus::Blocked]
        );
    }

    #[test]
    fn test_phase_status_never_blocked() {
        assert_eq!(PhaseStatus::parse("blocked"), PhaseStatus::Pending);
        let status: PhaseStatus = serde_json::from_str("\"in_progress\"").unwrap();
        assert_eq!(status, PhaseStatus::InProgress);
        assert!(status.is_active());
        assert_eq!(PhaseStatus::Completed.badge(), "COMPLETED");
    }

    #[test]
    fn test_task_status_serializes_snake_case() {
        let json = serde_json::to_string(&TaskStatus::InProgress).unwrap();
        assert_eq!(json, "\"in_progress\"");
    }
}
