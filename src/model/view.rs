//! Derived view-state
//!
//! Pure functions turning a snapshot plus the current filter selection into
//! what the panels render. None of them fail on empty input.

use super::snapshot::{Phase, ProgressSnapshot, Task};
use super::status::TaskStatus;
use std::collections::{BTreeSet, HashSet};

/// A task paired with the name of the phase it belongs to
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TaskRow<'a> {
    pub task: &'a Task,
    pub phase_name: &'a str,
}

impl TaskRow<'_> {
    pub fn status(&self) -> TaskStatus {
        self.task.status
    }
}

/// Status and phase selections for the task table.
///
/// An empty set means "no filtering" for that dimension.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFilter {
    pub statuses: BTreeSet<TaskStatus>,
    pub phases: BTreeSet<String>,
}

impl TaskFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle_status(&mut self, status: TaskStatus) {
        if !self.statuses.remove(&status) {
            self.statuses.insert(status);
        }
    }

    pub fn toggle_phase(&mut self, phase: &str) {
        if !self.phases.remove(phase) {
            self.phases.insert(phase.to_string());
        }
    }

    pub fn clear(&mut self) {
        self.statuses.clear();
        self.phases.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.statuses.is_empty() && self.phases.is_empty()
    }

    pub fn matches(&self, row: &TaskRow<'_>) -> bool {
        let status_match = self.statuses.is_empty() || self.statuses.contains(&row.status());
        let phase_match = self.phases.is_empty() || self.phases.contains(row.phase_name);
        status_match && phase_match
    }
}

/// All tasks in phase order, then task order within each phase
pub fn flatten_tasks(phases: &[Phase]) -> impl Iterator<Item = TaskRow<'_>> + '_ {
    phases.iter().flat_map(|phase| {
        phase.tasks.iter().map(move |task| TaskRow {
            task,
            phase_name: phase.name.as_str(),
        })
    })
}

/// Phase names in first-seen order, without duplicates
pub fn distinct_phase_names<'a, I>(rows: I) -> Vec<&'a str>
where
    I: IntoIterator<Item = TaskRow<'a>>,
{
    let mut seen = HashSet::new();
    rows.into_iter()
        .map(|row| row.phase_name)
        .filter(|name| seen.insert(*name))
        .collect()
}

/// Rows passing both the status and the phase filter
pub fn apply_filters<'a, I>(rows: I, filter: &TaskFilter) -> Vec<TaskRow<'a>>
where
    I: IntoIterator<Item = TaskRow<'a>>,
{
    rows.into_iter().filter(|row| filter.matches(row)).collect()
}

/// Non-zero `(status, count)` pairs from the snapshot counters, in menu order
pub fn status_distribution(snapshot: &ProgressSnapshot) -> Vec<(TaskStatus, u32)> {
    TaskStatus::ALL
        .iter()
        .map(|status| (*status, snapshot.count_for(*status)))
        .filter(|(_, count)| *count > 0)
        .collect()
}

/// Completed over total; `0.0` for a phase without tasks
pub fn phase_completion_ratio(phase: &Phase) -> f64 {
    let total = phase.total_task_count();
    if total == 0 {
        return 0.0;
    }
    phase.completed_task_count() as f64 / total as f64
}

/// Split `width` cells into per-status segment widths.
///
/// The denominator is the larger of `total_tasks` and the counter sum, so
/// inconsistent counters never overflow the bar.
pub fn completion_segments(snapshot: &ProgressSnapshot, width: u16) -> Vec<(TaskStatus, u16)> {
    let distribution = status_distribution(snapshot);
    let sum: u64 = distribution.iter().map(|(_, c)| u64::from(*c)).sum();
    let denominator = sum.max(u64::from(snapshot.total_tasks));
    if denominator == 0 || width == 0 {
        return Vec::new();
    }

    let mut used: u64 = 0;
    distribution
        .into_iter()
        .map(|(status, count)| {
            let cells = u64::from(count) * u64::from(width) / denominator;
            let cells = cells.min(u64::from(width) - used);
            used += cells;
            (status, cells as u16)
        })
        .filter(|(_, cells)| *cells > 0)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::status::PhaseStatus;

    fn task(name: &str, status: TaskStatus) -> Task {
        Task {
            name: name.to_string(),
            status,
            commit_sha: None,
            subtasks: Vec::new(),
        }
    }

    fn phase(name: &str, tasks: Vec<Task>) -> Phase {
        Phase {
            name: name.to_string(),
            status: PhaseStatus::Pending,
            tasks,
        }
    }

    fn sample_phases() -> Vec<Phase> {
        vec![
            phase(
                "Phase 1",
                vec![
                    task("a", TaskStatus::Completed),
                    task("b", TaskStatus::InProgress),
                ],
            ),
            phase("Phase 2", vec![]),
            phase(
                "Phase 3",
                vec![
                    task("c", TaskStatus::Pending),
                    task("d", TaskStatus::Blocked),
                    task("e", TaskStatus::Completed),
                ],
            ),
        ]
    }

    #[test]
    fn test_flatten_tasks_preserves_order_and_attribution() {
        let phases = sample_phases();
        let rows: Vec<(&str, &str)> = flatten_tasks(&phases)
            .map(|r| (r.phase_name, r.task.name.as_str()))
            .collect();

        assert_eq!(
            rows,
            vec![
                ("Phase 1", "a"),
                ("Phase 1", "b"),
                ("Phase 3", "c"),
                ("Phase 3", "d"),
                ("Phase 3", "e"),
            ]
        );
    }

    #[test]
    fn test_flatten_tasks_empty() {
        assert_eq!(flatten_tasks(&[]).count(), 0);
    }

    #[test]
    fn test_distinct_phase_names_first_seen_order() {
        let phases = vec![
            phase("Beta", vec![task("1", TaskStatus::Pending)]),
            phase("Alpha", vec![task("2", TaskStatus::Pending)]),
            phase("Beta", vec![task("3", TaskStatus::Pending)]),
        ];
        let names = distinct_phase_names(flatten_tasks(&phases));
        assert_eq!(names, vec!["Beta", "Alpha"]);
    }

    #[test]
    fn test_distinct_phase_names_skips_empty_phases() {
        let phases = sample_phases();
        let names = distinct_phase_names(flatten_tasks(&phases));
        assert_eq!(names, vec!["Phase 1", "Phase 3"]);
    }

    #[test]
    fn test_empty_filter_is_identity() {
        let phases = sample_phases();
        let all: Vec<TaskRow> = flatten_tasks(&phases).collect();
        let filtered = apply_filters(flatten_tasks(&phases), &TaskFilter::new());
        assert_eq!(filtered, all);
    }

    #[test]
    fn test_status_filter_only_keeps_members() {
        let phases = sample_phases();
        let mut filter = TaskFilter::new();
        filter.toggle_status(TaskStatus::Completed);
        filter.toggle_status(TaskStatus::Blocked);

        let filtered = apply_filters(flatten_tasks(&phases), &filter);
        assert_eq!(filtered.len(), 3);
        assert!(filtered
            .iter()
            .all(|r| matches!(r.status(), TaskStatus::Completed | TaskStatus::Blocked)));
    }

    #[test]
    fn test_status_and_phase_filters_are_conjunctive() {
        let phases = sample_phases();
        let mut filter = TaskFilter::new();
        filter.toggle_status(TaskStatus::Completed);
        filter.toggle_phase("Phase 3");

        let filtered = apply_filters(flatten_tasks(&phases), &filter);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].task.name, "e");
        assert_eq!(filtered[0].phase_name, "Phase 3");
    }

    #[test]
    fn test_filter_toggle_removes_selection() {
        let mut filter = TaskFilter::new();
        filter.toggle_status(TaskStatus::Pending);
        filter.toggle_phase("Phase 1");
        assert!(!filter.is_empty());

        filter.toggle_status(TaskStatus::Pending);
        filter.toggle_phase("Phase 1");
        assert!(filter.is_empty());
    }

    #[test]
    fn test_unknown_status_is_filtered_as_pending() {
        let json = r#"[{"name": "P", "status": "pending", "tasks": [{"name": "x", "status": "unknown_value"}]}]"#;
        let phases: Vec<Phase> = serde_json::from_str(json).unwrap();
        let mut filter = TaskFilter::new();
        filter.toggle_status(TaskStatus::Pending);

        let filtered = apply_filters(flatten_tasks(&phases), &filter);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].status(), TaskStatus::Pending);
    }

    #[test]
    fn test_status_distribution_omits_zero_counts() {
        let snapshot = ProgressSnapshot {
            total_tasks: 10,
            completed_tasks: 6,
            in_progress_tasks: 2,
            pending_tasks: 2,
            blocked_tasks: 0,
            ..Default::default()
        };

        let distribution = status_distribution(&snapshot);
        assert_eq!(
            distribution,
            vec![
                (TaskStatus::Completed, 6),
                (TaskStatus::InProgress, 2),
                (TaskStatus::Pending, 2),
            ]
        );
    }

    #[test]
    fn test_status_distribution_sum_matches_counters() {
        let snapshot = ProgressSnapshot {
            total_tasks: 3,
            completed_tasks: 0,
            in_progress_tasks: 5,
            pending_tasks: 0,
            blocked_tasks: 1,
            ..Default::default()
        };
        let distribution = status_distribution(&snapshot);
        assert!(distribution.iter().all(|(_, c)| *c > 0));
        let sum: u32 = distribution.iter().map(|(_, c)| c).sum();
        assert_eq!(sum, 6);
    }

    #[test]
    fn test_status_distribution_empty_snapshot() {
        assert!(status_distribution(&ProgressSnapshot::default()).is_empty());
    }

    #[test]
    fn test_phase_completion_ratio() {
        assert_eq!(phase_completion_ratio(&phase("empty", vec![])), 0.0);

        let done = phase(
            "done",
            vec![task("a", TaskStatus::Completed), task("b", TaskStatus::Completed)],
        );
        assert_eq!(phase_completion_ratio(&done), 1.0);

        let phases = sample_phases();
        let ratio = phase_completion_ratio(&phases[2]);
        assert!((ratio - 1.0 / 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_completion_segments_fit_width() {
        let snapshot = ProgressSnapshot {
            total_tasks: 10,
            completed_tasks: 6,
            in_progress_tasks: 2,
            pending_tasks: 2,
            ..Default::default()
        };
        let segments = completion_segments(&snapshot, 20);
        assert_eq!(
            segments,
            vec![
                (TaskStatus::Completed, 12),
                (TaskStatus::InProgress, 4),
                (TaskStatus::Pending, 4),
            ]
        );
    }

    #[test]
    fn test_completion_segments_inconsistent_counters_never_overflow() {
        let snapshot = ProgressSnapshot {
            total_tasks: 2,
            completed_tasks: 4,
            blocked_tasks: 4,
            ..Default::default()
        };
        let segments = completion_segments(&snapshot, 10);
        let used: u16 = segments.iter().map(|(_, w)| w).sum();
        assert!(used <= 10);
        assert!(completion_segments(&ProgressSnapshot::default(), 10).is_empty());
    }
}
