//! Task filtering and sorting for the task manager view.
//!
//! Pure computations over the full collection; at single-user scale there is
//! no need for indexes or incremental updates.

use std::cmp::Ordering;

use crate::model::{Priority, Task, TaskStatus};

/// Sort key for the task list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TaskSort {
    /// Newest first
    #[default]
    CreatedAt,
    /// Earliest due date first, undated tasks last
    DueDate,
    /// High before Medium before Low
    Priority,
}

impl TaskSort {
    /// All sort keys in cycling order.
    pub const ALL: [Self; 3] = [Self::CreatedAt, Self::DueDate, Self::Priority];

    /// Display label.
    pub fn label(self) -> &'static str {
        match self {
            Self::CreatedAt => "Created",
            Self::DueDate => "Due Date",
            Self::Priority => "Priority",
        }
    }

    /// Next sort key (wraps around).
    pub fn next(self) -> Self {
        match self {
            Self::CreatedAt => Self::DueDate,
            Self::DueDate => Self::Priority,
            Self::Priority => Self::CreatedAt,
        }
    }
}

/// A filter specification plus sort key for the task list.
#[derive(Debug, Clone, Default)]
pub struct TaskQuery {
    /// Case-insensitive substring matched against title and description
    pub search: String,
    /// Exact priority filter
    pub priority: Option<Priority>,
    /// Exact status filter
    pub status: Option<TaskStatus>,
    /// Exact channel filter
    pub channel_id: Option<String>,
    /// Sort key
    pub sort: TaskSort,
}

impl TaskQuery {
    /// Whether any filter is active (search text or an equality filter).
    pub fn has_filters(&self) -> bool {
        !self.search.trim().is_empty()
            || self.priority.is_some()
            || self.status.is_some()
            || self.channel_id.is_some()
    }

    /// Check whether a task passes every active filter.
    pub fn matches(&self, task: &Task) -> bool {
        let needle = self.search.trim().to_lowercase();
        if !needle.is_empty() {
            let in_title = task.title.to_lowercase().contains(&needle);
            let in_description = task
                .description
                .as_ref()
                .map(|d| d.to_lowercase().contains(&needle))
                .unwrap_or(false);
            if !in_title && !in_description {
                return false;
            }
        }

        if let Some(priority) = self.priority {
            if task.priority != priority {
                return false;
            }
        }
        if let Some(status) = self.status {
            if task.status != status {
                return false;
            }
        }
        if let Some(ref channel_id) = self.channel_id {
            if task.channel_id.as_deref() != Some(channel_id.as_str()) {
                return false;
            }
        }

        true
    }

    /// Apply the full query: filter, then sort.
    pub fn apply<'a>(&self, tasks: &'a [Task]) -> Vec<&'a Task> {
        let mut result: Vec<&Task> = tasks.iter().filter(|t| self.matches(t)).collect();
        result.sort_by(|a, b| compare(self.sort, a, b));
        result
    }
}

/// Comparator for a sort key. Every key falls back to title ascending so
/// ordering is deterministic regardless of input order.
pub fn compare(sort: TaskSort, a: &Task, b: &Task) -> Ordering {
    let primary = match sort {
        TaskSort::CreatedAt => b.created_at.cmp(&a.created_at),
        TaskSort::DueDate => match (a.due_date, b.due_date) {
            (Some(lhs), Some(rhs)) => lhs.cmp(&rhs),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        },
        TaskSort::Priority => a.priority.rank().cmp(&b.priority.rank()),
    };
    primary.then_with(|| a.title.cmp(&b.title))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone, Utc};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn fixture() -> Vec<Task> {
        let mut launch = Task::new("Launch campaign")
            .with_priority(Priority::High)
            .with_due_date(date(2024, 6, 14))
            .with_channel("ch-1");
        launch.description = Some("Q3 product launch across socials".to_string());
        launch.created_at = Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap();

        let mut digest = Task::new("Write newsletter digest")
            .with_priority(Priority::Medium)
            .with_due_date(date(2024, 6, 10));
        digest.created_at = Utc.with_ymd_and_hms(2024, 6, 3, 9, 0, 0).unwrap();

        let mut audit = Task::new("Audit ad spend")
            .with_priority(Priority::Low)
            .with_status(TaskStatus::Done);
        audit.created_at = Utc.with_ymd_and_hms(2024, 6, 2, 9, 0, 0).unwrap();

        vec![launch, digest, audit]
    }

    #[test]
    fn test_search_matches_title_or_description() {
        let tasks = fixture();

        let by_title = TaskQuery { search: "newsletter".into(), ..Default::default() };
        assert_eq!(by_title.apply(&tasks).len(), 1);

        let by_description = TaskQuery { search: "SOCIALS".into(), ..Default::default() };
        let hits = by_description.apply(&tasks);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].title, "Launch campaign");

        let no_hit = TaskQuery { search: "podcast".into(), ..Default::default() };
        assert!(no_hit.apply(&tasks).is_empty());
    }

    #[test]
    fn test_equality_filters() {
        let tasks = fixture();

        let by_priority = TaskQuery { priority: Some(Priority::High), ..Default::default() };
        assert_eq!(by_priority.apply(&tasks).len(), 1);

        let by_status = TaskQuery { status: Some(TaskStatus::Done), ..Default::default() };
        assert_eq!(by_status.apply(&tasks).len(), 1);

        let by_channel = TaskQuery { channel_id: Some("ch-1".into()), ..Default::default() };
        assert_eq!(by_channel.apply(&tasks).len(), 1);

        let missing_channel = TaskQuery { channel_id: Some("ch-9".into()), ..Default::default() };
        assert!(missing_channel.apply(&tasks).is_empty());
    }

    #[test]
    fn test_sort_created_newest_first() {
        let tasks = fixture();
        let query = TaskQuery::default();
        let sorted = query.apply(&tasks);
        assert_eq!(sorted[0].title, "Write newsletter digest");
        assert_eq!(sorted[1].title, "Audit ad spend");
        assert_eq!(sorted[2].title, "Launch campaign");
    }

    #[test]
    fn test_sort_due_date_undated_last() {
        let tasks = fixture();
        let query = TaskQuery { sort: TaskSort::DueDate, ..Default::default() };
        let sorted = query.apply(&tasks);
        assert_eq!(sorted[0].title, "Write newsletter digest");
        assert_eq!(sorted[1].title, "Launch campaign");
        // Undated task sorts last
        assert_eq!(sorted[2].title, "Audit ad spend");
    }

    #[test]
    fn test_sort_priority_high_first() {
        let tasks = fixture();
        let query = TaskQuery { sort: TaskSort::Priority, ..Default::default() };
        let sorted = query.apply(&tasks);
        assert_eq!(sorted[0].priority, Priority::High);
        assert_eq!(sorted[2].priority, Priority::Low);
    }

    #[test]
    fn test_title_tiebreak() {
        let mut a = Task::new("beta");
        let mut b = Task::new("alpha");
        let shared = Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap();
        a.created_at = shared;
        b.created_at = shared;
        let tasks = vec![a, b];

        for sort in TaskSort::ALL {
            let query = TaskQuery { sort, ..Default::default() };
            let sorted = query.apply(&tasks);
            assert_eq!(sorted[0].title, "alpha", "sort key {:?}", sort);
        }
    }

    #[test]
    fn test_has_filters() {
        assert!(!TaskQuery::default().has_filters());
        assert!(!TaskQuery { search: "   ".into(), ..Default::default() }.has_filters());
        assert!(TaskQuery { search: "x".into(), ..Default::default() }.has_filters());
        assert!(TaskQuery { status: Some(TaskStatus::Todo), ..Default::default() }.has_filters());
    }
}
