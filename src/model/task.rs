//! Task records.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// A marketing task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Opaque unique id
    pub id: String,
    /// Task title (required, non-empty)
    pub title: String,
    /// Optional free-form description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Calendar due date; time of day is never used for scheduling
    #[serde(default, deserialize_with = "lenient_date", skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    /// Priority level
    pub priority: Priority,
    /// Workflow status
    pub status: TaskStatus,
    /// Optional reference to a marketing channel
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel_id: Option<String>,
    /// AI-drafted content ideas, most recent first
    #[serde(default)]
    pub content_ideas: Vec<String>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl Task {
    /// Create a new task with a fresh id and creation timestamp.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: super::generate_id(),
            title: title.into(),
            description: None,
            due_date: None,
            priority: Priority::Medium,
            status: TaskStatus::Todo,
            channel_id: None,
            content_ideas: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Builder-style due date.
    pub fn with_due_date(mut self, date: NaiveDate) -> Self {
        self.due_date = Some(date);
        self
    }

    /// Builder-style priority.
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Builder-style status.
    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }

    /// Builder-style channel reference.
    pub fn with_channel(mut self, channel_id: impl Into<String>) -> Self {
        self.channel_id = Some(channel_id.into());
        self
    }

    /// Prepend a content idea (most recent first).
    pub fn add_content_idea(&mut self, idea: impl Into<String>) {
        self.content_ideas.insert(0, idea.into());
    }
}

/// Task priority level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    /// All priorities, highest first (display and cycling order).
    pub const ALL: [Self; 3] = [Self::High, Self::Medium, Self::Low];

    /// Sort rank: High sorts before Medium sorts before Low.
    pub fn rank(self) -> u8 {
        match self {
            Self::High => 0,
            Self::Medium => 1,
            Self::Low => 2,
        }
    }

    /// Display label.
    pub fn label(self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }

    /// Parse a label back into a priority. Matching is case-insensitive but
    /// closed: anything outside the three labels is rejected.
    pub fn from_label(input: &str) -> Option<Self> {
        let trimmed = input.trim();
        Self::ALL.iter().copied().find(|p| p.label().eq_ignore_ascii_case(trimmed))
    }
}

/// Task workflow status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TaskStatus {
    #[default]
    #[serde(rename = "To Do")]
    Todo,
    #[serde(rename = "In Progress")]
    InProgress,
    Done,
}

impl TaskStatus {
    /// All statuses in workflow order.
    pub const ALL: [Self; 3] = [Self::Todo, Self::InProgress, Self::Done];

    /// Display label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Todo => "To Do",
            Self::InProgress => "In Progress",
            Self::Done => "Done",
        }
    }

    /// Next status in the workflow cycle (wraps around).
    pub fn next(self) -> Self {
        match self {
            Self::Todo => Self::InProgress,
            Self::InProgress => Self::Done,
            Self::Done => Self::Todo,
        }
    }
}

/// Parse a due-date string into a calendar date.
///
/// Accepts plain `YYYY-MM-DD` as written by the task form, plus full RFC 3339
/// timestamps from older exports (the time component is discarded). Returns
/// `None` when the input does not parse.
pub fn parse_due_date(input: &str) -> Option<NaiveDate> {
    let trimmed = input.trim();
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Some(date);
    }
    DateTime::parse_from_rfc3339(trimmed).ok().map(|dt| dt.date_naive())
}

/// Lenient due-date deserializer for stored tasks.
///
/// Writes are validated upstream, so a malformed date can only come from a
/// hand-edited file; it is coerced to "no due date" rather than failing the
/// whole collection load.
fn lenient_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.and_then(|value| {
        if value.trim().is_empty() {
            return None;
        }
        let parsed = parse_due_date(&value);
        if parsed.is_none() {
            tracing::warn!(value = %value, "Unparseable due date in stored task, treating as undated");
        }
        parsed
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_from_label() {
        assert_eq!(Priority::from_label("High"), Some(Priority::High));
        assert_eq!(Priority::from_label("  medium "), Some(Priority::Medium));
        assert_eq!(Priority::from_label("LOW"), Some(Priority::Low));
        assert_eq!(Priority::from_label("Urgent"), None);
        assert_eq!(Priority::from_label(""), None);
    }

    #[test]
    fn test_priority_rank_order() {
        assert!(Priority::High.rank() < Priority::Medium.rank());
        assert!(Priority::Medium.rank() < Priority::Low.rank());
    }

    #[test]
    fn test_status_cycle() {
        assert_eq!(TaskStatus::Todo.next(), TaskStatus::InProgress);
        assert_eq!(TaskStatus::InProgress.next(), TaskStatus::Done);
        assert_eq!(TaskStatus::Done.next(), TaskStatus::Todo);
    }

    #[test]
    fn test_status_serializes_with_spaces() {
        let json = serde_json::to_string(&TaskStatus::InProgress).unwrap();
        assert_eq!(json, r#""In Progress""#);
        let back: TaskStatus = serde_json::from_str(&json).unwrap();
        assert_eq!(back, TaskStatus::InProgress);
    }

    #[test]
    fn test_parse_due_date() {
        assert_eq!(
            parse_due_date("2024-06-12"),
            Some(NaiveDate::from_ymd_opt(2024, 6, 12).unwrap())
        );
        assert_eq!(
            parse_due_date("2024-06-12T09:30:00Z"),
            Some(NaiveDate::from_ymd_opt(2024, 6, 12).unwrap())
        );
        assert_eq!(parse_due_date("next tuesday"), None);
        assert_eq!(parse_due_date(""), None);
    }

    #[test]
    fn test_malformed_stored_due_date_becomes_undated() {
        let json = r#"{
            "id": "1",
            "title": "Launch recap",
            "due_date": "not-a-date",
            "priority": "High",
            "status": "To Do",
            "created_at": "2024-06-01T00:00:00Z"
        }"#;
        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(task.due_date, None);
        assert_eq!(task.priority, Priority::High);
    }

    #[test]
    fn test_add_content_idea_prepends() {
        let mut task = Task::new("Newsletter");
        task.add_content_idea("first");
        task.add_content_idea("second");
        assert_eq!(task.content_ideas, vec!["second", "first"]);
    }
}
