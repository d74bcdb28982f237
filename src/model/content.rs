//! AI-generated content records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A saved piece of AI-generated content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedContent {
    /// Opaque unique id
    pub id: String,
    /// The prompt that produced this content
    pub prompt: String,
    /// The generated text
    pub text: String,
    /// Optional back-reference to the task this was drafted for
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_id: Option<String>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl GeneratedContent {
    /// Create a new record with a fresh id and creation timestamp.
    pub fn new(prompt: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: super::generate_id(),
            prompt: prompt.into(),
            text: text.into(),
            task_id: None,
            created_at: Utc::now(),
        }
    }

    /// Builder-style task back-reference.
    pub fn for_task(mut self, task_id: impl Into<String>) -> Self {
        self.task_id = Some(task_id.into());
        self
    }
}
