//! AI content generation.
//!
//! Wraps one hosted text-generation endpoint (Gemini) behind a small domain
//! client: drafting content ideas, platform-shaped social copy, and task
//! priority suggestions. Calls are single-shot with no retry and no
//! streaming; a missing credential fails every call fast without touching
//! the network.

mod gemini;

pub use gemini::GeminiProvider;

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::model::{Priority, SocialPlatform};

/// Fixed message shown when the credential is absent.
pub const NOT_CONFIGURED_MESSAGE: &str =
    "GEMINI_API_KEY is not configured. AI features are unavailable.";

/// AI error types.
#[derive(Debug, thiserror::Error)]
pub enum AiError {
    #[error("{NOT_CONFIGURED_MESSAGE}")]
    NotConfigured,

    #[error("{context} Details: {message}")]
    Api { context: String, message: String },
}

/// Trait over text-generation backends: one prompt in, plain text out.
#[async_trait]
pub trait TextProvider: Send + Sync {
    async fn generate(&self, prompt: &str) -> anyhow::Result<String>;

    /// Provider name for logging.
    fn name(&self) -> &str;
}

/// Domain-level content-generation client.
pub struct ContentClient {
    provider: Box<dyn TextProvider>,
}

impl ContentClient {
    /// Build the client from the environment. Fails with
    /// [`AiError::NotConfigured`] when `GEMINI_API_KEY` is absent.
    pub fn from_env() -> Result<Self, AiError> {
        let provider = GeminiProvider::from_env()?;
        Ok(Self::with_provider(Box::new(provider)))
    }

    /// Build the client over an explicit provider (used by tests).
    pub fn with_provider(provider: Box<dyn TextProvider>) -> Self {
        Self { provider }
    }

    /// Active provider name.
    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// Draft free-form content ideas from a prompt.
    pub async fn generate_content_ideas(&self, prompt: &str) -> Result<String, AiError> {
        self.call(prompt, "Failed to generate content ideas.").await
    }

    /// Draft a post body shaped for one social platform.
    pub async fn generate_platform_content(
        &self,
        base_prompt: &str,
        platform: SocialPlatform,
        topic: &str,
        tone: Option<&str>,
        keywords: Option<&str>,
    ) -> Result<String, AiError> {
        let prompt = platform_prompt(base_prompt, platform, topic, tone, keywords);
        let context = format!("Failed to generate content for {}.", platform.label());
        self.call(&prompt, context).await
    }

    /// Suggest a priority for a task.
    ///
    /// The reply is validated against the closed [`Priority`] enumeration;
    /// anything unrecognized coerces to Medium. That coercion is policy, not
    /// an error.
    pub async fn suggest_task_priority(
        &self,
        title: &str,
        description: Option<&str>,
        due_date: Option<NaiveDate>,
    ) -> Result<Priority, AiError> {
        let prompt = priority_prompt(title, description, due_date);
        let reply = self.call(&prompt, "Failed to suggest task priority.").await?;
        Ok(Priority::from_label(&reply).unwrap_or_else(|| {
            tracing::warn!(reply = %reply.trim(), "Unrecognized priority suggestion, defaulting to Medium");
            Priority::Medium
        }))
    }

    async fn call(&self, prompt: &str, context: impl Into<String>) -> Result<String, AiError> {
        self.provider.generate(prompt).await.map_err(|e| AiError::Api {
            context: context.into(),
            message: e.to_string(),
        })
    }
}

/// Compose the platform-shaped generation prompt.
fn platform_prompt(
    base_prompt: &str,
    platform: SocialPlatform,
    topic: &str,
    tone: Option<&str>,
    keywords: Option<&str>,
) -> String {
    let instructions = match platform {
        SocialPlatform::X => {
            "Craft a concise and engaging post for X (formerly Twitter). \
             Use relevant hashtags. Keep it under 280 characters."
        }
        SocialPlatform::LinkedIn => {
            "Develop a professional post for LinkedIn. Focus on insights, \
             industry value, or thought leadership. Encourage discussion."
        }
        SocialPlatform::Instagram => {
            "Create a compelling caption for an Instagram post. It should be \
             visual-friendly and encourage engagement. Include relevant \
             hashtags and emojis."
        }
    };

    let mut prompt = format!("Platform: {}\nTopic: {}\n", platform.label(), topic);
    if let Some(tone) = tone {
        prompt.push_str(&format!("Desired Tone: {}\n", tone));
    }
    if let Some(keywords) = keywords {
        prompt.push_str(&format!("Keywords to include: {}\n", keywords));
    }
    prompt.push_str(&format!(
        "User's Core Request: {}\n\n{}\nPlease provide the content directly.",
        base_prompt, instructions
    ));
    prompt
}

/// Compose the priority-suggestion prompt.
fn priority_prompt(title: &str, description: Option<&str>, due_date: Option<NaiveDate>) -> String {
    let mut prompt = format!(
        "Analyze the following task details and suggest a priority level \
         (High, Medium, or Low).\nConsider urgency (due date), importance \
         (implied by title/description), and potential impact.\n\n\
         Task Title: \"{}\"\n",
        title
    );
    if let Some(description) = description {
        prompt.push_str(&format!("Description: \"{}\"\n", description));
    }
    match due_date {
        Some(date) => prompt.push_str(&format!("Due Date: \"{}\"\n", date.format("%Y-%m-%d"))),
        None => prompt.push_str("No specific due date.\n"),
    }
    prompt.push_str("\nRespond with only one word: High, Medium, or Low.");
    prompt
}
