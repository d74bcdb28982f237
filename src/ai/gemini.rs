//! Gemini API integration.
//!
//! Implements the TextProvider trait over the `generateContent` REST
//! endpoint.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::{AiError, TextProvider};

const DEFAULT_MODEL: &str = "gemini-2.0-flash";
const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Gemini text-generation provider.
pub struct GeminiProvider {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiProvider {
    /// Create a provider from the `GEMINI_API_KEY` environment variable.
    pub fn from_env() -> Result<Self, AiError> {
        let api_key = std::env::var("GEMINI_API_KEY").map_err(|_| AiError::NotConfigured)?;
        Ok(Self::new(api_key))
    }

    /// Create a provider with an explicit key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Use a specific model.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Use a custom base URL (for proxies or compatible APIs).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    async fn request(&self, prompt: &str) -> anyhow::Result<String> {
        let request = GenerateContentRequest {
            contents: vec![Content { parts: vec![Part { text: prompt.to_string() }] }],
            generation_config: Some(GenerationConfig {
                // Plain text keeps the priority replies trivially parseable
                response_mime_type: "text/plain".to_string(),
            }),
        };

        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url, self.model, self.api_key
        );

        let response = self
            .client
            .post(url)
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Gemini API error ({}): {}", status, body);
        }

        let response: GenerateContentResponse = response.json().await?;

        let text: String = response
            .candidates
            .first()
            .map(|candidate| {
                candidate
                    .content
                    .parts
                    .iter()
                    .map(|part| part.text.as_str())
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        if text.is_empty() {
            anyhow::bail!("No response from Gemini");
        }
        Ok(text)
    }
}

#[async_trait]
impl TextProvider for GeminiProvider {
    async fn generate(&self, prompt: &str) -> anyhow::Result<String> {
        self.request(prompt).await
    }

    fn name(&self) -> &str {
        "gemini"
    }
}

// Request/Response types

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: String,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<Part>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial(gemini_env)]
    fn test_provider_requires_api_key() {
        let original = std::env::var("GEMINI_API_KEY").ok();
        std::env::remove_var("GEMINI_API_KEY");

        let result = GeminiProvider::from_env();

        if let Some(val) = original {
            std::env::set_var("GEMINI_API_KEY", val);
        }

        assert!(matches!(result, Err(AiError::NotConfigured)));
    }

    #[test]
    #[serial(gemini_env)]
    fn test_provider_builders() {
        let provider = GeminiProvider::new("test-key")
            .with_model("gemini-2.0-pro")
            .with_base_url("http://localhost:9999");
        assert_eq!(provider.model, "gemini-2.0-pro");
        assert_eq!(provider.base_url, "http://localhost:9999");
    }

    #[test]
    fn test_response_parsing() {
        let json = r#"{
            "candidates": [
                { "content": { "parts": [ { "text": "Hello " }, { "text": "world" } ] } }
            ]
        }"#;
        let parsed: GenerateContentResponse = serde_json::from_str(json).unwrap();
        let text: String = parsed.candidates[0]
            .content
            .parts
            .iter()
            .map(|p| p.text.as_str())
            .collect();
        assert_eq!(text, "Hello world");
    }
}
