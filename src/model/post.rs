//! Scheduled social post records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A social post draft or scheduled entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialPost {
    /// Opaque unique id
    pub id: String,
    /// Target platform
    pub platform: SocialPlatform,
    /// Post body (required, non-empty)
    pub text_content: String,
    /// When the post should go out
    pub scheduled_at: DateTime<Utc>,
    /// Lifecycle status
    pub status: SocialPostStatus,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last-modified timestamp
    pub updated_at: DateTime<Utc>,
}

impl SocialPost {
    /// Create a new draft post with a fresh id.
    pub fn new(
        platform: SocialPlatform,
        text_content: impl Into<String>,
        scheduled_at: DateTime<Utc>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: super::generate_id(),
            platform,
            text_content: text_content.into(),
            scheduled_at,
            status: SocialPostStatus::Draft,
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether the body exceeds the platform's character limit.
    pub fn over_limit(&self) -> bool {
        self.text_content.chars().count() > self.platform.char_limit()
    }
}

/// Supported social platforms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SocialPlatform {
    #[default]
    #[serde(rename = "X (Twitter)")]
    X,
    #[serde(rename = "LinkedIn")]
    LinkedIn,
    Instagram,
}

impl SocialPlatform {
    /// All platforms in display order.
    pub const ALL: [Self; 3] = [Self::X, Self::LinkedIn, Self::Instagram];

    /// Display label.
    pub fn label(self) -> &'static str {
        match self {
            Self::X => "X (Twitter)",
            Self::LinkedIn => "LinkedIn",
            Self::Instagram => "Instagram",
        }
    }

    /// Advisory character limit for post bodies.
    pub fn char_limit(self) -> usize {
        match self {
            Self::X => 280,
            Self::LinkedIn => 3000,
            Self::Instagram => 2200,
        }
    }
}

/// Social post lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SocialPostStatus {
    #[default]
    Draft,
    Scheduled,
    // Posted and Error are reserved for future platform integration; posts
    // never reach them without a real publishing backend.
    Posted,
    Error,
}

impl SocialPostStatus {
    /// All statuses in lifecycle order.
    pub const ALL: [Self; 4] = [Self::Draft, Self::Scheduled, Self::Posted, Self::Error];

    /// Display label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Draft => "Draft",
            Self::Scheduled => "Scheduled",
            Self::Posted => "Posted",
            Self::Error => "Error",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platform_char_limits() {
        assert_eq!(SocialPlatform::X.char_limit(), 280);
        assert_eq!(SocialPlatform::LinkedIn.char_limit(), 3000);
        assert_eq!(SocialPlatform::Instagram.char_limit(), 2200);
    }

    #[test]
    fn test_over_limit() {
        let short = SocialPost::new(SocialPlatform::X, "hello", Utc::now());
        assert!(!short.over_limit());

        let long = SocialPost::new(SocialPlatform::X, "x".repeat(281), Utc::now());
        assert!(long.over_limit());
    }

    #[test]
    fn test_platform_serializes_with_legacy_label() {
        let json = serde_json::to_string(&SocialPlatform::X).unwrap();
        assert_eq!(json, r#""X (Twitter)""#);
        let back: SocialPlatform = serde_json::from_str(&json).unwrap();
        assert_eq!(back, SocialPlatform::X);
    }
}
