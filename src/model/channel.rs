//! Marketing channel records.

use serde::{Deserialize, Serialize};

/// A marketing channel (where content ends up).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Channel {
    /// Opaque unique id
    pub id: String,
    /// Channel name (required, non-empty)
    pub name: String,
    /// Channel category
    #[serde(rename = "type")]
    pub channel_type: ChannelType,
    /// Optional platform label (e.g. "Instagram", "Substack")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
    /// Optional free-form description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Channel {
    /// Create a new channel with a fresh id.
    pub fn new(name: impl Into<String>, channel_type: ChannelType) -> Self {
        Self {
            id: super::generate_id(),
            name: name.into(),
            channel_type,
            platform: None,
            description: None,
        }
    }

    /// Builder-style platform label.
    pub fn with_platform(mut self, platform: impl Into<String>) -> Self {
        self.platform = Some(platform.into());
        self
    }
}

/// Marketing channel category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ChannelType {
    #[serde(rename = "Social Media")]
    SocialMedia,
    Blog,
    Email,
    Ads,
    Video,
    Podcast,
    #[default]
    Other,
}

impl ChannelType {
    /// All channel categories in display order.
    pub const ALL: [Self; 7] = [
        Self::SocialMedia,
        Self::Blog,
        Self::Email,
        Self::Ads,
        Self::Video,
        Self::Podcast,
        Self::Other,
    ];

    /// Display label.
    pub fn label(self) -> &'static str {
        match self {
            Self::SocialMedia => "Social Media",
            Self::Blog => "Blog",
            Self::Email => "Email",
            Self::Ads => "Ads",
            Self::Video => "Video",
            Self::Podcast => "Podcast",
            Self::Other => "Other",
        }
    }
}
