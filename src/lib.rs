//! # Markhub
//!
//! A terminal dashboard for solo marketing operations.
//!
//! Markhub keeps tasks, marketing channels, scheduled social posts, and
//! AI-generated content ideas in one place, persisted as plain JSON under
//! `~/.markhub`.
//!
//! ## Features
//!
//! - **Tasks**: priorities, statuses, due dates, channel assignment
//! - **Schedule**: tasks bucketed into overdue/today/tomorrow/this week/...
//! - **Channels**: the marketing surfaces tasks are executed on
//! - **Social posts**: drafts and scheduled posts with per-platform limits
//! - **AI content**: content ideas and platform drafts via Gemini (optional)
//!
//! ## Quick Start
//!
//! ```bash
//! # Install
//! cargo install markhub
//!
//! # Open the dashboard
//! mhub
//!
//! # Or use the full name
//! markhub
//! ```

#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
// Allow common patterns that are intentional in this codebase
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::redundant_else)]
#![allow(clippy::if_not_else)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::option_if_let_else)]
#![allow(clippy::map_unwrap_or)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::cognitive_complexity)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::use_self)]

pub mod app;
pub mod model;
pub mod query;
pub mod schedule;
pub mod session;
pub mod store;
pub mod tui;

#[cfg(feature = "ai")]
pub mod ai;

#[cfg(feature = "ai")]
pub use ai::{AiError, ContentClient, GeminiProvider, TextProvider};

// Re-export commonly used types
pub use app::App;
pub use model::{
    Channel, ChannelType, GeneratedContent, Priority, SocialPlatform, SocialPost,
    SocialPostStatus, Task, TaskStatus,
};
pub use query::{TaskQuery, TaskSort};
pub use schedule::{bucket_tasks, ScheduleBoard, ScheduleBucket};
pub use session::Session;
pub use store::Store;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = "markhub";

/// Short alias
pub const APP_ALIAS: &str = "mhub";
