//! Application state and lifecycle management.
//!
//! The `App` struct is the central state container: it owns the session,
//! the per-view cursors and forms, and the bridge to the async AI client.
//! The TUI thread stays synchronous; AI requests are spawned onto the tokio
//! runtime and deliver their outcome over an mpsc channel drained on every
//! tick. In-flight requests are independent and non-cancellable.

use std::sync::mpsc;

use chrono::{NaiveDateTime, TimeZone, Utc};

use crate::model::{
    parse_due_date, Channel, ChannelType, GeneratedContent, Priority, SocialPlatform, SocialPost,
    SocialPostStatus, Task, TaskStatus,
};
use crate::query::TaskQuery;
use crate::session::Session;
use crate::tui::Theme;

#[cfg(feature = "ai")]
use std::sync::Arc;

#[cfg(feature = "ai")]
use crate::ai::{ContentClient, NOT_CONFIGURED_MESSAGE};

/// Top-level views, shown as tabs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Dashboard,
    Tasks,
    Schedule,
    Channels,
    Posts,
    Generator,
}

impl View {
    /// All views in tab order.
    pub const ALL: [Self; 6] = [
        Self::Dashboard,
        Self::Tasks,
        Self::Schedule,
        Self::Channels,
        Self::Posts,
        Self::Generator,
    ];

    /// Tab label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::Tasks => "Tasks",
            Self::Schedule => "Schedule",
            Self::Channels => "Channels",
            Self::Posts => "Posts",
            Self::Generator => "Generator",
        }
    }

    /// Next tab (wraps).
    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|v| *v == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    /// Previous tab (wraps).
    pub fn prev(self) -> Self {
        let idx = Self::ALL.iter().position(|v| *v == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Application modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppMode {
    /// Browsing the active view
    #[default]
    Normal,
    /// Editing the task search box
    Search,
    /// Task form modal (add or edit)
    TaskForm,
    /// Channel form modal
    ChannelForm,
    /// Social post form modal
    PostForm,
    /// Delete confirmation dialog
    ConfirmDelete,
    /// Help overlay
    Help,
}

/// Outcome of one AI request, delivered back to the TUI thread.
#[derive(Debug)]
pub enum AiOutcome {
    Ideas { prompt: String, task_id: Option<String>, text: String },
    Draft { prompt: String, text: String },
    Priority { priority: Priority },
    Failed { message: String },
}

/// Task form fields in navigation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TaskField {
    #[default]
    Title,
    Description,
    DueDate,
    Priority,
    Status,
    Channel,
}

impl TaskField {
    pub const ALL: [Self; 6] = [
        Self::Title,
        Self::Description,
        Self::DueDate,
        Self::Priority,
        Self::Status,
        Self::Channel,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Title => "Title",
            Self::Description => "Description",
            Self::DueDate => "Due date (YYYY-MM-DD)",
            Self::Priority => "Priority",
            Self::Status => "Status",
            Self::Channel => "Channel",
        }
    }
}

/// State of the task form modal.
#[derive(Debug, Default)]
pub struct TaskForm {
    /// Id of the task being edited; `None` when adding
    pub editing: Option<Task>,
    pub title: String,
    pub description: String,
    pub due_date: String,
    pub priority: Priority,
    pub status: TaskStatus,
    /// Index into the channel list; `None` = no channel
    pub channel_index: Option<usize>,
    pub field: TaskField,
}

/// Channel form fields in navigation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChannelField {
    #[default]
    Name,
    Type,
    Platform,
    Description,
}

impl ChannelField {
    pub const ALL: [Self; 4] = [Self::Name, Self::Type, Self::Platform, Self::Description];

    pub fn label(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Type => "Type",
            Self::Platform => "Platform",
            Self::Description => "Description",
        }
    }
}

/// State of the channel form modal.
#[derive(Debug, Default)]
pub struct ChannelForm {
    pub editing: Option<Channel>,
    pub name: String,
    pub channel_type: ChannelType,
    pub platform: String,
    pub description: String,
    pub field: ChannelField,
}

/// Post form fields in navigation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PostField {
    #[default]
    Platform,
    Content,
    ScheduledAt,
    Status,
}

impl PostField {
    pub const ALL: [Self; 4] = [Self::Platform, Self::Content, Self::ScheduledAt, Self::Status];

    pub fn label(self) -> &'static str {
        match self {
            Self::Platform => "Platform",
            Self::Content => "Content",
            Self::ScheduledAt => "Scheduled at (YYYY-MM-DD HH:MM, UTC)",
            Self::Status => "Status",
        }
    }
}

/// State of the social post form modal.
#[derive(Debug, Default)]
pub struct PostForm {
    pub editing: Option<SocialPost>,
    pub platform: SocialPlatform,
    pub content: String,
    pub scheduled_at: String,
    pub status: SocialPostStatus,
    pub field: PostField,
}

/// Generator view fields in navigation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GeneratorField {
    #[default]
    Prompt,
    Platform,
    Topic,
    Tone,
    Keywords,
}

impl GeneratorField {
    pub const ALL: [Self; 5] =
        [Self::Prompt, Self::Platform, Self::Topic, Self::Tone, Self::Keywords];

    pub fn label(self) -> &'static str {
        match self {
            Self::Prompt => "Prompt",
            Self::Platform => "Platform",
            Self::Topic => "Topic",
            Self::Tone => "Tone",
            Self::Keywords => "Keywords",
        }
    }
}

/// State of the content generator view.
#[derive(Debug, Default)]
pub struct GeneratorForm {
    pub prompt: String,
    /// `None` = free-form ideas, `Some` = platform-shaped draft
    pub platform: Option<SocialPlatform>,
    pub topic: String,
    pub tone: String,
    pub keywords: String,
    pub field: GeneratorField,
    /// Last generated text shown in the output panel
    pub output: Option<String>,
}

/// A pending delete awaiting confirmation.
#[derive(Debug, Clone)]
pub enum PendingDelete {
    Task { id: String, title: String },
    Channel { id: String, name: String },
    Post { id: String, summary: String },
}

impl PendingDelete {
    /// One-line description for the confirmation dialog.
    pub fn describe(&self) -> String {
        match self {
            Self::Task { title, .. } => format!("Delete task \"{}\"?", title),
            Self::Channel { name, .. } => {
                format!("Delete channel \"{}\"? Tasks keep their other fields.", name)
            }
            Self::Post { summary, .. } => format!("Delete post \"{}\"?", summary),
        }
    }
}

/// Main application state.
pub struct App {
    /// The session owning all collections
    pub session: Session,

    /// Active view
    pub view: View,

    /// Current mode
    pub mode: AppMode,

    /// Current UI theme
    pub theme: Theme,

    /// Whether the application should quit
    pub should_quit: bool,

    /// Status message shown in the status bar (if any)
    pub status_message: Option<String>,

    /// Task list filter and sort
    pub query: TaskQuery,

    /// Cursor into the filtered task list
    pub tasks_selected: usize,

    /// Scroll offset in the schedule board
    pub schedule_scroll: usize,

    /// Cursor into the channel list
    pub channels_selected: usize,

    /// Cursor into the post list
    pub posts_selected: usize,

    /// Task form state
    pub task_form: TaskForm,

    /// Channel form state
    pub channel_form: ChannelForm,

    /// Post form state
    pub post_form: PostForm,

    /// Generator view state
    pub generator: GeneratorForm,

    /// Pending delete awaiting confirmation
    pub pending_delete: Option<PendingDelete>,

    /// Number of AI requests currently in flight
    pub ai_in_flight: usize,

    /// AI client; `None` when the credential is absent
    #[cfg(feature = "ai")]
    pub ai: Option<Arc<ContentClient>>,

    #[cfg(feature = "ai")]
    runtime: tokio::runtime::Handle,

    ai_tx: mpsc::Sender<AiOutcome>,
    ai_rx: mpsc::Receiver<AiOutcome>,
}

impl App {
    /// Create the application state over a loaded session.
    #[cfg(feature = "ai")]
    pub fn new(session: Session, runtime: tokio::runtime::Handle) -> Self {
        let (ai_tx, ai_rx) = mpsc::channel();
        let ai = match ContentClient::from_env() {
            Ok(client) => Some(Arc::new(client)),
            Err(e) => {
                tracing::warn!(error = %e, "AI client unavailable");
                None
            }
        };
        Self {
            session,
            view: View::default(),
            mode: AppMode::default(),
            theme: Theme::default(),
            should_quit: false,
            status_message: None,
            query: TaskQuery::default(),
            tasks_selected: 0,
            schedule_scroll: 0,
            channels_selected: 0,
            posts_selected: 0,
            task_form: TaskForm::default(),
            channel_form: ChannelForm::default(),
            post_form: PostForm::default(),
            generator: GeneratorForm::default(),
            pending_delete: None,
            ai_in_flight: 0,
            ai,
            runtime,
            ai_tx,
            ai_rx,
        }
    }

    /// Create the application state over a loaded session (AI disabled build).
    #[cfg(not(feature = "ai"))]
    pub fn new(session: Session) -> Self {
        let (ai_tx, ai_rx) = mpsc::channel();
        Self {
            session,
            view: View::default(),
            mode: AppMode::default(),
            theme: Theme::default(),
            should_quit: false,
            status_message: None,
            query: TaskQuery::default(),
            tasks_selected: 0,
            schedule_scroll: 0,
            channels_selected: 0,
            posts_selected: 0,
            task_form: TaskForm::default(),
            channel_form: ChannelForm::default(),
            post_form: PostForm::default(),
            generator: GeneratorForm::default(),
            pending_delete: None,
            ai_in_flight: 0,
            ai_tx,
            ai_rx,
        }
    }

    /// Whether AI actions are available.
    pub fn ai_available(&self) -> bool {
        #[cfg(feature = "ai")]
        {
            self.ai.is_some()
        }
        #[cfg(not(feature = "ai"))]
        {
            false
        }
    }

    /// Request the application to quit.
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Tasks visible in the task manager after filter and sort.
    pub fn visible_tasks(&self) -> Vec<&Task> {
        self.query.apply(self.session.tasks())
    }

    /// The task under the cursor in the task manager, if any.
    pub fn selected_task(&self) -> Option<&Task> {
        self.visible_tasks().get(self.tasks_selected).copied()
    }

    /// The channel under the cursor, if any.
    pub fn selected_channel(&self) -> Option<&Channel> {
        self.session.channels().get(self.channels_selected)
    }

    /// The post under the cursor, if any.
    pub fn selected_post(&self) -> Option<&SocialPost> {
        self.session.posts().get(self.posts_selected)
    }

    /// Clamp cursors after a mutation changed collection sizes.
    pub fn clamp_selections(&mut self) {
        let visible = self.visible_tasks().len();
        self.tasks_selected = self.tasks_selected.min(visible.saturating_sub(1));
        self.channels_selected =
            self.channels_selected.min(self.session.channels().len().saturating_sub(1));
        self.posts_selected = self.posts_selected.min(self.session.posts().len().saturating_sub(1));
    }

    /// Periodic tick: drain finished AI requests.
    pub fn tick(&mut self) {
        while let Ok(outcome) = self.ai_rx.try_recv() {
            self.ai_in_flight = self.ai_in_flight.saturating_sub(1);
            self.apply_ai_outcome(outcome);
        }
    }

    fn apply_ai_outcome(&mut self, outcome: AiOutcome) {
        match outcome {
            AiOutcome::Ideas { prompt, task_id, text } => {
                if let Some(ref id) = task_id {
                    if let Err(e) = self.session.add_idea_to_task(id, &text) {
                        self.status_message = Some(e.to_string());
                        return;
                    }
                }
                let mut record = GeneratedContent::new(prompt, text.clone());
                if let Some(id) = task_id {
                    record = record.for_task(id);
                }
                match self.session.record_generated(record) {
                    Ok(()) => {
                        self.generator.output = Some(text);
                        self.status_message = Some("Content ideas ready".to_string());
                    }
                    Err(e) => self.status_message = Some(e.to_string()),
                }
            }
            AiOutcome::Draft { prompt, text } => {
                match self.session.record_generated(GeneratedContent::new(prompt, text.clone())) {
                    Ok(()) => {
                        self.generator.output = Some(text);
                        self.status_message = Some("Draft ready".to_string());
                    }
                    Err(e) => self.status_message = Some(e.to_string()),
                }
            }
            AiOutcome::Priority { priority } => {
                if self.mode == AppMode::TaskForm {
                    self.task_form.priority = priority;
                    self.status_message =
                        Some(format!("Suggested priority: {}", priority.label()));
                } else {
                    // Form closed while the request was in flight; drop it
                    self.status_message =
                        Some(format!("Priority suggestion arrived late: {}", priority.label()));
                }
            }
            AiOutcome::Failed { message } => {
                self.status_message = Some(message);
            }
        }
        self.clamp_selections();
    }

    // --- AI requests (spawned, non-blocking) ---

    /// Generate free-form content ideas, optionally attached to a task.
    #[cfg(feature = "ai")]
    pub fn request_ideas(&mut self, prompt: String, task_id: Option<String>) {
        let Some(client) = self.ai.clone() else {
            self.status_message = Some(NOT_CONFIGURED_MESSAGE.to_string());
            return;
        };
        let tx = self.ai_tx.clone();
        self.ai_in_flight += 1;
        self.runtime.spawn(async move {
            let outcome = match client.generate_content_ideas(&prompt).await {
                Ok(text) => AiOutcome::Ideas { prompt, task_id, text },
                Err(e) => AiOutcome::Failed { message: e.to_string() },
            };
            let _ = tx.send(outcome);
        });
    }

    /// Generate a platform-shaped draft.
    #[cfg(feature = "ai")]
    pub fn request_draft(
        &mut self,
        prompt: String,
        platform: SocialPlatform,
        topic: String,
        tone: Option<String>,
        keywords: Option<String>,
    ) {
        let Some(client) = self.ai.clone() else {
            self.status_message = Some(NOT_CONFIGURED_MESSAGE.to_string());
            return;
        };
        let tx = self.ai_tx.clone();
        self.ai_in_flight += 1;
        self.runtime.spawn(async move {
            let outcome = match client
                .generate_platform_content(
                    &prompt,
                    platform,
                    &topic,
                    tone.as_deref(),
                    keywords.as_deref(),
                )
                .await
            {
                Ok(text) => AiOutcome::Draft { prompt, text },
                Err(e) => AiOutcome::Failed { message: e.to_string() },
            };
            let _ = tx.send(outcome);
        });
    }

    /// Ask for a priority suggestion for the open task form.
    #[cfg(feature = "ai")]
    pub fn request_priority_suggestion(&mut self) {
        let Some(client) = self.ai.clone() else {
            self.status_message = Some(NOT_CONFIGURED_MESSAGE.to_string());
            return;
        };
        let title = self.task_form.title.clone();
        let description = {
            let trimmed = self.task_form.description.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        };
        let due_date = parse_due_date(&self.task_form.due_date);
        let tx = self.ai_tx.clone();
        self.ai_in_flight += 1;
        self.runtime.spawn(async move {
            let outcome = match client
                .suggest_task_priority(&title, description.as_deref(), due_date)
                .await
            {
                Ok(priority) => AiOutcome::Priority { priority },
                Err(e) => AiOutcome::Failed { message: e.to_string() },
            };
            let _ = tx.send(outcome);
        });
    }

    #[cfg(not(feature = "ai"))]
    pub fn request_ideas(&mut self, _prompt: String, _task_id: Option<String>) {
        self.status_message = Some("Built without AI support".to_string());
    }

    #[cfg(not(feature = "ai"))]
    pub fn request_draft(
        &mut self,
        _prompt: String,
        _platform: SocialPlatform,
        _topic: String,
        _tone: Option<String>,
        _keywords: Option<String>,
    ) {
        self.status_message = Some("Built without AI support".to_string());
    }

    #[cfg(not(feature = "ai"))]
    pub fn request_priority_suggestion(&mut self) {
        self.status_message = Some("Built without AI support".to_string());
    }

    // --- Forms ---

    /// Open the task form, prefilled when editing.
    pub fn open_task_form(&mut self, task: Option<&Task>) {
        self.task_form = match task {
            Some(task) => TaskForm {
                editing: Some(task.clone()),
                title: task.title.clone(),
                description: task.description.clone().unwrap_or_default(),
                due_date: task
                    .due_date
                    .map(|d| d.format("%Y-%m-%d").to_string())
                    .unwrap_or_default(),
                priority: task.priority,
                status: task.status,
                channel_index: task.channel_id.as_ref().and_then(|id| {
                    self.session.channels().iter().position(|c| &c.id == id)
                }),
                field: TaskField::Title,
            },
            None => TaskForm::default(),
        };
        self.mode = AppMode::TaskForm;
    }

    /// Validate and commit the task form. Keeps the form open on rejection.
    pub fn save_task_form(&mut self) {
        let due_raw = self.task_form.due_date.trim();
        let due_date = if due_raw.is_empty() {
            None
        } else {
            match parse_due_date(due_raw) {
                Some(date) => Some(date),
                None => {
                    self.status_message =
                        Some("Invalid due date; use YYYY-MM-DD".to_string());
                    return;
                }
            }
        };

        let channel_id = self
            .task_form
            .channel_index
            .and_then(|idx| self.session.channels().get(idx))
            .map(|c| c.id.clone());

        let mut task = match self.task_form.editing.clone() {
            Some(existing) => existing,
            None => Task::new(""),
        };
        task.title = self.task_form.title.clone();
        task.description = Some(self.task_form.description.clone());
        task.due_date = due_date;
        task.priority = self.task_form.priority;
        task.status = self.task_form.status;
        task.channel_id = channel_id;

        let is_edit = self.task_form.editing.is_some();
        let result = if is_edit {
            self.session.update_task(task)
        } else {
            self.session.add_task(task)
        };

        match result {
            Ok(()) => {
                self.mode = AppMode::Normal;
                self.status_message =
                    Some(if is_edit { "Task updated" } else { "Task added" }.to_string());
                self.clamp_selections();
            }
            // Keep the form open so the user can fix it
            Err(e) => self.status_message = Some(e.to_string()),
        }
    }

    /// Open the channel form, prefilled when editing.
    pub fn open_channel_form(&mut self, channel: Option<&Channel>) {
        self.channel_form = match channel {
            Some(channel) => ChannelForm {
                editing: Some(channel.clone()),
                name: channel.name.clone(),
                channel_type: channel.channel_type,
                platform: channel.platform.clone().unwrap_or_default(),
                description: channel.description.clone().unwrap_or_default(),
                field: ChannelField::Name,
            },
            None => ChannelForm::default(),
        };
        self.mode = AppMode::ChannelForm;
    }

    /// Validate and commit the channel form.
    pub fn save_channel_form(&mut self) {
        let mut channel = match self.channel_form.editing.clone() {
            Some(existing) => existing,
            None => Channel::new("", self.channel_form.channel_type),
        };
        channel.name = self.channel_form.name.clone();
        channel.channel_type = self.channel_form.channel_type;
        channel.platform = Some(self.channel_form.platform.clone());
        channel.description = Some(self.channel_form.description.clone());

        let is_edit = self.channel_form.editing.is_some();
        let result = if is_edit {
            self.session.update_channel(channel)
        } else {
            self.session.add_channel(channel)
        };

        match result {
            Ok(()) => {
                self.mode = AppMode::Normal;
                self.status_message =
                    Some(if is_edit { "Channel updated" } else { "Channel added" }.to_string());
                self.clamp_selections();
            }
            Err(e) => self.status_message = Some(e.to_string()),
        }
    }

    /// Open the post form, prefilled when editing.
    pub fn open_post_form(&mut self, post: Option<&SocialPost>) {
        self.post_form = match post {
            Some(post) => PostForm {
                editing: Some(post.clone()),
                platform: post.platform,
                content: post.text_content.clone(),
                scheduled_at: post.scheduled_at.format("%Y-%m-%d %H:%M").to_string(),
                status: post.status,
                field: PostField::Platform,
            },
            None => PostForm::default(),
        };
        self.mode = AppMode::PostForm;
    }

    /// Validate and commit the post form.
    pub fn save_post_form(&mut self) {
        let raw = self.post_form.scheduled_at.trim();
        if raw.is_empty() {
            self.status_message = Some("Schedule date/time is required".to_string());
            return;
        }
        let scheduled_at = match NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M") {
            Ok(naive) => Utc.from_utc_datetime(&naive),
            Err(_) => {
                self.status_message =
                    Some("Invalid schedule; use YYYY-MM-DD HH:MM".to_string());
                return;
            }
        };

        let mut post = match self.post_form.editing.clone() {
            Some(existing) => existing,
            None => SocialPost::new(self.post_form.platform, "", scheduled_at),
        };
        post.platform = self.post_form.platform;
        post.text_content = self.post_form.content.clone();
        post.scheduled_at = scheduled_at;
        post.status = self.post_form.status;

        let is_edit = self.post_form.editing.is_some();
        let result =
            if is_edit { self.session.update_post(post) } else { self.session.add_post(post) };

        match result {
            Ok(()) => {
                self.mode = AppMode::Normal;
                self.status_message =
                    Some(if is_edit { "Post updated" } else { "Post added" }.to_string());
                self.clamp_selections();
            }
            Err(e) => self.status_message = Some(e.to_string()),
        }
    }

    /// Execute a confirmed delete.
    pub fn confirm_delete(&mut self) {
        let Some(pending) = self.pending_delete.take() else {
            self.mode = AppMode::Normal;
            return;
        };
        let result = match &pending {
            PendingDelete::Task { id, .. } => self.session.delete_task(id),
            PendingDelete::Channel { id, .. } => self.session.delete_channel(id),
            PendingDelete::Post { id, .. } => self.session.delete_post(id),
        };
        match result {
            Ok(()) => self.status_message = Some("Deleted".to_string()),
            Err(e) => self.status_message = Some(e.to_string()),
        }
        self.mode = AppMode::Normal;
        self.clamp_selections();
    }
}
