//! Process-local session state.
//!
//! The session owns the in-memory collections and the store. Collections are
//! loaded once at startup; every committed mutation validates first, then
//! persists the affected collection before returning. A rejected mutation
//! leaves both memory and disk untouched.

use crate::model::{Channel, GeneratedContent, SocialPost, Task};
use crate::store::{Store, StoreError};

/// Errors raised by session mutations.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("Task title cannot be empty")]
    EmptyTaskTitle,

    #[error("Channel name cannot be empty")]
    EmptyChannelName,

    #[error("Post content cannot be empty")]
    EmptyPostContent,

    #[error("No such task: {0}")]
    UnknownTask(String),

    #[error("No such channel: {0}")]
    UnknownChannel(String),

    #[error("No such post: {0}")]
    UnknownPost(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// The session: in-memory collections mirrored to the store on every commit.
#[derive(Debug)]
pub struct Session {
    store: Store,
    tasks: Vec<Task>,
    channels: Vec<Channel>,
    posts: Vec<SocialPost>,
    generated: Vec<GeneratedContent>,
}

impl Session {
    /// Load all collections from the store.
    pub fn load(store: Store) -> Result<Self, SessionError> {
        let tasks = store.load()?;
        let channels = store.load()?;
        let posts = store.load()?;
        let generated = store.load()?;
        Ok(Self { store, tasks, channels, posts, generated })
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn channels(&self) -> &[Channel] {
        &self.channels
    }

    pub fn posts(&self) -> &[SocialPost] {
        &self.posts
    }

    pub fn generated(&self) -> &[GeneratedContent] {
        &self.generated
    }

    /// Look up a task by id.
    pub fn task(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Look up a channel by id.
    pub fn channel(&self, id: &str) -> Option<&Channel> {
        self.channels.iter().find(|c| c.id == id)
    }

    /// Display name for a channel id, if the channel still exists.
    pub fn channel_name(&self, id: &str) -> Option<&str> {
        self.channel(id).map(|c| c.name.as_str())
    }

    // --- Tasks ---

    /// Add a new task.
    pub fn add_task(&mut self, mut task: Task) -> Result<(), SessionError> {
        validate_task(&mut task)?;
        self.tasks.push(task);
        self.persist_tasks()
    }

    /// Replace an existing task wholesale.
    pub fn update_task(&mut self, mut task: Task) -> Result<(), SessionError> {
        validate_task(&mut task)?;
        let slot = self
            .tasks
            .iter_mut()
            .find(|t| t.id == task.id)
            .ok_or_else(|| SessionError::UnknownTask(task.id.clone()))?;
        *slot = task;
        self.persist_tasks()
    }

    /// Delete a task by id.
    pub fn delete_task(&mut self, id: &str) -> Result<(), SessionError> {
        if !self.tasks.iter().any(|t| t.id == id) {
            return Err(SessionError::UnknownTask(id.to_string()));
        }
        self.tasks.retain(|t| t.id != id);
        self.persist_tasks()
    }

    /// Change a task's status in place.
    pub fn set_task_status(
        &mut self,
        id: &str,
        status: crate::model::TaskStatus,
    ) -> Result<(), SessionError> {
        let task = self
            .tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| SessionError::UnknownTask(id.to_string()))?;
        task.status = status;
        self.persist_tasks()
    }

    /// Prepend a content idea to a task.
    pub fn add_idea_to_task(&mut self, id: &str, idea: &str) -> Result<(), SessionError> {
        let task = self
            .tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| SessionError::UnknownTask(id.to_string()))?;
        task.add_content_idea(idea);
        self.persist_tasks()
    }

    // --- Channels ---

    /// Add a new channel.
    pub fn add_channel(&mut self, mut channel: Channel) -> Result<(), SessionError> {
        validate_channel(&mut channel)?;
        self.channels.push(channel);
        self.persist_channels()
    }

    /// Replace an existing channel wholesale.
    pub fn update_channel(&mut self, mut channel: Channel) -> Result<(), SessionError> {
        validate_channel(&mut channel)?;
        let slot = self
            .channels
            .iter_mut()
            .find(|c| c.id == channel.id)
            .ok_or_else(|| SessionError::UnknownChannel(channel.id.clone()))?;
        *slot = channel;
        self.persist_channels()
    }

    /// Delete a channel and clear the reference on any dependent task.
    ///
    /// Tasks survive channel deletion; only their channel reference becomes
    /// absent.
    pub fn delete_channel(&mut self, id: &str) -> Result<(), SessionError> {
        if !self.channels.iter().any(|c| c.id == id) {
            return Err(SessionError::UnknownChannel(id.to_string()));
        }
        self.channels.retain(|c| c.id != id);

        let mut tasks_touched = false;
        for task in &mut self.tasks {
            if task.channel_id.as_deref() == Some(id) {
                task.channel_id = None;
                tasks_touched = true;
            }
        }

        self.persist_channels()?;
        if tasks_touched {
            self.persist_tasks()?;
        }
        Ok(())
    }

    // --- Social posts ---

    /// Add a new social post.
    pub fn add_post(&mut self, mut post: SocialPost) -> Result<(), SessionError> {
        validate_post(&post)?;
        post.updated_at = chrono::Utc::now();
        self.posts.push(post);
        self.persist_posts()
    }

    /// Replace an existing post wholesale, refreshing its updated-at stamp.
    pub fn update_post(&mut self, mut post: SocialPost) -> Result<(), SessionError> {
        validate_post(&post)?;
        post.updated_at = chrono::Utc::now();
        let slot = self
            .posts
            .iter_mut()
            .find(|p| p.id == post.id)
            .ok_or_else(|| SessionError::UnknownPost(post.id.clone()))?;
        *slot = post;
        self.persist_posts()
    }

    /// Delete a post by id.
    pub fn delete_post(&mut self, id: &str) -> Result<(), SessionError> {
        if !self.posts.iter().any(|p| p.id == id) {
            return Err(SessionError::UnknownPost(id.to_string()));
        }
        self.posts.retain(|p| p.id != id);
        self.persist_posts()
    }

    // --- Generated content ---

    /// Record a generated piece, most recent first.
    pub fn record_generated(&mut self, content: GeneratedContent) -> Result<(), SessionError> {
        self.generated.insert(0, content);
        self.persist_generated()
    }

    fn persist_tasks(&self) -> Result<(), SessionError> {
        self.store.save(&self.tasks)?;
        Ok(())
    }

    fn persist_channels(&self) -> Result<(), SessionError> {
        self.store.save(&self.channels)?;
        Ok(())
    }

    fn persist_posts(&self) -> Result<(), SessionError> {
        self.store.save(&self.posts)?;
        Ok(())
    }

    fn persist_generated(&self) -> Result<(), SessionError> {
        self.store.save(&self.generated)?;
        Ok(())
    }
}

/// Validate and normalize a task before commit. Empty optional strings
/// become absent rather than empty.
fn validate_task(task: &mut Task) -> Result<(), SessionError> {
    task.title = task.title.trim().to_string();
    if task.title.is_empty() {
        return Err(SessionError::EmptyTaskTitle);
    }
    task.description = normalize_optional(task.description.take());
    task.channel_id = normalize_optional(task.channel_id.take());
    Ok(())
}

fn validate_channel(channel: &mut Channel) -> Result<(), SessionError> {
    channel.name = channel.name.trim().to_string();
    if channel.name.is_empty() {
        return Err(SessionError::EmptyChannelName);
    }
    channel.platform = normalize_optional(channel.platform.take());
    channel.description = normalize_optional(channel.description.take());
    Ok(())
}

fn validate_post(post: &SocialPost) -> Result<(), SessionError> {
    if post.text_content.trim().is_empty() {
        return Err(SessionError::EmptyPostContent);
    }
    Ok(())
}

fn normalize_optional(value: Option<String>) -> Option<String> {
    value.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ChannelType, Priority, SocialPlatform, TaskStatus};
    use chrono::Utc;
    use tempfile::tempdir;

    fn open_session(dir: &std::path::Path) -> Session {
        Session::load(Store::with_root(dir).unwrap()).unwrap()
    }

    #[test]
    fn test_add_task_persists() {
        let dir = tempdir().unwrap();
        let mut session = open_session(dir.path());
        session.add_task(Task::new("Launch campaign")).unwrap();

        // A fresh session sees the committed task
        let reloaded = open_session(dir.path());
        assert_eq!(reloaded.tasks().len(), 1);
        assert_eq!(reloaded.tasks()[0].title, "Launch campaign");
    }

    #[test]
    fn test_empty_title_rejected_without_mutation() {
        let dir = tempdir().unwrap();
        let mut session = open_session(dir.path());
        session.add_task(Task::new("existing")).unwrap();

        let result = session.add_task(Task::new("   "));
        assert!(matches!(result, Err(SessionError::EmptyTaskTitle)));
        assert_eq!(session.tasks().len(), 1);

        let reloaded = open_session(dir.path());
        assert_eq!(reloaded.tasks().len(), 1);
    }

    #[test]
    fn test_empty_edit_rejected_existing_unchanged() {
        let dir = tempdir().unwrap();
        let mut session = open_session(dir.path());
        session.add_task(Task::new("keep me")).unwrap();

        let mut edit = session.tasks()[0].clone();
        edit.title = String::new();
        assert!(session.update_task(edit).is_err());
        assert_eq!(session.tasks()[0].title, "keep me");
    }

    #[test]
    fn test_update_unknown_task_rejected() {
        let dir = tempdir().unwrap();
        let mut session = open_session(dir.path());
        let result = session.update_task(Task::new("ghost"));
        assert!(matches!(result, Err(SessionError::UnknownTask(_))));
    }

    #[test]
    fn test_empty_description_normalizes_to_absent() {
        let dir = tempdir().unwrap();
        let mut session = open_session(dir.path());
        let mut task = Task::new("title");
        task.description = Some("  ".to_string());
        session.add_task(task).unwrap();
        assert_eq!(session.tasks()[0].description, None);
    }

    #[test]
    fn test_delete_channel_clears_task_reference() {
        let dir = tempdir().unwrap();
        let mut session = open_session(dir.path());

        let channel = Channel::new("Socials", ChannelType::SocialMedia);
        let channel_id = channel.id.clone();
        session.add_channel(channel).unwrap();

        let task = Task::new("Post teaser")
            .with_priority(Priority::High)
            .with_channel(channel_id.clone());
        session.add_task(task).unwrap();

        session.delete_channel(&channel_id).unwrap();

        assert!(session.channels().is_empty());
        let task = &session.tasks()[0];
        assert_eq!(task.title, "Post teaser");
        assert_eq!(task.priority, Priority::High);
        assert_eq!(task.channel_id, None);

        // Cleared reference is persisted too
        let reloaded = open_session(dir.path());
        assert_eq!(reloaded.tasks()[0].channel_id, None);
    }

    #[test]
    fn test_delete_channel_leaves_unrelated_tasks() {
        let dir = tempdir().unwrap();
        let mut session = open_session(dir.path());

        let doomed = Channel::new("Doomed", ChannelType::Ads);
        let doomed_id = doomed.id.clone();
        let kept = Channel::new("Kept", ChannelType::Blog);
        let kept_id = kept.id.clone();
        session.add_channel(doomed).unwrap();
        session.add_channel(kept).unwrap();

        session.add_task(Task::new("other").with_channel(kept_id.clone())).unwrap();
        session.delete_channel(&doomed_id).unwrap();

        assert_eq!(session.tasks()[0].channel_id.as_deref(), Some(kept_id.as_str()));
    }

    #[test]
    fn test_post_validation() {
        let dir = tempdir().unwrap();
        let mut session = open_session(dir.path());

        let empty = SocialPost::new(SocialPlatform::X, "  ", Utc::now());
        assert!(matches!(session.add_post(empty), Err(SessionError::EmptyPostContent)));
        assert!(session.posts().is_empty());

        let post = SocialPost::new(SocialPlatform::LinkedIn, "Shipping day!", Utc::now());
        session.add_post(post).unwrap();
        assert_eq!(session.posts().len(), 1);
    }

    #[test]
    fn test_update_post_refreshes_updated_at() {
        let dir = tempdir().unwrap();
        let mut session = open_session(dir.path());

        let post = SocialPost::new(SocialPlatform::X, "v1", Utc::now());
        let created = post.created_at;
        session.add_post(post).unwrap();

        let mut edit = session.posts()[0].clone();
        edit.text_content = "v2".to_string();
        session.update_post(edit).unwrap();

        let post = &session.posts()[0];
        assert_eq!(post.text_content, "v2");
        assert_eq!(post.created_at, created);
        assert!(post.updated_at >= created);
    }

    #[test]
    fn test_set_task_status() {
        let dir = tempdir().unwrap();
        let mut session = open_session(dir.path());
        session.add_task(Task::new("cycle me")).unwrap();
        let id = session.tasks()[0].id.clone();

        session.set_task_status(&id, TaskStatus::Done).unwrap();
        assert_eq!(session.tasks()[0].status, TaskStatus::Done);
    }

    #[test]
    fn test_record_generated_most_recent_first() {
        let dir = tempdir().unwrap();
        let mut session = open_session(dir.path());

        session.record_generated(GeneratedContent::new("p1", "first")).unwrap();
        session.record_generated(GeneratedContent::new("p2", "second")).unwrap();

        assert_eq!(session.generated()[0].text, "second");
        assert_eq!(session.generated()[1].text, "first");
    }

    #[test]
    fn test_add_idea_to_task() {
        let dir = tempdir().unwrap();
        let mut session = open_session(dir.path());
        session.add_task(Task::new("ideas")).unwrap();
        let id = session.tasks()[0].id.clone();

        session.add_idea_to_task(&id, "older").unwrap();
        session.add_idea_to_task(&id, "newer").unwrap();
        assert_eq!(session.tasks()[0].content_ideas, vec!["newer", "older"]);
    }
}
