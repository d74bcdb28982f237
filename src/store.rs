//! JSON snapshot persistence for the entity collections.
//!
//! Each collection lives in its own file under the data directory
//! (`~/.markhub` by default) and is always read and written as a complete
//! snapshot. There is no delta persistence and no conflict detection; the
//! last writer wins.

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::model::{Channel, GeneratedContent, SocialPost, Task};

/// Store-level errors.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Could not find home directory")]
    NoHomeDir,

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Corrupt collection file {path}: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// A persistable record: knows its collection file and its id.
pub trait Record: Serialize + DeserializeOwned {
    /// File name of the collection snapshot inside the data directory.
    const FILE: &'static str;

    /// The record's unique id within its collection.
    fn id(&self) -> &str;
}

impl Record for Task {
    const FILE: &'static str = "tasks.json";

    fn id(&self) -> &str {
        &self.id
    }
}

impl Record for Channel {
    const FILE: &'static str = "channels.json";

    fn id(&self) -> &str {
        &self.id
    }
}

impl Record for SocialPost {
    const FILE: &'static str = "social_posts.json";

    fn id(&self) -> &str {
        &self.id
    }
}

impl Record for GeneratedContent {
    const FILE: &'static str = "generated_content.json";

    fn id(&self) -> &str {
        &self.id
    }
}

/// Snapshot store rooted at a data directory.
#[derive(Debug)]
pub struct Store {
    root: PathBuf,
}

impl Store {
    /// Open the store at the default location (`~/.markhub`).
    pub fn open() -> Result<Self, StoreError> {
        let home = dirs::home_dir().ok_or(StoreError::NoHomeDir)?;
        Self::with_root(home.join(".markhub"))
    }

    /// Open the store at a custom root (used by tests and `--data-dir`).
    pub fn with_root(root: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let root = root.into();
        fs::create_dir_all(&root).map_err(|source| StoreError::Io { path: root.clone(), source })?;
        Ok(Self { root })
    }

    /// The data directory this store reads and writes.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, file: &str) -> PathBuf {
        self.root.join(file)
    }

    /// Load a full collection. A missing file is an empty collection.
    pub fn load<T: Record>(&self) -> Result<Vec<T>, StoreError> {
        let path = self.path_for(T::FILE);
        if !path.exists() {
            return Ok(Vec::new());
        }
        let content =
            fs::read_to_string(&path).map_err(|source| StoreError::Io { path: path.clone(), source })?;
        serde_json::from_str(&content).map_err(|source| StoreError::Corrupt { path, source })
    }

    /// Overwrite a full collection snapshot.
    pub fn save<T: Record>(&self, records: &[T]) -> Result<(), StoreError> {
        let path = self.path_for(T::FILE);
        let content = serde_json::to_string_pretty(records)
            .map_err(|source| StoreError::Corrupt { path: path.clone(), source })?;
        fs::write(&path, content).map_err(|source| StoreError::Io { path, source })
    }

    /// Upsert one record by id (read-modify-write over the snapshot).
    pub fn upsert<T: Record + Clone>(&self, record: &T) -> Result<(), StoreError> {
        let mut records: Vec<T> = self.load()?;
        match records.iter_mut().find(|existing| existing.id() == record.id()) {
            Some(existing) => *existing = record.clone(),
            None => records.push(record.clone()),
        }
        self.save(&records)
    }

    /// Remove one record by id. Removing an absent id is a no-op.
    pub fn remove<T: Record>(&self, id: &str) -> Result<(), StoreError> {
        let mut records: Vec<T> = self.load()?;
        records.retain(|record| record.id() != id);
        self.save(&records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ChannelType, Priority};
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_is_empty_collection() {
        let dir = tempdir().unwrap();
        let store = Store::with_root(dir.path()).unwrap();
        let tasks: Vec<Task> = store.load().unwrap();
        assert!(tasks.is_empty());
    }

    #[test]
    fn test_save_then_load_round_trip() {
        let dir = tempdir().unwrap();
        let store = Store::with_root(dir.path()).unwrap();

        let tasks = vec![
            Task::new("Launch campaign").with_priority(Priority::High),
            Task::new("Write recap"),
        ];
        store.save(&tasks).unwrap();

        let loaded: Vec<Task> = store.load().unwrap();
        assert_eq!(loaded, tasks);
    }

    #[test]
    fn test_upsert_inserts_then_replaces() {
        let dir = tempdir().unwrap();
        let store = Store::with_root(dir.path()).unwrap();

        let channel = Channel::new("Blog", ChannelType::Blog);
        store.upsert(&channel).unwrap();

        let mut renamed = channel.clone();
        renamed.name = "Company blog".to_string();
        store.upsert(&renamed).unwrap();

        let channels: Vec<Channel> = store.load().unwrap();
        assert_eq!(channels.len(), 1);
        assert_eq!(channels[0].name, "Company blog");
    }

    #[test]
    fn test_remove_by_id() {
        let dir = tempdir().unwrap();
        let store = Store::with_root(dir.path()).unwrap();

        let keep = Task::new("keep");
        let drop = Task::new("drop");
        store.save(&[keep.clone(), drop.clone()]).unwrap();

        store.remove::<Task>(&drop.id).unwrap();
        let tasks: Vec<Task> = store.load().unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].id, keep.id);

        // Removing an unknown id leaves the collection alone
        store.remove::<Task>("no-such-id").unwrap();
        let tasks: Vec<Task> = store.load().unwrap();
        assert_eq!(tasks.len(), 1);
    }

    #[test]
    fn test_collections_are_independent() {
        let dir = tempdir().unwrap();
        let store = Store::with_root(dir.path()).unwrap();

        store.save(&[Task::new("task")]).unwrap();
        store.save(&[Channel::new("chan", ChannelType::Email)]).unwrap();

        let tasks: Vec<Task> = store.load().unwrap();
        let channels: Vec<Channel> = store.load().unwrap();
        let posts: Vec<SocialPost> = store.load().unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(channels.len(), 1);
        assert!(posts.is_empty());
    }
}
