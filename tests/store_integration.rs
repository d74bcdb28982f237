//! Integration tests for the JSON snapshot store.

use markhub::model::{Channel, ChannelType, Priority, SocialPlatform, SocialPost, Task};
use markhub::Store;
use tempfile::tempdir;

#[test]
fn test_collections_land_in_named_files() {
    let dir = tempdir().unwrap();
    let store = Store::with_root(dir.path()).unwrap();

    store.save(&[Task::new("one")]).unwrap();
    store.save(&[Channel::new("blog", ChannelType::Blog)]).unwrap();
    store
        .save(&[SocialPost::new(SocialPlatform::X, "hello", chrono::Utc::now())])
        .unwrap();

    assert!(dir.path().join("tasks.json").exists());
    assert!(dir.path().join("channels.json").exists());
    assert!(dir.path().join("social_posts.json").exists());
    assert!(!dir.path().join("generated_content.json").exists());
}

#[test]
fn test_snapshots_are_pretty_printed_json_arrays() {
    let dir = tempdir().unwrap();
    let store = Store::with_root(dir.path()).unwrap();

    store.save(&[Task::new("readable on disk")]).unwrap();

    let raw = std::fs::read_to_string(dir.path().join("tasks.json")).unwrap();
    assert!(raw.starts_with('['));
    assert!(raw.contains('\n'));
    assert!(raw.contains("readable on disk"));
}

#[test]
fn test_legacy_enum_labels_survive_round_trip() {
    let dir = tempdir().unwrap();
    let store = Store::with_root(dir.path()).unwrap();

    let task = Task::new("labels").with_priority(Priority::High);
    store.save(&[task]).unwrap();

    let raw = std::fs::read_to_string(dir.path().join("tasks.json")).unwrap();
    assert!(raw.contains("\"To Do\""));
    assert!(raw.contains("\"High\""));

    let loaded: Vec<Task> = store.load().unwrap();
    assert_eq!(loaded[0].priority, Priority::High);
}

#[test]
fn test_corrupt_file_surfaces_error() {
    let dir = tempdir().unwrap();
    let store = Store::with_root(dir.path()).unwrap();

    std::fs::write(dir.path().join("tasks.json"), "{ not json").unwrap();
    let result: Result<Vec<Task>, _> = store.load();
    assert!(result.is_err());
}

#[test]
fn test_reopening_store_preserves_data() {
    let dir = tempdir().unwrap();

    {
        let store = Store::with_root(dir.path()).unwrap();
        store.upsert(&Task::new("persists")).unwrap();
    }

    let store = Store::with_root(dir.path()).unwrap();
    let tasks: Vec<Task> = store.load().unwrap();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].title, "persists");
}
