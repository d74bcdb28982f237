//! End-to-end tests for session mutations and persistence.

use chrono::{NaiveDate, Utc};
use markhub::model::{Channel, ChannelType, Priority, SocialPlatform, SocialPost, Task, TaskStatus};
use markhub::query::TaskQuery;
use markhub::schedule::{bucket_tasks, ScheduleBucket};
use markhub::{Session, Store};
use tempfile::tempdir;

fn open_session(dir: &std::path::Path) -> Session {
    Session::load(Store::with_root(dir).unwrap()).unwrap()
}

#[test]
fn test_full_task_lifecycle_survives_restart() {
    let dir = tempdir().unwrap();

    {
        let mut session = open_session(dir.path());
        let task = Task::new("Quarterly recap")
            .with_priority(Priority::High)
            .with_due_date(NaiveDate::from_ymd_opt(2024, 6, 12).unwrap());
        session.add_task(task).unwrap();

        let id = session.tasks()[0].id.clone();
        session.set_task_status(&id, TaskStatus::InProgress).unwrap();
    }

    let mut session = open_session(dir.path());
    assert_eq!(session.tasks().len(), 1);
    assert_eq!(session.tasks()[0].status, TaskStatus::InProgress);

    let id = session.tasks()[0].id.clone();
    session.delete_task(&id).unwrap();

    let session = open_session(dir.path());
    assert!(session.tasks().is_empty());
}

#[test]
fn test_channel_deletion_clears_references_across_restart() {
    let dir = tempdir().unwrap();

    let channel_id = {
        let mut session = open_session(dir.path());
        let channel = Channel::new("Social", ChannelType::SocialMedia);
        let channel_id = channel.id.clone();
        session.add_channel(channel).unwrap();
        session.add_task(Task::new("Teaser").with_channel(channel_id.clone())).unwrap();
        channel_id
    };

    // Delete the channel in a second session
    {
        let mut session = open_session(dir.path());
        session.delete_channel(&channel_id).unwrap();
    }

    let session = open_session(dir.path());
    assert!(session.channels().is_empty());
    assert_eq!(session.tasks().len(), 1);
    assert_eq!(session.tasks()[0].channel_id, None);
}

#[test]
fn test_rejected_writes_never_touch_disk() {
    let dir = tempdir().unwrap();
    let mut session = open_session(dir.path());

    assert!(session.add_task(Task::new("  ")).is_err());
    assert!(session.add_channel(Channel::new("", ChannelType::Email)).is_err());
    assert!(session.add_post(SocialPost::new(SocialPlatform::X, " ", Utc::now())).is_err());

    assert!(!dir.path().join("tasks.json").exists());
    assert!(!dir.path().join("channels.json").exists());
    assert!(!dir.path().join("social_posts.json").exists());
}

#[test]
fn test_done_tasks_stay_listed_but_leave_the_schedule() {
    let dir = tempdir().unwrap();
    let mut session = open_session(dir.path());

    let today = Utc::now().date_naive();
    session.add_task(Task::new("due today").with_due_date(today)).unwrap();
    session
        .add_task(Task::new("finished").with_due_date(today).with_status(TaskStatus::Done))
        .unwrap();

    let board = bucket_tasks(session.tasks(), today);
    assert_eq!(board.bucket(ScheduleBucket::Today).len(), 1);
    assert_eq!(board.bucket(ScheduleBucket::Today)[0].title, "due today");

    // The task manager still shows both
    let query = TaskQuery::default();
    assert_eq!(query.apply(session.tasks()).len(), 2);
}

#[test]
fn test_query_filters_compose_over_session_data() {
    let dir = tempdir().unwrap();
    let mut session = open_session(dir.path());

    let channel = Channel::new("Blog", ChannelType::Blog);
    let channel_id = channel.id.clone();
    session.add_channel(channel).unwrap();

    session
        .add_task(
            Task::new("Write launch post")
                .with_priority(Priority::High)
                .with_channel(channel_id.clone()),
        )
        .unwrap();
    session.add_task(Task::new("Unrelated errand")).unwrap();

    let query = TaskQuery {
        search: "launch".to_string(),
        priority: Some(Priority::High),
        channel_id: Some(channel_id),
        ..Default::default()
    };
    let hits = query.apply(session.tasks());
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].title, "Write launch post");
}

#[test]
fn test_generated_content_history_persists_in_order() {
    let dir = tempdir().unwrap();

    {
        let mut session = open_session(dir.path());
        session
            .record_generated(markhub::GeneratedContent::new("prompt a", "older output"))
            .unwrap();
        session
            .record_generated(markhub::GeneratedContent::new("prompt b", "newer output"))
            .unwrap();
    }

    let session = open_session(dir.path());
    assert_eq!(session.generated().len(), 2);
    assert_eq!(session.generated()[0].text, "newer output");
    assert_eq!(session.generated()[1].text, "older output");
}
