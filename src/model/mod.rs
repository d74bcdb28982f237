//! Domain records and their closed enumerations.
//!
//! Every entity is an immutable snapshot identified by an opaque string id;
//! edits replace the whole record. Ids are derived from the creation
//! timestamp plus a per-process counter so that records created within the
//! same millisecond stay distinct.

mod channel;
mod content;
mod post;
mod task;

pub use channel::{Channel, ChannelType};
pub use content::GeneratedContent;
pub use post::{SocialPlatform, SocialPost, SocialPostStatus};
pub use task::{parse_due_date, Priority, Task, TaskStatus};

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;

static ID_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Generate a fresh record id.
pub fn generate_id() -> String {
    let millis = Utc::now().timestamp_millis();
    let seq = ID_COUNTER.fetch_add(1, Ordering::Relaxed);
    format!("{millis}-{seq}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_ids_are_unique() {
        let ids: Vec<String> = (0..100).map(|_| generate_id()).collect();
        let mut deduped = ids.clone();
        deduped.sort();
        deduped.dedup();
        assert_eq!(deduped.len(), ids.len());
    }
}
