//! Task schedule bucketing.
//!
//! Partitions open tasks into calendar buckets relative to a reference date
//! and produces a deterministic per-bucket ordering. Pure: the same task
//! collection and reference date always produce the same board, so it is
//! safe to recompute on every draw.

use std::cmp::Ordering;

use chrono::{Datelike, Days, NaiveDate};

use crate::model::{Task, TaskStatus};

/// The seven mutually exclusive schedule buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScheduleBucket {
    Overdue,
    Today,
    Tomorrow,
    ThisWeek,
    NextWeek,
    Later,
    NoDueDate,
}

impl ScheduleBucket {
    /// All buckets in display order.
    pub const ALL: [Self; 7] = [
        Self::Overdue,
        Self::Today,
        Self::Tomorrow,
        Self::ThisWeek,
        Self::NextWeek,
        Self::Later,
        Self::NoDueDate,
    ];

    /// Display label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Overdue => "Overdue",
            Self::Today => "Today",
            Self::Tomorrow => "Tomorrow",
            Self::ThisWeek => "This Week",
            Self::NextWeek => "Next Week",
            Self::Later => "Later",
            Self::NoDueDate => "No Due Date",
        }
    }
}

/// Tasks grouped by schedule bucket, each bucket sorted.
#[derive(Debug, Default)]
pub struct ScheduleBoard<'a> {
    pub overdue: Vec<&'a Task>,
    pub today: Vec<&'a Task>,
    pub tomorrow: Vec<&'a Task>,
    pub this_week: Vec<&'a Task>,
    pub next_week: Vec<&'a Task>,
    pub later: Vec<&'a Task>,
    pub no_due_date: Vec<&'a Task>,
}

impl<'a> ScheduleBoard<'a> {
    /// Tasks in a bucket.
    pub fn bucket(&self, bucket: ScheduleBucket) -> &[&'a Task] {
        match bucket {
            ScheduleBucket::Overdue => &self.overdue,
            ScheduleBucket::Today => &self.today,
            ScheduleBucket::Tomorrow => &self.tomorrow,
            ScheduleBucket::ThisWeek => &self.this_week,
            ScheduleBucket::NextWeek => &self.next_week,
            ScheduleBucket::Later => &self.later,
            ScheduleBucket::NoDueDate => &self.no_due_date,
        }
    }

    fn bucket_mut(&mut self, bucket: ScheduleBucket) -> &mut Vec<&'a Task> {
        match bucket {
            ScheduleBucket::Overdue => &mut self.overdue,
            ScheduleBucket::Today => &mut self.today,
            ScheduleBucket::Tomorrow => &mut self.tomorrow,
            ScheduleBucket::ThisWeek => &mut self.this_week,
            ScheduleBucket::NextWeek => &mut self.next_week,
            ScheduleBucket::Later => &mut self.later,
            ScheduleBucket::NoDueDate => &mut self.no_due_date,
        }
    }

    /// Total number of tasks on the board.
    pub fn total(&self) -> usize {
        ScheduleBucket::ALL.iter().map(|b| self.bucket(*b).len()).sum()
    }

    /// Whether every bucket is empty.
    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

/// The last day of the current week: the coming Saturday, inclusive.
///
/// Fixed Sunday-first convention; a Saturday reference date is its own end
/// of week.
pub fn end_of_week(today: NaiveDate) -> NaiveDate {
    let days_left = 6 - u64::from(today.weekday().num_days_from_sunday());
    today + Days::new(days_left)
}

/// Assign a due date to its bucket relative to `today`.
pub fn bucket_for(due_date: Option<NaiveDate>, today: NaiveDate) -> ScheduleBucket {
    let Some(due) = due_date else {
        return ScheduleBucket::NoDueDate;
    };

    let tomorrow = today + Days::new(1);
    let week_end = end_of_week(today);
    let next_week_end = week_end + Days::new(7);

    if due < today {
        ScheduleBucket::Overdue
    } else if due == today {
        ScheduleBucket::Today
    } else if due == tomorrow {
        ScheduleBucket::Tomorrow
    } else if due <= week_end {
        ScheduleBucket::ThisWeek
    } else if due <= next_week_end {
        ScheduleBucket::NextWeek
    } else {
        ScheduleBucket::Later
    }
}

/// Ordering within a bucket: priority rank first, then dated before undated
/// with earlier dates first, then case-sensitive title. Total for distinct
/// titles, so the result is independent of input order.
pub fn schedule_order(a: &Task, b: &Task) -> Ordering {
    a.priority
        .rank()
        .cmp(&b.priority.rank())
        .then_with(|| match (a.due_date, b.due_date) {
            (Some(lhs), Some(rhs)) => lhs.cmp(&rhs),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        })
        .then_with(|| a.title.cmp(&b.title))
}

/// Partition all non-Done tasks into schedule buckets, each bucket sorted.
pub fn bucket_tasks<'a>(tasks: &'a [Task], today: NaiveDate) -> ScheduleBoard<'a> {
    let mut board = ScheduleBoard::default();

    for task in tasks {
        if task.status == TaskStatus::Done {
            continue;
        }
        board.bucket_mut(bucket_for(task.due_date, today)).push(task);
    }

    for bucket in ScheduleBucket::ALL {
        board.bucket_mut(bucket).sort_by(|a, b| schedule_order(a, b));
    }

    board
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Priority;

    fn wed() -> NaiveDate {
        // 2024-06-12 is a Wednesday
        NaiveDate::from_ymd_opt(2024, 6, 12).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_end_of_week_is_coming_saturday() {
        assert_eq!(end_of_week(wed()), date(2024, 6, 15));
        // Sunday starts the week
        assert_eq!(end_of_week(date(2024, 6, 9)), date(2024, 6, 15));
        // Saturday is its own end of week
        assert_eq!(end_of_week(date(2024, 6, 15)), date(2024, 6, 15));
    }

    #[test]
    fn test_bucket_assignment_from_fixed_wednesday() {
        let today = wed();
        assert_eq!(bucket_for(None, today), ScheduleBucket::NoDueDate);
        assert_eq!(bucket_for(Some(date(2024, 6, 11)), today), ScheduleBucket::Overdue);
        assert_eq!(bucket_for(Some(date(2024, 6, 12)), today), ScheduleBucket::Today);
        assert_eq!(bucket_for(Some(date(2024, 6, 13)), today), ScheduleBucket::Tomorrow);
        assert_eq!(bucket_for(Some(date(2024, 6, 14)), today), ScheduleBucket::ThisWeek);
        // Saturday, end of week, inclusive
        assert_eq!(bucket_for(Some(date(2024, 6, 15)), today), ScheduleBucket::ThisWeek);
        assert_eq!(bucket_for(Some(date(2024, 6, 16)), today), ScheduleBucket::NextWeek);
        assert_eq!(bucket_for(Some(date(2024, 6, 22)), today), ScheduleBucket::NextWeek);
        assert_eq!(bucket_for(Some(date(2024, 6, 23)), today), ScheduleBucket::Later);
        assert_eq!(bucket_for(Some(date(2024, 7, 1)), today), ScheduleBucket::Later);
    }

    #[test]
    fn test_saturday_reference_date() {
        // When today is Saturday the this-week window is empty: tomorrow is
        // Sunday and everything past it falls into next week.
        let today = date(2024, 6, 15);
        assert_eq!(bucket_for(Some(date(2024, 6, 15)), today), ScheduleBucket::Today);
        assert_eq!(bucket_for(Some(date(2024, 6, 16)), today), ScheduleBucket::Tomorrow);
        assert_eq!(bucket_for(Some(date(2024, 6, 17)), today), ScheduleBucket::NextWeek);
        assert_eq!(bucket_for(Some(date(2024, 6, 22)), today), ScheduleBucket::NextWeek);
        assert_eq!(bucket_for(Some(date(2024, 6, 23)), today), ScheduleBucket::Later);
    }

    #[test]
    fn test_done_tasks_are_excluded() {
        let tasks = vec![
            Task::new("open").with_due_date(wed()),
            Task::new("closed").with_due_date(wed()).with_status(TaskStatus::Done),
        ];
        let board = bucket_tasks(&tasks, wed());
        assert_eq!(board.total(), 1);
        assert_eq!(board.today[0].title, "open");
    }

    #[test]
    fn test_buckets_partition_open_tasks() {
        let today = wed();
        let tasks = vec![
            Task::new("a").with_due_date(date(2024, 6, 1)),
            Task::new("b").with_due_date(today),
            Task::new("c").with_due_date(date(2024, 6, 13)),
            Task::new("d").with_due_date(date(2024, 6, 15)),
            Task::new("e").with_due_date(date(2024, 6, 22)),
            Task::new("f").with_due_date(date(2024, 7, 1)),
            Task::new("g"),
            Task::new("h").with_status(TaskStatus::Done),
        ];

        let board = bucket_tasks(&tasks, today);
        let open = tasks.iter().filter(|t| t.status != TaskStatus::Done).count();
        assert_eq!(board.total(), open);

        // No task appears in two buckets
        let mut seen: Vec<&str> = ScheduleBucket::ALL
            .iter()
            .flat_map(|b| board.bucket(*b).iter().map(|t| t.id.as_str()))
            .collect();
        seen.sort_unstable();
        seen.dedup();
        assert_eq!(seen.len(), open);
    }

    #[test]
    fn test_priority_dominates_presence_of_date() {
        let tasks = vec![
            Task::new("dated medium").with_priority(Priority::Medium).with_due_date(wed()),
            Task::new("undated high").with_priority(Priority::High),
        ];
        let mut refs: Vec<&Task> = tasks.iter().collect();
        refs.sort_by(|a, b| schedule_order(a, b));
        assert_eq!(refs[0].title, "undated high");
        assert_eq!(refs[1].title, "dated medium");
    }

    #[test]
    fn test_equal_priority_dated_before_undated() {
        let tasks = vec![
            Task::new("undated").with_priority(Priority::Low),
            Task::new("dated").with_priority(Priority::Low).with_due_date(wed()),
        ];
        let mut refs: Vec<&Task> = tasks.iter().collect();
        refs.sort_by(|a, b| schedule_order(a, b));
        assert_eq!(refs[0].title, "dated");
    }

    #[test]
    fn test_title_tiebreak_is_input_order_independent() {
        let mk = |title: &str| Task::new(title).with_priority(Priority::Medium);
        let forward = vec![mk("alpha"), mk("beta"), mk("gamma")];
        let backward = vec![mk("gamma"), mk("beta"), mk("alpha")];

        let sort = |tasks: &[Task]| -> Vec<String> {
            let mut refs: Vec<&Task> = tasks.iter().collect();
            refs.sort_by(|a, b| schedule_order(a, b));
            refs.iter().map(|t| t.title.clone()).collect()
        };

        assert_eq!(sort(&forward), sort(&backward));
        assert_eq!(sort(&forward), vec!["alpha", "beta", "gamma"]);
    }

    #[test]
    fn test_bucket_ordering_earlier_date_first() {
        let today = wed();
        let tasks = vec![
            Task::new("friday").with_priority(Priority::High).with_due_date(date(2024, 6, 14)),
            Task::new("saturday").with_priority(Priority::High).with_due_date(date(2024, 6, 15)),
            Task::new("low friday").with_priority(Priority::Low).with_due_date(date(2024, 6, 14)),
        ];
        let board = bucket_tasks(&tasks, today);
        let titles: Vec<&str> = board.this_week.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["friday", "saturday", "low friday"]);
    }
}
