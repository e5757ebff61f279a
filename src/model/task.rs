use std::fmt;

use serde::{Deserialize, Serialize};

/// Task identifier (creation-time milliseconds, bumped on collision)
pub type TaskId = u64;

/// Task category. Serialized with its display label.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum Category {
    #[default]
    #[serde(rename = "To Do")]
    Todo,
    #[serde(rename = "In Progress")]
    InProgress,
    #[serde(rename = "Review")]
    Review,
    #[serde(rename = "Completed")]
    Completed,
}

impl Category {
    /// All categories in display order
    pub const ALL: [Category; 4] = [
        Category::Todo,
        Category::InProgress,
        Category::Review,
        Category::Completed,
    ];

    /// Human-readable label, also the persisted form
    pub fn label(self) -> &'static str {
        match self {
            Category::Todo => "To Do",
            Category::InProgress => "In Progress",
            Category::Review => "Review",
            Category::Completed => "Completed",
        }
    }

    /// Parse a label or a short key (`todo`, `in-progress`, `review`, `done`...)
    pub fn parse_category(s: &str) -> Option<Self> {
        let key: String = s
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .collect::<String>()
            .to_lowercase();
        match key.as_str() {
            "todo" => Some(Category::Todo),
            "inprogress" | "progress" | "active" => Some(Category::InProgress),
            "review" => Some(Category::Review),
            "completed" | "done" => Some(Category::Completed),
            _ => None,
        }
    }

    /// Next category in display order (wraps)
    pub fn next(self) -> Self {
        let idx = self.index();
        Category::ALL[(idx + 1) % Category::ALL.len()]
    }

    /// Previous category in display order (wraps)
    pub fn prev(self) -> Self {
        let idx = self.index();
        Category::ALL[(idx + Category::ALL.len() - 1) % Category::ALL.len()]
    }

    /// Position in `Category::ALL`
    pub fn index(self) -> usize {
        match self {
            Category::Todo => 0,
            Category::InProgress => 1,
            Category::Review => 2,
            Category::Completed => 3,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A planned task occupying an inclusive day-of-month range.
///
/// Tasks carry no month or year: day numbers are read against whichever
/// month the calendar is showing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "TaskRecord")]
pub struct Task {
    pub id: TaskId,
    pub name: String,
    pub category: Category,
    pub start_day: u32,
    pub end_day: u32,
}

impl Task {
    /// Days between start and end (0 for a single-day task)
    pub fn duration(&self) -> u32 {
        self.end_day.saturating_sub(self.start_day)
    }

    /// Number of day columns the task covers
    pub fn span(&self) -> u32 {
        self.duration().saturating_add(1)
    }

    /// Whether `day` falls inside `[start_day, end_day]`
    pub fn covers(&self, day: u32) -> bool {
        day >= self.start_day && day <= self.end_day
    }
}

/// A task as written in tasks.json, checked before it becomes a [`Task`]
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TaskRecord {
    id: TaskId,
    name: String,
    category: Category,
    start_day: u32,
    end_day: u32,
}

impl TryFrom<TaskRecord> for Task {
    type Error = String;

    fn try_from(rec: TaskRecord) -> Result<Self, Self::Error> {
        if rec.start_day == 0 {
            return Err(format!("task {} starts on day 0", rec.id));
        }
        if rec.start_day > rec.end_day {
            return Err(format!(
                "task {} ends on day {} before it starts on day {}",
                rec.id, rec.end_day, rec.start_day
            ));
        }
        if rec.id == TaskId::MAX {
            return Err(format!("task id {} is out of range", rec.id));
        }
        Ok(Task {
            id: rec.id,
            name: rec.name,
            category: rec.category,
            start_day: rec.start_day,
            end_day: rec.end_day,
        })
    }
}

/// Fields collected by the task form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
    pub name: String,
    pub category: Category,
}

/// An inclusive range of days, always `start <= end`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayRange {
    pub start: u32,
    pub end: u32,
}

impl DayRange {
    /// Build a range from two anchors given in either order
    pub fn normalized(a: u32, b: u32) -> Self {
        DayRange {
            start: a.min(b),
            end: a.max(b),
        }
    }

    pub fn contains(&self, day: u32) -> bool {
        day >= self.start && day <= self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_serializes_as_label() {
        let json = serde_json::to_string(&Category::InProgress).unwrap();
        assert_eq!(json, "\"In Progress\"");
        let back: Category = serde_json::from_str("\"To Do\"").unwrap();
        assert_eq!(back, Category::Todo);
    }

    #[test]
    fn task_records_must_hold_a_forward_range() {
        let ok: Task = serde_json::from_str(
            r#"{"id":7,"name":"Ship","category":"Review","startDay":3,"endDay":5}"#,
        )
        .unwrap();
        assert_eq!((ok.start_day, ok.end_day), (3, 5));

        for bad in [
            r#"{"id":7,"name":"Ship","category":"Review","startDay":5,"endDay":3}"#,
            r#"{"id":7,"name":"Ship","category":"Review","startDay":0,"endDay":3}"#,
            r#"{"id":18446744073709551615,"name":"Ship","category":"Review","startDay":1,"endDay":1}"#,
        ] {
            assert!(serde_json::from_str::<Task>(bad).is_err(), "{}", bad);
        }
    }

    #[test]
    fn span_saturates_on_huge_ranges() {
        let task = Task {
            id: 1,
            name: "Forever".into(),
            category: Category::Todo,
            start_day: 1,
            end_day: u32::MAX,
        };
        assert_eq!(task.span(), u32::MAX);
    }

    #[test]
    fn category_parse_accepts_labels_and_keys() {
        assert_eq!(Category::parse_category("To Do"), Some(Category::Todo));
        assert_eq!(
            Category::parse_category("in-progress"),
            Some(Category::InProgress)
        );
        assert_eq!(Category::parse_category("REVIEW"), Some(Category::Review));
        assert_eq!(Category::parse_category("done"), Some(Category::Completed));
        assert_eq!(Category::parse_category("later"), None);
    }

    #[test]
    fn category_cycle_wraps() {
        assert_eq!(Category::Completed.next(), Category::Todo);
        assert_eq!(Category::Todo.prev(), Category::Completed);
        for cat in Category::ALL {
            assert_eq!(cat.next().prev(), cat);
        }
    }

    #[test]
    fn task_uses_camel_case_fields() {
        let task = Task {
            id: 1700000000000,
            name: "Design Review".into(),
            category: Category::Review,
            start_day: 10,
            end_day: 12,
        };
        let json = serde_json::to_string(&task).unwrap();
        assert_eq!(
            json,
            r#"{"id":1700000000000,"name":"Design Review","category":"Review","startDay":10,"endDay":12}"#
        );
        assert_eq!(task.span(), 3);
        assert!(task.covers(11));
        assert!(!task.covers(13));
    }

    #[test]
    fn range_normalizes_either_direction() {
        assert_eq!(DayRange::normalized(12, 10), DayRange { start: 10, end: 12 });
        assert_eq!(DayRange::normalized(3, 3), DayRange { start: 3, end: 3 });
    }
}
