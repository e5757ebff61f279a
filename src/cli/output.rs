use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::model::task::{Category, Task, TaskId};
use crate::ops::{calendar, layout};

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskJson {
    pub id: TaskId,
    pub name: String,
    pub category: Category,
    pub start_day: u32,
    pub end_day: u32,
    pub days: u32,
}

#[derive(Serialize)]
pub struct TaskListJson {
    pub showing: usize,
    pub total: usize,
    pub tasks: Vec<TaskJson>,
}

#[derive(Serialize)]
pub struct DayJson {
    pub day: u32,
    pub tasks: Vec<TaskId>,
}

#[derive(Serialize)]
pub struct MonthJson {
    pub month: String,
    pub label: String,
    pub first_weekday: u32,
    pub days: Vec<DayJson>,
}

#[derive(Serialize)]
pub struct RecoveryJson {
    pub entries: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log: Option<String>,
}

// ---------------------------------------------------------------------------
// Conversions
// ---------------------------------------------------------------------------

pub fn task_to_json(task: &Task) -> TaskJson {
    TaskJson {
        id: task.id,
        name: task.name.clone(),
        category: task.category,
        start_day: task.start_day,
        end_day: task.end_day,
        days: task.span(),
    }
}

pub fn month_to_json(month: NaiveDate, tasks: &[&Task]) -> MonthJson {
    let days = (1..=calendar::days_in_month(month))
        .map(|day| DayJson {
            day,
            tasks: layout::tasks_for_day(tasks, day)
                .iter()
                .map(|t| t.id)
                .collect(),
        })
        .collect();
    MonthJson {
        month: month.format("%Y-%m").to_string(),
        label: calendar::month_label(month),
        first_weekday: calendar::first_weekday_of_month(month),
        days,
    }
}

// ---------------------------------------------------------------------------
// Text formatting
// ---------------------------------------------------------------------------

/// `3-5    Review       Design Review  #1`
pub fn format_task_line(task: &Task) -> String {
    format!(
        "{:<5}  {:<11}  {}  #{}",
        format!("{}-{}", task.start_day, task.end_day),
        task.category.label(),
        task.name,
        task.id
    )
}

/// One line per task, then the same count line the calendar shows
pub fn format_task_list(visible: &[&Task], total: usize) -> Vec<String> {
    let mut lines: Vec<String> = visible.iter().map(|t| format_task_line(t)).collect();
    if !lines.is_empty() {
        lines.push(String::new());
    }
    lines.push(format!("Showing {} of {} tasks", visible.len(), total));
    lines
}

const CELL_W: usize = 6;

/// A month calendar with the number of tasks covering each day. Today gets a `*`.
pub fn format_month(month: NaiveDate, tasks: &[&Task], today: NaiveDate) -> Vec<String> {
    let mut lines = vec![calendar::month_label(month)];
    let header: String = calendar::WEEKDAY_NAMES
        .iter()
        .map(|name| format!("{:<width$}", name, width = CELL_W))
        .collect();
    lines.push(header.trim_end().to_string());

    let grid = calendar::month_grid(month);
    for week in grid.chunks(7) {
        let row: String = week
            .iter()
            .map(|cell| match cell {
                None => " ".repeat(CELL_W),
                Some(day) => {
                    let count = layout::tasks_for_day(tasks, *day).len();
                    let mut suffix = if count > 0 {
                        format!(" {}", count)
                    } else {
                        String::new()
                    };
                    let date = month.with_day(*day);
                    if date.is_some_and(|d| calendar::is_same_day(d, today)) {
                        suffix.push('*');
                    }
                    format!("{:>2}{:<width$}", day, suffix, width = CELL_W - 2)
                }
            })
            .collect();
        lines.push(row.trim_end().to_string());
    }

    let busiest = layout::max_stack(tasks, calendar::days_in_month(month));
    lines.push(String::new());
    lines.push(match tasks.len() {
        0 => "No tasks".to_string(),
        1 => "1 task".to_string(),
        n => format!("{} tasks, up to {} on one day", n, busiest),
    });
    lines
}
