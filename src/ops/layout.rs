use crate::model::task::{Task, TaskId};

/// A task bar as placed on the month grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bar {
    pub task_id: TaskId,
    /// Day the bar is drawn on
    pub start_day: u32,
    /// Day columns covered, `end_day - start_day + 1`
    pub span: u32,
    /// Row offset among the tasks covering `start_day` (0 = topmost)
    pub slot: usize,
}

/// Visible tasks whose range contains `day`, in filtered order
pub fn tasks_for_day<'a>(visible: &[&'a Task], day: u32) -> Vec<&'a Task> {
    if day == 0 {
        return Vec::new();
    }
    visible.iter().copied().filter(|t| t.covers(day)).collect()
}

/// Bars for every day of a month, one per task, emitted on its start day
pub fn month_bars(visible: &[&Task], days_in_month: u32) -> Vec<Bar> {
    let mut bars = Vec::new();
    for day in 1..=days_in_month {
        for (slot, task) in tasks_for_day(visible, day).into_iter().enumerate() {
            if task.start_day == day {
                bars.push(Bar {
                    task_id: task.id,
                    start_day: day,
                    span: task.span(),
                    slot,
                });
            }
        }
    }
    bars
}

/// Deepest stack on any day, i.e. the number of bar rows a cell needs
pub fn max_stack(visible: &[&Task], days_in_month: u32) -> usize {
    (1..=days_in_month)
        .map(|day| tasks_for_day(visible, day).len())
        .max()
        .unwrap_or(0)
}
