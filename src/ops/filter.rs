use crate::model::filter::{FilterState, TimeWindow};
use crate::model::task::Task;

/// One stage of the visibility pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Category,
    Window,
    Query,
}

impl Stage {
    /// Pipeline order
    pub const ALL: [Stage; 3] = [Stage::Category, Stage::Window, Stage::Query];
}

/// Category stage: the task's category toggle is on
pub fn category_allows(filter: &FilterState, task: &Task) -> bool {
    filter.is_shown(task.category)
}

/// Window stage: the task starts no later than `today + 7 * weeks`.
/// Compares days of month only, with no carry into the next month.
pub fn window_allows(window: Option<TimeWindow>, today: u32, task: &Task) -> bool {
    match window {
        None => true,
        Some(w) => task.start_day <= today + w.days(),
    }
}

/// Query stage: case-insensitive substring of the task name
pub fn query_matches(query: &str, task: &Task) -> bool {
    query.is_empty() || task.name.to_lowercase().contains(&query.to_lowercase())
}

/// Apply a single stage to an already-narrowed list
pub fn apply_stage<'a>(
    stage: Stage,
    tasks: Vec<&'a Task>,
    filter: &FilterState,
    today: u32,
) -> Vec<&'a Task> {
    tasks
        .into_iter()
        .filter(|task| match stage {
            Stage::Category => category_allows(filter, task),
            Stage::Window => window_allows(filter.window, today, task),
            Stage::Query => query_matches(&filter.query, task),
        })
        .collect()
}

/// Tasks that survive every stage, in store order. `today` is the current day of month.
pub fn visible_tasks<'a>(tasks: &'a [Task], filter: &FilterState, today: u32) -> Vec<&'a Task> {
    Stage::ALL
        .iter()
        .fold(tasks.iter().collect::<Vec<_>>(), |acc, &stage| {
            apply_stage(stage, acc, filter, today)
        })
}
