use chrono::Utc;

use crate::model::task::{Category, DayRange, Task, TaskDraft, TaskId};

/// Error type for task store operations
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TaskOpError {
    #[error("task name must not be empty")]
    EmptyName,
    #[error("task not found: {0}")]
    NotFound(TaskId),
    #[error("invalid day: {0}")]
    InvalidDay(u32),
    #[error("invalid range: day {start} is after day {end}")]
    InvertedRange { start: u32, end: u32 },
}

/// Which edge of a task bar a resize drags
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Start,
    End,
}

/// Owner of the task list. All mutations go through here; every accepted
/// mutation bumps `revision` so persistence and views can tell when to refresh.
#[derive(Debug, Clone, Default)]
pub struct TaskStore {
    tasks: Vec<Task>,
    revision: u64,
    last_id: TaskId,
}

impl TaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an already-loaded list (order preserved)
    pub fn from_tasks(tasks: Vec<Task>) -> Self {
        let last_id = tasks.iter().map(|t| t.id).max().unwrap_or(0);
        TaskStore {
            tasks,
            revision: 0,
            last_id,
        }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Monotonic change counter
    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn touch(&mut self) {
        self.revision += 1;
    }

    fn get_mut(&mut self, id: TaskId) -> Result<&mut Task, TaskOpError> {
        self.tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(TaskOpError::NotFound(id))
    }

    /// Creation timestamp in milliseconds, bumped past the last issued id
    fn next_id(&mut self) -> TaskId {
        let now = u64::try_from(Utc::now().timestamp_millis()).unwrap_or(0);
        let id = now.max(self.last_id.saturating_add(1));
        self.last_id = id;
        id
    }

    /// Append a new task over `range`
    pub fn create(&mut self, range: DayRange, draft: TaskDraft) -> Result<&Task, TaskOpError> {
        validate_name(&draft.name)?;
        validate_range(range.start, range.end)?;
        let id = self.next_id();
        self.tasks.push(Task {
            id,
            name: draft.name,
            category: draft.category,
            start_day: range.start,
            end_day: range.end,
        });
        self.touch();
        Ok(&self.tasks[self.tasks.len() - 1])
    }

    /// Move a task so it starts on `new_start`, keeping its duration.
    /// Returns whether anything changed.
    pub fn move_to(&mut self, id: TaskId, new_start: u32) -> Result<bool, TaskOpError> {
        if new_start == 0 {
            return Err(TaskOpError::InvalidDay(new_start));
        }
        let task = self.get_mut(id)?;
        if task.start_day == new_start {
            return Ok(false);
        }
        let duration = task.duration();
        task.start_day = new_start;
        task.end_day = new_start.saturating_add(duration);
        self.touch();
        Ok(true)
    }

    /// Set one edge of a task to `day`. A start past the end, or an end before
    /// the start, is refused (returns `Ok(false)`) so the range never inverts.
    pub fn resize(&mut self, id: TaskId, edge: Edge, day: u32) -> Result<bool, TaskOpError> {
        if day == 0 {
            return Err(TaskOpError::InvalidDay(day));
        }
        let task = self.get_mut(id)?;
        let changed = match edge {
            Edge::Start if day <= task.end_day && day != task.start_day => {
                task.start_day = day;
                true
            }
            Edge::End if day >= task.start_day && day != task.end_day => {
                task.end_day = day;
                true
            }
            _ => false,
        };
        if changed {
            self.touch();
        }
        Ok(changed)
    }

    /// Replace a task's name and category
    pub fn update(&mut self, id: TaskId, draft: TaskDraft) -> Result<bool, TaskOpError> {
        validate_name(&draft.name)?;
        let task = self.get_mut(id)?;
        if task.name == draft.name && task.category == draft.category {
            return Ok(false);
        }
        task.name = draft.name;
        task.category = draft.category;
        self.touch();
        Ok(true)
    }

    /// Change only the category
    pub fn set_category(&mut self, id: TaskId, category: Category) -> Result<bool, TaskOpError> {
        let name = self.get(id).ok_or(TaskOpError::NotFound(id))?.name.clone();
        self.update(id, TaskDraft { name, category })
    }

    /// Drop every task
    pub fn clear(&mut self) -> usize {
        let removed = self.tasks.len();
        if removed > 0 {
            self.tasks.clear();
            self.touch();
        }
        removed
    }

    /// Swap in a list read back from disk. Returns false when it matches what we hold.
    pub fn replace_all(&mut self, tasks: Vec<Task>) -> bool {
        if tasks == self.tasks {
            return false;
        }
        self.last_id = self
            .last_id
            .max(tasks.iter().map(|t| t.id).max().unwrap_or(0));
        self.tasks = tasks;
        self.touch();
        true
    }
}

fn validate_name(name: &str) -> Result<(), TaskOpError> {
    if name.trim().is_empty() {
        Err(TaskOpError::EmptyName)
    } else {
        Ok(())
    }
}

fn validate_range(start: u32, end: u32) -> Result<(), TaskOpError> {
    if start == 0 {
        return Err(TaskOpError::InvalidDay(start));
    }
    if start > end {
        return Err(TaskOpError::InvertedRange { start, end });
    }
    Ok(())
}
