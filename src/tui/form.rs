use crate::model::task::{Category, DayRange, Task, TaskDraft, TaskId};
use crate::util::unicode;

/// What submitting the form will do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    /// Create a task over a freshly selected range
    Create { range: DayRange },
    /// Rename / recategorize an existing task
    Edit { task_id: TaskId },
}

/// Which field has keyboard focus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Name,
    Category,
}

/// The modal task form. Holds only the draft; the caller applies it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskForm {
    pub mode: FormMode,
    pub name: String,
    /// Byte offset into `name`, always on a grapheme boundary
    pub cursor: usize,
    pub category: Category,
    pub focus: FormField,
    /// Why the last submit was refused
    pub error: Option<String>,
}

impl TaskForm {
    /// Blank form for a new task
    pub fn create(range: DayRange) -> Self {
        TaskForm {
            mode: FormMode::Create { range },
            name: String::new(),
            cursor: 0,
            category: Category::default(),
            focus: FormField::Name,
            error: None,
        }
    }

    /// Form seeded from an existing task
    pub fn edit(task: &Task) -> Self {
        TaskForm {
            mode: FormMode::Edit { task_id: task.id },
            name: task.name.clone(),
            cursor: task.name.len(),
            category: task.category,
            focus: FormField::Name,
            error: None,
        }
    }

    pub fn title(&self) -> String {
        match self.mode {
            FormMode::Create { range } if range.start == range.end => {
                format!("New Task: day {}", range.start)
            }
            FormMode::Create { range } => format!("New Task: days {}-{}", range.start, range.end),
            FormMode::Edit { .. } => "Edit Task".to_string(),
        }
    }

    pub fn submit_label(&self) -> &'static str {
        match self.mode {
            FormMode::Create { .. } => "Create Task",
            FormMode::Edit { .. } => "Update Task",
        }
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            FormField::Name => FormField::Category,
            FormField::Category => FormField::Name,
        };
    }

    pub fn next_category(&mut self) {
        self.category = self.category.next();
    }

    pub fn prev_category(&mut self) {
        self.category = self.category.prev();
    }

    pub fn insert_char(&mut self, c: char) {
        self.name.insert(self.cursor, c);
        self.cursor += c.len_utf8();
        self.error = None;
    }

    pub fn insert_str(&mut self, s: &str) {
        let clean: String = s.chars().filter(|c| !c.is_control()).collect();
        self.name.insert_str(self.cursor, &clean);
        self.cursor += clean.len();
        self.error = None;
    }

    pub fn backspace(&mut self) {
        if let Some(prev) = unicode::prev_grapheme_boundary(&self.name, self.cursor) {
            self.name.replace_range(prev..self.cursor, "");
            self.cursor = prev;
        }
    }

    pub fn delete(&mut self) {
        if let Some(next) = unicode::next_grapheme_boundary(&self.name, self.cursor) {
            self.name.replace_range(self.cursor..next, "");
        }
    }

    pub fn delete_word_back(&mut self) {
        let start = unicode::word_boundary_left(&self.name, self.cursor);
        self.name.replace_range(start..self.cursor, "");
        self.cursor = start;
    }

    pub fn cursor_left(&mut self) {
        if let Some(prev) = unicode::prev_grapheme_boundary(&self.name, self.cursor) {
            self.cursor = prev;
        }
    }

    pub fn cursor_right(&mut self) {
        if let Some(next) = unicode::next_grapheme_boundary(&self.name, self.cursor) {
            self.cursor = next;
        }
    }

    pub fn cursor_home(&mut self) {
        self.cursor = 0;
    }

    pub fn cursor_end(&mut self) {
        self.cursor = self.name.len();
    }

    /// Display column of the cursor within the name field
    pub fn cursor_col(&self) -> usize {
        unicode::byte_offset_to_display_col(&self.name, self.cursor)
    }

    /// Hand back the draft, or refuse when the name is blank.
    /// A refused submit leaves the form open with an error.
    pub fn submit(&mut self) -> Option<TaskDraft> {
        if self.name.trim().is_empty() {
            self.error = Some("Task name is required".to_string());
            return None;
        }
        self.error = None;
        Some(TaskDraft {
            name: self.name.clone(),
            category: self.category,
        })
    }
}
