//! Pointer gestures over the month grid.
//!
//! At most one gesture is live at a time. [`GestureSlot`] owns it from
//! pointer-down until pointer-release; release consumes the gesture value,
//! so nothing about a finished gesture outlives it.

pub mod hit;
pub mod selection;
pub mod task_drag;

use crate::model::task::{DayRange, TaskId};
use crate::ops::task_ops::{TaskOpError, TaskStore};

pub use hit::{DayHitTest, GridGeometry};
pub use selection::Selection;
pub use task_drag::{DragKind, TaskDrag};

/// The live gesture
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Gesture {
    Select(Selection),
    Task(TaskDrag),
}

/// What a finished gesture produced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Nothing was active, or the gesture changed nothing
    Nothing,
    /// A day range is ready for the creation form
    Selected(DayRange),
    /// A task was dropped on a new start day
    Moved(TaskId),
    /// A resize ended (edits were already applied live)
    Resized(TaskId),
}

/// Single owner of the active gesture
#[derive(Debug, Clone, Default)]
pub struct GestureSlot {
    active: Option<Gesture>,
}

impl GestureSlot {
    pub fn is_idle(&self) -> bool {
        self.active.is_none()
    }

    pub fn active(&self) -> Option<&Gesture> {
        self.active.as_ref()
    }

    /// Install a gesture. Refused while another one is live.
    pub fn begin(&mut self, gesture: Gesture) -> bool {
        if self.active.is_some() {
            return false;
        }
        self.active = Some(gesture);
        true
    }

    /// The selection being dragged, if any
    pub fn selection(&self) -> Option<&Selection> {
        match &self.active {
            Some(Gesture::Select(sel)) => Some(sel),
            _ => None,
        }
    }

    /// The task drag in progress, if any
    pub fn task_drag(&self) -> Option<&TaskDrag> {
        match &self.active {
            Some(Gesture::Task(drag)) => Some(drag),
            _ => None,
        }
    }

    /// Route pointer movement to the live gesture. Returns whether the store changed.
    pub fn pointer_moved(
        &mut self,
        x: u16,
        y: u16,
        hit: &dyn DayHitTest,
        store: &mut TaskStore,
    ) -> Result<bool, TaskOpError> {
        match &mut self.active {
            None => Ok(false),
            Some(Gesture::Select(sel)) => {
                sel.extend(hit.day_at(x, y));
                Ok(false)
            }
            Some(Gesture::Task(drag)) => drag.update(x, y, hit, store),
        }
    }

    /// End the live gesture. The slot is empty afterwards, even on error.
    pub fn pointer_released(
        &mut self,
        x: u16,
        y: u16,
        hit: &dyn DayHitTest,
        store: &mut TaskStore,
    ) -> Result<Outcome, TaskOpError> {
        let gesture = match self.active.take() {
            Some(g) => g,
            None => return Ok(Outcome::Nothing),
        };
        match gesture {
            Gesture::Select(sel) => Ok(Outcome::Selected(sel.finish())),
            Gesture::Task(drag) => {
                let id = drag.task_id();
                let kind = drag.kind();
                let changed = drag.release(x, y, hit, store)?;
                Ok(match kind {
                    DragKind::Resize(_) => Outcome::Resized(id),
                    DragKind::Move if changed => Outcome::Moved(id),
                    DragKind::Move => Outcome::Nothing,
                })
            }
        }
    }

    /// Drop the live gesture without applying a release
    pub fn abandon(&mut self) -> Option<Gesture> {
        self.active.take()
    }
}
