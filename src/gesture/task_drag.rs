use log::debug;

use super::hit::DayHitTest;
use crate::model::task::TaskId;
use crate::ops::task_ops::{Edge, TaskOpError, TaskStore};

/// What a pointer-down on a task bar started
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragKind {
    /// Body grab: relocate on release
    Move,
    /// Handle grab: live-edit one edge
    Resize(Edge),
}

/// A gesture bound to one task bar
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDrag {
    task_id: TaskId,
    kind: DragKind,
    origin: (u16, u16),
    pointer: (u16, u16),
    /// Last day a resize applied, so updates fire once per cell crossing
    hovered: Option<u32>,
}

impl TaskDrag {
    pub fn start_move(task_id: TaskId, x: u16, y: u16) -> Self {
        Self::start(task_id, DragKind::Move, x, y)
    }

    /// Grab an edge handle. The day under the handle counts as already
    /// hovered, so the edge only moves once the pointer reaches another day.
    pub fn start_resize(
        task_id: TaskId,
        edge: Edge,
        x: u16,
        y: u16,
        hit: &dyn DayHitTest,
    ) -> Self {
        TaskDrag {
            hovered: hit.day_at_column(x, y),
            ..Self::start(task_id, DragKind::Resize(edge), x, y)
        }
    }

    fn start(task_id: TaskId, kind: DragKind, x: u16, y: u16) -> Self {
        TaskDrag {
            task_id,
            kind,
            origin: (x, y),
            pointer: (x, y),
            hovered: None,
        }
    }

    pub fn task_id(&self) -> TaskId {
        self.task_id
    }

    pub fn kind(&self) -> DragKind {
        self.kind
    }

    /// Pointer displacement since the grab, for drawing a moving bar
    pub fn offset(&self) -> (i32, i32) {
        (
            i32::from(self.pointer.0) - i32::from(self.origin.0),
            i32::from(self.pointer.1) - i32::from(self.origin.1),
        )
    }

    /// Pointer moved. A move only tracks the pointer; a resize hit-tests the
    /// pointer column and writes the new edge straight into the store.
    /// Returns whether the store changed.
    pub fn update(
        &mut self,
        x: u16,
        y: u16,
        hit: &dyn DayHitTest,
        store: &mut TaskStore,
    ) -> Result<bool, TaskOpError> {
        self.pointer = (x, y);
        let edge = match self.kind {
            DragKind::Move => return Ok(false),
            DragKind::Resize(edge) => edge,
        };
        let day = match hit.day_at_column(x, y) {
            Some(d) => d,
            None => return Ok(false),
        };
        if self.hovered == Some(day) {
            return Ok(false);
        }
        self.hovered = Some(day);
        let changed = store.resize(self.task_id, edge, day)?;
        if changed {
            debug!("resize task {} {:?} -> day {}", self.task_id, edge, day);
        }
        Ok(changed)
    }

    /// Pointer released. A move drops the task on the day under the pointer,
    /// keeping its duration; missing a day cell leaves it where it was.
    /// A resize has already been applied and just ends.
    pub fn release(
        mut self,
        x: u16,
        y: u16,
        hit: &dyn DayHitTest,
        store: &mut TaskStore,
    ) -> Result<bool, TaskOpError> {
        self.pointer = (x, y);
        match self.kind {
            DragKind::Resize(_) => Ok(false),
            DragKind::Move => match hit.day_at(x, y) {
                Some(day) => {
                    let changed = store.move_to(self.task_id, day)?;
                    if changed {
                        debug!("move task {} -> day {}", self.task_id, day);
                    }
                    Ok(changed)
                }
                None => Ok(false),
            },
        }
    }
}
