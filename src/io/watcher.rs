use std::path::Path;
use std::sync::mpsc;

use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};

use super::paths::TASKS_FILE;

/// Events sent from the file watcher to the TUI event loop.
#[derive(Debug, PartialEq, Eq)]
pub enum FileEvent {
    /// tasks.json was created, modified, or removed on disk.
    TasksChanged,
}

/// Watches the data directory for changes to tasks.json made by other processes.
pub struct TaskFileWatcher {
    _watcher: RecommendedWatcher,
    rx: mpsc::Receiver<FileEvent>,
}

/// Whether a raw notify event concerns the task file
fn is_tasks_event(event: &Event) -> bool {
    match event.kind {
        EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_) => {}
        _ => return false,
    }
    event
        .paths
        .iter()
        .any(|p| p.file_name().and_then(|n| n.to_str()) == Some(TASKS_FILE))
}

impl TaskFileWatcher {
    /// Start watching `data_dir`. Call `poll()` each tick.
    pub fn start(data_dir: &Path) -> Result<Self, notify::Error> {
        let (tx, rx) = mpsc::channel();

        let mut watcher = RecommendedWatcher::new(
            move |result: Result<Event, notify::Error>| {
                if let Ok(event) = result
                    && is_tasks_event(&event)
                {
                    let _ = tx.send(FileEvent::TasksChanged);
                }
            },
            Config::default(),
        )?;

        watcher.watch(data_dir, RecursiveMode::NonRecursive)?;
        Ok(TaskFileWatcher {
            _watcher: watcher,
            rx,
        })
    }

    /// Non-blocking: true if the task file changed since the last poll.
    /// Bursts of events collapse into one.
    pub fn poll(&self) -> bool {
        let mut changed = false;
        while let Ok(FileEvent::TasksChanged) = self.rx.try_recv() {
            changed = true;
        }
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use notify::event::{CreateKind, ModifyKind};
    use std::path::PathBuf;

    fn event(kind: EventKind, path: &str) -> Event {
        Event::new(kind).add_path(PathBuf::from(path))
    }

    #[test]
    fn only_task_file_events_count() {
        assert!(is_tasks_event(&event(
            EventKind::Modify(ModifyKind::Any),
            "/data/plancal/tasks.json"
        )));
        assert!(is_tasks_event(&event(
            EventKind::Create(CreateKind::File),
            "/data/plancal/tasks.json"
        )));
        assert!(!is_tasks_event(&event(
            EventKind::Modify(ModifyKind::Any),
            "/data/plancal/.lock"
        )));
        assert!(!is_tasks_event(&event(
            EventKind::Access(notify::event::AccessKind::Any),
            "/data/plancal/tasks.json"
        )));
    }
}
