use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, warn};

use super::lock::{FileLock, LockError};
use super::paths::tasks_path;
use super::recovery::{RecoveryCategory, RecoveryEntry, atomic_write, log_recovery};
use crate::model::task::Task;
use crate::ops::task_ops::TaskStore;

/// Error type for reading and writing the task file
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("could not write {path}: {source}")]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not serialize tasks: {0}")]
    SerializeError(#[from] serde_json::Error),
    #[error(transparent)]
    Lock(#[from] LockError),
}

/// Strict read. A missing file is an empty list; anything unreadable is an error.
pub fn read_tasks(data_dir: &Path) -> Result<Vec<Task>, StoreError> {
    let path = tasks_path(data_dir);
    if !path.exists() {
        return Ok(Vec::new());
    }
    let text = fs::read_to_string(&path).map_err(|e| StoreError::ReadError {
        path: path.clone(),
        source: e,
    })?;
    serde_json::from_str(&text).map_err(|e| StoreError::ParseError { path, source: e })
}

/// Load saved tasks, failing soft: a missing file starts empty, and an
/// unreadable one is copied to `tasks.json.bak`, recorded in the recovery log,
/// and treated as empty.
pub fn load_tasks(data_dir: &Path) -> Vec<Task> {
    match read_tasks(data_dir) {
        Ok(tasks) => {
            debug!("loaded {} tasks from {}", tasks.len(), data_dir.display());
            tasks
        }
        Err(e) => {
            warn!("{}; starting with no tasks", e);
            set_aside(data_dir, &e);
            Vec::new()
        }
    }
}

/// Load into a fresh store
pub fn load_store(data_dir: &Path) -> TaskStore {
    TaskStore::from_tasks(load_tasks(data_dir))
}

fn set_aside(data_dir: &Path, err: &StoreError) {
    let path = tasks_path(data_dir);
    let backup = path.with_extension("json.bak");
    let body = fs::read_to_string(&path).unwrap_or_default();
    let mut entry = RecoveryEntry::new(RecoveryCategory::Parse, "could not load tasks.json")
        .field("Error", err.to_string())
        .body(body);
    match fs::copy(&path, &backup) {
        Ok(_) => entry = entry.field("Backup", backup.display().to_string()),
        Err(e) => warn!("could not back up {}: {}", path.display(), e),
    }
    log_recovery(data_dir, entry);
}

/// Write the full task list under the data-directory lock
pub fn save_tasks(data_dir: &Path, tasks: &[Task]) -> Result<(), StoreError> {
    fs::create_dir_all(data_dir).map_err(|e| StoreError::WriteError {
        path: data_dir.to_path_buf(),
        source: e,
    })?;
    let json = serde_json::to_string_pretty(tasks)?;
    let _lock = FileLock::acquire_default(data_dir)?;
    let path = tasks_path(data_dir);
    atomic_write(&path, json.as_bytes())
        .map_err(|e| StoreError::WriteError { path, source: e })?;
    debug!("saved {} tasks", tasks.len());
    Ok(())
}

/// Save, recording a failure in the recovery log before handing it back
pub fn save_or_record(data_dir: &Path, tasks: &[Task]) -> Result<(), StoreError> {
    save_tasks(data_dir, tasks).inspect_err(|e| {
        let body = serde_json::to_string_pretty(tasks).unwrap_or_default();
        log_recovery(
            data_dir,
            RecoveryEntry::new(RecoveryCategory::Write, "could not save tasks.json")
                .field("Error", e.to_string())
                .body(body),
        );
    })
}
