use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use log::debug;

use super::paths::LOCK_FILE;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);
const RETRY_START: Duration = Duration::from_millis(5);
const RETRY_MAX: Duration = Duration::from_millis(100);

/// Exclusive write lock on a data directory (`<data_dir>/.lock`).
///
/// Taken around every write of tasks.json, so the calendar and a CLI command
/// never interleave. The lock file itself is left in place; it holds the pid
/// of the last writer, which shows up in the timeout error. The flock is
/// released when the guard drops.
pub struct FileLock {
    _file: File,
}

/// Error type for lock operations
#[derive(Debug, thiserror::Error)]
pub enum LockError {
    #[error("could not open lock file {path}: {source}")]
    CreateError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("timed out waiting for {path} (held by {holder})")]
    Timeout { path: PathBuf, holder: String },
}

impl FileLock {
    /// Wait up to `timeout` for the lock, backing off between attempts
    pub fn acquire(data_dir: &Path, timeout: Duration) -> Result<Self, LockError> {
        let path = data_dir.join(LOCK_FILE);
        let mut file = OpenOptions::new()
            .create(true)
            .read(true)
            .write(true)
            .truncate(false)
            .open(&path)
            .map_err(|e| LockError::CreateError {
                path: path.clone(),
                source: e,
            })?;

        let deadline = Instant::now() + timeout;
        let mut wait = RETRY_START;
        while !try_lock(&file) {
            let now = Instant::now();
            if now >= deadline {
                let holder = read_holder(&mut file);
                return Err(LockError::Timeout { path, holder });
            }
            std::thread::sleep(wait.min(deadline - now));
            wait = (wait * 2).min(RETRY_MAX);
        }

        record_holder(&mut file);
        debug!("locked {}", path.display());
        Ok(FileLock { _file: file })
    }

    pub fn acquire_default(data_dir: &Path) -> Result<Self, LockError> {
        Self::acquire(data_dir, DEFAULT_TIMEOUT)
    }
}

/// Overwrite the lock file with our pid. Best effort.
fn record_holder(file: &mut File) {
    let _ = file
        .set_len(0)
        .and_then(|_| file.seek(SeekFrom::Start(0)))
        .and_then(|_| write!(file, "{}", std::process::id()));
}

fn read_holder(file: &mut File) -> String {
    let mut text = String::new();
    match file
        .seek(SeekFrom::Start(0))
        .and_then(|_| file.read_to_string(&mut text))
    {
        Ok(_) if !text.trim().is_empty() => format!("pid {}", text.trim()),
        _ => "another plancal process".to_string(),
    }
}

#[cfg(unix)]
fn try_lock(file: &File) -> bool {
    use std::os::unix::io::AsRawFd;
    // SAFETY: the fd stays valid for as long as `file` is borrowed
    unsafe { libc::flock(file.as_raw_fd(), libc::LOCK_EX | libc::LOCK_NB) == 0 }
}

#[cfg(not(unix))]
fn try_lock(_file: &File) -> bool {
    true
}
