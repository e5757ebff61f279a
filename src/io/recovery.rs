use std::fmt;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use tempfile::NamedTempFile;

use super::paths::RECOVERY_FILE;

/// Self-documenting header written at the top of a new recovery log.
const FILE_HEADER: &str = "\
<!-- plancal recovery log: append-only
     Data plancal could not load or save normally ends up here.
     View with: plancal recovery
     Safe to delete. -->

---
";

/// Category of a recovery entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecoveryCategory {
    /// tasks.json could not be parsed and was set aside
    Parse,
    /// A save failed
    Write,
}

impl fmt::Display for RecoveryCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecoveryCategory::Parse => write!(f, "parse"),
            RecoveryCategory::Write => write!(f, "write"),
        }
    }
}

/// A single entry in the recovery log.
#[derive(Debug, Clone)]
pub struct RecoveryEntry {
    pub timestamp: DateTime<Utc>,
    pub category: RecoveryCategory,
    pub description: String,
    pub fields: Vec<(String, String)>,
    pub body: String,
}

impl RecoveryEntry {
    pub fn new(category: RecoveryCategory, description: impl Into<String>) -> Self {
        RecoveryEntry {
            timestamp: Utc::now(),
            category,
            description: description.into(),
            fields: Vec::new(),
            body: String::new(),
        }
    }

    pub fn field(mut self, key: &str, value: impl Into<String>) -> Self {
        self.fields.push((key.to_string(), value.into()));
        self
    }

    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    /// Format this entry as a markdown block for the recovery log.
    fn to_markdown(&self) -> String {
        let mut out = format!(
            "## {} {}: {}\n\n",
            self.timestamp
                .to_rfc3339_opts(chrono::SecondsFormat::Secs, true),
            self.category,
            self.description,
        );
        for (key, value) in &self.fields {
            out.push_str(&format!("{}: {}\n", key, value));
        }
        if !self.body.is_empty() {
            out.push_str("\n```text\n");
            out.push_str(&self.body);
            if !self.body.ends_with('\n') {
                out.push('\n');
            }
            out.push_str("```\n");
        }
        out.push_str("\n---\n");
        out
    }
}

/// Return the path to the recovery log file.
pub fn recovery_log_path(data_dir: &Path) -> PathBuf {
    data_dir.join(RECOVERY_FILE)
}

/// Write `content` to `path` atomically using a temp file + rename.
pub fn atomic_write(path: &Path, content: &[u8]) -> io::Result<()> {
    let dir = path.parent().unwrap_or(Path::new("."));
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// Append a recovery entry to the log. Failures are logged and swallowed.
pub fn log_recovery(data_dir: &Path, entry: RecoveryEntry) {
    if let Err(e) = log_recovery_inner(data_dir, &entry) {
        log::error!("could not write to recovery log: {}", e);
    }
}

fn log_recovery_inner(data_dir: &Path, entry: &RecoveryEntry) -> io::Result<()> {
    fs::create_dir_all(data_dir)?;
    let path = recovery_log_path(data_dir);
    let needs_header = fs::metadata(&path).map_or(true, |m| m.len() == 0);
    let mut file = OpenOptions::new().create(true).append(true).open(&path)?;
    if needs_header {
        file.write_all(FILE_HEADER.as_bytes())?;
    }
    file.write_all(entry.to_markdown().as_bytes())?;
    Ok(())
}

/// Read the whole log, `None` if it does not exist
pub fn read_recovery_log(data_dir: &Path) -> Option<String> {
    fs::read_to_string(recovery_log_path(data_dir)).ok()
}

/// Number of entries in the log
pub fn entry_count(data_dir: &Path) -> usize {
    read_recovery_log(data_dir)
        .map(|text| text.lines().filter(|l| l.starts_with("## ")).count())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn entries_append_after_header() {
        let dir = TempDir::new().unwrap();
        log_recovery(
            dir.path(),
            RecoveryEntry::new(RecoveryCategory::Parse, "unreadable tasks.json")
                .field("Backup", "tasks.json.bak")
                .body("not json {{{"),
        );
        log_recovery(
            dir.path(),
            RecoveryEntry::new(RecoveryCategory::Write, "save failed"),
        );

        let text = read_recovery_log(dir.path()).unwrap();
        assert!(text.starts_with("<!-- plancal recovery log"));
        assert_eq!(text.matches("plancal recovery log").count(), 1);
        assert!(text.contains("parse: unreadable tasks.json"));
        assert!(text.contains("Backup: tasks.json.bak"));
        assert!(text.contains("```text\nnot json {{{\n```"));
        assert!(text.contains("write: save failed"));
        assert_eq!(entry_count(dir.path()), 2);
    }

    #[test]
    fn missing_log_reads_as_none() {
        let dir = TempDir::new().unwrap();
        assert!(read_recovery_log(dir.path()).is_none());
        assert_eq!(entry_count(dir.path()), 0);
    }

    #[test]
    fn atomic_write_replaces_contents() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("file.json");
        atomic_write(&path, b"one").unwrap();
        atomic_write(&path, b"two").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "two");
    }
}
