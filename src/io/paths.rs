use std::path::{Path, PathBuf};

/// File names inside the data directory
pub const TASKS_FILE: &str = "tasks.json";
pub const LOCK_FILE: &str = ".lock";
pub const RECOVERY_FILE: &str = ".recovery.log";
pub const LOG_FILE: &str = "plancal.log";

/// Get the user's home directory
fn dirs_home() -> PathBuf {
    std::env::var("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("/"))
}

/// Config file path, respecting XDG_CONFIG_HOME
pub fn config_path() -> PathBuf {
    let config_dir = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| dirs_home().join(".config"));
    config_dir.join("plancal").join("config.toml")
}

/// Default data directory, respecting XDG_DATA_HOME
pub fn default_data_dir() -> PathBuf {
    let data_dir = std::env::var("XDG_DATA_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| dirs_home().join(".local").join("share"));
    data_dir.join("plancal")
}

/// The data directory to use: an explicit override, else the XDG default
pub fn resolve_data_dir(override_dir: Option<&str>) -> PathBuf {
    match override_dir {
        Some(dir) => PathBuf::from(dir),
        None => default_data_dir(),
    }
}

pub fn tasks_path(data_dir: &Path) -> PathBuf {
    data_dir.join(TASKS_FILE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn override_wins() {
        assert_eq!(
            resolve_data_dir(Some("/tmp/plan")),
            PathBuf::from("/tmp/plan")
        );
        assert_eq!(
            tasks_path(Path::new("/tmp/plan")),
            PathBuf::from("/tmp/plan/tasks.json")
        );
    }

    #[test]
    fn default_paths_end_in_app_dir() {
        assert!(default_data_dir().ends_with("plancal"));
        assert!(config_path().ends_with("plancal/config.toml"));
    }
}
