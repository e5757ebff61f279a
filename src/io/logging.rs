use std::fs::{self, OpenOptions};
use std::path::PathBuf;

use env_logger::{Builder, Target, WriteStyle};
use log::LevelFilter;

use crate::model::config::LogConfig;

/// Where diagnostic logs go
#[derive(Debug, Clone)]
pub enum LogTarget {
    /// One-shot CLI commands
    Stderr,
    /// The TUI owns the terminal, so it logs to a file
    File(PathBuf),
}

/// Install the global logger. `RUST_LOG`, when set, overrides `[log] level`.
/// Safe to call more than once; later calls are ignored.
pub fn init_logging(config: &LogConfig, target: LogTarget) {
    let mut builder = Builder::new();
    builder.parse_filters(&config.level);
    if let Ok(filters) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filters);
    }

    match target {
        LogTarget::Stderr => {
            builder.target(Target::Stderr);
        }
        LogTarget::File(path) => {
            let opened = path
                .parent()
                .map_or(Ok(()), fs::create_dir_all)
                .and_then(|_| OpenOptions::new().create(true).append(true).open(&path));
            match opened {
                Ok(file) => {
                    builder
                        .target(Target::Pipe(Box::new(file)))
                        .write_style(WriteStyle::Never);
                }
                // Never fall back to the terminal while the TUI is drawing
                Err(_) => {
                    builder.filter_level(LevelFilter::Off);
                }
            }
        }
    }

    let _ = builder.try_init();
}
