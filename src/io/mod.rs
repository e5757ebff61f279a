pub mod autosave;
pub mod config_io;
pub mod lock;
pub mod logging;
pub mod paths;
pub mod recovery;
pub mod store_io;
pub mod watcher;
