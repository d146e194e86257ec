//! Path utilities for bubbleshow data directories

use std::path::PathBuf;
use std::sync::OnceLock;

/// Global storage for custom data directory path
static DATA_DIR: OnceLock<PathBuf> = OnceLock::new();

/// Initialize the data directory with an optional custom path.
/// Must be called early in main() before any other path functions are used.
/// If custom_path is None, uses the default ~/.bubbleshow location.
pub fn init_data_dir(custom_path: Option<PathBuf>) {
    let path = custom_path.unwrap_or_else(default_data_dir);
    if DATA_DIR.set(path.clone()).is_err() {
        tracing::debug!(path = %path.display(), "Data directory already initialized");
    }
}

/// Get the default data directory path (~/.bubbleshow)
fn default_data_dir() -> PathBuf {
    dirs::home_dir()
        .map(|h| h.join(".bubbleshow"))
        .unwrap_or_else(|| PathBuf::from(".bubbleshow"))
}

/// Get the base data directory.
/// Returns the custom path if set via init_data_dir(), otherwise ~/.bubbleshow
pub fn data_dir() -> PathBuf {
    DATA_DIR.get().cloned().unwrap_or_else(default_data_dir)
}

/// Get the logs directory (~/.bubbleshow/logs)
pub fn logs_dir() -> PathBuf {
    data_dir().join("logs")
}

/// Get the default log file path (~/.bubbleshow/logs/bubbleshow.log)
pub fn log_file_path() -> PathBuf {
    logs_dir().join("bubbleshow.log")
}

/// Get the config file path (~/.bubbleshow/config.toml)
pub fn config_path() -> PathBuf {
    data_dir().join("config.toml")
}
