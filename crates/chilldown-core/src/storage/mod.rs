pub mod config;
pub mod database;
pub mod state;

pub use config::{Config, NotificationsConfig, PomodoroConfig, UiConfig};
pub use database::Database;
pub use state::StateStore;

use std::path::PathBuf;

use crate::error::StorageError;

/// Returns `~/.config/chilldown[-dev]/` based on CHILLDOWN_ENV.
///
/// Set CHILLDOWN_ENV=dev to use the development data directory.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, StorageError> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("CHILLDOWN_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("chilldown-dev")
    } else {
        base_dir.join("chilldown")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
