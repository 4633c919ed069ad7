//! Data directory resolution.

use std::path::PathBuf;

/// Resolve the data directory: `TIG_ADVISOR_DATA_DIR` when set, otherwise
/// `~/.tig-advisor`, otherwise `./.tig-advisor`.
pub fn resolve_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("TIG_ADVISOR_DATA_DIR") {
        return PathBuf::from(dir);
    }

    if let Some(home) = dirs::home_dir() {
        return home.join(".tig-advisor");
    }

    PathBuf::from(".tig-advisor")
}
