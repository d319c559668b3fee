use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use std::fs::{self, File};
use std::path::{Path, PathBuf};

use super::types::{StoredState, STATE_VERSION};

/// Get the default state file path (~/.config/credit-score/state.json)
pub fn get_state_path() -> Result<PathBuf> {
    Ok(crate::config::get_config_dir()?.join("state.json"))
}

/// Load state from a JSON file
///
/// If the file doesn't exist, returns a new empty state.
/// If the file exists but has an unsupported version, returns an error.
pub fn load_state(path: &Path) -> Result<StoredState> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no state file, starting empty");
        return Ok(StoredState::new());
    }

    let file = File::open(path)
        .with_context(|| format!("Failed to open state file at {}", path.display()))?;

    let state: StoredState = serde_json::from_reader(file)
        .with_context(|| format!("Failed to load state from {}", path.display()))?;

    if state.version != STATE_VERSION {
        anyhow::bail!("Unsupported state version: {}", state.version);
    }

    Ok(state)
}

/// Save state to a JSON file atomically
///
/// The file is never left half-written. Parent directories are created.
pub fn save_state(path: &Path, state: &StoredState) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }
    }

    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;

    serde_json::to_writer_pretty(&mut file, state).context("Failed to serialize state")?;

    file.commit().context("Failed to save state")?;

    tracing::debug!(path = %path.display(), "state saved");
    Ok(())
}
