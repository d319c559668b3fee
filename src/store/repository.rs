use anyhow::{anyhow, Result};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use super::storage::{load_state, save_state};
use super::types::{AuthSession, StoredState};
use crate::profile::ProfileForm;

/// The single "active analysis" slot.
///
/// Saving overwrites whatever was there; clearing an empty slot is a no-op.
pub trait ProfileRepository {
    fn save(&self, form: &ProfileForm) -> Result<()>;
    fn load(&self) -> Result<Option<ProfileForm>>;
    fn clear(&self) -> Result<()>;
}

/// The signed-in user slot.
pub trait SessionRepository {
    fn save_session(&self, session: &AuthSession) -> Result<()>;
    fn load_session(&self) -> Result<Option<AuthSession>>;
    fn clear_session(&self) -> Result<()>;
}

/// In-process store, lost when dropped.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: Mutex<StoredState>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, StoredState>> {
        self.state
            .lock()
            .map_err(|_| anyhow!("Memory store lock poisoned"))
    }
}

impl ProfileRepository for MemoryStore {
    fn save(&self, form: &ProfileForm) -> Result<()> {
        self.lock()?.credit_data = Some(form.clone());
        Ok(())
    }

    fn load(&self) -> Result<Option<ProfileForm>> {
        Ok(self.lock()?.credit_data.clone())
    }

    fn clear(&self) -> Result<()> {
        self.lock()?.credit_data = None;
        Ok(())
    }
}

impl SessionRepository for MemoryStore {
    fn save_session(&self, session: &AuthSession) -> Result<()> {
        self.lock()?.session = Some(session.clone());
        Ok(())
    }

    fn load_session(&self) -> Result<Option<AuthSession>> {
        Ok(self.lock()?.session.clone())
    }

    fn clear_session(&self) -> Result<()> {
        self.lock()?.session = None;
        Ok(())
    }
}

/// Store backed by one JSON document on disk.
///
/// Every operation re-reads the file, so separate processes see each
/// other's writes.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn update(&self, apply: impl FnOnce(&mut StoredState)) -> Result<()> {
        let mut state = load_state(&self.path)?;
        apply(&mut state);
        save_state(&self.path, &state)
    }
}

impl ProfileRepository for FileStore {
    fn save(&self, form: &ProfileForm) -> Result<()> {
        self.update(|state| state.credit_data = Some(form.clone()))?;
        tracing::info!("saved profile to {}", self.path.display());
        Ok(())
    }

    fn load(&self) -> Result<Option<ProfileForm>> {
        Ok(load_state(&self.path)?.credit_data)
    }

    fn clear(&self) -> Result<()> {
        if !self.path.exists() {
            return Ok(());
        }
        self.update(|state| state.credit_data = None)?;
        tracing::info!("cleared profile in {}", self.path.display());
        Ok(())
    }
}

impl SessionRepository for FileStore {
    fn save_session(&self, session: &AuthSession) -> Result<()> {
        self.update(|state| state.session = Some(session.clone()))
    }

    fn load_session(&self) -> Result<Option<AuthSession>> {
        Ok(load_state(&self.path)?.session)
    }

    fn clear_session(&self) -> Result<()> {
        if !self.path.exists() {
            return Ok(());
        }
        self.update(|state| state.session = None)
    }
}
