//! Infrastructure implementation of the `ProfileStore` port.
//!
//! `JsonProfileStore` keeps profiles and settings in two pretty-printed JSON
//! files with atomic write (temp file + rename) so a failed write never
//! truncates the previous content.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::application::ports::{ProfileStore, StoreGuard};
use crate::domain::error::StorageError;
use crate::domain::profile::{Profile, Settings};
use crate::infra::fs;
use crate::infra::lock::{DEFAULT_LOCK_WAIT, StoreLock};
use crate::infra::paths;

pub const PROFILES_FILE: &str = "profiles.json";
pub const SETTINGS_FILE: &str = "config.json";
pub const LOCK_FILE: &str = ".lock";

/// Profile store backed by JSON files under one directory.
#[derive(Debug, Clone)]
pub struct JsonProfileStore {
    dir: PathBuf,
    lock_wait: Duration,
}

impl JsonProfileStore {
    /// Create a store in the default directory (`~/.envmanager`, or
    /// `$ENVMANAGER_HOME`).
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new() -> Result<Self> {
        Ok(Self::with_dir(paths::config_dir()?))
    }

    /// Create a store rooted at an explicit directory (used in tests).
    #[must_use]
    pub fn with_dir(dir: PathBuf) -> Self {
        Self {
            dir,
            lock_wait: DEFAULT_LOCK_WAIT,
        }
    }

    /// Override how long `lock` waits for a competing process.
    #[must_use]
    pub fn with_lock_wait(mut self, wait: Duration) -> Self {
        self.lock_wait = wait;
        self
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    #[must_use]
    pub fn profiles_path(&self) -> PathBuf {
        self.dir.join(PROFILES_FILE)
    }

    #[must_use]
    pub fn settings_path(&self) -> PathBuf {
        self.dir.join(SETTINGS_FILE)
    }

    #[must_use]
    pub fn lock_path(&self) -> PathBuf {
        self.dir.join(LOCK_FILE)
    }
}

impl ProfileStore for JsonProfileStore {
    fn load_profiles(&self) -> Result<BTreeMap<String, Profile>> {
        let path = self.profiles_path();
        let mut profiles: BTreeMap<String, Profile> = read_artifact(&path)?.unwrap_or_default();
        for (name, profile) in &mut profiles {
            profile.name.clone_from(name);
        }
        tracing::debug!(path = %path.display(), count = profiles.len(), "profiles loaded");
        Ok(profiles)
    }

    fn save_profiles(&self, profiles: &BTreeMap<String, Profile>) -> Result<()> {
        write_artifact(&self.profiles_path(), profiles)
    }

    fn load_settings(&self) -> Result<Settings> {
        Ok(read_artifact(&self.settings_path())?.unwrap_or_default())
    }

    fn save_settings(&self, settings: &Settings) -> Result<()> {
        write_artifact(&self.settings_path(), settings)
    }

    fn lock(&self) -> Result<StoreGuard> {
        let lock = StoreLock::acquire(&self.lock_path(), self.lock_wait)?;
        Ok(Box::new(lock))
    }
}

/// Read and parse an artifact. `Ok(None)` when the file does not exist.
fn read_artifact<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    let Some(bytes) = fs::read_optional(path)? else {
        return Ok(None);
    };
    serde_json::from_slice(&bytes).map(Some).map_err(|e| {
        tracing::warn!(path = %path.display(), error = %e, "artifact does not parse");
        StorageError::Corrupt {
            path: path.to_path_buf(),
            detail: e.to_string(),
        }
        .into()
    })
}

/// Serialize fully before touching the disk, then replace `path` atomically.
fn write_artifact<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let mut content = serde_json::to_string_pretty(value)
        .with_context(|| format!("serializing {}", path.display()))?;
    content.push('\n');
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating directory {}", parent.display()))?;
    }
    fs::write_atomic(path, content.as_bytes(), None)
}
