//! Cross-process advisory lock around store read-modify-write spans.

use std::fs::{self, File, OpenOptions};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use fs4::FileExt;

use crate::domain::error::StorageError;

/// How long to wait for another invocation to finish before giving up.
pub const DEFAULT_LOCK_WAIT: Duration = Duration::from_secs(5);

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Exclusive lock on a file; released when dropped.
#[derive(Debug)]
pub struct StoreLock {
    _file: File,
    path: PathBuf,
}

impl StoreLock {
    /// Acquire the lock at `path`, polling for at most `wait`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::ConcurrentModification` if the lock is still
    /// held after `wait`, or an I/O error if the lock file cannot be opened.
    pub fn acquire(path: &Path, wait: Duration) -> Result<Self> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        let file = OpenOptions::new()
            .create(true)
            .read(true)
            .write(true)
            .truncate(false)
            .open(path)
            .with_context(|| format!("failed to open {}", path.display()))?;

        let deadline = Instant::now() + wait;
        loop {
            match file.try_lock_exclusive() {
                Ok(()) => {
                    tracing::debug!(path = %path.display(), "store lock acquired");
                    return Ok(Self {
                        _file: file,
                        path: path.to_path_buf(),
                    });
                }
                Err(err) if is_contended(&err) => {
                    if Instant::now() >= deadline {
                        return Err(StorageError::ConcurrentModification {
                            path: path.to_path_buf(),
                        }
                        .into());
                    }
                    std::thread::sleep(POLL_INTERVAL);
                }
                Err(err) => {
                    return Err(err).with_context(|| format!("failed to lock {}", path.display()));
                }
            }
        }
    }
}

impl Drop for StoreLock {
    fn drop(&mut self) {
        tracing::debug!(path = %self.path.display(), "store lock released");
    }
}

fn is_contended(err: &std::io::Error) -> bool {
    if err.kind() == ErrorKind::WouldBlock {
        return true;
    }
    // ERROR_SHARING_VIOLATION / ERROR_LOCK_VIOLATION
    cfg!(windows) && matches!(err.raw_os_error(), Some(32 | 33))
}
