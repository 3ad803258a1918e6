//! Infrastructure implementations of the `PermanentVarStore` port.
//!
//! - `ShellRcStore` keeps one `export KEY='value'` directive per key in a
//!   shell startup file.
//! - `RegistryStore` writes the per-user registry through `setx` / `reg`.
//!
//! `HostPermanentStore` picks one of them once, from the detected platform.

use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::application::ports::{CommandRunner, PermanentVarStore};
use crate::domain::error::PlatformError;
use crate::domain::platform::Platform;
use crate::domain::shell::{remove_export, upsert_export, validate_shell_key};
use crate::infra::command_runner::ensure_success;
use crate::infra::{fs, paths};

// ── Shell startup file ───────────────────────────────────────────────────────

/// Permanent variables as `export` directives in a shell startup file.
#[derive(Debug, Clone)]
pub struct ShellRcStore {
    path: PathBuf,
}

impl ShellRcStore {
    #[must_use]
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The file to rewrite: the symlink target when the startup file is a
    /// link into a dotfiles checkout.
    fn target(&self) -> Result<PathBuf> {
        if let Ok(resolved) = std::fs::canonicalize(&self.path) {
            return Ok(resolved);
        }
        let parent_exists = self
            .path
            .parent()
            .is_none_or(|p| p.as_os_str().is_empty() || p.is_dir());
        if !parent_exists {
            return Err(PlatformError::MechanismUnavailable {
                mechanism: "shell startup file".to_string(),
                detail: format!("directory of {} does not exist", self.path.display()),
            }
            .into());
        }
        Ok(self.path.clone())
    }

    fn read(&self, target: &Path) -> Result<String> {
        let bytes = fs::read_optional(target)
            .map_err(|e| self.permission_error(e, "read"))?
            .unwrap_or_default();
        String::from_utf8(bytes).map_err(|_| {
            anyhow::Error::from(PlatformError::NotUtf8 {
                path: target.to_path_buf(),
            })
        })
    }

    fn write(&self, target: &Path, content: &str) -> Result<()> {
        let permissions = std::fs::metadata(target).ok().map(|m| m.permissions());
        fs::write_atomic(target, content.as_bytes(), permissions)
            .map_err(|e| self.permission_error(e, "write"))
    }

    fn permission_error(&self, err: anyhow::Error, verb: &str) -> anyhow::Error {
        if fs::is_permission_denied(&err) {
            PlatformError::PermissionDenied {
                action: format!("{verb} {}", self.path.display()),
                hint: format!(
                    "Check that you own {} and its directory, or point {} at a writable file.",
                    self.path.display(),
                    paths::SHELL_RC_ENV
                ),
            }
            .into()
        } else {
            err
        }
    }
}

impl PermanentVarStore for ShellRcStore {
    fn location(&self) -> String {
        self.path.display().to_string()
    }

    async fn set_permanent(&self, key: &str, value: &str) -> Result<()> {
        validate_shell_key(key)?;
        let target = self.target()?;
        let content = self.read(&target)?;
        let updated = upsert_export(&content, key, value);
        if updated == content {
            tracing::debug!(key, path = %target.display(), "directive already current");
            return Ok(());
        }
        self.write(&target, &updated)
    }

    async fn unset_permanent(&self, key: &str) -> Result<bool> {
        let target = self.target()?;
        let content = self.read(&target)?;
        let (updated, removed) = remove_export(&content, key);
        if removed {
            self.write(&target, &updated)?;
        }
        Ok(removed)
    }
}

// ── User registry ────────────────────────────────────────────────────────────

/// Registry key that holds per-user environment variables.
pub const USER_ENV_KEY: &str = r"HKCU\Environment";

/// Permanent variables in the per-user registry.
#[derive(Debug, Clone)]
pub struct RegistryStore<R> {
    runner: R,
}

impl<R: CommandRunner> RegistryStore<R> {
    #[must_use]
    pub fn new(runner: R) -> Self {
        Self { runner }
    }
}

impl<R: CommandRunner> PermanentVarStore for RegistryStore<R> {
    fn location(&self) -> String {
        format!("user registry ({USER_ENV_KEY})")
    }

    async fn set_permanent(&self, key: &str, value: &str) -> Result<()> {
        let output = self.runner.run("setx", &[key, value]).await?;
        ensure_success(output, "setx", &format!("set {key} in {USER_ENV_KEY}"))?;
        Ok(())
    }

    async fn unset_permanent(&self, key: &str) -> Result<bool> {
        let output = self
            .runner
            .run("reg", &["delete", USER_ENV_KEY, "/v", key, "/f"])
            .await?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).to_lowercase();
            if stderr.contains("unable to find") {
                return Ok(false);
            }
        }
        ensure_success(output, "reg", &format!("remove {key} from {USER_ENV_KEY}"))?;
        Ok(true)
    }
}

// ── Host selection ───────────────────────────────────────────────────────────

/// The permanent-variable mechanism of this host.
#[derive(Debug, Clone)]
pub enum HostPermanentStore<R> {
    ShellRc(ShellRcStore),
    Registry(RegistryStore<R>),
}

impl<R: CommandRunner> HostPermanentStore<R> {
    /// Pick the mechanism for `platform`.
    ///
    /// # Errors
    ///
    /// Returns an error if the shell startup file location cannot be
    /// determined.
    pub fn for_platform(platform: &Platform, runner: R) -> Result<Self> {
        if platform.uses_registry() {
            Ok(Self::Registry(RegistryStore::new(runner)))
        } else {
            Ok(Self::ShellRc(ShellRcStore::new(paths::shell_rc_path()?)))
        }
    }
}

impl<R: CommandRunner> PermanentVarStore for HostPermanentStore<R> {
    fn location(&self) -> String {
        match self {
            Self::ShellRc(s) => s.location(),
            Self::Registry(s) => s.location(),
        }
    }

    async fn set_permanent(&self, key: &str, value: &str) -> Result<()> {
        match self {
            Self::ShellRc(s) => s.set_permanent(key, value).await,
            Self::Registry(s) => s.set_permanent(key, value).await,
        }
    }

    async fn unset_permanent(&self, key: &str) -> Result<bool> {
        match self {
            Self::ShellRc(s) => s.unset_permanent(key).await,
            Self::Registry(s) => s.unset_permanent(key).await,
        }
    }
}
