//! Per-user locations: the storage directory and the shell startup file.

use std::path::{Path, PathBuf};

use anyhow::Result;

/// Overrides the storage directory (default `~/.envmanager`).
pub const HOME_ENV: &str = "ENVMANAGER_HOME";

/// Overrides the shell startup file used for permanent variables.
pub const SHELL_RC_ENV: &str = "ENVMANAGER_SHELL_RC";

fn home_dir() -> Result<PathBuf> {
    dirs::home_dir().ok_or_else(|| anyhow::anyhow!("cannot determine home directory"))
}

/// Directory holding `profiles.json`, `config.json` and the lock file.
///
/// # Errors
///
/// Returns an error if `ENVMANAGER_HOME` is unset and the home directory
/// cannot be determined.
pub fn config_dir() -> Result<PathBuf> {
    if let Some(dir) = std::env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    Ok(home_dir()?.join(".envmanager"))
}

/// Shell startup file that receives `export` directives.
///
/// # Errors
///
/// Returns an error if `ENVMANAGER_SHELL_RC` is unset and the home
/// directory cannot be determined.
pub fn shell_rc_path() -> Result<PathBuf> {
    if let Some(path) = std::env::var_os(SHELL_RC_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(path));
    }
    let shell = std::env::var("SHELL").ok();
    Ok(pick_shell_rc(&home_dir()?, shell.as_deref()))
}

/// `~/.zshrc` when it exists or the login shell is zsh, else `~/.bashrc`.
#[must_use]
pub fn pick_shell_rc(home: &Path, shell: Option<&str>) -> PathBuf {
    let zshrc = home.join(".zshrc");
    if zshrc.exists() || shell.is_some_and(|s| s.ends_with("zsh")) {
        zshrc
    } else {
        home.join(".bashrc")
    }
}
