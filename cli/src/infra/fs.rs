//! Filesystem helpers shared by the stores: optional reads and atomic writes.

use std::fs::Permissions;
use std::io::{ErrorKind, Write as _};
use std::path::Path;

use anyhow::{Context, Result};

/// Read a file, returning `Ok(None)` when it does not exist.
///
/// # Errors
///
/// Returns an error for any I/O failure other than `NotFound`.
pub fn read_optional(path: &Path) -> Result<Option<Vec<u8>>> {
    match std::fs::read(path) {
        Ok(bytes) => Ok(Some(bytes)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e).with_context(|| format!("reading {}", path.display())),
    }
}

/// Replace `path` with `content` via a sibling temp file and rename.
///
/// The previous content stays intact if anything fails before the rename.
/// `permissions` is applied to the new file; without it the file is private
/// to the user (0600 on Unix).
///
/// # Errors
///
/// Returns the underlying I/O error (its kind is preserved in the chain).
pub fn write_atomic(path: &Path, content: &[u8], permissions: Option<Permissions>) -> Result<()> {
    let parent = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    let mut temp = tempfile::Builder::new()
        .prefix(".envmanager-")
        .suffix(".tmp")
        .tempfile_in(parent)
        .with_context(|| format!("creating temp file in {}", parent.display()))?;
    temp.write_all(content)
        .with_context(|| format!("writing temp file {}", temp.path().display()))?;
    temp.as_file()
        .sync_all()
        .with_context(|| format!("flushing temp file {}", temp.path().display()))?;

    if let Some(permissions) = permissions {
        std::fs::set_permissions(temp.path(), permissions)
            .with_context(|| format!("setting permissions on {}", temp.path().display()))?;
    } else {
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(temp.path(), Permissions::from_mode(0o600))
                .with_context(|| format!("setting permissions on {}", temp.path().display()))?;
        }
    }

    temp.persist(path)
        .map_err(|e| e.error)
        .with_context(|| format!("finalizing {}", path.display()))?;
    tracing::debug!(path = %path.display(), bytes = content.len(), "file written");
    Ok(())
}

/// Whether the error chain bottoms out in an I/O permission failure.
#[must_use]
pub fn is_permission_denied(err: &anyhow::Error) -> bool {
    err.chain().any(|cause| {
        cause
            .downcast_ref::<std::io::Error>()
            .is_some_and(|e| e.kind() == ErrorKind::PermissionDenied)
    })
}
