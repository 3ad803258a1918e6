//! Typed domain error enums.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All error types implement `thiserror::Error` and convert to `anyhow::Error`
//! via the `?` operator. The dispatch boundary classifies them with
//! [`ErrorClass::of`] to pick an exit status and a machine-readable code.

use std::path::PathBuf;

use thiserror::Error;

// ── Profile errors ────────────────────────────────────────────────────────────

/// Errors related to profile lookup and creation.
#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("Profile '{0}' not found. List profiles with: envmanager profile list")]
    NotFound(String),

    #[error("Profile '{0}' already exists. Delete it first: envmanager profile delete {0}")]
    Duplicate(String),

    #[error("No profile name given and no default profile set. Set one with: envmanager profile default <name>")]
    NoDefault,
}

// ── Storage errors ────────────────────────────────────────────────────────────

/// Errors related to the on-disk artifacts.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error(
        "{} is not valid: {detail}\n\nThe file was left untouched. Fix or move it aside, then retry.",
        path.display()
    )]
    Corrupt { path: PathBuf, detail: String },

    #[error(
        "{} is being modified by another envmanager process. Retry the command.",
        path.display()
    )]
    ConcurrentModification { path: PathBuf },
}

// ── Platform errors ───────────────────────────────────────────────────────────

/// Errors raised by platform mechanisms (service manager, container engine,
/// permanent-variable store).
#[derive(Debug, Error)]
pub enum PlatformError {
    #[error("Permission denied: {action}\n\nHint: {hint}")]
    PermissionDenied { action: String, hint: String },

    #[error("{mechanism} is not available: {detail}")]
    MechanismUnavailable { mechanism: String, detail: String },

    #[error("{program} failed: {stderr}")]
    CommandFailed { program: String, stderr: String },

    #[error("{program} timed out after {secs}s")]
    Timeout { program: String, secs: u64 },

    #[error(
        "{} is not UTF-8 text; it was left untouched. Edit it by hand or point ENVMANAGER_SHELL_RC at another file.",
        path.display()
    )]
    NotUtf8 { path: PathBuf },
}

// ── Validation errors ─────────────────────────────────────────────────────────

/// Errors raised when user input is rejected at the store boundary.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Invalid profile name '{0}': must be 1-128 characters without control characters")]
    InvalidProfileName(String),

    #[error("Invalid variable name '{0}': must be non-empty and contain no '=' or NUL")]
    InvalidVariableName(String),

    #[error(
        "Invalid variable name '{0}' for a shell startup file: must match ^[A-Za-z_][A-Za-z0-9_]*$"
    )]
    NotShellIdentifier(String),

    #[error("Value of '{0}' contains a NUL byte")]
    NulInValue(String),

    #[error("Value of '{key}' must be a string, got {kind}")]
    NonStringValue { key: String, kind: String },

    #[error("Variables must be a JSON object like '{{\"KEY\": \"value\"}}', got {0}")]
    NotAnObject(String),

    #[error("Variables are not valid JSON: {0}")]
    InvalidJson(String),
}

// ── Environment errors ────────────────────────────────────────────────────────

/// Errors related to live environment variables.
#[derive(Debug, Error)]
pub enum EnvVarError {
    #[error("Variable {0} not found")]
    NotSet(String),
}

// ── Classification ────────────────────────────────────────────────────────────

/// Coarse error class used at the command-dispatch boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    Generic,
    NotFound,
    Duplicate,
    StorageCorrupt,
    Validation,
    PermissionDenied,
    MechanismUnavailable,
    ConcurrentModification,
}

impl ErrorClass {
    /// Classify an error by the first typed domain error in its chain.
    #[must_use]
    pub fn of(err: &anyhow::Error) -> Self {
        for cause in err.chain() {
            if let Some(e) = cause.downcast_ref::<ProfileError>() {
                return match e {
                    ProfileError::NotFound(_) | ProfileError::NoDefault => Self::NotFound,
                    ProfileError::Duplicate(_) => Self::Duplicate,
                };
            }
            if let Some(e) = cause.downcast_ref::<StorageError>() {
                return match e {
                    StorageError::Corrupt { .. } => Self::StorageCorrupt,
                    StorageError::ConcurrentModification { .. } => Self::ConcurrentModification,
                };
            }
            if let Some(e) = cause.downcast_ref::<PlatformError>() {
                return match e {
                    PlatformError::PermissionDenied { .. } => Self::PermissionDenied,
                    PlatformError::MechanismUnavailable { .. } | PlatformError::NotUtf8 { .. } => {
                        Self::MechanismUnavailable
                    }
                    PlatformError::CommandFailed { .. } | PlatformError::Timeout { .. } => {
                        Self::Generic
                    }
                };
            }
            if cause.downcast_ref::<ValidationError>().is_some() {
                return Self::Validation;
            }
            if cause.downcast_ref::<EnvVarError>().is_some() {
                return Self::NotFound;
            }
        }
        Self::Generic
    }

    /// Process exit status for this class. `2` is reserved for usage errors.
    #[must_use]
    pub fn exit_code(self) -> u8 {
        match self {
            Self::Generic => 1,
            Self::NotFound => 3,
            Self::Duplicate => 4,
            Self::StorageCorrupt => 5,
            Self::Validation => 6,
            Self::PermissionDenied => 7,
            Self::MechanismUnavailable => 8,
            Self::ConcurrentModification => 9,
        }
    }

    /// Stable machine-readable code used in `--json` error objects.
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Self::Generic => "error",
            Self::NotFound => "not_found",
            Self::Duplicate => "duplicate",
            Self::StorageCorrupt => "storage_corrupt",
            Self::Validation => "validation",
            Self::PermissionDenied => "permission_denied",
            Self::MechanismUnavailable => "mechanism_unavailable",
            Self::ConcurrentModification => "concurrent_modification",
        }
    }
}
