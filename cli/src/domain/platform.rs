//! Host platform detection and subprocess-failure classification.

use crate::domain::error::PlatformError;
use crate::domain::shell::ExportSyntax;

/// Host operating system family, detected once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Platform {
    Linux,
    MacOs,
    Windows,
    Other(String),
}

impl Platform {
    /// Detect the platform this binary was built for.
    #[must_use]
    pub fn detect() -> Self {
        Self::from_os(std::env::consts::OS)
    }

    #[must_use]
    pub fn from_os(os: &str) -> Self {
        match os {
            "linux" => Self::Linux,
            "macos" => Self::MacOs,
            "windows" => Self::Windows,
            other => Self::Other(other.to_string()),
        }
    }

    /// Statement syntax for `profile load --export`.
    #[must_use]
    pub fn export_syntax(&self) -> ExportSyntax {
        match self {
            Self::Windows => ExportSyntax::PowerShell,
            _ => ExportSyntax::Posix,
        }
    }

    /// Whether permanent variables live in a user-scoped registry rather
    /// than a shell startup file.
    #[must_use]
    pub fn uses_registry(&self) -> bool {
        matches!(self, Self::Windows)
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Linux => f.write_str("linux"),
            Self::MacOs => f.write_str("macos"),
            Self::Windows => f.write_str("windows"),
            Self::Other(os) => f.write_str(os),
        }
    }
}

const PERMISSION_MARKERS: &[&str] = &[
    "permission denied",
    "access is denied",
    "access denied",
    "interactive authentication required",
    "operation not permitted",
    "not privileged",
];

const DAEMON_DOWN_MARKERS: &[&str] = &[
    "cannot connect to the docker daemon",
    "is the docker daemon running",
    "error during connect",
];

fn elevation_hint(program: &str) -> &'static str {
    match program {
        "sc" | "setx" | "reg" => "Run the command from an elevated (Administrator) prompt.",
        "docker" => "Add your user to the 'docker' group or re-run with sudo.",
        _ => "Re-run the command with sudo.",
    }
}

/// Turn a non-zero subprocess exit into a typed platform error.
///
/// `action` describes what was attempted (`"start service nginx"`).
#[must_use]
pub fn classify_failure(program: &str, action: &str, stderr: &str) -> PlatformError {
    let trimmed = stderr.trim();
    let lower = trimmed.to_lowercase();
    if PERMISSION_MARKERS.iter().any(|m| lower.contains(m)) {
        return PlatformError::PermissionDenied {
            action: action.to_string(),
            hint: elevation_hint(program).to_string(),
        };
    }
    if DAEMON_DOWN_MARKERS.iter().any(|m| lower.contains(m)) {
        return PlatformError::MechanismUnavailable {
            mechanism: "docker daemon".to_string(),
            detail: trimmed.to_string(),
        };
    }
    PlatformError::CommandFailed {
        program: program.to_string(),
        stderr: if trimmed.is_empty() {
            format!("could not {action}")
        } else {
            trimmed.to_string()
        },
    }
}
