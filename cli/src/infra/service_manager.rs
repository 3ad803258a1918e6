//! Infrastructure implementations of the `ServiceManager` port.
//!
//! One implementation per native supervisor (`systemctl`, `launchctl`,
//! `sc`), wrapped in `HostServiceManager`, which is chosen once from the
//! detected platform.

use anyhow::Result;

use crate::application::ports::{CommandRunner, ServiceManager};
use crate::domain::error::PlatformError;
use crate::domain::platform::Platform;
use crate::domain::service::{
    ServiceInfo, parse_launchctl_list, parse_sc_query, parse_systemd_units,
};
use crate::infra::command_runner::ensure_success;

async fn control<R: CommandRunner>(runner: &R, program: &str, verb: &str, name: &str) -> Result<()> {
    let output = runner.run(program, &[verb, name]).await?;
    ensure_success(output, program, &format!("{verb} service {name}"))?;
    tracing::info!(program, service = name, verb, "service control succeeded");
    Ok(())
}

async fn query<R: CommandRunner>(runner: &R, program: &str, args: &[&str]) -> Result<String> {
    let output = runner.run(program, args).await?;
    let output = ensure_success(output, program, "list services")?;
    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

// ── systemd ──────────────────────────────────────────────────────────────────

/// Linux services through `systemctl`.
#[derive(Debug, Clone)]
pub struct Systemd<R> {
    runner: R,
}

impl<R: CommandRunner> Systemd<R> {
    #[must_use]
    pub fn new(runner: R) -> Self {
        Self { runner }
    }
}

impl<R: CommandRunner> ServiceManager for Systemd<R> {
    async fn list(&self) -> Result<Vec<ServiceInfo>> {
        let stdout = query(
            &self.runner,
            "systemctl",
            &["list-units", "--type=service", "--no-pager", "--no-legend", "--plain"],
        )
        .await?;
        Ok(parse_systemd_units(&stdout))
    }

    async fn start(&self, name: &str) -> Result<()> {
        control(&self.runner, "systemctl", "start", name).await
    }

    async fn stop(&self, name: &str) -> Result<()> {
        control(&self.runner, "systemctl", "stop", name).await
    }
}

// ── launchd ──────────────────────────────────────────────────────────────────

/// macOS services through `launchctl`.
#[derive(Debug, Clone)]
pub struct Launchd<R> {
    runner: R,
}

impl<R: CommandRunner> Launchd<R> {
    #[must_use]
    pub fn new(runner: R) -> Self {
        Self { runner }
    }
}

impl<R: CommandRunner> ServiceManager for Launchd<R> {
    async fn list(&self) -> Result<Vec<ServiceInfo>> {
        let stdout = query(&self.runner, "launchctl", &["list"]).await?;
        Ok(parse_launchctl_list(&stdout))
    }

    async fn start(&self, name: &str) -> Result<()> {
        control(&self.runner, "launchctl", "start", name).await
    }

    async fn stop(&self, name: &str) -> Result<()> {
        control(&self.runner, "launchctl", "stop", name).await
    }
}

// ── Windows Service Control Manager ──────────────────────────────────────────

/// Windows services through `sc`.
#[derive(Debug, Clone)]
pub struct WindowsSc<R> {
    runner: R,
}

impl<R: CommandRunner> WindowsSc<R> {
    #[must_use]
    pub fn new(runner: R) -> Self {
        Self { runner }
    }
}

impl<R: CommandRunner> ServiceManager for WindowsSc<R> {
    async fn list(&self) -> Result<Vec<ServiceInfo>> {
        let stdout = query(
            &self.runner,
            "sc",
            &["query", "type=", "service", "state=", "all"],
        )
        .await?;
        Ok(parse_sc_query(&stdout))
    }

    async fn start(&self, name: &str) -> Result<()> {
        control(&self.runner, "sc", "start", name).await
    }

    async fn stop(&self, name: &str) -> Result<()> {
        control(&self.runner, "sc", "stop", name).await
    }
}

// ── Host selection ───────────────────────────────────────────────────────────

/// The service supervisor of this host.
#[derive(Debug, Clone)]
pub enum HostServiceManager<R> {
    Systemd(Systemd<R>),
    Launchd(Launchd<R>),
    WindowsSc(WindowsSc<R>),
    Unsupported(String),
}

impl<R: CommandRunner> HostServiceManager<R> {
    #[must_use]
    pub fn for_platform(platform: &Platform, runner: R) -> Self {
        match platform {
            Platform::Linux => Self::Systemd(Systemd::new(runner)),
            Platform::MacOs => Self::Launchd(Launchd::new(runner)),
            Platform::Windows => Self::WindowsSc(WindowsSc::new(runner)),
            Platform::Other(os) => Self::Unsupported(os.clone()),
        }
    }

    fn unsupported(os: &str) -> anyhow::Error {
        PlatformError::MechanismUnavailable {
            mechanism: "service manager".to_string(),
            detail: format!("service management is not supported on {os}"),
        }
        .into()
    }
}

impl<R: CommandRunner> ServiceManager for HostServiceManager<R> {
    async fn list(&self) -> Result<Vec<ServiceInfo>> {
        match self {
            Self::Systemd(m) => m.list().await,
            Self::Launchd(m) => m.list().await,
            Self::WindowsSc(m) => m.list().await,
            Self::Unsupported(os) => Err(Self::unsupported(os)),
        }
    }

    async fn start(&self, name: &str) -> Result<()> {
        match self {
            Self::Systemd(m) => m.start(name).await,
            Self::Launchd(m) => m.start(name).await,
            Self::WindowsSc(m) => m.start(name).await,
            Self::Unsupported(os) => Err(Self::unsupported(os)),
        }
    }

    async fn stop(&self, name: &str) -> Result<()> {
        match self {
            Self::Systemd(m) => m.stop(name).await,
            Self::Launchd(m) => m.stop(name).await,
            Self::WindowsSc(m) => m.stop(name).await,
            Self::Unsupported(os) => Err(Self::unsupported(os)),
        }
    }
}
