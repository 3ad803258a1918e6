//! Infrastructure implementation of the `ContainerRuntime` port over the
//! docker CLI.

use std::time::Duration;

use anyhow::Result;

use crate::application::ports::{CommandRunner, ContainerRuntime};
use crate::domain::container::{ContainerSummary, parse_docker_ps};
use crate::infra::command_runner::ensure_success;

/// `docker stop` waits up to 10s for a graceful exit before killing.
const STOP_TIMEOUT: Duration = Duration::from_secs(60);

/// Containers managed through the `docker` executable.
#[derive(Debug, Clone)]
pub struct DockerCli<R> {
    runner: R,
}

impl<R: CommandRunner> DockerCli<R> {
    #[must_use]
    pub fn new(runner: R) -> Self {
        Self { runner }
    }
}

impl<R: CommandRunner> ContainerRuntime for DockerCli<R> {
    async fn list(&self, include_stopped: bool) -> Result<Vec<ContainerSummary>> {
        let mut args = vec!["ps", "--format", "{{json .}}"];
        if include_stopped {
            args.push("--all");
        }
        let output = self.runner.run("docker", &args).await?;
        let output = ensure_success(output, "docker", "list containers")?;
        parse_docker_ps(&String::from_utf8_lossy(&output.stdout))
    }

    async fn start(&self, name_or_id: &str) -> Result<()> {
        let output = self.runner.run("docker", &["start", name_or_id]).await?;
        ensure_success(output, "docker", &format!("start container {name_or_id}"))?;
        tracing::info!(container = name_or_id, "container started");
        Ok(())
    }

    async fn stop(&self, name_or_id: &str) -> Result<()> {
        let output = self
            .runner
            .run_with_timeout("docker", &["stop", name_or_id], STOP_TIMEOUT)
            .await?;
        ensure_success(output, "docker", &format!("stop container {name_or_id}"))?;
        tracing::info!(container = name_or_id, "container stopped");
        Ok(())
    }
}
