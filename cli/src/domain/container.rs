//! Container summaries parsed from the docker CLI.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// One row of `docker ps --format '{{json .}}'`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerSummary {
    #[serde(rename(deserialize = "ID"))]
    pub id: String,
    #[serde(rename(deserialize = "Names"))]
    pub names: String,
    #[serde(rename(deserialize = "Image"))]
    pub image: String,
    #[serde(rename(deserialize = "Status"))]
    pub status: String,
    /// Absent on docker releases older than 20.10.
    #[serde(rename(deserialize = "State"), default)]
    pub state: String,
}

impl ContainerSummary {
    #[must_use]
    pub fn is_running(&self) -> bool {
        if self.state.is_empty() {
            self.status.starts_with("Up")
        } else {
            self.state == "running"
        }
    }
}

/// Parse newline-delimited JSON rows from `docker ps`.
///
/// # Errors
///
/// Returns an error naming the offending line if a row is not a container
/// object.
pub fn parse_docker_ps(stdout: &str) -> Result<Vec<ContainerSummary>> {
    stdout
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| {
            serde_json::from_str(line)
                .with_context(|| format!("unexpected docker ps output: {line}"))
        })
        .collect()
}
