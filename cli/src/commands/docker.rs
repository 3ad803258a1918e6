//! `envmanager docker`: list, start and stop containers.

use std::process::ExitCode;

use anyhow::Result;
use clap::Subcommand;

use crate::app::AppContext;
use crate::application::ports::ContainerRuntime;
use crate::output::progress;

/// Docker subcommands.
#[derive(Subcommand)]
pub enum DockerCommand {
    /// List containers (running only unless --all)
    List {
        /// Include stopped containers
        #[arg(long, short)]
        all: bool,
    },
    /// Start a container
    Start {
        /// Container name or ID
        name: String,
    },
    /// Stop a container
    Stop {
        /// Container name or ID
        name: String,
    },
}

/// Run the docker command.
///
/// # Errors
///
/// Returns an error if docker is not installed, the daemon is unreachable,
/// or the container operation fails.
pub async fn run(app: &AppContext, cmd: DockerCommand) -> Result<ExitCode> {
    match cmd {
        DockerCommand::List { all } => {
            let containers = app.containers.list(all).await?;
            app.renderer().render_containers(&containers)?;
        }
        DockerCommand::Start { name } => {
            let pb = progress::maybe_spinner(app.show_progress(), &format!("Starting {name}..."));
            let result = app.containers.start(&name).await;
            progress::clear(pb);
            result?;
            app.renderer().render_control("container", "started", &name)?;
        }
        DockerCommand::Stop { name } => {
            let pb = progress::maybe_spinner(app.show_progress(), &format!("Stopping {name}..."));
            let result = app.containers.stop(&name).await;
            progress::clear(pb);
            result?;
            app.renderer().render_control("container", "stopped", &name)?;
        }
    }
    Ok(ExitCode::SUCCESS)
}
