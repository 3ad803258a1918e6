//! `envmanager service`: query and control host services.

use std::process::ExitCode;

use anyhow::Result;
use clap::Subcommand;

use crate::app::AppContext;
use crate::application::ports::ServiceManager;
use crate::output::progress;

/// Service subcommands.
#[derive(Subcommand)]
pub enum ServiceCommand {
    /// List services known to the host's service manager
    List {
        /// Show at most N services (0 shows all)
        #[arg(long, short = 'n', default_value_t = 20)]
        limit: usize,
    },
    /// Start a service
    Start {
        /// Service name
        name: String,
    },
    /// Stop a service
    Stop {
        /// Service name
        name: String,
    },
}

/// Run the service command.
///
/// # Errors
///
/// Returns an error if the service manager is unavailable, denies the
/// request, or fails.
pub async fn run(app: &AppContext, cmd: ServiceCommand) -> Result<ExitCode> {
    match cmd {
        ServiceCommand::List { limit } => {
            let services = app.services.list().await?;
            app.renderer().render_services(&services, limit)?;
        }
        ServiceCommand::Start { name } => {
            let pb = progress::maybe_spinner(app.show_progress(), &format!("Starting {name}..."));
            let result = app.services.start(&name).await;
            progress::clear(pb);
            result?;
            app.renderer().render_control("service", "started", &name)?;
        }
        ServiceCommand::Stop { name } => {
            let pb = progress::maybe_spinner(app.show_progress(), &format!("Stopping {name}..."));
            let result = app.services.stop(&name).await;
            progress::clear(pb);
            result?;
            app.renderer().render_control("service", "stopped", &name)?;
        }
    }
    Ok(ExitCode::SUCCESS)
}
