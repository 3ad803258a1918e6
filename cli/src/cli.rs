//! CLI argument parsing with clap derive

use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::app::{AppContext, AppFlags, BehaviourFlags, OutputFlags};
use crate::commands;

/// Manage environment variables, profiles, services and containers
#[derive(Parser)]
#[command(
    name = "envmanager",
    version,
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Answer yes to confirmation prompts
    #[arg(short, long, global = true)]
    pub yes: bool,

    /// Log debug details to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Manage environment variables
    #[command(subcommand)]
    Env(commands::env::EnvCommand),

    /// Manage environment profiles
    #[command(subcommand)]
    Profile(commands::profile::ProfileCommand),

    /// Manage host services
    #[command(subcommand)]
    Service(commands::service::ServiceCommand),

    /// Manage docker containers
    #[command(subcommand)]
    Docker(commands::docker::DockerCommand),
}

impl Cli {
    /// Execute the CLI command.
    ///
    /// # Errors
    ///
    /// Returns an error if the application context cannot be built or the
    /// command fails.
    pub async fn run(self) -> Result<ExitCode> {
        let Cli {
            json,
            quiet,
            no_color,
            yes,
            verbose: _,
            command,
        } = self;
        let app = AppContext::new(&AppFlags {
            output: OutputFlags {
                no_color,
                quiet,
                json,
            },
            behaviour: BehaviourFlags { yes },
        })?;

        match command {
            Command::Env(cmd) => commands::env::run(&app, cmd).await,
            Command::Profile(cmd) => commands::profile::run(&app, cmd),
            Command::Service(cmd) => commands::service::run(&app, cmd).await,
            Command::Docker(cmd) => commands::docker::run(&app, cmd).await,
        }
    }
}
