//! `envmanager env`: inspect and change environment variables.

use std::process::ExitCode;

use anyhow::Result;
use clap::Subcommand;

use crate::app::AppContext;
use crate::application::ports::PermanentVarStore;
use crate::application::services::env_vars;

/// Env subcommands.
#[derive(Subcommand)]
pub enum EnvCommand {
    /// List environment variables
    List {
        /// Only show variables whose name contains this text (case-insensitive)
        #[arg(long, short)]
        filter: Option<String>,
    },
    /// Set a variable for this process, and optionally for new sessions
    Set {
        /// Variable name
        key: String,
        /// Variable value
        value: String,
        /// Also persist to the shell startup file (or the user registry on Windows)
        #[arg(long, short)]
        permanent: bool,
    },
    /// Remove a variable
    Unset {
        /// Variable name
        key: String,
        /// Also remove the persisted value
        #[arg(long, short)]
        permanent: bool,
    },
}

/// Run the env command.
///
/// # Errors
///
/// Returns an error if validation fails or the permanent store cannot be
/// updated.
pub async fn run(app: &AppContext, cmd: EnvCommand) -> Result<ExitCode> {
    match cmd {
        EnvCommand::List { filter } => list(app, filter.as_deref()),
        EnvCommand::Set {
            key,
            value,
            permanent,
        } => set(app, &key, &value, permanent).await,
        EnvCommand::Unset { key, permanent } => unset(app, &key, permanent).await,
    }
}

fn list(app: &AppContext, filter: Option<&str>) -> Result<ExitCode> {
    let vars = env_vars::list_env(&app.env, filter);
    app.renderer().render_env_list(&vars)?;
    Ok(ExitCode::SUCCESS)
}

async fn set(app: &AppContext, key: &str, value: &str, permanent: bool) -> Result<ExitCode> {
    env_vars::set_env(&app.env, key, value)?;
    let location = if permanent {
        env_vars::set_variable_permanent(&app.permanent, key, value).await?;
        Some(app.permanent.location())
    } else {
        None
    };
    app.renderer()
        .render_variable_change("set", key, Some(value), true, location.as_deref())?;
    Ok(ExitCode::SUCCESS)
}

async fn unset(app: &AppContext, key: &str, permanent: bool) -> Result<ExitCode> {
    let store = permanent.then_some(&app.permanent);
    let outcome = env_vars::unset_env(&app.env, store, key).await?;
    let location = outcome.permanent.then(|| app.permanent.location());
    app.renderer()
        .render_variable_change("unset", key, None, outcome.process, location.as_deref())?;
    Ok(ExitCode::SUCCESS)
}
