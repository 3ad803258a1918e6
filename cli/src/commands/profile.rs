//! `envmanager profile`: named sets of environment variables.

use std::process::ExitCode;

use anyhow::Result;
use clap::Subcommand;

use crate::app::AppContext;
use crate::application::services::{applier, profiles};
use crate::domain::profile::parse_variables;
use crate::domain::shell::{export_line, validate_shell_key};

/// Profile subcommands.
#[derive(Subcommand)]
pub enum ProfileCommand {
    /// Create a profile from a JSON object of variables
    Create {
        /// Profile name
        name: String,
        /// Variables as a JSON object, e.g. '{"API_URL":"http://localhost"}'
        variables: String,
        /// Free-form description
        #[arg(long, short)]
        description: Option<String>,
    },
    /// List all profiles
    List,
    /// Show one profile with its variables
    Show {
        /// Profile name
        name: String,
    },
    /// Apply a profile (the default profile when NAME is omitted)
    Load {
        /// Profile name
        name: Option<String>,
        /// Print shell statements for `eval` instead of a summary
        #[arg(long)]
        export: bool,
    },
    /// Delete a profile
    Delete {
        /// Profile name
        name: String,
    },
    /// Show, set or clear the default profile
    Default {
        /// Profile to use when `load` is given no name
        #[arg(conflicts_with = "clear")]
        name: Option<String>,
        /// Clear the default profile
        #[arg(long)]
        clear: bool,
    },
}

/// Run the profile command.
///
/// # Errors
///
/// Returns an error if the profile store cannot be read or written, or the
/// named profile does not exist.
pub fn run(app: &AppContext, cmd: ProfileCommand) -> Result<ExitCode> {
    match cmd {
        ProfileCommand::Create {
            name,
            variables,
            description,
        } => create(app, &name, &variables, description),
        ProfileCommand::List => list(app),
        ProfileCommand::Show { name } => show(app, &name),
        ProfileCommand::Load { name, export } => load(app, name.as_deref(), export),
        ProfileCommand::Delete { name } => delete(app, &name),
        ProfileCommand::Default { name, clear } => default(app, name.as_deref(), clear),
    }
}

fn create(
    app: &AppContext,
    name: &str,
    variables: &str,
    description: Option<String>,
) -> Result<ExitCode> {
    let vars = parse_variables(variables)?;
    let profile = profiles::create_profile(&app.store, name, vars, description)?;
    app.renderer().render_profile_change("created", &profile)?;
    Ok(ExitCode::SUCCESS)
}

fn list(app: &AppContext) -> Result<ExitCode> {
    let all = profiles::list_profiles(&app.store)?;
    let settings = profiles::settings_or_default(&app.store);
    app.renderer().render_profile_list(&all, &settings)?;
    Ok(ExitCode::SUCCESS)
}

fn show(app: &AppContext, name: &str) -> Result<ExitCode> {
    let profile = profiles::get_profile(&app.store, name)?;
    let settings = profiles::settings_or_default(&app.store);
    let is_default = settings.default_profile.as_deref() == Some(name);
    app.renderer().render_profile(&profile, is_default)?;
    Ok(ExitCode::SUCCESS)
}

fn load(app: &AppContext, name: Option<&str>, export: bool) -> Result<ExitCode> {
    let name = profiles::resolve_profile_name(&app.store, name)?;
    let applied = applier::apply(&app.store, &app.env, &name)?;
    if export {
        // stdout carries only statements so the caller can eval it.
        let syntax = app.platform.export_syntax();
        for (key, value) in &applied.profile.variables {
            if validate_shell_key(key).is_err() {
                tracing::warn!(key = %key, "not a shell identifier; skipped in export");
                println!("# skipped {}: not a shell identifier", key.escape_debug());
                continue;
            }
            println!("{}", export_line(syntax, key, value));
        }
    } else {
        app.renderer().render_profile_applied(&applied)?;
    }
    Ok(ExitCode::SUCCESS)
}

fn delete(app: &AppContext, name: &str) -> Result<ExitCode> {
    // Surface NotFound before prompting.
    let profile = profiles::get_profile(&app.store, name)?;
    let prompt = format!(
        "Delete profile '{name}' ({} variable(s))?",
        profile.variables_count()
    );
    if !app.non_interactive && !app.confirm(&prompt, false)? {
        app.output.info("Cancelled.");
        return Ok(ExitCode::SUCCESS);
    }
    let removed = profiles::delete_profile(&app.store, name)?;
    app.renderer().render_profile_change("deleted", &removed)?;
    Ok(ExitCode::SUCCESS)
}

fn default(app: &AppContext, name: Option<&str>, clear: bool) -> Result<ExitCode> {
    if name.is_none() && !clear {
        let settings = profiles::load_settings(&app.store)?;
        app.renderer().render_default_profile(&settings)?;
        return Ok(ExitCode::SUCCESS);
    }

    let exists = profiles::set_default_profile(&app.store, name)?;
    if let Some(name) = name.filter(|_| !exists && !app.is_json()) {
        app.output
            .warn(&format!("Profile '{name}' does not exist yet"));
    }
    let settings = profiles::load_settings(&app.store)?;
    app.renderer().render_default_profile(&settings)?;
    Ok(ExitCode::SUCCESS)
}
