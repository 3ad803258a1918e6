//! Application context: unified state passed to every command handler.
//!
//! Built once per invocation in `Cli::run()`. Host mechanisms (permanent
//! variable store, service manager, container engine) are selected here from
//! the detected platform, so command handlers never branch on the OS.

use anyhow::Result;
use console::Term;

use crate::domain::Platform;
use crate::infra::command_runner::TokioCommandRunner;
use crate::infra::docker::DockerCli;
use crate::infra::permanent::HostPermanentStore;
use crate::infra::process_env::ProcessEnv;
use crate::infra::profile_store::JsonProfileStore;
use crate::infra::service_manager::HostServiceManager;
use crate::output::{HumanRenderer, JsonRenderer, OutputContext, Renderer};

/// Skips prompts when set to any value.
pub const YES_ENV: &str = "ENVMANAGER_YES";

/// Output rendering mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-readable terminal output (default).
    Human,
    /// Machine-readable JSON output.
    Json,
}

/// Output rendering flags.
pub struct OutputFlags {
    /// Disable ANSI color output.
    pub no_color: bool,
    /// Suppress non-error output.
    pub quiet: bool,
    /// Enable JSON output mode.
    pub json: bool,
}

/// Behaviour flags.
pub struct BehaviourFlags {
    /// Skip interactive prompts (also set by `CI` / `ENVMANAGER_YES` env vars).
    pub yes: bool,
}

/// Flags passed from the top-level CLI to `AppContext::new`.
pub struct AppFlags {
    /// Output rendering options.
    pub output: OutputFlags,
    /// Behaviour options.
    pub behaviour: BehaviourFlags,
}

/// Unified application context passed to every command handler.
pub struct AppContext {
    /// Terminal output context (colors, quiet mode).
    pub output: OutputContext,
    /// Output rendering mode (human vs JSON).
    pub mode: OutputMode,
    /// Host operating system.
    pub platform: Platform,
    /// Profile and settings artifacts.
    pub store: JsonProfileStore,
    /// Environment of this process.
    pub env: ProcessEnv,
    /// Permanent variable mechanism of this host.
    pub permanent: HostPermanentStore<TokioCommandRunner>,
    /// Native service supervisor of this host.
    pub services: HostServiceManager<TokioCommandRunner>,
    /// Container engine.
    pub containers: DockerCli<TokioCommandRunner>,
    /// When `true`, skip interactive prompts and use defaults.
    ///
    /// Set when `--yes` / `-y` is passed, when the `CI` or `ENVMANAGER_YES`
    /// environment variables are present, or when stdin is not a terminal.
    pub non_interactive: bool,
}

impl AppContext {
    /// Construct an `AppContext` from top-level CLI flags.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage directory or the shell startup file
    /// cannot be located (home directory not found).
    pub fn new(flags: &AppFlags) -> Result<Self> {
        let ci_env = std::env::var_os("CI").is_some() || std::env::var_os(YES_ENV).is_some();
        let non_interactive = flags.behaviour.yes || ci_env || !Term::stderr().is_term();

        let mode = if flags.output.json {
            OutputMode::Json
        } else {
            OutputMode::Human
        };

        let platform = Platform::detect();
        let runner = TokioCommandRunner::default();
        tracing::debug!(%platform, "host platform detected");

        Ok(Self {
            output: OutputContext::new(flags.output.no_color, flags.output.quiet),
            mode,
            store: JsonProfileStore::new()?,
            env: ProcessEnv,
            permanent: HostPermanentStore::for_platform(&platform, runner.clone())?,
            services: HostServiceManager::for_platform(&platform, runner.clone()),
            containers: DockerCli::new(runner),
            platform,
            non_interactive,
        })
    }

    /// Returns `true` when JSON output mode is active.
    #[must_use]
    pub fn is_json(&self) -> bool {
        self.mode == OutputMode::Json
    }

    /// Returns the appropriate `Renderer` variant for the current output mode.
    #[must_use]
    pub fn renderer(&self) -> Renderer<'_> {
        match self.mode {
            OutputMode::Human => Renderer::Human(HumanRenderer::new(&self.output)),
            OutputMode::Json => Renderer::Json(JsonRenderer),
        }
    }

    /// Spinners only in human mode on an interactive terminal.
    #[must_use]
    pub fn show_progress(&self) -> bool {
        !self.is_json() && self.output.show_progress()
    }

    /// Ask the user for confirmation.
    ///
    /// When `non_interactive` is `true`, returns `default` immediately
    /// without prompting.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal prompt fails.
    pub fn confirm(&self, prompt: &str, default: bool) -> Result<bool> {
        if self.non_interactive {
            return Ok(default);
        }
        let confirmed = dialoguer::Confirm::new()
            .with_prompt(prompt)
            .default(default)
            .interact()?;
        Ok(confirmed)
    }
}
