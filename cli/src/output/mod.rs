//! Output formatting module

pub mod human;
pub mod json;
pub mod progress;
pub mod styles;

use anyhow::Result;
use console::Term;
use owo_colors::OwoColorize as _;

pub use human::HumanRenderer;
pub use json::JsonRenderer;
pub use styles::Styles;

use crate::application::services::applier::AppliedProfile;
use crate::domain::{ContainerSummary, Profile, ServiceInfo, Settings};

/// Output context carrying styling and terminal state.
pub struct OutputContext {
    /// Stylesheet for colored output.
    pub styles: Styles,
    /// Whether stdout is a TTY.
    pub is_tty: bool,
    /// Whether to suppress non-error output.
    pub quiet: bool,
}

impl OutputContext {
    /// Create output context based on CLI flags and environment.
    #[must_use]
    pub fn new(no_color: bool, quiet: bool) -> Self {
        let is_tty = Term::stdout().is_term();
        let use_colors = !no_color && is_tty && std::env::var_os("NO_COLOR").is_none();

        let mut styles = Styles::default();
        if use_colors {
            styles.colorize();
        }

        Self {
            styles,
            is_tty,
            quiet,
        }
    }

    /// Check if progress indicators should be shown.
    #[must_use]
    pub fn show_progress(&self) -> bool {
        self.is_tty && !self.quiet
    }

    /// Print a success message prefixed with `✓`. Suppressed when `quiet`.
    pub fn success(&self, msg: &str) {
        if !self.quiet {
            println!("  {} {msg}", "✓".style(self.styles.success));
        }
    }

    /// Print a warning message prefixed with `⚠`. Suppressed when `quiet`.
    pub fn warn(&self, msg: &str) {
        if !self.quiet {
            println!("  {} {msg}", "⚠".style(self.styles.warning));
        }
    }

    /// Print an info message prefixed with `ℹ`. Suppressed when `quiet`.
    pub fn info(&self, msg: &str) {
        if !self.quiet {
            println!("  {} {msg}", "ℹ".style(self.styles.info));
        }
    }

    /// Print a section header. Suppressed when `quiet`.
    pub fn header(&self, msg: &str) {
        if !self.quiet {
            println!("  {}", msg.style(self.styles.header));
        }
    }

    /// Print a key-value pair with the key dimmed. Suppressed when `quiet`.
    pub fn kv(&self, key: &str, value: &str) {
        if !self.quiet {
            println!("  {}  {value}", key.style(self.styles.dim));
        }
    }
}

/// Renders results in the active output mode.
pub enum Renderer<'a> {
    Human(HumanRenderer<'a>),
    Json(JsonRenderer),
}

impl Renderer<'_> {
    /// Render live environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_env_list(&self, vars: &[(String, String)]) -> Result<()> {
        match self {
            Self::Human(r) => {
                r.render_env_list(vars);
                Ok(())
            }
            Self::Json(r) => r.render_env_list(vars),
        }
    }

    /// Render the outcome of `env set` / `env unset`.
    ///
    /// `location` is the permanent store touched, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_variable_change(
        &self,
        action: &str,
        key: &str,
        value: Option<&str>,
        process: bool,
        location: Option<&str>,
    ) -> Result<()> {
        match self {
            Self::Human(r) => {
                r.render_variable_change(action, key, value, process, location);
                Ok(())
            }
            Self::Json(r) => r.render_variable_change(action, key, value, process, location),
        }
    }

    /// Render all profiles.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_profile_list(&self, profiles: &[Profile], settings: &Settings) -> Result<()> {
        match self {
            Self::Human(r) => {
                r.render_profile_list(profiles, settings);
                Ok(())
            }
            Self::Json(r) => r.render_profile_list(profiles, settings),
        }
    }

    /// Render one profile with its variables.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_profile(&self, profile: &Profile, is_default: bool) -> Result<()> {
        match self {
            Self::Human(r) => {
                r.render_profile(profile, is_default);
                Ok(())
            }
            Self::Json(r) => r.render_profile(profile, is_default),
        }
    }

    /// Render the outcome of a profile mutation (`created`, `deleted`).
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_profile_change(&self, action: &str, profile: &Profile) -> Result<()> {
        match self {
            Self::Human(r) => {
                r.render_profile_change(action, profile);
                Ok(())
            }
            Self::Json(r) => r.render_profile_change(action, profile),
        }
    }

    /// Render a successful `profile load`.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_profile_applied(&self, applied: &AppliedProfile) -> Result<()> {
        match self {
            Self::Human(r) => {
                r.render_profile_applied(applied);
                Ok(())
            }
            Self::Json(r) => r.render_profile_applied(applied),
        }
    }

    /// Render the default profile setting.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_default_profile(&self, settings: &Settings) -> Result<()> {
        match self {
            Self::Human(r) => {
                r.render_default_profile(settings);
                Ok(())
            }
            Self::Json(r) => r.render_default_profile(settings),
        }
    }

    /// Render host services; `limit` of 0 shows all.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_services(&self, services: &[ServiceInfo], limit: usize) -> Result<()> {
        match self {
            Self::Human(r) => {
                r.render_services(services, limit);
                Ok(())
            }
            Self::Json(r) => r.render_services(services, limit),
        }
    }

    /// Render containers.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_containers(&self, containers: &[ContainerSummary]) -> Result<()> {
        match self {
            Self::Human(r) => {
                r.render_containers(containers);
                Ok(())
            }
            Self::Json(r) => r.render_containers(containers),
        }
    }

    /// Render the outcome of a start/stop on a service or container.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_control(&self, kind: &str, action: &str, name: &str) -> Result<()> {
        match self {
            Self::Human(r) => {
                r.render_control(kind, action, name);
                Ok(())
            }
            Self::Json(r) => r.render_control(kind, action, name),
        }
    }
}
