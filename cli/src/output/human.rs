//! Human-readable terminal renderer.

use chrono::{DateTime, Local, Utc};
use owo_colors::OwoColorize as _;

use crate::application::services::applier::AppliedProfile;
use crate::domain::{ContainerSummary, Profile, ServiceInfo, Settings};
use crate::output::OutputContext;

/// Values longer than this are cut in `env list`.
pub const MAX_VALUE_WIDTH: usize = 50;

const RULE_WIDTH: usize = 70;

/// Renders domain types as human-readable terminal output using `OutputContext`.
pub struct HumanRenderer<'a> {
    ctx: &'a OutputContext,
}

impl<'a> HumanRenderer<'a> {
    /// Create a new `HumanRenderer` wrapping the given output context.
    #[must_use]
    pub fn new(ctx: &'a OutputContext) -> Self {
        Self { ctx }
    }

    /// Render live environment variables, one `KEY = value` per line.
    pub fn render_env_list(&self, vars: &[(String, String)]) {
        if self.ctx.quiet {
            return;
        }
        self.ctx.header("Current Environment Variables:");
        println!("{}", "-".repeat(RULE_WIDTH));
        for (key, value) in vars {
            println!("{key:30} = {}", truncate_value(value));
        }
        println!("\nTotal: {} variable(s)", vars.len());
    }

    pub fn render_variable_change(
        &self,
        action: &str,
        key: &str,
        value: Option<&str>,
        process: bool,
        location: Option<&str>,
    ) {
        let subject = match value {
            Some(v) => format!("{key}={v}"),
            None => key.to_string(),
        };
        let scope = match (process, location) {
            (true, Some(_)) => "process and permanent",
            (false, Some(_)) => "permanent only",
            _ => "session only",
        };
        self.ctx
            .success(&format!("{} {subject} ({scope})", capitalize(action)));
        if let Some(location) = location {
            self.ctx.info(&format!(
                "Updated {location} (takes effect in new sessions)"
            ));
        }
    }

    /// Render all profiles, marking the default.
    pub fn render_profile_list(&self, profiles: &[Profile], settings: &Settings) {
        if profiles.is_empty() {
            if !self.ctx.quiet {
                println!(
                    "No profiles found. Create one: envmanager profile create <name> '<json>'"
                );
            }
            return;
        }
        if self.ctx.quiet {
            return;
        }

        self.ctx.header("Environment Profiles:");
        println!("{}", "-".repeat(RULE_WIDTH));
        for profile in profiles {
            let marker = if settings.default_profile.as_deref() == Some(profile.name.as_str()) {
                "  [default]"
            } else {
                ""
            };
            println!("\n  {}{marker}", profile.name.style(self.ctx.styles.name));
            println!("    Description: {}", description_display(profile));
            println!("    Variables: {}", profile.variables_count());
            println!("    Last Used: {}", last_used_display(profile.last_used_at));
        }
    }

    /// Render one profile with every variable.
    pub fn render_profile(&self, profile: &Profile, is_default: bool) {
        if self.ctx.quiet {
            return;
        }
        let marker = if is_default { "  [default]" } else { "" };
        self.ctx.header(&format!("{}{marker}", profile.name));
        self.ctx.kv("Description:", description_display(profile));
        self.ctx.kv(
            "Created:",
            &profile
                .created_at
                .with_timezone(&Local)
                .format("%Y-%m-%d %H:%M")
                .to_string(),
        );
        self.ctx
            .kv("Last Used:", &last_used_display(profile.last_used_at));
        self.ctx
            .kv("Variables:", &profile.variables_count().to_string());
        for (key, value) in &profile.variables {
            println!("    {key:30} = {value}");
        }
    }

    pub fn render_profile_change(&self, action: &str, profile: &Profile) {
        match action {
            "created" => self.ctx.success(&format!(
                "Created profile '{}' with {} variable(s)",
                profile.name,
                profile.variables_count()
            )),
            other => self
                .ctx
                .success(&format!("{} profile '{}'", capitalize(other), profile.name)),
        }
    }

    pub fn render_profile_applied(&self, applied: &AppliedProfile) {
        self.ctx.success(&format!(
            "Loaded profile '{}' ({} variable(s))",
            applied.profile.name, applied.applied
        ));
        self.ctx.info(
            "Variables are set for this process only. \
             Use `eval \"$(envmanager profile load <name> --export)\"` to apply them to your shell.",
        );
    }

    pub fn render_default_profile(&self, settings: &Settings) {
        match &settings.default_profile {
            Some(name) => self.ctx.kv("Default profile:", name),
            None => self.ctx.info("No default profile set"),
        }
    }

    /// Render host services. `limit` of 0 shows all.
    pub fn render_services(&self, services: &[ServiceInfo], limit: usize) {
        if self.ctx.quiet {
            return;
        }
        if services.is_empty() {
            println!("No services found.");
            return;
        }
        let shown = if limit == 0 {
            services.len()
        } else {
            limit.min(services.len())
        };
        self.ctx.header("Services:");
        for svc in &services[..shown] {
            println!(
                "  {} {:<40} {}",
                self.running_marker(svc.is_running),
                svc.name,
                svc.state
            );
        }
        if shown < services.len() {
            println!("\nShowing {shown} of {} services", services.len());
        }
    }

    pub fn render_containers(&self, containers: &[ContainerSummary]) {
        if self.ctx.quiet {
            return;
        }
        if containers.is_empty() {
            println!("No containers found.");
            return;
        }
        println!(
            "  {}",
            format!("  {:<12} {:<24} {:<28} STATUS", "ID", "NAME", "IMAGE")
                .style(self.ctx.styles.dim)
        );
        for c in containers {
            println!(
                "  {} {:<12} {:<24} {:<28} {}",
                self.running_marker(c.is_running()),
                short_id(&c.id),
                c.names,
                c.image,
                c.status
            );
        }
    }

    pub fn render_control(&self, kind: &str, action: &str, name: &str) {
        self.ctx
            .success(&format!("{} {kind} '{name}'", capitalize(action)));
    }

    fn running_marker(&self, running: bool) -> String {
        if running {
            format!("{}", "●".style(self.ctx.styles.success))
        } else {
            format!("{}", "○".style(self.ctx.styles.dim))
        }
    }
}

/// Cut values of `MAX_VALUE_WIDTH` chars or more to 47 chars plus `...`.
#[must_use]
pub fn truncate_value(value: &str) -> String {
    if value.chars().count() < MAX_VALUE_WIDTH {
        return value.to_string();
    }
    let head: String = value.chars().take(MAX_VALUE_WIDTH - 3).collect();
    format!("{head}...")
}

/// `last_used_at` in local time, or `never`.
#[must_use]
pub fn last_used_display(ts: Option<DateTime<Utc>>) -> String {
    ts.map_or_else(
        || "never".to_string(),
        |t| t.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string(),
    )
}

fn description_display(profile: &Profile) -> &str {
    profile.description.as_deref().unwrap_or("No description")
}

fn short_id(id: &str) -> &str {
    id.get(..12).unwrap_or(id)
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}
