//! JSON output.
//!
//! Every `--json` success path prints one pretty-printed document on stdout;
//! failures print the error object from [`format_error`].

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::{Value, json};

use crate::application::services::applier::AppliedProfile;
use crate::domain::profile::timestamp;
use crate::domain::{ContainerSummary, Profile, ProfileState, ServiceInfo, Settings};

/// Format a JSON error object.
///
/// Output (pretty-printed):
/// ```json
/// {
///   "error": true,
///   "message": "...",
///   "code": "..."
/// }
/// ```
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn format_error(message: &str, code: &str) -> Result<String> {
    let obj = json!({
        "error": true,
        "message": message,
        "code": code,
    });
    serde_json::to_string_pretty(&obj).context("JSON serialization failed")
}

/// Renders domain types as JSON documents on stdout.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonRenderer;

impl JsonRenderer {
    fn emit<T: Serialize>(value: &T) -> Result<()> {
        let out = serde_json::to_string_pretty(value).context("JSON serialization failed")?;
        println!("{out}");
        Ok(())
    }

    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_env_list(self, vars: &[(String, String)]) -> Result<()> {
        let variables: serde_json::Map<String, Value> = vars
            .iter()
            .map(|(k, v)| (k.clone(), Value::String(v.clone())))
            .collect();
        Self::emit(&json!({ "total": vars.len(), "variables": variables }))
    }

    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_variable_change(
        self,
        action: &str,
        key: &str,
        value: Option<&str>,
        process: bool,
        location: Option<&str>,
    ) -> Result<()> {
        Self::emit(&json!({
            "action": action,
            "key": key,
            "value": value,
            "process": process,
            "permanent": location.is_some(),
            "location": location,
        }))
    }

    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_profile_list(self, profiles: &[Profile], settings: &Settings) -> Result<()> {
        let items: Vec<Value> = profiles
            .iter()
            .map(|p| {
                profile_summary(
                    p,
                    settings.default_profile.as_deref() == Some(p.name.as_str()),
                )
            })
            .collect();
        Self::emit(&json!({
            "profiles": items,
            "default_profile": settings.default_profile,
            "last_used": settings.last_used,
        }))
    }

    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_profile(self, profile: &Profile, is_default: bool) -> Result<()> {
        let mut value = profile_summary(profile, is_default);
        value["variables"] = json!(profile.variables);
        Self::emit(&value)
    }

    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_profile_change(self, action: &str, profile: &Profile) -> Result<()> {
        let mut value = profile_summary(profile, false);
        value["action"] = json!(action);
        Self::emit(&value)
    }

    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_profile_applied(self, applied: &AppliedProfile) -> Result<()> {
        let mut value = profile_summary(&applied.profile, false);
        value["action"] = json!("applied");
        value["applied"] = json!(applied.applied);
        Self::emit(&value)
    }

    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_default_profile(self, settings: &Settings) -> Result<()> {
        Self::emit(settings)
    }

    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_services(self, services: &[ServiceInfo], limit: usize) -> Result<()> {
        let shown = if limit == 0 {
            services
        } else {
            &services[..limit.min(services.len())]
        };
        Self::emit(&json!({ "total": services.len(), "services": shown }))
    }

    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_containers(self, containers: &[ContainerSummary]) -> Result<()> {
        let items: Vec<Value> = containers
            .iter()
            .map(|c| {
                let mut v = json!(c);
                v["running"] = json!(c.is_running());
                v
            })
            .collect();
        Self::emit(&json!({ "containers": items }))
    }

    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_control(self, kind: &str, action: &str, name: &str) -> Result<()> {
        Self::emit(&json!({ "kind": kind, "action": action, "name": name }))
    }
}

/// Profile fields shared by every profile document.
#[must_use]
pub fn profile_summary(profile: &Profile, is_default: bool) -> Value {
    json!({
        "name": profile.name,
        "description": profile.description,
        "variables_count": profile.variables_count(),
        "created_at": timestamp::format(&profile.created_at),
        "last_used_at": profile.last_used_at.as_ref().map(timestamp::format),
        "state": match profile.state() {
            ProfileState::Unused => "unused",
            ProfileState::Used => "used",
        },
        "default": is_default,
    })
}
