//! Application service: project a profile onto the live environment.
//!
//! Variables set here are visible to this process and anything it spawns,
//! not to the shell that launched it. Shell-visible effects need either a
//! permanent store or the `--export` statements evaluated by the shell.

use anyhow::Result;
use chrono::Utc;

use crate::application::ports::{Environment, ProfileStore};
use crate::domain::error::ProfileError;
use crate::domain::profile::{Profile, validate_variable};

/// Result of a successful apply.
#[derive(Debug, Clone)]
pub struct AppliedProfile {
    /// The profile as persisted after the apply (with `last_used_at` set).
    pub profile: Profile,
    /// Number of variables written to the environment.
    pub applied: usize,
}

/// Apply profile `name` to `env`, then record it as last used.
///
/// Both artifacts are read and every variable validated before the
/// environment is touched, so a missing profile or an unreadable store
/// leaves the environment unchanged.
///
/// # Errors
///
/// Returns `ProfileError::NotFound` if absent, `ValidationError` if a stored
/// variable cannot be set in a process environment, or a storage error.
pub fn apply(store: &impl ProfileStore, env: &impl Environment, name: &str) -> Result<AppliedProfile> {
    let _guard = store.lock()?;
    let mut profiles = store.load_profiles()?;
    let mut settings = store.load_settings()?;
    let profile = profiles
        .get_mut(name)
        .ok_or_else(|| ProfileError::NotFound(name.to_string()))?;

    for (key, value) in &profile.variables {
        validate_variable(key, value)?;
    }
    for (key, value) in &profile.variables {
        tracing::debug!(profile = name, key = %key, "setting variable");
        env.set(key, value);
    }

    profile.mark_used(Utc::now());
    let applied = AppliedProfile {
        profile: profile.clone(),
        applied: profile.variables_count(),
    };
    store.save_profiles(&profiles)?;

    settings.last_used = Some(name.to_string());
    store.save_settings(&settings)?;

    tracing::info!(profile = name, variables = applied.applied, "profile applied");
    Ok(applied)
}
