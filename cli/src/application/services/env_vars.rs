//! Application service: live and permanent environment variables.

use anyhow::Result;

use crate::application::ports::{Environment, PermanentVarStore};
use crate::domain::error::EnvVarError;
use crate::domain::profile::{validate_variable, validate_variable_name};

/// Variables whose name contains `filter` (case-insensitive), sorted by name.
#[must_use]
pub fn list_env(env: &impl Environment, filter: Option<&str>) -> Vec<(String, String)> {
    let needle = filter.map(str::to_lowercase);
    let mut vars: Vec<(String, String)> = env
        .vars()
        .into_iter()
        .filter(|(key, _)| {
            needle
                .as_deref()
                .is_none_or(|n| key.to_lowercase().contains(n))
        })
        .collect();
    vars.sort();
    vars
}

/// Set a variable in the live environment.
///
/// # Errors
///
/// Returns `ValidationError` if the name or value cannot be set.
pub fn set_env(env: &impl Environment, key: &str, value: &str) -> Result<()> {
    validate_variable(key, value)?;
    env.set(key, value);
    tracing::debug!(key, "variable set for this process");
    Ok(())
}

/// Persist a variable beyond the current process.
///
/// # Errors
///
/// Returns `ValidationError` for a bad name or value, or the permanent
/// store's error (`PermissionDenied`, `MechanismUnavailable`, ...).
pub async fn set_variable_permanent(
    store: &impl PermanentVarStore,
    key: &str,
    value: &str,
) -> Result<()> {
    validate_variable(key, value)?;
    store.set_permanent(key, value).await?;
    tracing::info!(key, location = %store.location(), "variable persisted");
    Ok(())
}

/// Where an unset took effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UnsetOutcome {
    pub process: bool,
    pub permanent: bool,
}

/// Remove a variable from the live environment and, when `permanent` is
/// given, from the permanent store.
///
/// # Errors
///
/// Returns `ValidationError` for a bad name, `EnvVarError::NotSet` when the
/// variable was removed from nowhere, or the permanent store's error.
pub async fn unset_env(
    env: &impl Environment,
    permanent: Option<&impl PermanentVarStore>,
    key: &str,
) -> Result<UnsetOutcome> {
    validate_variable_name(key)?;
    let mut outcome = UnsetOutcome::default();
    if env.get(key).is_some() {
        env.unset(key);
        outcome.process = true;
    }
    if let Some(store) = permanent {
        outcome.permanent = store.unset_permanent(key).await?;
    }
    if !outcome.process && !outcome.permanent {
        return Err(EnvVarError::NotSet(key.to_string()).into());
    }
    tracing::debug!(key, ?outcome, "variable unset");
    Ok(outcome)
}
