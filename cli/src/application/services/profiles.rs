//! Application service: profile store use-cases.
//!
//! Every read-modify-write runs under the store lock so two concurrent
//! invocations cannot lose each other's update.

use std::collections::BTreeMap;

use anyhow::Result;
use chrono::Utc;

use crate::application::ports::ProfileStore;
use crate::domain::error::ProfileError;
use crate::domain::profile::{Profile, Settings, validate_profile_name, validate_variable};

/// Create a profile and persist it immediately.
///
/// # Errors
///
/// Returns `ValidationError` for a bad name or variable, `ProfileError::Duplicate`
/// if `name` exists (the stored collection is left unchanged), or a storage
/// error from the store.
pub fn create_profile(
    store: &impl ProfileStore,
    name: &str,
    variables: BTreeMap<String, String>,
    description: Option<String>,
) -> Result<Profile> {
    validate_profile_name(name)?;
    for (key, value) in &variables {
        validate_variable(key, value)?;
    }

    let _guard = store.lock()?;
    let mut profiles = store.load_profiles()?;
    if profiles.contains_key(name) {
        return Err(ProfileError::Duplicate(name.to_string()).into());
    }
    let profile = Profile::new(name, variables, description, Utc::now());
    profiles.insert(name.to_string(), profile.clone());
    store.save_profiles(&profiles)?;

    tracing::info!(
        profile = name,
        variables = profile.variables_count(),
        "profile created"
    );
    Ok(profile)
}

/// Look up a single profile.
///
/// # Errors
///
/// Returns `ProfileError::NotFound` if absent.
pub fn get_profile(store: &impl ProfileStore, name: &str) -> Result<Profile> {
    store
        .load_profiles()?
        .remove(name)
        .ok_or_else(|| ProfileError::NotFound(name.to_string()).into())
}

/// All profiles, sorted by name.
///
/// # Errors
///
/// Returns a storage error if the profiles artifact cannot be read.
pub fn list_profiles(store: &impl ProfileStore) -> Result<Vec<Profile>> {
    Ok(store.load_profiles()?.into_values().collect())
}

/// Delete a profile and drop settings references to it.
///
/// A settings artifact that cannot be read or written does not undo the
/// deletion; the stale reference is logged and left for the next write.
///
/// # Errors
///
/// Returns `ProfileError::NotFound` if absent, or a storage error.
pub fn delete_profile(store: &impl ProfileStore, name: &str) -> Result<Profile> {
    let _guard = store.lock()?;
    let mut profiles = store.load_profiles()?;
    let removed = profiles
        .remove(name)
        .ok_or_else(|| ProfileError::NotFound(name.to_string()))?;
    store.save_profiles(&profiles)?;
    tracing::info!(profile = name, "profile deleted");

    match store.load_settings() {
        Ok(mut settings) => {
            let before = settings.clone();
            settings.forget(name);
            if settings != before {
                if let Err(e) = store.save_settings(&settings) {
                    tracing::warn!(profile = name, error = %e, "could not clear settings reference");
                }
            }
        }
        Err(e) => {
            tracing::warn!(profile = name, error = %e, "settings unreadable; reference left in place");
        }
    }
    Ok(removed)
}

/// Read the settings record.
///
/// # Errors
///
/// Returns a storage error if the settings artifact cannot be read.
pub fn load_settings(store: &impl ProfileStore) -> Result<Settings> {
    store.load_settings()
}

/// Settings for read-only views. An unreadable settings artifact is logged
/// and treated as empty so listing profiles still works.
pub fn settings_or_default(store: &impl ProfileStore) -> Settings {
    store.load_settings().unwrap_or_else(|e| {
        tracing::warn!("settings unreadable, showing profiles without a default: {e:#}");
        Settings::default()
    })
}

/// Set or clear `Settings.default_profile`.
///
/// The reference is soft: naming a profile that does not exist is allowed.
/// Returns whether the named profile currently exists (`true` when clearing).
///
/// # Errors
///
/// Returns `ValidationError` for a bad name or a storage error from the
/// settings artifact.
pub fn set_default_profile(store: &impl ProfileStore, name: Option<&str>) -> Result<bool> {
    if let Some(name) = name {
        validate_profile_name(name)?;
    }
    let _guard = store.lock()?;
    let mut settings = store.load_settings()?;
    settings.default_profile = name.map(String::from);
    store.save_settings(&settings)?;

    let Some(name) = name else {
        tracing::info!("default profile cleared");
        return Ok(true);
    };
    tracing::info!(profile = name, "default profile set");
    match store.load_profiles() {
        Ok(profiles) => Ok(profiles.contains_key(name)),
        Err(e) => {
            tracing::warn!(error = %e, "could not check that the default profile exists");
            Ok(false)
        }
    }
}

/// Pick the profile to apply: the explicit name, else the default profile.
///
/// # Errors
///
/// Returns `ProfileError::NoDefault` when neither is available.
pub fn resolve_profile_name(store: &impl ProfileStore, name: Option<&str>) -> Result<String> {
    if let Some(name) = name {
        return Ok(name.to_string());
    }
    store
        .load_settings()?
        .default_profile
        .ok_or_else(|| ProfileError::NoDefault.into())
}
