//! Domain types and validators for environment profiles and settings.
//!
//! Pure functions only; no I/O, no async, no filesystem access.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::domain::error::ValidationError;

/// Longest accepted profile name, in characters.
pub const MAX_PROFILE_NAME_LEN: usize = 128;

// ── Profile ──────────────────────────────────────────────────────────────────

/// A named, persisted set of environment variable assignments.
///
/// The name is the key of the profiles artifact, so it is not part of the
/// serialized record; stores fill it in after loading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(skip)]
    pub name: String,
    /// Optional human-readable description. An empty string reads as `None`.
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub description: Option<String>,
    /// Variable name to value. Values are opaque strings.
    #[serde(rename = "env_vars", default)]
    pub variables: BTreeMap<String, String>,
    /// Set once at creation.
    #[serde(rename = "created", with = "timestamp")]
    pub created_at: DateTime<Utc>,
    /// Updated on every successful apply.
    #[serde(rename = "last_used", default, with = "timestamp::option")]
    pub last_used_at: Option<DateTime<Utc>>,
}

/// Lifecycle state of a profile. Moves from `Unused` to `Used` on the first
/// apply and never back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileState {
    Unused,
    Used,
}

impl Profile {
    /// Build a fresh, never-applied profile.
    #[must_use]
    pub fn new(
        name: &str,
        variables: BTreeMap<String, String>,
        description: Option<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            name: name.to_string(),
            description: description.filter(|d| !d.is_empty()),
            variables,
            created_at: now,
            last_used_at: None,
        }
    }

    /// Number of variables in the persisted mapping.
    #[must_use]
    pub fn variables_count(&self) -> usize {
        self.variables.len()
    }

    #[must_use]
    pub fn state(&self) -> ProfileState {
        if self.last_used_at.is_some() {
            ProfileState::Used
        } else {
            ProfileState::Unused
        }
    }

    /// Record a successful apply.
    pub fn mark_used(&mut self, now: DateTime<Utc>) {
        self.last_used_at = Some(now);
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.filter(|s| !s.is_empty()))
}

// ── Settings ─────────────────────────────────────────────────────────────────

/// Process-wide settings stored in `config.json`.
///
/// Both fields are soft references by profile name; neither is checked for
/// existence when written.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub default_profile: Option<String>,
    pub last_used: Option<String>,
}

impl Settings {
    /// Drop references to a profile that no longer exists.
    pub fn forget(&mut self, name: &str) {
        if self.default_profile.as_deref() == Some(name) {
            self.default_profile = None;
        }
        if self.last_used.as_deref() == Some(name) {
            self.last_used = None;
        }
    }
}

// ── Timestamps ───────────────────────────────────────────────────────────────

/// Serde adapter for artifact timestamps.
///
/// Writes RFC 3339 in UTC. Reads RFC 3339 or a naive ISO 8601 date-time
/// (`2024-01-15T10:30:00.123456`), which is taken as local time.
pub mod timestamp {
    use chrono::{DateTime, Local, NaiveDateTime, SecondsFormat, TimeZone, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    /// Parse a timestamp in either accepted form.
    ///
    /// # Errors
    ///
    /// Returns a description of the problem if `raw` is in neither form.
    pub fn parse(raw: &str) -> Result<DateTime<Utc>, String> {
        if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
            return Ok(ts.with_timezone(&Utc));
        }
        let naive = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
            .map_err(|e| format!("invalid timestamp '{raw}': {e}"))?;
        Local
            .from_local_datetime(&naive)
            .earliest()
            .map(|ts| ts.with_timezone(&Utc))
            .ok_or_else(|| format!("timestamp '{raw}' does not exist in the local time zone"))
    }

    #[must_use]
    pub fn format(ts: &DateTime<Utc>) -> String {
        ts.to_rfc3339_opts(SecondsFormat::AutoSi, true)
    }

    pub fn serialize<S: Serializer>(ts: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&format(ts))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(d)?;
        parse(&raw).map_err(serde::de::Error::custom)
    }

    pub mod option {
        use chrono::{DateTime, Utc};
        use serde::{Deserialize, Deserializer, Serializer};

        #[allow(clippy::ref_option)] // serde `with` signature
        pub fn serialize<S: Serializer>(
            ts: &Option<DateTime<Utc>>,
            s: S,
        ) -> Result<S::Ok, S::Error> {
            match ts {
                Some(ts) => s.serialize_str(&super::format(ts)),
                None => s.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            d: D,
        ) -> Result<Option<DateTime<Utc>>, D::Error> {
            match Option::<String>::deserialize(d)? {
                Some(raw) => super::parse(&raw)
                    .map(Some)
                    .map_err(serde::de::Error::custom),
                None => Ok(None),
            }
        }
    }
}

// ── Validators ───────────────────────────────────────────────────────────────

/// Validates a profile name.
///
/// # Errors
///
/// Returns an error if the name is empty, too long, or contains control
/// characters.
pub fn validate_profile_name(name: &str) -> Result<(), ValidationError> {
    if name.is_empty()
        || name.chars().count() > MAX_PROFILE_NAME_LEN
        || name.chars().any(char::is_control)
    {
        return Err(ValidationError::InvalidProfileName(name.to_string()));
    }
    Ok(())
}

/// Validates a variable name for use in a process environment.
///
/// # Errors
///
/// Returns an error if the name is empty or contains `=` or NUL.
pub fn validate_variable_name(key: &str) -> Result<(), ValidationError> {
    if key.is_empty() || key.contains('=') || key.contains('\0') {
        return Err(ValidationError::InvalidVariableName(key.to_string()));
    }
    Ok(())
}

/// Validates a variable assignment for use in a process environment.
///
/// # Errors
///
/// Returns an error if the name is invalid or the value contains NUL.
pub fn validate_variable(key: &str, value: &str) -> Result<(), ValidationError> {
    validate_variable_name(key)?;
    if value.contains('\0') {
        return Err(ValidationError::NulInValue(key.to_string()));
    }
    Ok(())
}

/// Parse a JSON object of string values into a variable mapping.
///
/// Values are never coerced: numbers, booleans, arrays, objects and `null`
/// are rejected.
///
/// # Errors
///
/// Returns an error if `json` is not valid JSON, is not an object, or holds
/// an invalid name or a non-string value.
pub fn parse_variables(json: &str) -> Result<BTreeMap<String, String>, ValidationError> {
    let value: Value =
        serde_json::from_str(json).map_err(|e| ValidationError::InvalidJson(e.to_string()))?;
    let Value::Object(entries) = value else {
        return Err(ValidationError::NotAnObject(value_kind(&value).to_string()));
    };
    let mut variables = BTreeMap::new();
    for (key, value) in entries {
        let Value::String(value) = value else {
            return Err(ValidationError::NonStringValue {
                kind: value_kind(&value).to_string(),
                key,
            });
        };
        validate_variable(&key, &value)?;
        variables.insert(key, value);
    }
    Ok(variables)
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

// ── Unit tests ───────────────────────────────────────────────────────────────
