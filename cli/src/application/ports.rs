//! Port trait definitions for the Application layer.
//!
//! Ports are the interfaces (contracts) that infrastructure must fulfill.
//! This file imports only from `crate::domain`, never from `crate::infra`,
//! `crate::commands`, or `crate::output`.

use std::collections::BTreeMap;
use std::process::Output;
use std::time::Duration;

use anyhow::Result;

use crate::domain::{ContainerSummary, Profile, ServiceInfo, Settings};

// ── Storage Port ──────────────────────────────────────────────────────────────

/// Opaque guard returned by [`ProfileStore::lock`]; dropping it releases the lock.
pub type StoreGuard = Box<dyn std::any::Any>;

/// Durable storage for the profile collection and the settings record.
///
/// The two are independent artifacts: a corrupt settings file never prevents
/// reading profiles, and vice versa.
pub trait ProfileStore {
    /// Load every profile keyed by name. A missing artifact is an empty map;
    /// an unparsable one is `StorageError::Corrupt`.
    fn load_profiles(&self) -> Result<BTreeMap<String, Profile>>;
    /// Replace the whole profile artifact. Either the new content lands or
    /// the previous content stays intact.
    fn save_profiles(&self, profiles: &BTreeMap<String, Profile>) -> Result<()>;
    /// Load settings, defaulting when the artifact is missing.
    fn load_settings(&self) -> Result<Settings>;
    /// Replace the settings artifact with the same guarantees as `save_profiles`.
    fn save_settings(&self, settings: &Settings) -> Result<()>;
    /// Take the exclusive lock that serializes read-modify-write spans across
    /// processes.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::ConcurrentModification` if another process
    /// holds the lock for longer than the store is willing to wait.
    fn lock(&self) -> Result<StoreGuard>;
}

// ── Environment Port ──────────────────────────────────────────────────────────

/// The live process environment.
///
/// Callers validate names and values before `set`; implementations may
/// assume a non-empty name without `=` or NUL.
pub trait Environment {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn unset(&self, key: &str);
    /// Snapshot of every variable whose name and value are valid Unicode.
    fn vars(&self) -> Vec<(String, String)>;
}

// ── Permanent Variable Port ───────────────────────────────────────────────────

/// Persists variables beyond the current process (registry or shell
/// startup file).
#[allow(async_fn_in_trait)]
pub trait PermanentVarStore {
    /// Where values end up, for user-facing messages.
    fn location(&self) -> String;
    /// Create or replace the persistent value of `key`.
    async fn set_permanent(&self, key: &str, value: &str) -> Result<()>;
    /// Remove `key`; returns `false` if it was not persisted.
    async fn unset_permanent(&self, key: &str) -> Result<bool>;
}

// ── Service Manager Port ──────────────────────────────────────────────────────

/// The host's native service supervisor.
#[allow(async_fn_in_trait)]
pub trait ServiceManager {
    async fn list(&self) -> Result<Vec<ServiceInfo>>;
    async fn start(&self, name: &str) -> Result<()>;
    async fn stop(&self, name: &str) -> Result<()>;
}

// ── Container Runtime Port ────────────────────────────────────────────────────

/// The host's container engine.
#[allow(async_fn_in_trait)]
pub trait ContainerRuntime {
    async fn list(&self, include_stopped: bool) -> Result<Vec<ContainerSummary>>;
    async fn start(&self, name_or_id: &str) -> Result<()>;
    async fn stop(&self, name_or_id: &str) -> Result<()>;
}

// ── Command Runner Port ───────────────────────────────────────────────────────

/// Abstracts process execution so infrastructure can be swapped or mocked.
#[allow(async_fn_in_trait)]
pub trait CommandRunner {
    /// Run a program and capture its output.
    ///
    /// Implementations should delegate to `run_with_timeout` using the
    /// instance's configured default timeout.
    async fn run(&self, program: &str, args: &[&str]) -> Result<Output>;
    /// Run a program with a custom timeout override.
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::MechanismUnavailable` if the program is not
    /// installed, and `PlatformError::Timeout` if it exceeds `timeout`. On
    /// timeout, the child process must be killed (not left orphaned).
    async fn run_with_timeout(
        &self,
        program: &str,
        args: &[&str],
        timeout: Duration,
    ) -> Result<Output>;
}
