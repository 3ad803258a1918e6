//! Domain layer: pure business logic, types, and validation.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All functions are synchronous and take data in, returning data out.

pub mod container;
pub mod error;
pub mod platform;
pub mod profile;
pub mod service;
pub mod shell;

pub use container::ContainerSummary;
pub use error::{
    EnvVarError, ErrorClass, PlatformError, ProfileError, StorageError, ValidationError,
};
pub use platform::Platform;
pub use profile::{Profile, ProfileState, Settings};
pub use service::ServiceInfo;
pub use shell::ExportSyntax;
