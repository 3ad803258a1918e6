//! Infrastructure layer: concrete implementations of application port traits.
//!
//! This module contains all I/O-performing code: process execution, the
//! JSON artifacts and their lock, the live environment, startup files, the
//! registry, service managers and the container engine.
//!
//! Imports from `crate::domain` and `crate::application::ports` are allowed.
//! Imports from `crate::commands` or `crate::output` are forbidden.

pub mod command_runner;
pub mod docker;
pub mod fs;
pub mod lock;
pub mod paths;
pub mod permanent;
pub mod process_env;
pub mod profile_store;
pub mod service_manager;
