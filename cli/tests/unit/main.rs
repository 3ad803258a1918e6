//! Unit tests for envmanager
//!
//! These tests use fake ports and temporary directories and run fast
//! without touching the user's files or host services.

mod applier;
mod process_env;
mod property_tests;
mod service_manager;
