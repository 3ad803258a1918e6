//! Integration tests for envmanager
//!
//! These tests spawn the actual binary and test end-to-end behavior.
//! Every test points the store and the shell startup file at a temporary
//! directory.

mod cli_tests;
mod profile_command;
