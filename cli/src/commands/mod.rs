//! Command implementations

pub mod docker;
pub mod env;
pub mod profile;
pub mod service;
