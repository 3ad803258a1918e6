//! Applying profiles to an environment.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use envmanager_cli::application::services::{applier, env_vars, profiles};
use envmanager_cli::domain::ProfileState;
use envmanager_cli::domain::error::{ProfileError, StorageError};

use crate::helpers::{FakeEnv, temp_store, vars};

#[test]
fn apply_sets_every_variable_and_records_last_used() {
    let (_dir, store) = temp_store();
    profiles::create_profile(
        &store,
        "dev",
        vars(&[("API_URL", "http://localhost:8080"), ("DEBUG", "true")]),
        Some("Development".into()),
    )
    .unwrap();
    let env = FakeEnv::with(&[("HOME", "/home/u"), ("DEBUG", "false")]);

    let applied = applier::apply(&store, &env, "dev").unwrap();
    assert_eq!(applied.applied, 2);
    assert_eq!(applied.profile.state(), ProfileState::Used);

    let snapshot = env.snapshot();
    assert_eq!(snapshot["API_URL"], "http://localhost:8080");
    assert_eq!(snapshot["DEBUG"], "true");
    assert_eq!(snapshot["HOME"], "/home/u");

    let stored = profiles::get_profile(&store, "dev").unwrap();
    assert_eq!(stored.last_used_at, applied.profile.last_used_at);
    assert_eq!(
        profiles::load_settings(&store).unwrap().last_used.as_deref(),
        Some("dev")
    );
}

#[test]
fn applied_variables_show_up_in_a_filtered_listing() {
    let (_dir, store) = temp_store();
    profiles::create_profile(
        &store,
        "dev",
        vars(&[("API_URL", "http://localhost:8080"), ("DEBUG", "true")]),
        None,
    )
    .unwrap();
    let env = FakeEnv::with(&[("PATH", "/usr/bin"), ("RAPID_MODE", "1")]);
    applier::apply(&store, &env, "dev").unwrap();

    let listed = env_vars::list_env(&env, Some("api"));
    assert_eq!(
        listed,
        vec![
            ("API_URL".to_string(), "http://localhost:8080".to_string()),
            ("RAPID_MODE".to_string(), "1".to_string()),
        ]
    );
}

#[test]
fn apply_twice_keeps_one_state_transition() {
    let (_dir, store) = temp_store();
    profiles::create_profile(&store, "dev", vars(&[("A", "1")]), None).unwrap();
    let env = FakeEnv::default();
    let first = applier::apply(&store, &env, "dev").unwrap();
    let second = applier::apply(&store, &env, "dev").unwrap();
    assert_eq!(second.profile.state(), ProfileState::Used);
    assert!(second.profile.last_used_at >= first.profile.last_used_at);
    assert_eq!(env.snapshot().len(), 1);
}

#[test]
fn empty_profile_applies_nothing_but_is_marked_used() {
    let (_dir, store) = temp_store();
    profiles::create_profile(&store, "blank", vars(&[]), None).unwrap();
    let env = FakeEnv::with(&[("KEEP", "me")]);
    let applied = applier::apply(&store, &env, "blank").unwrap();
    assert_eq!(applied.applied, 0);
    assert_eq!(applied.profile.state(), ProfileState::Used);
    assert_eq!(env.snapshot(), vars(&[("KEEP", "me")]));
}

#[test]
fn missing_profile_leaves_environment_untouched() {
    let (_dir, store) = temp_store();
    let env = FakeEnv::with(&[("A", "1")]);
    let err = applier::apply(&store, &env, "ghost").unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ProfileError>(),
        Some(ProfileError::NotFound(name)) if name == "ghost"
    ));
    assert_eq!(env.snapshot(), vars(&[("A", "1")]));
    assert!(!store.settings_path().exists());
}

#[test]
fn corrupt_settings_abort_before_environment_changes() {
    let (_dir, store) = temp_store();
    profiles::create_profile(&store, "dev", vars(&[("A", "1")]), None).unwrap();
    std::fs::write(store.settings_path(), b"not json").unwrap();
    let env = FakeEnv::default();

    let err = applier::apply(&store, &env, "dev").unwrap_err();
    assert!(matches!(
        err.downcast_ref::<StorageError>(),
        Some(StorageError::Corrupt { .. })
    ));
    assert!(env.snapshot().is_empty());
    let stored = profiles::get_profile(&store, "dev").unwrap();
    assert_eq!(stored.state(), ProfileState::Unused);
}
