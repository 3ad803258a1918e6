//! The real process environment. Serialized: these tests mutate shared state.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use envmanager_cli::application::ports::Environment;
use envmanager_cli::application::services::env_vars;
use envmanager_cli::infra::process_env::ProcessEnv;
use serial_test::serial;

const KEY: &str = "ENVMANAGER_TEST_PROCESS_ENV";

#[test]
#[serial]
fn set_get_unset_round_trip() {
    let env = ProcessEnv;
    env.set(KEY, "value with spaces");
    assert_eq!(env.get(KEY).as_deref(), Some("value with spaces"));
    assert!(env.vars().iter().any(|(k, _)| k == KEY));
    env.unset(KEY);
    assert_eq!(env.get(KEY), None);
}

#[test]
#[serial]
fn list_env_sees_variables_set_through_the_service() {
    let env = ProcessEnv;
    env_vars::set_env(&env, KEY, "1").unwrap();
    let listed = env_vars::list_env(&env, Some("envmanager_test_process"));
    assert_eq!(listed, vec![(KEY.to_string(), "1".to_string())]);
    env.unset(KEY);
}
