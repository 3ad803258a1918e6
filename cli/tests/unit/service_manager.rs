//! Service managers and the docker runtime over a scripted command runner.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::time::Duration;

use envmanager_cli::application::ports::{ContainerRuntime, ServiceManager};
use envmanager_cli::domain::error::PlatformError;
use envmanager_cli::domain::{ErrorClass, Platform};
use envmanager_cli::infra::docker::DockerCli;
use envmanager_cli::infra::service_manager::{HostServiceManager, Launchd, Systemd};

use crate::helpers::{ScriptedRunner, err_output, ok_output};

const SYSTEMD_UNITS: &[u8] = b"\
cron.service            loaded active   running Regular background program processing daemon
dbus.service            loaded active   running D-Bus System Message Bus
\xe2\x97\x8f nginx.service  loaded failed   failed  A high performance web server
systemd-fsck@dev.service loaded active  exited  File System Check
";

#[tokio::test]
async fn systemd_list_parses_units() {
    let runner = ScriptedRunner::replying(ok_output(SYSTEMD_UNITS));
    let services = Systemd::new(&runner).list().await.unwrap();
    assert_eq!(
        runner.only_call(),
        "systemctl list-units --type=service --no-pager --no-legend --plain"
    );
    let names: Vec<&str> = services.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(
        names,
        [
            "cron.service",
            "dbus.service",
            "nginx.service",
            "systemd-fsck@dev.service"
        ]
    );
    assert!(services[0].is_running);
    assert!(!services[2].is_running);
    assert_eq!(services[3].state, "exited");
}

#[tokio::test]
async fn systemd_start_requiring_auth_is_permission_denied() {
    let runner = ScriptedRunner::replying(err_output(
        4,
        b"Failed to start nginx.service: Interactive authentication required.",
    ));
    let err = Systemd::new(&runner).start("nginx").await.unwrap_err();
    assert_eq!(runner.only_call(), "systemctl start nginx");
    match err.downcast_ref::<PlatformError>() {
        Some(PlatformError::PermissionDenied { hint, .. }) => assert!(hint.contains("sudo")),
        other => panic!("expected PermissionDenied, got {other:?}"),
    }
    assert_eq!(ErrorClass::of(&err).exit_code(), 7);
}

#[tokio::test]
async fn systemd_stop_of_unknown_unit_is_command_failed() {
    let runner = ScriptedRunner::replying(err_output(
        5,
        b"Failed to stop ghost.service: Unit ghost.service not loaded.\n",
    ));
    let err = Systemd::new(&runner).stop("ghost").await.unwrap_err();
    match err.downcast_ref::<PlatformError>() {
        Some(PlatformError::CommandFailed { stderr, .. }) => {
            assert_eq!(stderr, "Failed to stop ghost.service: Unit ghost.service not loaded.");
        }
        other => panic!("expected CommandFailed, got {other:?}"),
    }
    assert_eq!(ErrorClass::of(&err).exit_code(), 1);
}

#[tokio::test]
async fn launchd_list_uses_pid_column() {
    let runner = ScriptedRunner::replying(ok_output(
        b"PID\tStatus\tLabel\n123\t0\tcom.apple.Finder\n-\t0\tcom.example.idle\n",
    ));
    let services = Launchd::new(&runner).list().await.unwrap();
    assert_eq!(services.len(), 2);
    assert!(services[0].is_running);
    assert!(!services[1].is_running);
}

#[tokio::test]
async fn unsupported_platform_is_mechanism_unavailable() {
    let runner = ScriptedRunner::default();
    let manager = HostServiceManager::for_platform(&Platform::Other("plan9".into()), &runner);
    let err = manager.list().await.unwrap_err();
    assert!(matches!(
        err.downcast_ref::<PlatformError>(),
        Some(PlatformError::MechanismUnavailable { .. })
    ));
    assert!(runner.calls.borrow().is_empty());
}

#[tokio::test]
async fn missing_executable_propagates_from_runner() {
    let runner = ScriptedRunner::new(vec![Err(PlatformError::MechanismUnavailable {
        mechanism: "systemctl".into(),
        detail: "'systemctl' was not found in PATH".into(),
    }
    .into())]);
    let err = Systemd::new(&runner).list().await.unwrap_err();
    assert_eq!(ErrorClass::of(&err).code(), "mechanism_unavailable");
}

// ── docker ───────────────────────────────────────────────────────────────────

const DOCKER_PS: &[u8] = br#"{"Command":"\"nginx -g\"","ID":"4f1c2b3a9d8e","Image":"nginx:1.27","Names":"web","State":"running","Status":"Up 2 hours"}
{"ID":"aa11bb22cc33","Image":"postgres:16","Names":"db","State":"exited","Status":"Exited (0) 3 days ago"}
"#;

#[tokio::test]
async fn docker_list_all_parses_json_lines() {
    let runner = ScriptedRunner::replying(ok_output(DOCKER_PS));
    let containers = DockerCli::new(&runner).list(true).await.unwrap();
    assert_eq!(runner.only_call(), "docker ps --format {{json .}} --all");
    assert_eq!(containers.len(), 2);
    assert_eq!(containers[0].names, "web");
    assert!(containers[0].is_running());
    assert!(!containers[1].is_running());
}

#[tokio::test]
async fn docker_list_running_only_omits_all_flag() {
    let runner = ScriptedRunner::replying(ok_output(b""));
    let containers = DockerCli::new(&runner).list(false).await.unwrap();
    assert!(containers.is_empty());
    assert_eq!(runner.only_call(), "docker ps --format {{json .}}");
}

#[tokio::test]
async fn docker_daemon_down_is_mechanism_unavailable() {
    let runner = ScriptedRunner::replying(err_output(
        1,
        b"Cannot connect to the Docker daemon at unix:///var/run/docker.sock. Is the docker daemon running?",
    ));
    let err = DockerCli::new(&runner).list(false).await.unwrap_err();
    assert!(matches!(
        err.downcast_ref::<PlatformError>(),
        Some(PlatformError::MechanismUnavailable { .. })
    ));
}

#[tokio::test]
async fn docker_socket_permission_is_permission_denied() {
    let runner = ScriptedRunner::replying(err_output(
        1,
        b"permission denied while trying to connect to the Docker daemon socket at unix:///var/run/docker.sock",
    ));
    let err = DockerCli::new(&runner).start("web").await.unwrap_err();
    assert_eq!(runner.only_call(), "docker start web");
    assert_eq!(ErrorClass::of(&err).code(), "permission_denied");
}

#[tokio::test]
async fn docker_stop_uses_a_longer_timeout() {
    let runner = ScriptedRunner::replying(ok_output(b"web\n"));
    DockerCli::new(&runner).stop("web").await.unwrap();
    assert_eq!(runner.only_call(), "docker stop web");
    assert_eq!(
        runner.timeouts.borrow().as_slice(),
        [Some(Duration::from_secs(60))]
    );
}
