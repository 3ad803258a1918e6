//! Host service records and parsers for native service-manager output.
//!
//! Pure functions only; callers run the service manager and pass stdout in.

use serde::Serialize;

/// One service known to the host's service supervisor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceInfo {
    pub name: String,
    pub is_running: bool,
    /// Native state word (`running`, `exited`, `STOPPED`, ...).
    pub state: String,
}

/// Parse `systemctl list-units --type=service --no-pager --no-legend`.
///
/// Columns are `UNIT LOAD ACTIVE SUB DESCRIPTION`; failed units carry a
/// leading `●`.
#[must_use]
pub fn parse_systemd_units(stdout: &str) -> Vec<ServiceInfo> {
    stdout
        .lines()
        .filter_map(|line| {
            let line = line.trim_start();
            let line = line.strip_prefix('●').unwrap_or(line);
            let mut cols = line.split_whitespace();
            let name = cols.next()?;
            let _load = cols.next()?;
            let _active = cols.next()?;
            let sub = cols.next()?;
            Some(ServiceInfo {
                name: name.to_string(),
                is_running: sub == "running",
                state: sub.to_string(),
            })
        })
        .collect()
}

/// Parse `launchctl list` (`PID Status Label`, with a header row).
#[must_use]
pub fn parse_launchctl_list(stdout: &str) -> Vec<ServiceInfo> {
    stdout
        .lines()
        .filter(|line| !line.starts_with("PID"))
        .filter_map(|line| {
            let mut cols = line.split_whitespace();
            let pid = cols.next()?;
            let status = cols.next()?;
            let label = cols.next()?;
            let is_running = pid != "-";
            let state = if is_running {
                format!("running (pid {pid})")
            } else if status == "0" {
                "stopped".to_string()
            } else {
                format!("exited ({status})")
            };
            Some(ServiceInfo {
                name: label.to_string(),
                is_running,
                state,
            })
        })
        .collect()
}

/// Parse `sc query type= service state= all`.
///
/// Each service is a block starting with `SERVICE_NAME:` and containing a
/// `STATE : 4  RUNNING` line.
#[must_use]
pub fn parse_sc_query(stdout: &str) -> Vec<ServiceInfo> {
    let mut services = Vec::new();
    let mut current: Option<ServiceInfo> = None;
    for line in stdout.lines().map(str::trim) {
        if let Some(name) = line.strip_prefix("SERVICE_NAME:") {
            services.extend(current.take());
            current = Some(ServiceInfo {
                name: name.trim().to_string(),
                is_running: false,
                state: "UNKNOWN".to_string(),
            });
        } else if line.starts_with("STATE") {
            let Some((_, rest)) = line.split_once(':') else {
                continue;
            };
            let mut words = rest.split_whitespace();
            let code = words.next().unwrap_or_default();
            let state = words.next().unwrap_or(code);
            if let Some(svc) = current.as_mut() {
                svc.is_running = state == "RUNNING";
                svc.state = state.to_string();
            }
        }
    }
    services.extend(current);
    services
}
