// src/core/tools/port_scan.rs

use serde::Serialize;
use std::time::Duration;
use strum::{Display, EnumIter};
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter, Serialize)]
pub enum ScanType {
    Basic,
    Advanced,
}

impl ScanType {
    pub fn latency(self) -> Duration {
        match self {
            ScanType::Basic => Duration::from_millis(2500),
            ScanType::Advanced => Duration::from_millis(4000),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize)]
#[strum(serialize_all = "lowercase")]
pub enum PortState {
    Open,
    Closed,
    Filtered,
}

#[derive(Debug, Clone, Serialize)]
pub struct PortResult {
    pub port: u16,
    pub protocol: &'static str,
    pub state: PortState,
    pub service: &'static str,
    pub version: Option<&'static str>,
}

#[derive(Debug, Clone, Serialize)]
pub struct HostInfo {
    pub ip: String,
    pub hostname: Option<String>,
    pub os: Option<String>,
    pub uptime: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PortScanReport {
    pub target: String,
    pub scan_type: ScanType,
    pub host: HostInfo,
    pub ports: Vec<PortResult>,
}

impl PortScanReport {
    pub fn open_ports(&self) -> impl Iterator<Item = &PortResult> {
        self.ports.iter().filter(|p| p.state == PortState::Open)
    }
}

const fn port(
    port: u16,
    state: PortState,
    service: &'static str,
    version: Option<&'static str>,
) -> PortResult {
    PortResult { port, protocol: "tcp", state, service, version }
}

const BASIC_PORTS: &[PortResult] = &[
    port(22, PortState::Open, "ssh", Some("OpenSSH 8.2")),
    port(80, PortState::Open, "http", Some("Apache 2.4.41")),
    port(443, PortState::Open, "https", Some("Apache 2.4.41")),
    port(25, PortState::Filtered, "smtp", None),
    port(110, PortState::Closed, "pop3", None),
];

const ADVANCED_PORTS: &[PortResult] = &[
    port(3306, PortState::Open, "mysql", Some("MySQL 8.0.23")),
    port(5432, PortState::Closed, "postgresql", None),
    port(21, PortState::Filtered, "ftp", None),
];

/// Produces the simulated scan result for `target`.
pub fn scan(target: &str, scan_type: ScanType) -> PortScanReport {
    info!(target, %scan_type, "Simulating port scan.");

    let mut ports = BASIC_PORTS.to_vec();
    if scan_type == ScanType::Advanced {
        ports.extend_from_slice(ADVANCED_PORTS);
    }

    let advanced = scan_type == ScanType::Advanced;
    PortScanReport {
        target: target.to_string(),
        scan_type,
        host: HostInfo {
            ip: "192.168.1.100".to_string(),
            hostname: Some("example.com".to_string()),
            os: advanced.then(|| "Linux Ubuntu 20.04".to_string()),
            uptime: advanced.then(|| "7 days, 12 hours".to_string()),
        },
        ports,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_scan() {
        let report = scan("10.0.0.1", ScanType::Basic);
        assert_eq!(report.ports.len(), 5);
        assert_eq!(report.open_ports().count(), 3);
        assert!(report.host.os.is_none());
    }

    #[test]
    fn advanced_scan_adds_ports_and_host_details() {
        let report = scan("10.0.0.1", ScanType::Advanced);
        assert_eq!(report.ports.len(), 8);
        assert_eq!(report.open_ports().map(|p| p.port).collect::<Vec<_>>(), vec![22, 80, 443, 3306]);
        assert_eq!(report.host.os.as_deref(), Some("Linux Ubuntu 20.04"));
        assert!(ScanType::Advanced.latency() > ScanType::Basic.latency());
    }

    #[test]
    fn state_renders_lowercase() {
        assert_eq!(PortState::Filtered.to_string(), "filtered");
    }
}
