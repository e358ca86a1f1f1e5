// ── Runtime connection configuration ──
//
// Describes *how* to reach the surveillance backend. The consuming UI
// constructs a `MonitorConfig` and hands it in — core never reads config
// files.

use std::time::Duration;

use url::Url;

/// TLS verification strategy.
#[derive(Debug, Clone, Default)]
pub enum TlsVerification {
    /// System CA store (strict).
    SystemDefaults,
    /// Custom CA certificate file.
    CustomCa(std::path::PathBuf),
    /// Skip verification (self-signed certs). Default for self-hosted
    /// backends on the local network.
    #[default]
    DangerAcceptInvalid,
}

impl PartialEq for TlsVerification {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::SystemDefaults, Self::SystemDefaults)
            | (Self::DangerAcceptInvalid, Self::DangerAcceptInvalid) => true,
            (Self::CustomCa(a), Self::CustomCa(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for TlsVerification {}

/// Configuration for monitoring a single backend.
#[derive(Debug, Clone)]
pub struct MonitorConfig {
    /// Backend URL (e.g., `http://localhost:5000`).
    pub base_url: Url,
    /// TLS verification strategy.
    pub tls: TlsVerification,
    /// Request timeout.
    pub timeout: Duration,
    /// How often to run a full refresh cycle. Zero disables polling
    /// (manual refresh only).
    pub refresh_interval: Duration,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".parse().expect("valid default URL"),
            tls: TlsVerification::default(),
            timeout: Duration::from_secs(30),
            refresh_interval: Duration::from_secs(30),
        }
    }
}
