// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The root kernel's TOML configuration: node identity, admin listen
//! addresses, discovery/telemetry knobs, and the desired domain list.

use rk_core::DomainSpec;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// The daemon crate's one error enum: config loading/validation plus the
/// root kernel's own startup failures.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read { path: PathBuf, #[source] source: std::io::Error },
    #[error("failed to parse config file {path}: {source}")]
    Parse { path: PathBuf, #[source] source: toml::de::Error },
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("failed to bind admin listener on {addr}: {source}")]
    Bind { addr: String, #[source] source: std::io::Error },
    #[error("admin http surface error: {0}")]
    Serve(#[source] std::io::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RootSection {
    pub node_id: String,
    pub zone: String,
}

impl Default for RootSection {
    fn default() -> Self {
        Self { node_id: "rk-1".to_string(), zone: "dc-1".to_string() }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdminConfig {
    pub addr: String,
    pub grpc_addr: String,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self { addr: ":8090".to_string(), grpc_addr: ":8079".to_string() }
    }
}

impl AdminConfig {
    /// Normalizes a Go-style bind address (`":8090"`, meaning "all
    /// interfaces") into a socket address `TcpListener::bind` accepts.
    pub fn http_bind_addr(&self) -> String {
        normalize_bind_addr(&self.addr)
    }
}

fn normalize_bind_addr(addr: &str) -> String {
    match addr.strip_prefix(':') {
        Some(port) => format!("0.0.0.0:{port}"),
        None => addr.to_string(),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscoveryConfig {
    pub enabled: bool,
    pub advertise_internal: bool,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self { enabled: true, advertise_internal: true }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TelemetryFilters {
    #[serde(default)]
    pub level: String,
    #[serde(default)]
    pub kernel: String,
    #[serde(default)]
    pub scope: String,
    #[serde(default)]
    pub component: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetryConfig {
    pub level: String,
    pub buffer: usize,
    #[serde(default)]
    pub filters: TelemetryFilters,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self { level: "INFO".to_string(), buffer: 256, filters: TelemetryFilters { level: "INFO".to_string(), ..Default::default() } }
    }
}

fn default_domains() -> Vec<DomainSpec> {
    use rk_core::LaunchMode;
    use std::collections::HashMap;

    let mut feature_flags = HashMap::new();
    feature_flags.insert("http".to_string(), true);
    feature_flags.insert("workers".to_string(), true);
    feature_flags.insert("log_forwarder".to_string(), true);

    let mut config = HashMap::new();
    config.insert("http_addr".to_string(), serde_json::Value::from(":8081"));
    config.insert("log_gateway".to_string(), serde_json::Value::from("127.0.0.1:8079"));

    vec![DomainSpec { id: "site".to_string(), mode: LaunchMode::Inproc, kind: "site".to_string(), entry: None, command: None, feature_flags, config }]
}

/// The typed mirror of the root kernel's TOML configuration file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RootConfig {
    #[serde(default)]
    pub root: RootSection,
    #[serde(default)]
    pub admin: AdminConfig,
    #[serde(default)]
    pub discovery: DiscoveryConfig,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
    #[serde(default = "default_domains")]
    pub domains: Vec<DomainSpec>,
}

impl Default for RootConfig {
    fn default() -> Self {
        Self {
            root: RootSection::default(),
            admin: AdminConfig::default(),
            discovery: DiscoveryConfig::default(),
            telemetry: TelemetryConfig::default(),
            domains: default_domains(),
        }
    }
}

impl RootConfig {
    /// Loads the config at `path`, or the built-in default when `path`
    /// is `None` (mirrors the original's "empty path means defaults").
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read { path: path.to_path_buf(), source })?;
        toml::from_str(&raw).map_err(|source| ConfigError::Parse { path: path.to_path_buf(), source })
    }

    /// `admin.addr`/`admin.grpc_addr` are required; everything else has
    /// a usable default.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.admin.addr.is_empty() {
            return Err(ConfigError::MissingField("admin.addr"));
        }
        if self.admin.grpc_addr.is_empty() {
            return Err(ConfigError::MissingField("admin.grpc_addr"));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
