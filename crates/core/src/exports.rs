// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Declarative capabilities a kernel makes available to the system.
//!
//! Exports are only visible in registry reads while the owning kernel is
//! `ready` — see [`crate::kernel_record::KernelRecord`] and the
//! degradation policy in `rk-registry`.

use serde::{Deserialize, Serialize};

/// A self-describing network capability (HTTP, gRPC, raw TCP, ...).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkEndpoint {
    pub name: String,
    pub protocol: String,
    pub address: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub version: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub paths: Vec<String>,
}

/// A bus event a kernel publishes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventSpec {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub version: String,
}

/// A streaming capability (e.g. an SSE or gRPC stream).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamSpec {
    pub name: String,
    pub protocol: String,
    pub address: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub version: String,
}

/// A CLI subcommand a kernel contributes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CliCommand {
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub version: String,
}

/// An in-process service usable only by co-located kernels.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalService {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub version: String,
}

/// The full set of capabilities a kernel provides.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exports {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub network: Vec<NetworkEndpoint>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub events: Vec<EventSpec>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub streams: Vec<StreamSpec>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub cli: Vec<CliCommand>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub local: Vec<LocalService>,
}

impl Exports {
    pub fn single_http(name: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            network: vec![NetworkEndpoint {
                name: name.into(),
                protocol: "http".to_string(),
                address: address.into(),
                version: "v1".to_string(),
                paths: vec!["/hello".to_string()],
            }],
            ..Default::default()
        }
    }
}

#[cfg(test)]
#[path = "exports_tests.rs"]
mod tests;
