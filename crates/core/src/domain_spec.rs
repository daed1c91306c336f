// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Declarative description of one domain kernel, as reconciled by the
//! domain manager.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Where a domain kernel actually runs. The core only implements
/// `Inproc`; `Process`/`Remote` are dispatched to external launchers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LaunchMode {
    Inproc,
    Process,
    Remote,
}

/// A desired domain kernel, as listed in `RootConfig.domains` or pushed
/// via a reload. `config` is an untyped bag; only `http_addr` and
/// `log_gateway` are read by the core itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainSpec {
    pub id: String,
    pub mode: LaunchMode,
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entry: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub feature_flags: HashMap<String, bool>,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub config: HashMap<String, Value>,
}

impl DomainSpec {
    pub fn new(id: impl Into<String>, mode: LaunchMode, kind: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            mode,
            kind: kind.into(),
            entry: None,
            command: None,
            feature_flags: HashMap::new(),
            config: HashMap::new(),
        }
    }

    /// `true` iff this spec is eligible for in-process reconciliation:
    /// mode is `Inproc` and `registered_kinds` knows how to build `kind`.
    pub fn is_managed(&self, registered_kinds: &[&str]) -> bool {
        self.mode == LaunchMode::Inproc && registered_kinds.contains(&self.kind.as_str())
    }

    /// Deep-equality diff used by the domain manager to decide whether a
    /// running instance must be stopped and relaunched.
    pub fn differs_from(&self, other: &DomainSpec) -> bool {
        self.mode != other.mode || self.kind != other.kind || self.config != other.config
            || self.feature_flags != other.feature_flags
    }

    pub fn http_addr(&self) -> &str {
        self.config
            .get("http_addr")
            .and_then(Value::as_str)
            .unwrap_or(":8081")
    }
}

#[cfg(test)]
#[path = "domain_spec_tests.rs"]
mod tests;
