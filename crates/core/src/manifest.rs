// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! A kernel's passport: identity, version, and capability declarations.

use crate::scope::Scope;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Identifies a kernel uniquely within its parent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    pub kernel_id: String,
    pub version: String,
    pub scope: Option<Scope>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub features: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requires: Option<HashMap<String, serde_json::Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resources: Option<HashMap<String, serde_json::Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub security: Option<HashMap<String, serde_json::Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compat: Option<HashMap<String, serde_json::Value>>,
}

impl Manifest {
    pub fn new(kernel_id: impl Into<String>, version: impl Into<String>, scope: Scope) -> Self {
        Self {
            kernel_id: kernel_id.into(),
            version: version.into(),
            scope: Some(scope),
            ..Default::default()
        }
    }

    pub fn with_features(mut self, features: impl IntoIterator<Item = String>) -> Self {
        self.features = features.into_iter().collect();
        self
    }
}

#[cfg(test)]
#[path = "manifest_tests.rs"]
mod tests;
