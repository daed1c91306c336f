// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The registry's record of a single kernel instance.

use crate::exports::Exports;
use crate::health::Health;
use crate::manifest::Manifest;
use crate::scope::Scope;
use serde::{Deserialize, Serialize};
use std::time::SystemTime;

/// A snapshot of one kernel as known to the discovery registry.
///
/// Created on `Register`, mutated by `UpdateHealth`/`SetExports`, removed
/// on `Unregister`. Only the registry owns the live record; callers
/// always receive copies (see `rk-registry`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KernelRecord {
    pub id: String,
    pub scope: Scope,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    pub manifest: Manifest,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exports: Option<Exports>,
    pub health: Health,
    pub registered_at: SystemTime,
}

impl KernelRecord {
    pub fn new(id: impl Into<String>, scope: Scope, manifest: Manifest, health: Health) -> Self {
        Self {
            id: id.into(),
            scope,
            parent_id: None,
            manifest,
            exports: None,
            health,
            registered_at: SystemTime::now(),
        }
    }

    pub fn with_parent(mut self, parent_id: impl Into<String>) -> Self {
        self.parent_id = Some(parent_id.into());
        self
    }

    pub fn with_exports(mut self, exports: Exports) -> Self {
        self.exports = Some(exports);
        self
    }
}

#[cfg(test)]
#[path = "kernel_record_tests.rs"]
mod tests;
