// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The tier of a kernel within the Root → Domain → Function hierarchy.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of `root`, `domain`, `function`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    Root,
    Domain,
    Function,
}

impl Scope {
    /// The string used as a bus topic suffix (`telemetry.logs.<scope>`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Scope::Root => "root",
            Scope::Domain => "domain",
            Scope::Function => "function",
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
#[path = "scope_tests.rs"]
mod tests;
