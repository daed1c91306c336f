// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The lifecycle states a kernel module passes through.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A stage in the kernel lifecycle FSM.
///
/// Normal progression is `Load → Init → Configure → Start → Ready →
/// Draining → Stopped`. Any step may instead transition to `Failed`.
/// `Stopped` is terminal; `Failed` is recoverable only by full teardown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LifecycleState {
    Load,
    Init,
    Configure,
    Start,
    Ready,
    Degraded,
    Failed,
    Draining,
    Stopped,
}

impl LifecycleState {
    /// `true` for the single absorbing state of the FSM.
    pub fn is_terminal(&self) -> bool {
        matches!(self, LifecycleState::Stopped)
    }
}

impl fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LifecycleState::Load => "load",
            LifecycleState::Init => "init",
            LifecycleState::Configure => "configure",
            LifecycleState::Start => "start",
            LifecycleState::Ready => "ready",
            LifecycleState::Degraded => "degraded",
            LifecycleState::Failed => "failed",
            LifecycleState::Draining => "draining",
            LifecycleState::Stopped => "stopped",
        };
        f.write_str(s)
    }
}

impl Default for LifecycleState {
    fn default() -> Self {
        LifecycleState::Load
    }
}

#[cfg(test)]
#[path = "lifecycle_tests.rs"]
mod tests;
