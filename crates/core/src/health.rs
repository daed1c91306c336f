// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Health status and the aggregation precedence used across the registry.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::SystemTime;

/// A kernel's reported health.
///
/// Ordered worst-to-best as `Failed > Degraded > Draining > Stopped >
/// Ready` for the purposes of aggregation (see [`HealthStatus::rank`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Ready,
    Degraded,
    Failed,
    Draining,
    Stopped,
}

impl HealthStatus {
    /// Lower rank wins when folding a set of statuses into one aggregate
    /// (0 is worst). Mirrors the precedence in spec §3/§8:
    /// `failed > degraded > draining > stopped > ready`.
    fn rank(&self) -> u8 {
        match self {
            HealthStatus::Failed => 0,
            HealthStatus::Degraded => 1,
            HealthStatus::Draining => 2,
            HealthStatus::Stopped => 3,
            HealthStatus::Ready => 4,
        }
    }

    /// `self` if it outranks (is worse than or equal to) `other`.
    pub fn worse_of(self, other: HealthStatus) -> HealthStatus {
        if self.rank() <= other.rank() {
            self
        } else {
            other
        }
    }
}

impl fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            HealthStatus::Ready => "ready",
            HealthStatus::Degraded => "degraded",
            HealthStatus::Failed => "failed",
            HealthStatus::Draining => "draining",
            HealthStatus::Stopped => "stopped",
        };
        f.write_str(s)
    }
}

/// A health report: status, optional human-readable reason, and the
/// instant the status last changed. `since` is immutable within a status
/// run — it only advances when `status` itself changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Health {
    pub status: HealthStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    pub since: SystemTime,
}

impl Health {
    pub fn new(status: HealthStatus, since: SystemTime) -> Self {
        Self {
            status,
            reason: None,
            since,
        }
    }

    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// A fresh `ready` report timestamped `since`.
    pub fn ready_at(since: SystemTime) -> Self {
        Self::new(HealthStatus::Ready, since)
    }
}

#[cfg(test)]
#[path = "health_tests.rs"]
mod tests;
