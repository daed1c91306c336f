// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Hides a kernel's exports from registry reads whenever its health is
//! not `ready`, and restores the original exports once it recovers.

use crate::registry::DiscoveryRegistry;
use parking_lot::Mutex;
use rk_core::{Exports, HealthStatus};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

const DEFAULT_INTERVAL: Duration = Duration::from_secs(1);

/// Snapshots are keyed by kernel id. Idempotent across ticks: observing
/// `degraded` on consecutive ticks does not overwrite the stored
/// original exports.
pub struct DegradationPolicy {
    registry: Arc<DiscoveryRegistry>,
    snapshot: Mutex<HashMap<String, Option<Exports>>>,
}

impl DegradationPolicy {
    pub fn new(registry: Arc<DiscoveryRegistry>) -> Self {
        Self { registry, snapshot: Mutex::new(HashMap::new()) }
    }

    fn tick(&self) {
        for record in self.registry.list() {
            let mut snapshot = self.snapshot.lock();
            match record.health.status {
                HealthStatus::Ready => {
                    if let Some(original) = snapshot.remove(&record.id) {
                        self.registry.set_exports(&record.id, original);
                    }
                }
                HealthStatus::Degraded | HealthStatus::Failed | HealthStatus::Draining | HealthStatus::Stopped => {
                    if !snapshot.contains_key(&record.id) {
                        snapshot.insert(record.id.clone(), record.exports.clone());
                        drop(snapshot);
                        self.registry.set_exports(&record.id, None);
                    }
                }
            }
        }
    }

    /// Runs until `ctx` is cancelled, re-evaluating every `interval`
    /// (falls back to 1s if zero).
    pub async fn run(&self, ctx: CancellationToken, interval: Duration) {
        let interval = if interval.is_zero() { DEFAULT_INTERVAL } else { interval };
        let mut ticker = tokio::time::interval(interval);
        loop {
            tokio::select! {
                _ = ctx.cancelled() => return,
                _ = ticker.tick() => self.tick(),
            }
        }
    }
}

#[cfg(test)]
#[path = "degradation_policy_tests.rs"]
mod tests;
