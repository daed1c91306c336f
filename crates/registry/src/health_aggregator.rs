// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Periodically recomputes the registry's aggregate health and publishes
//! it on the event bus, so subscribers never have to poll the registry
//! directly.

use crate::registry::DiscoveryRegistry;
use parking_lot::RwLock;
use rk_core::Health;
use rk_runtime::EventBus;
use std::sync::Arc;
use std::time::{Duration, SystemTime};
use tokio_util::sync::CancellationToken;

const DEFAULT_INTERVAL: Duration = Duration::from_secs(2);
pub const TOPIC_HEALTH_ROOT: &str = "telemetry.health.root";

/// Holds the last computed aggregate. [`HealthAggregator::snapshot`] is
/// lock-free from the caller's perspective (a single `RwLock` read, no
/// contention with the registry itself).
pub struct HealthAggregator {
    registry: Arc<DiscoveryRegistry>,
    bus: Arc<EventBus>,
    last: RwLock<Health>,
}

impl HealthAggregator {
    pub fn new(registry: Arc<DiscoveryRegistry>, bus: Arc<EventBus>) -> Self {
        Self { registry, bus, last: RwLock::new(Health::ready_at(SystemTime::now())) }
    }

    pub fn snapshot(&self) -> Health {
        self.last.read().clone()
    }

    fn recompute(&self) -> Health {
        let health = self.registry.aggregate_health();
        *self.last.write() = health.clone();
        self.bus.publish(TOPIC_HEALTH_ROOT, Arc::new(health.clone()));
        health
    }

    /// Runs until `ctx` is cancelled, recomputing every `interval`
    /// (falls back to 2s if zero).
    pub async fn run(&self, ctx: CancellationToken, interval: Duration) {
        let interval = if interval.is_zero() { DEFAULT_INTERVAL } else { interval };
        let mut ticker = tokio::time::interval(interval);
        loop {
            tokio::select! {
                _ = ctx.cancelled() => return,
                _ = ticker.tick() => {
                    self.recompute();
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "health_aggregator_tests.rs"]
mod tests;
