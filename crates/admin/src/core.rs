// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The reference [`AdminApi`] implementation: reads straight from the
//! discovery registry and (if attached) the health aggregator's cached
//! snapshot, and writes restart/drain as placeholder health transitions
//! — this surface does not actually restart or drain a kernel, it only
//! records operator intent in its health record, exactly as the root
//! kernel's own health machinery would observe a real restart/drain.

use crate::api::{AdminApi, HealthReport};
use async_trait::async_trait;
use parking_lot::RwLock;
use rk_core::{Health, HealthStatus, KernelRecord, Level};
use rk_registry::{DiscoveryRegistry, HealthAggregator};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::SystemTime;

pub struct AdminCore {
    registry: Arc<DiscoveryRegistry>,
    health: Option<Arc<HealthAggregator>>,
    log_level: RwLock<Level>,
}

impl AdminCore {
    pub fn new(registry: Arc<DiscoveryRegistry>) -> Self {
        Self { registry, health: None, log_level: RwLock::new(Level::Info) }
    }

    pub fn with_health_aggregator(mut self, health: Arc<HealthAggregator>) -> Self {
        self.health = Some(health);
        self
    }
}

#[async_trait]
impl AdminApi for AdminCore {
    async fn health_report(&self) -> HealthReport {
        let summary = match &self.health {
            Some(aggregator) => aggregator.snapshot(),
            None => self.registry.aggregate_health(),
        };
        let kernels: HashMap<String, Health> = self.registry.list().into_iter().map(|record| (record.id, record.health)).collect();
        HealthReport { summary, kernels, generated_at: SystemTime::now() }
    }

    async fn kernels(&self) -> Vec<KernelRecord> {
        self.registry.list()
    }

    async fn restart(&self, id: &str) {
        self.registry.update_health(id, Health::new(HealthStatus::Ready, SystemTime::now()).with_reason("manual restart"));
    }

    async fn drain(&self, id: &str) {
        self.registry.update_health(id, Health::new(HealthStatus::Draining, SystemTime::now()).with_reason("manual drain"));
    }

    fn log_level(&self) -> Level {
        *self.log_level.read()
    }

    fn set_log_level(&self, level: Level) {
        *self.log_level.write() = level;
    }
}

#[cfg(test)]
#[path = "core_tests.rs"]
mod tests;
