// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The in-memory map of kernel id to [`KernelRecord`] that the Domain
//! Manager, Degradation Policy, and Health Aggregator all observe.

use parking_lot::RwLock;
use rk_core::{Exports, Health, HealthStatus, KernelRecord};
use std::collections::HashMap;
use std::time::SystemTime;

/// Single-mutex registry: writes take the lock exclusively, reads clone
/// out under a shared lock so callers never hold a reference into the
/// live map.
#[derive(Default)]
pub struct DiscoveryRegistry {
    records: RwLock<HashMap<String, KernelRecord>>,
}

impl DiscoveryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or overwrites by id.
    pub fn register(&self, record: KernelRecord) {
        self.records.write().insert(record.id.clone(), record);
    }

    pub fn unregister(&self, id: &str) {
        self.records.write().remove(id);
    }

    /// No-op if `id` is not registered.
    pub fn update_health(&self, id: &str, health: Health) {
        if let Some(record) = self.records.write().get_mut(id) {
            record.health = health;
        }
    }

    /// No-op if `id` is not registered. `exports: None` hides the
    /// kernel's capabilities from registry reads without removing the
    /// record itself.
    pub fn set_exports(&self, id: &str, exports: Option<Exports>) {
        if let Some(record) = self.records.write().get_mut(id) {
            record.exports = exports;
        }
    }

    pub fn get(&self, id: &str) -> Option<KernelRecord> {
        self.records.read().get(id).cloned()
    }

    pub fn list(&self) -> Vec<KernelRecord> {
        self.records.read().values().cloned().collect()
    }

    /// Folds every record's health into one summary using the
    /// `failed > degraded > draining > stopped > ready` precedence. The
    /// reason names the lowest-id record at the worst observed status;
    /// `since` is the earliest `since` among the records that share it.
    /// An empty registry is `ready`, timestamped now.
    pub fn aggregate_health(&self) -> Health {
        let mut records = self.list();
        if records.is_empty() {
            return Health::ready_at(SystemTime::now());
        }
        records.sort_by(|a, b| a.id.cmp(&b.id));

        let worst = records
            .iter()
            .map(|r| r.health.status)
            .fold(HealthStatus::Ready, HealthStatus::worse_of);

        let contributors: Vec<&KernelRecord> = records.iter().filter(|r| r.health.status == worst).collect();
        let since = contributors
            .iter()
            .map(|r| r.health.since)
            .min()
            .unwrap_or_else(SystemTime::now);

        let reason = if worst == HealthStatus::Ready {
            None
        } else {
            contributors.first().map(|r| format!("kernel {worst}: {}", r.id))
        };

        Health { status: worst, reason, since }
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
