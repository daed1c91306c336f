// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Reconciles a desired list of [`DomainSpec`]s against the running set:
//! starts new ones, relaunches changed ones, stops removed ones.

use crate::error::DomainError;
use crate::factory::FactoryRegistry;
use parking_lot::Mutex;
use rk_core::{DomainSpec, Exports, Host, KernelRecord, Scope};
use rk_registry::DiscoveryRegistry;
use rk_runtime::{EventBus, Fsm, KernelModule};
use rk_telemetry::ScopedLogger;
use std::collections::HashMap;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

struct DomainRun {
    spec: DomainSpec,
    cancel: CancellationToken,
    fsm: Fsm<Box<dyn KernelModule>>,
}

/// Owns every currently-running inproc domain kernel. Reload is the only
/// mutating entry point; it is not safe to call concurrently with
/// itself (mirrors the single-threaded reconciliation loop it replaces).
pub struct DomainManager {
    registry: Arc<DiscoveryRegistry>,
    bus: Arc<EventBus>,
    factories: FactoryRegistry,
    runs: Mutex<HashMap<String, DomainRun>>,
}

impl DomainManager {
    pub fn new(registry: Arc<DiscoveryRegistry>, bus: Arc<EventBus>, factories: FactoryRegistry) -> Self {
        Self { registry, bus, factories, runs: Mutex::new(HashMap::new()) }
    }

    /// Returns the ids of domains currently running under this manager.
    pub fn running_ids(&self) -> Vec<String> {
        self.runs.lock().keys().cloned().collect()
    }

    /// Applies `specs`: unmanaged specs (wrong mode, or an unregistered
    /// kind) are skipped and logged at debug; everything else is
    /// started, relaunched on a meaningful diff, or left alone.
    pub async fn reload(&self, specs: Vec<DomainSpec>) {
        let registered_kinds = self.factories.registered_kinds();
        let mut index: HashMap<String, DomainSpec> = HashMap::new();
        for spec in specs {
            if !spec.is_managed(&registered_kinds) {
                tracing::debug!(id = %spec.id, mode = ?spec.mode, kind = %spec.kind, "domain reload skipped");
                continue;
            }
            index.insert(spec.id.clone(), spec);
        }

        let current_ids = self.running_ids();
        for id in current_ids {
            if !index.contains_key(&id) {
                self.stop(&id).await;
            }
        }

        for (id, spec) in index {
            let existing_spec = self.runs.lock().get(&id).map(|run| run.spec.clone());
            match existing_spec {
                None => {
                    if let Err(err) = self.launch(spec.clone()).await {
                        tracing::error!(id = %spec.id, kind = %spec.kind, error = %err, "domain reload launch failed");
                    }
                }
                Some(old_spec) if old_spec.differs_from(&spec) => {
                    self.stop(&id).await;
                    if let Err(err) = self.launch(spec.clone()).await {
                        tracing::error!(id = %spec.id, kind = %spec.kind, error = %err, "domain reload relaunch failed");
                    }
                }
                Some(_) => {
                    if let Some(run) = self.runs.lock().get_mut(&id) {
                        run.spec = spec;
                    }
                }
            }
        }
    }

    async fn launch(&self, spec: DomainSpec) -> Result<(), DomainError> {
        let factory = self.factories.get(&spec.kind).ok_or_else(|| DomainError::UnknownKind(spec.kind.clone()))?;

        let logger = Arc::new(ScopedLogger::new(self.bus.clone(), spec.id.as_str(), Scope::Domain.as_str(), spec.kind.as_str()));
        let event_bus: Arc<dyn std::any::Any + Send + Sync> = self.bus.clone();
        let host = Host::new(spec.id.as_str(), Scope::Domain)
            .with_logger(logger)
            .with_config(spec.config.clone())
            .with_event_bus(event_bus);

        let module = (factory)(&spec.id, host);
        let mut fsm = Fsm::new(module);
        fsm.run(&spec.config).await.map_err(|source| DomainError::LaunchFailed { id: spec.id.clone(), source })?;

        let record = KernelRecord::new(spec.id.clone(), Scope::Domain, fsm.module().manifest(), fsm.module().health())
            .with_exports(Exports::single_http("hello", spec.http_addr()));
        self.registry.register(record);

        self.runs.lock().insert(spec.id.clone(), DomainRun { spec, cancel: CancellationToken::new(), fsm });
        Ok(())
    }

    async fn stop(&self, id: &str) {
        let run = self.runs.lock().remove(id);
        if let Some(mut run) = run {
            let _ = run.fsm.drain().await;
            let _ = run.fsm.stop().await;
            run.cancel.cancel();
            self.registry.unregister(id);
        }
    }
}

#[cfg(test)]
#[path = "manager_tests.rs"]
mod tests;
