// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Assembles every component into one running Root Kernel: the bus, the
//! discovery registry, the degradation policy and health aggregator, the
//! domain manager (with the `site` kind registered), the admin surface,
//! and the in-process log ingest sink.

use crate::config::{ConfigError, RootConfig};
use rk_admin::{AdminApi, AdminCore};
use rk_core::{Health, Manifest, Scope};
use rk_domain::{DomainManager, FactoryRegistry, SiteDomain};
use rk_ingest::HubIngestSink;
use rk_registry::{DegradationPolicy, DiscoveryRegistry, HealthAggregator};
use rk_runtime::{EventBus, KernelModule};
use rk_telemetry::{SafeLogHub, SafeLogHubOptions};
use std::sync::Arc;
use std::time::{Duration, SystemTime};
use tokio_util::sync::CancellationToken;

/// The root kernel's own id in the discovery registry, distinct from
/// `root.node_id` (a node-identity attribute, not a kernel id).
pub const ROOT_KERNEL_ID: &str = "rk";

const DEGRADATION_INTERVAL: Duration = Duration::from_secs(1);
const HEALTH_INTERVAL: Duration = Duration::from_secs(2);

/// Every long-lived component the root kernel owns, already wired
/// together. `bootstrap` builds this; `run` drives it until cancelled.
pub struct RootKernel {
    pub registry: Arc<DiscoveryRegistry>,
    pub bus: Arc<EventBus>,
    pub domain_manager: Arc<DomainManager>,
    pub degradation_policy: Arc<DegradationPolicy>,
    pub health_aggregator: Arc<HealthAggregator>,
    pub admin: Arc<dyn AdminApi>,
    pub hub: Arc<SafeLogHub>,
    pub ingest: Arc<HubIngestSink>,
}

impl RootKernel {
    /// Wires every component against `cfg`, registers the root kernel's
    /// own record, and reloads the configured domain list. Does not
    /// start the background loops or the admin HTTP surface — call
    /// [`RootKernel::run`] for that.
    pub async fn bootstrap(cfg: &RootConfig) -> Arc<Self> {
        let bus = EventBus::new(if cfg.telemetry.buffer == 0 { 16 } else { cfg.telemetry.buffer });
        let registry = Arc::new(DiscoveryRegistry::new());

        let manifest = Manifest::new(ROOT_KERNEL_ID, env!("CARGO_PKG_VERSION"), Scope::Root)
            .with_features(["admin".to_string(), "discovery".to_string()]);
        registry.register(rk_core::KernelRecord::new(ROOT_KERNEL_ID, Scope::Root, manifest, Health::ready_at(SystemTime::now())));

        let hub = SafeLogHub::spawn(bus.clone(), SafeLogHubOptions { buffer: cfg.telemetry.buffer, ..Default::default() });
        let ingest = Arc::new(HubIngestSink::new(hub.clone()));

        let mut factories = FactoryRegistry::new();
        factories.register("site", Arc::new(|id: &str, host| Box::new(SiteDomain::new(id, host)) as Box<dyn KernelModule>));
        let domain_manager = Arc::new(DomainManager::new(registry.clone(), bus.clone(), factories));

        let degradation_policy = Arc::new(DegradationPolicy::new(registry.clone()));
        let health_aggregator = Arc::new(HealthAggregator::new(registry.clone(), bus.clone()));
        let admin: Arc<dyn AdminApi> = Arc::new(AdminCore::new(registry.clone()).with_health_aggregator(health_aggregator.clone()));

        domain_manager.reload(cfg.domains.clone()).await;

        Arc::new(Self { registry, bus, domain_manager, degradation_policy, health_aggregator, admin, hub, ingest })
    }

    /// Runs the root kernel until `ctx` is cancelled: starts the
    /// degradation policy and health aggregator loops, and serves the
    /// admin HTTP surface on `cfg.admin.addr`. The ingest surface
    /// (`cfg.admin.grpc_addr`) stays in-process only — no gRPC/tonic
    /// listener is bound, matching the streaming RPC carrier's
    /// interface-only scope; `self.ingest` is reachable directly by
    /// anything holding this `RootKernel`.
    pub async fn run(self: Arc<Self>, cfg: &RootConfig, ctx: CancellationToken) -> Result<(), ConfigError> {
        cfg.validate()?;

        tracing::info!(node_id = %cfg.root.node_id, zone = %cfg.root.zone, "root kernel starting");
        tracing::info!(grpc_addr = %cfg.admin.grpc_addr, "log ingest configured, serving in-process only (no gRPC carrier in this build)");

        let degradation = self.degradation_policy.clone();
        let degradation_ctx = ctx.clone();
        tokio::spawn(async move { degradation.run(degradation_ctx, DEGRADATION_INTERVAL).await });

        let aggregator = self.health_aggregator.clone();
        let aggregator_ctx = ctx.clone();
        tokio::spawn(async move { aggregator.run(aggregator_ctx, HEALTH_INTERVAL).await });

        let router = rk_admin::router::build(self.admin.clone(), self.bus.clone());
        let bind_addr = cfg.admin.http_bind_addr();
        let listener = tokio::net::TcpListener::bind(&bind_addr)
            .await
            .map_err(|source| ConfigError::Bind { addr: bind_addr.clone(), source })?;
        tracing::info!(addr = %bind_addr, "admin http surface listening");

        let shutdown_ctx = ctx.clone();
        axum::serve(listener, router)
            .with_graceful_shutdown(async move { shutdown_ctx.cancelled().await })
            .await
            .map_err(ConfigError::Serve)
    }
}

#[cfg(test)]
#[path = "kernel_tests.rs"]
mod tests;
