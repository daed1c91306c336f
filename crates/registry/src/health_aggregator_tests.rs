// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::registry::DiscoveryRegistry;
use rk_core::{HealthStatus, KernelRecord, Manifest, Scope};
use tokio_util::sync::CancellationToken as Ct;

fn record(id: &str, status: HealthStatus) -> KernelRecord {
    KernelRecord::new(id, Scope::Function, Manifest::new(id, "1.0.0", Scope::Function), rk_core::Health::new(status, SystemTime::now()))
}

#[test]
fn snapshot_defaults_to_ready_before_any_tick() {
    let registry = Arc::new(DiscoveryRegistry::new());
    let bus = EventBus::new(4);
    let aggregator = HealthAggregator::new(registry, bus);
    assert_eq!(aggregator.snapshot().status, HealthStatus::Ready);
}

#[test]
fn recompute_stores_and_returns_the_registry_aggregate() {
    let registry = Arc::new(DiscoveryRegistry::new());
    registry.register(record("a", HealthStatus::Failed));
    let bus = EventBus::new(4);
    let aggregator = HealthAggregator::new(registry, bus);

    let health = aggregator.recompute();
    assert_eq!(health.status, HealthStatus::Failed);
    assert_eq!(aggregator.snapshot().status, HealthStatus::Failed);
}

#[tokio::test]
async fn run_publishes_on_the_health_root_topic() {
    let registry = Arc::new(DiscoveryRegistry::new());
    registry.register(record("a", HealthStatus::Degraded));
    let bus = EventBus::new(4);
    let mut rx = bus.subscribe(TOPIC_HEALTH_ROOT, Ct::new());
    let aggregator = Arc::new(HealthAggregator::new(registry, bus));

    let ctx = Ct::new();
    let handle = tokio::spawn({
        let aggregator = aggregator.clone();
        let ctx = ctx.clone();
        async move { aggregator.run(ctx, Duration::from_millis(5)).await }
    });

    let msg = tokio::time::timeout(Duration::from_millis(200), rx.rx.recv())
        .await
        .expect("no message published in time")
        .expect("channel closed");
    let health = msg.downcast::<Health>().expect("wrong message type");
    assert_eq!(health.status, HealthStatus::Degraded);

    ctx.cancel();
    let _ = handle.await;
}
