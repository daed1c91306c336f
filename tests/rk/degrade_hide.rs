//! Degrade-hide specs
//!
//! A domain's exports disappear from the admin surface as soon as it
//! stops being ready, and reappear once it recovers.

use crate::prelude::*;
use rk_core::{Health, HealthStatus};
use std::time::SystemTime;

async fn exports_for(running: &RunningKernel, id: &str) -> serde_json::Value {
    let kernels: Vec<serde_json::Value> = reqwest::get(running.url("/admin/kernels")).await.expect("request").json().await.expect("json");
    kernels.into_iter().find(|k| k["id"] == id).expect("kernel present")["exports"].clone()
}

#[tokio::test]
async fn a_degraded_domain_hides_its_exports_until_it_recovers() {
    let cfg = config_with_domains(vec![site_spec("site-1")]);
    let running = RunningKernel::start(cfg).await;

    assert!(exports_for(&running, "site-1").await.is_object(), "site-1 should export while ready");

    running.kernel.registry.update_health("site-1", Health::new(HealthStatus::Degraded, SystemTime::now()).with_reason("forced by spec"));

    let hidden = wait_for(WAIT_MAX_MS, || async { exports_for(&running, "site-1").await.is_null() }).await;
    assert!(hidden, "exports should be hidden once the degradation policy observes the non-ready status");

    running.kernel.registry.update_health("site-1", Health::new(HealthStatus::Ready, SystemTime::now()));

    let restored = wait_for(WAIT_MAX_MS, || async { exports_for(&running, "site-1").await.is_object() }).await;
    assert!(restored, "exports should be restored once the domain is ready again");

    running.shutdown().await;
}
