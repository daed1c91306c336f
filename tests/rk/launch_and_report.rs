//! Launch-and-report specs
//!
//! A freshly booted root kernel registers itself and every configured
//! domain, and reports both as ready over the admin surface.

use crate::prelude::*;

#[tokio::test]
async fn booting_reports_the_root_kernel_and_its_domains_as_ready() {
    let cfg = config_with_domains(vec![site_spec("site-1")]);
    let running = RunningKernel::start(cfg).await;

    let health: serde_json::Value = reqwest::get(running.url("/admin/health")).await.expect("request").json().await.expect("json");
    assert_eq!(health["summary"]["status"], "ready");
    assert_eq!(health["kernels"]["rk"]["status"], "ready");
    assert_eq!(health["kernels"]["site-1"]["status"], "ready");

    let kernels: Vec<serde_json::Value> = reqwest::get(running.url("/admin/kernels")).await.expect("request").json().await.expect("json");
    let ids: Vec<&str> = kernels.iter().map(|k| k["id"].as_str().unwrap()).collect();
    assert_eq!(ids, vec!["rk", "site-1"]);
    let site = kernels.iter().find(|k| k["id"] == "site-1").expect("site-1 present");
    assert!(site["exports"].is_object(), "a ready domain should export its capabilities");

    running.shutdown().await;
}

#[tokio::test]
async fn booting_with_no_configured_domains_still_reports_the_root_kernel() {
    let cfg = config_with_domains(vec![]);
    let running = RunningKernel::start(cfg).await;

    assert_eq!(running.kernel.domain_manager.running_ids(), Vec::<String>::new());
    let health: serde_json::Value = reqwest::get(running.url("/admin/health")).await.expect("request").json().await.expect("json");
    assert_eq!(health["summary"]["status"], "ready");
    assert_eq!(health["kernels"]["rk"]["status"], "ready");

    running.shutdown().await;
}
