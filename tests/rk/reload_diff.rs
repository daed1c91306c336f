//! Reload-diff specs
//!
//! Reloading the domain manager with a new desired list starts newly
//! added domains, stops removed ones, relaunches changed ones, and
//! leaves unchanged ones running undisturbed.

use crate::prelude::*;

#[tokio::test]
async fn reload_starts_added_domains_and_stops_removed_ones() {
    let cfg = config_with_domains(vec![site_spec("site-a"), site_spec("site-b")]);
    let running = RunningKernel::start(cfg).await;

    let mut running_ids = running.kernel.domain_manager.running_ids();
    running_ids.sort();
    assert_eq!(running_ids, vec!["site-a".to_string(), "site-b".to_string()]);

    running.kernel.domain_manager.reload(vec![site_spec("site-a"), site_spec("site-c")]).await;

    let mut running_ids = running.kernel.domain_manager.running_ids();
    running_ids.sort();
    assert_eq!(running_ids, vec!["site-a".to_string(), "site-c".to_string()]);
    assert!(running.kernel.registry.get("site-b").is_none(), "removed domain should be unregistered");
    assert!(running.kernel.registry.get("site-c").is_some(), "added domain should be registered");

    running.shutdown().await;
}

#[tokio::test]
async fn reload_with_an_unchanged_spec_leaves_the_domain_alone() {
    let spec = site_spec("site-a");
    let cfg = config_with_domains(vec![spec.clone()]);
    let running = RunningKernel::start(cfg).await;

    let registered_before = running.kernel.registry.get("site-a").expect("site-a registered");
    running.kernel.domain_manager.reload(vec![spec]).await;
    let registered_after = running.kernel.registry.get("site-a").expect("site-a still registered");

    assert_eq!(registered_before.registered_at, registered_after.registered_at, "an unchanged spec should not relaunch the domain");

    running.shutdown().await;
}

#[tokio::test]
async fn reload_with_a_changed_spec_relaunches_the_domain() {
    let cfg = config_with_domains(vec![site_spec("site-a")]);
    let running = RunningKernel::start(cfg).await;
    let registered_before = running.kernel.registry.get("site-a").expect("site-a registered");

    let mut changed = site_spec("site-a");
    changed.feature_flags.insert("extra".to_string(), true);
    running.kernel.domain_manager.reload(vec![changed]).await;

    let registered_after = running.kernel.registry.get("site-a").expect("site-a still registered");
    assert!(registered_after.registered_at > registered_before.registered_at, "a changed spec should relaunch (and so re-register) the domain");

    running.shutdown().await;
}
