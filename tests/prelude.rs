// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared harness for the root kernel's end-to-end scenario specs: a
//! running kernel over loopback sockets, plus free-port and
//! bounded-wait helpers.

use rk_core::{DomainSpec, LaunchMode};
use rk_daemon::{ConfigError, RootConfig, RootKernel};
use std::collections::HashMap;
use std::net::TcpListener as StdTcpListener;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

pub const WAIT_MAX_MS: u64 = 3_000;

pub fn free_port_addr() -> String {
    let listener = StdTcpListener::bind("127.0.0.1:0").expect("bind ephemeral port");
    format!("127.0.0.1:{}", listener.local_addr().expect("local addr").port())
}

/// A `site`-kind domain spec with its own free `http_addr`/`log_gateway`
/// ports, so parallel specs never collide on a fixed port.
pub fn site_spec(id: &str) -> DomainSpec {
    let mut spec = DomainSpec::new(id, LaunchMode::Inproc, "site");
    spec.config.insert("http_addr".to_string(), serde_json::Value::from(free_port_addr()));
    spec.config.insert("log_gateway".to_string(), serde_json::Value::from(free_port_addr()));
    spec
}

/// A `RootConfig` with fresh admin ports and the given domain list.
pub fn config_with_domains(domains: Vec<DomainSpec>) -> RootConfig {
    let mut cfg = RootConfig::default();
    cfg.admin.addr = free_port_addr();
    cfg.admin.grpc_addr = free_port_addr();
    cfg.domains = domains;
    cfg
}

/// A bootstrapped, serving root kernel. Call [`RunningKernel::shutdown`]
/// to cancel it; dropping without shutting down leaves its tasks running
/// for the rest of the process (acceptable for short-lived specs, but
/// prefer an explicit shutdown when the test depends on a clean stop).
pub struct RunningKernel {
    pub admin_addr: String,
    pub kernel: Arc<RootKernel>,
    ctx: CancellationToken,
    handle: tokio::task::JoinHandle<Result<(), ConfigError>>,
}

impl RunningKernel {
    pub async fn start(cfg: RootConfig) -> Self {
        let kernel = RootKernel::bootstrap(&cfg).await;
        let ctx = CancellationToken::new();
        let admin_addr = cfg.admin.addr.clone();

        let run_kernel = kernel.clone();
        let run_ctx = ctx.clone();
        let run_cfg = cfg.clone();
        let handle = tokio::spawn(async move { run_kernel.run(&run_cfg, run_ctx).await });

        let reachable = wait_for(WAIT_MAX_MS, || {
            let admin_addr = admin_addr.clone();
            async move { std::net::TcpStream::connect(&admin_addr).is_ok() }
        })
        .await;
        assert!(reachable, "admin http surface should start listening on {admin_addr}");

        Self { admin_addr, kernel, ctx, handle }
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.admin_addr, path)
    }

    pub async fn shutdown(self) {
        self.ctx.cancel();
        let result = tokio::time::timeout(Duration::from_secs(2), self.handle).await.expect("run task should finish promptly");
        assert!(result.expect("run task should not panic").is_ok());
    }
}

/// Polls `check` every 10ms until it resolves `true` or `max_ms`
/// elapses, returning the final check result either way.
pub async fn wait_for<F, Fut>(max_ms: u64, mut check: F) -> bool
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = bool>,
{
    let deadline = tokio::time::Instant::now() + Duration::from_millis(max_ms);
    while tokio::time::Instant::now() < deadline {
        if check().await {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    check().await
}
