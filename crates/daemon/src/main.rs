// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Root Kernel (rk)
//!
//! Boots the root kernel: loads and validates `RootConfig`, wires the
//! discovery registry, degradation policy, health aggregator, domain
//! manager, and admin HTTP surface, then runs until SIGINT/SIGTERM.

use rk_daemon::{ConfigError, RootConfig, RootKernel};
use std::path::PathBuf;
use tokio::signal::unix::{signal, SignalKind};
use tokio_util::sync::CancellationToken;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> std::process::ExitCode {
    setup_logging();

    let config_path = parse_config_path();
    match run(config_path).await {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "rk: fatal error");
            std::process::ExitCode::FAILURE
        }
    }
}

fn parse_config_path() -> Option<PathBuf> {
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" | "-c" => return args.next().map(PathBuf::from),
            other if other.starts_with("--config=") => return Some(PathBuf::from(&other["--config=".len()..])),
            _ => continue,
        }
    }
    std::env::var("RK_CONFIG").ok().map(PathBuf::from)
}

async fn run(config_path: Option<PathBuf>) -> Result<(), ConfigError> {
    let cfg = RootConfig::load(config_path.as_deref())?;
    cfg.validate()?;

    let kernel = RootKernel::bootstrap(&cfg).await;
    let ctx = CancellationToken::new();

    let shutdown_ctx = ctx.clone();
    tokio::spawn(async move {
        wait_for_shutdown_signal().await;
        info!("shutdown signal received, draining");
        shutdown_ctx.cancel();
    });

    kernel.run(&cfg, ctx).await
}

async fn wait_for_shutdown_signal() {
    let mut sigterm = match signal(SignalKind::terminate()) {
        Ok(sig) => sig,
        Err(err) => {
            error!(error = %err, "failed to install SIGTERM handler");
            std::future::pending::<()>().await;
            unreachable!()
        }
    };
    tokio::select! {
        _ = sigterm.recv() => {}
        _ = tokio::signal::ctrl_c() => {}
    }
}

fn setup_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
