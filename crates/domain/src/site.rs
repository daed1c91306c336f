// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! A demo domain kernel exporting one HTTP capability (`/hello`) and
//! running three supervised workers: the HTTP server itself, a log
//! forwarder, and a heartbeat. Gives the domain manager and supervisor
//! something concrete to reconcile and launch end to end.

use async_trait::async_trait;
use axum::routing::get;
use axum::Router;
use rk_core::host::Logger as HostLogger;
use rk_core::{Health, HealthStatus, Host, Manifest, RestartPolicy, Scope, WorkerSpec};
use rk_runtime::{EventBus, KernelModule, ModuleError, Supervisor, WorkerFn};
use rk_telemetry::{DialError, Dialer, Forwarder, LogSink};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, SystemTime};
use tokio_util::sync::CancellationToken;

const DEFAULT_HTTP_ADDR: &str = ":8081";
const DEFAULT_LOG_GATEWAY: &str = "127.0.0.1:8079";
const HEARTBEAT_INTERVAL: Duration = Duration::from_secs(3);

/// Always fails to connect. The real upward log-streaming RPC carrier is
/// out of scope for this module; the worker still demonstrates the
/// supervised-reconnect-with-backoff shape against this stand-in.
struct UnreachableDialer;

#[async_trait]
impl Dialer for UnreachableDialer {
    async fn dial(&self) -> Result<Arc<dyn LogSink>, DialError> {
        Err(DialError::Failed("no log gateway configured for this demo kernel".to_string()))
    }
}

pub struct SiteDomain {
    id: String,
    host: Host,
    http_addr: String,
    log_gateway: String,
    health: Health,
    supervisor: Option<Arc<Supervisor>>,
}

impl SiteDomain {
    pub fn new(id: impl Into<String>, host: Host) -> Self {
        Self {
            id: id.into(),
            host,
            http_addr: DEFAULT_HTTP_ADDR.to_string(),
            log_gateway: DEFAULT_LOG_GATEWAY.to_string(),
            health: Health::new(HealthStatus::Ready, SystemTime::now()),
            supervisor: None,
        }
    }

    fn event_bus(&self) -> Option<Arc<EventBus>> {
        self.host.event_bus.clone().and_then(|handle| handle.downcast::<EventBus>().ok())
    }
}

#[async_trait]
impl KernelModule for SiteDomain {
    fn manifest(&self) -> Manifest {
        Manifest::new(self.id.as_str(), "0.0.1", Scope::Domain)
            .with_features(["http".to_string(), "workers".to_string(), "log-forwarder".to_string()])
    }

    async fn on_load(&mut self) -> Result<(), ModuleError> {
        Ok(())
    }

    async fn on_init(&mut self) -> Result<(), ModuleError> {
        Ok(())
    }

    async fn on_configure(&mut self, config: &HashMap<String, Value>) -> Result<(), ModuleError> {
        if let Some(addr) = config.get("http_addr").and_then(Value::as_str).filter(|s| !s.is_empty()) {
            self.http_addr = addr.to_string();
        }
        if let Some(gateway) = config.get("log_gateway").and_then(Value::as_str).filter(|s| !s.is_empty()) {
            self.log_gateway = gateway.to_string();
        }
        Ok(())
    }

    async fn on_start(&mut self) -> Result<(), ModuleError> {
        let supervisor = Arc::new(Supervisor::new());

        supervisor
            .start(
                WorkerSpec::new("fk-hello-http", RestartPolicy::Permanent),
                hello_http_worker(self.id.clone(), self.http_addr.clone(), self.host.logger.clone()),
            )
            .map_err(|e| Box::new(e) as ModuleError)?;

        if let Some(bus) = self.event_bus() {
            supervisor
                .start(WorkerSpec::new("fk-log-forwarder", RestartPolicy::Permanent), log_forwarder_worker(bus, self.id.clone()))
                .map_err(|e| Box::new(e) as ModuleError)?;
        }

        supervisor
            .start(WorkerSpec::new("worker-logs", RestartPolicy::Permanent), heartbeat_worker(self.host.logger.clone()))
            .map_err(|e| Box::new(e) as ModuleError)?;

        self.supervisor = Some(supervisor);
        Ok(())
    }

    async fn on_drain(&mut self) -> Result<(), ModuleError> {
        Ok(())
    }

    async fn on_stop(&mut self) -> Result<(), ModuleError> {
        if let Some(supervisor) = self.supervisor.take() {
            supervisor.stop_all();
            supervisor.wait().await;
        }
        Ok(())
    }

    fn health(&self) -> Health {
        self.health.clone()
    }
}

fn hello_http_worker(id: String, addr: String, logger: Arc<dyn HostLogger>) -> WorkerFn {
    Arc::new(move |ctx: CancellationToken| {
        let id = id.clone();
        let addr = addr.clone();
        let logger = logger.clone();
        Box::pin(async move {
            let app = Router::new().route(
                "/hello",
                get(move || {
                    let id = id.clone();
                    async move { format!("hello from site: {id}\n") }
                }),
            );
            let listener = tokio::net::TcpListener::bind(&addr).await.map_err(|e| e.to_string())?;
            let mut fields = HashMap::new();
            fields.insert("addr".to_string(), Value::from(addr));
            logger.log("info", "http hello listening", &fields);

            axum::serve(listener, app)
                .with_graceful_shutdown(async move { ctx.cancelled().await })
                .await
                .map_err(|e| e.to_string())
        })
    })
}

fn log_forwarder_worker(bus: Arc<EventBus>, root_id: String) -> WorkerFn {
    Arc::new(move |ctx: CancellationToken| {
        let bus = bus.clone();
        let root_id = root_id.clone();
        Box::pin(async move {
            let forwarder = Forwarder::new(bus, Arc::new(UnreachableDialer), vec![rk_telemetry::TOPIC_LOGS.to_string()], root_id);
            forwarder.run(ctx).await;
            Ok(())
        })
    })
}

fn heartbeat_worker(logger: Arc<dyn HostLogger>) -> WorkerFn {
    Arc::new(move |ctx: CancellationToken| {
        let logger = logger.clone();
        Box::pin(async move {
            let mut ticker = tokio::time::interval(HEARTBEAT_INTERVAL);
            loop {
                tokio::select! {
                    _ = ctx.cancelled() => return Ok(()),
                    _ = ticker.tick() => {
                        let mut fields = HashMap::new();
                        fields.insert("component".to_string(), Value::from("site/heartbeat"));
                        logger.log("info", "site heartbeat", &fields);
                    }
                }
            }
        })
    })
}

#[cfg(test)]
#[path = "site_tests.rs"]
mod tests;
